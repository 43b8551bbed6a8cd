use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("browser error: {0}")]
    Browser(String),
    #[error("remote table rejected record ({status}): {body}")]
    RemoteTable { status: u16, body: String },
}

impl Error {
    pub(crate) fn browser(err: impl std::fmt::Display) -> Self {
        Error::Browser(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
