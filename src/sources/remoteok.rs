use reqwest::blocking::Client;
use serde::Deserialize;

use super::JobSource;
use crate::error::{Error, Result};
use crate::job::{select_matching, JobPosting};

const API_URL: &str = "https://remoteok.com/api";

pub struct RemoteOk {
    client: Client,
}

// The first array element is a legal notice without a position.
#[derive(Debug, Deserialize)]
struct RemoteOkItem {
    position: Option<String>,
    #[serde(default)]
    company: String,
    url: Option<String>,
}

impl RemoteOk {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl JobSource for RemoteOk {
    fn name(&self) -> &'static str {
        "remoteok"
    }

    fn fetch(&self, keywords: &[String], max: usize) -> Result<Vec<JobPosting>> {
        let body = super::get_text(&self.client, API_URL)?;
        parse_remoteok(&body, keywords, max)
    }
}

pub fn parse_remoteok(body: &str, keywords: &[String], max: usize) -> Result<Vec<JobPosting>> {
    let items: Vec<RemoteOkItem> =
        serde_json::from_str(body).map_err(|e| Error::Parse(format!("remoteok: {e}")))?;
    let postings = items.into_iter().filter_map(|item| {
        Some(JobPosting::new(
            item.position?.trim(),
            item.company.trim(),
            item.url?.trim(),
        ))
    });
    Ok(select_matching(postings, keywords, max))
}
