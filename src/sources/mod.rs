//! One adapter per job board. Every adapter fetches a single listing page
//! (or API response), keeps the postings matching the configured keywords
//! and hands back uniform [`JobPosting`]s.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::Result;
use crate::job::JobPosting;

pub mod jobspresso;
pub mod remoteok;
pub mod remotive;
pub mod weworkremotely;

pub use jobspresso::Jobspresso;
pub use remoteok::RemoteOk;
pub use remotive::Remotive;
pub use weworkremotely::WeWorkRemotely;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

pub trait JobSource: Send {
    fn name(&self) -> &'static str;

    /// Postings whose title or company contains one of `keywords`, at most `max`.
    fn fetch(&self, keywords: &[String], max: usize) -> Result<Vec<JobPosting>>;
}

pub fn http_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()?)
}

/// All boards the bot scrapes, in call order.
pub fn default_sources(client: &Client) -> Vec<Box<dyn JobSource>> {
    vec![
        Box::new(Remotive::new(client.clone())),
        Box::new(RemoteOk::new(client.clone())),
        Box::new(WeWorkRemotely::new(client.clone())),
        Box::new(Jobspresso::new(client.clone())),
    ]
}

fn get_text(client: &Client, url: &str) -> Result<String> {
    let body = client.get(url).send()?.error_for_status()?.text()?;
    tracing::debug!(url, bytes = body.len(), "fetched listing page");
    Ok(body)
}

fn text_of(element: scraper::ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn absolute_url(base: &str, href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{}/{}", base.trim_end_matches('/'), href.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_links_are_joined_once() {
        assert_eq!(
            absolute_url("https://weworkremotely.com/", "/remote-jobs/acme-dev"),
            "https://weworkremotely.com/remote-jobs/acme-dev"
        );
        assert_eq!(absolute_url("https://a.b", "https://c.d/x"), "https://c.d/x");
    }
}
