use reqwest::blocking::Client;
use serde::Deserialize;

use super::JobSource;
use crate::error::{Error, Result};
use crate::job::{select_matching, JobPosting};

const API_URL: &str = "https://remotive.com/api/remote-jobs";

pub struct Remotive {
    client: Client,
}

#[derive(Debug, Deserialize)]
struct RemotiveResponse {
    #[serde(default)]
    jobs: Vec<RemotiveJob>,
}

#[derive(Debug, Deserialize)]
struct RemotiveJob {
    #[serde(default)]
    title: String,
    #[serde(default)]
    company_name: String,
    #[serde(default)]
    url: String,
}

impl Remotive {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl JobSource for Remotive {
    fn name(&self) -> &'static str {
        "remotive"
    }

    fn fetch(&self, keywords: &[String], max: usize) -> Result<Vec<JobPosting>> {
        let body = super::get_text(&self.client, API_URL)?;
        parse_remotive(&body, keywords, max)
    }
}

pub fn parse_remotive(body: &str, keywords: &[String], max: usize) -> Result<Vec<JobPosting>> {
    let response: RemotiveResponse =
        serde_json::from_str(body).map_err(|e| Error::Parse(format!("remotive: {e}")))?;
    let postings = response
        .jobs
        .into_iter()
        .map(|j| JobPosting::new(j.title.trim(), j.company_name.trim(), j.url.trim()));
    Ok(select_matching(postings, keywords, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "job-count": 3,
        "jobs": [
            {"id": 1, "title": "Backend Engineer", "company_name": "Acme", "url": "https://remotive.com/remote-jobs/1"},
            {"id": 2, "title": "Product Designer", "company_name": "Acme", "url": "https://remotive.com/remote-jobs/2"},
            {"id": 3, "title": "Rust Developer", "company_name": "Ferrous", "url": "https://remotive.com/remote-jobs/3", "salary": "$100k"}
        ]
    }"#;

    #[test]
    fn keeps_only_keyword_matches() {
        let jobs = parse_remotive(FIXTURE, &["backend".into(), "rust".into()], 10).unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0], JobPosting::new("Backend Engineer", "Acme", "https://remotive.com/remote-jobs/1"));
        assert_eq!(jobs[1].company, "Ferrous");
    }

    #[test]
    fn not_json_is_a_parse_error() {
        assert!(matches!(
            parse_remotive("<html>", &["rust".into()], 10),
            Err(Error::Parse(_))
        ));
    }
}
