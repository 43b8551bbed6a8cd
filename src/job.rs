use chrono::{DateTime, Utc};

/// Timestamp layout of the applied-jobs record: UTC, no offset, microseconds.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub url: String,
}

impl JobPosting {
    pub fn new(
        title: impl Into<String>,
        company: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            company: company.into(),
            url: url.into(),
        }
    }

    /// True when any keyword occurs in title or company, ignoring case.
    pub fn matches_any(&self, keywords: &[String]) -> bool {
        let haystack = format!("{} {}", self.title, self.company).to_lowercase();
        keywords.iter().any(|kw| {
            let kw = kw.trim().to_lowercase();
            !kw.is_empty() && haystack.contains(kw.as_str())
        })
    }
}

/// Keeps postings that match a keyword and carry a title and url, up to `max`.
pub fn select_matching(
    postings: impl IntoIterator<Item = JobPosting>,
    keywords: &[String],
    max: usize,
) -> Vec<JobPosting> {
    postings
        .into_iter()
        .filter(|p| !p.url.trim().is_empty() && !p.title.trim().is_empty())
        .filter(|p| p.matches_any(keywords))
        .take(max)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationRecord {
    pub timestamp: DateTime<Utc>,
    pub title: String,
    pub company: String,
    pub url: String,
}

impl ApplicationRecord {
    pub fn now(job: &JobPosting) -> Self {
        Self::at(Utc::now(), job)
    }

    pub fn at(timestamp: DateTime<Utc>, job: &JobPosting) -> Self {
        Self {
            timestamp,
            title: job.title.clone(),
            company: job.company.clone(),
            url: job.url.clone(),
        }
    }

    pub fn timestamp_string(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn keyword_match_is_case_insensitive_over_title_and_company() {
        let job = JobPosting::new("Senior BACKEND Engineer", "Acme", "https://x/1");
        assert!(job.matches_any(&kw(&["backend"])));

        let by_company = JobPosting::new("Engineer", "RustLabs", "https://x/2");
        assert!(by_company.matches_any(&kw(&["rustlabs"])));
    }

    #[test]
    fn mixed_case_keyword_still_matches() {
        let job = JobPosting::new("backend engineer", "Acme", "https://x/1");
        assert!(job.matches_any(&kw(&["Backend"])));
    }

    #[test]
    fn unrelated_title_is_excluded() {
        let job = JobPosting::new("Frontend Designer", "Acme", "https://x/3");
        assert!(!job.matches_any(&kw(&["backend"])));
        assert!(!job.matches_any(&[]));
    }

    #[test]
    fn select_matching_caps_and_drops_incomplete_postings() {
        let postings = vec![
            JobPosting::new("Backend Dev", "A", "https://x/1"),
            JobPosting::new("Backend Dev", "B", ""),
            JobPosting::new("Frontend Dev", "C", "https://x/3"),
            JobPosting::new("Backend Lead", "D", "https://x/4"),
            JobPosting::new("Backend Intern", "E", "https://x/5"),
        ];
        let picked = select_matching(postings, &kw(&["backend"]), 2);
        let urls: Vec<_> = picked.iter().map(|p| p.url.as_str()).collect();
        assert_eq!(urls, vec!["https://x/1", "https://x/4"]);
    }

    #[test]
    fn record_timestamp_has_no_offset() {
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 5).unwrap();
        let record = ApplicationRecord::at(ts, &JobPosting::new("t", "c", "u"));
        assert_eq!(record.timestamp_string(), "2024-03-01T09:30:05.000000");
    }
}
