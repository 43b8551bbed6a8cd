use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Static bot settings, read once from the JSON config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub keywords: Vec<String>,
    pub max_results: usize,
    pub resume_path: PathBuf,
    pub user_data: ApplicantProfile,
    pub applied_csv_path: PathBuf,
    pub interval_minutes: u64,
    pub page_settle_secs: u64,
    pub request_timeout_secs: u64,
    pub listen_addr: String,
    pub headless: bool,
    /// Only count an application when a submit-like button was clicked.
    pub require_submit_control: bool,
    #[serde(skip)]
    pub remote_table: Option<RemoteTableConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApplicantProfile {
    pub email: String,
    pub full_name: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTableConfig {
    pub token: String,
    pub base_id: String,
    pub table_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keywords: Vec::new(),
            max_results: 50,
            resume_path: PathBuf::from("resume.pdf"),
            user_data: ApplicantProfile::default(),
            applied_csv_path: PathBuf::from("applied_jobs.csv"),
            interval_minutes: 30,
            page_settle_secs: 4,
            request_timeout_secs: 20,
            listen_addr: "0.0.0.0:3000".to_string(),
            headless: true,
            require_submit_control: false,
            remote_table: None,
        }
    }
}

impl Config {
    /// Reads the config file and picks up the remote table settings from the
    /// environment (after loading `.env`, if any).
    pub fn load(path: &Path) -> Result<Self> {
        let _ = dotenvy::dotenv();

        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        let mut config = Self::from_json(&raw)?;
        config.remote_table = RemoteTableConfig::from_env();
        Ok(config)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let mut config: Config =
            serde_json::from_str(raw).map_err(|e| Error::Config(e.to_string()))?;
        config.keywords = config
            .keywords
            .iter()
            .map(|kw| kw.trim().to_lowercase())
            .filter(|kw| !kw.is_empty())
            .collect();
        Ok(config)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_minutes * 60)
    }

    pub fn page_settle(&self) -> Duration {
        Duration::from_secs(self.page_settle_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl RemoteTableConfig {
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Some(Self {
            token: read("AIRTABLE_TOKEN")?,
            base_id: read("AIRTABLE_BASE_ID")?,
            table_name: read("AIRTABLE_TABLE_NAME")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_object_uses_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert!(config.keywords.is_empty());
        assert_eq!(config.max_results, 50);
        assert_eq!(config.resume_path, PathBuf::from("resume.pdf"));
        assert_eq!(config.interval(), Duration::from_secs(30 * 60));
        assert_eq!(config.page_settle(), Duration::from_secs(4));
        assert!(config.remote_table.is_none());
    }

    #[test]
    fn keywords_are_lowercased_and_profile_is_read() {
        let config = Config::from_json(
            r#"{
                "keywords": ["Backend", " RUST ", ""],
                "max_results": 5,
                "user_data": {"email": "a@b.c", "full_name": "Ada Lovelace"}
            }"#,
        )
        .unwrap();
        assert_eq!(config.keywords, vec!["backend", "rust"]);
        assert_eq!(config.max_results, 5);
        assert_eq!(config.user_data.email, "a@b.c");
        assert_eq!(config.user_data.full_name, "Ada Lovelace");
        assert_eq!(config.user_data.phone, "");
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(Config::from_json("{"), Err(Error::Config(_))));
    }

    #[test]
    fn remote_table_needs_all_three_vars() {
        let mut vars = HashMap::from([
            ("AIRTABLE_TOKEN", "tok"),
            ("AIRTABLE_BASE_ID", "app123"),
        ]);
        assert!(RemoteTableConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).is_none());

        vars.insert("AIRTABLE_TABLE_NAME", "Applied Jobs");
        let table = RemoteTableConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(table.table_name, "Applied Jobs");

        vars.insert("AIRTABLE_TOKEN", "  ");
        assert!(RemoteTableConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).is_none());
    }
}
