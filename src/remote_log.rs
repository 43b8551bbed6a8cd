use reqwest::blocking::Client;
use serde_json::{json, Value};

use crate::config::RemoteTableConfig;
use crate::error::{Error, Result};
use crate::job::ApplicationRecord;

const API_BASE: &str = "https://api.airtable.com/v0";

/// Airtable table mirroring the local applied-jobs CSV.
pub struct RemoteTable {
    client: Client,
    config: RemoteTableConfig,
    api_base: String,
}

impl RemoteTable {
    pub fn new(client: Client, config: RemoteTableConfig) -> Self {
        Self {
            client,
            config,
            api_base: API_BASE.to_string(),
        }
    }

    /// Points the table at another API root, e.g. a local stand-in.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}/{}",
            self.api_base.trim_end_matches('/'),
            self.config.base_id,
            urlencoding::encode(&self.config.table_name)
        )
    }

    /// One create-record request; a non-2xx reply is returned as an error, never retried.
    pub fn create(&self, record: &ApplicationRecord) -> Result<()> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.token)
            .json(&record_body(record))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::RemoteTable {
                status: status.as_u16(),
                body,
            });
        }
        tracing::debug!(url = %record.url, "remote table record created");
        Ok(())
    }
}

fn record_body(record: &ApplicationRecord) -> Value {
    json!({
        "fields": {
            "Time_stamp": record.timestamp_string(),
            "Title": record.title,
            "Company": record.company,
            "URL": record.url,
        }
    })
}
