use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::job::ApplicationRecord;

const HEADER: [&str; 4] = ["timestamp", "title", "company", "url"];

/// Append-only CSV of every job applied to. Single writer, no locking.
#[derive(Debug, Clone)]
pub struct AppliedStore {
    path: PathBuf,
}

impl AppliedStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// URLs of all prior applications. Creates the file with its header when missing.
    pub fn load(&self) -> Result<HashSet<String>> {
        if !self.path.exists() {
            self.create_with_header()?;
            return Ok(HashSet::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;

        let mut urls = HashSet::new();
        for (line, row) in reader.byte_records().enumerate() {
            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    tracing::warn!(row = line + 1, error = %e, "skipping unreadable applied row");
                    continue;
                }
            };
            if let Some(url) = row.get(3) {
                urls.insert(String::from_utf8_lossy(url).into_owned());
            }
        }
        Ok(urls)
    }

    pub fn append(&self, record: &ApplicationRecord) -> Result<()> {
        let is_new = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut writer = csv::Writer::from_writer(file);

        if is_new {
            writer.write_record(HEADER)?;
        }
        let timestamp = record.timestamp_string();
        let row = [
            timestamp.as_str(),
            record.title.as_str(),
            record.company.as_str(),
            record.url.as_str(),
        ];
        writer.write_record(row)?;
        writer.flush()?;

        tracing::info!("[CSV LOG] {}", row.join(","));
        Ok(())
    }

    fn create_with_header(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let mut writer = csv::Writer::from_writer(File::create(&self.path)?);
        writer.write_record(HEADER)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job::JobPosting;

    fn record(url: &str) -> ApplicationRecord {
        ApplicationRecord::now(&JobPosting::new("Backend, Senior", "Acme \"Inc\"", url))
    }

    #[test]
    fn load_creates_file_with_header() {
        let dir = tempfile::tempdir().unwrap();
        let store = AppliedStore::new(dir.path().join("applied_jobs.csv"));

        assert!(store.load().unwrap().is_empty());
        let contents = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents, "timestamp,title,company,url\n");
    }

    #[test]
    fn appended_urls_are_loaded_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = AppliedStore::new(dir.path().join("applied_jobs.csv"));

        store.append(&record("https://x/1")).unwrap();
        store.append(&record("https://x/2")).unwrap();

        let urls = store.load().unwrap();
        assert_eq!(urls.len(), 2);
        assert!(urls.contains("https://x/1"));
        assert!(urls.contains("https://x/2"));

        let contents = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(contents.matches("timestamp,title,company,url").count(), 1);
    }

    #[test]
    fn short_rows_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("applied_jobs.csv");
        std::fs::write(
            &path,
            "timestamp,title,company,url\n2024-01-01T00:00:00,only,three\n2024-01-01T00:00:00,t,c,https://x/9\n",
        )
        .unwrap();

        let urls = AppliedStore::new(path).load().unwrap();
        assert_eq!(urls, HashSet::from(["https://x/9".to_string()]));
    }

    #[test]
    fn non_utf8_row_does_not_hide_the_others() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("applied_jobs.csv");
        let mut contents = b"timestamp,title,company,url\n".to_vec();
        contents.extend_from_slice(b"2024-01-01T00:00:00,Caf\xe9 Dev,Acme,https://x/1\n");
        contents.extend_from_slice(b"2024-01-01T00:00:00,Backend,Acme,https://x/2\n");
        std::fs::write(&path, contents).unwrap();

        let urls = AppliedStore::new(path).load().unwrap();
        assert_eq!(
            urls,
            HashSet::from(["https://x/1".to_string(), "https://x/2".to_string()])
        );
    }
}
