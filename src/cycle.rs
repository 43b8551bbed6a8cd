use crate::aggregate::Aggregator;
use crate::apply::Applicator;
use crate::error::Result;
use crate::job::{ApplicationRecord, JobPosting};
use crate::remote_log::RemoteTable;
use crate::store::AppliedStore;

/// Writes successful applications to the local CSV and, when configured,
/// the remote table.
pub struct Recorder {
    store: AppliedStore,
    remote: Option<RemoteTable>,
}

impl Recorder {
    pub fn new(store: AppliedStore, remote: Option<RemoteTable>) -> Self {
        Self { store, remote }
    }

    pub fn store(&self) -> &AppliedStore {
        &self.store
    }

    /// The local append decides success; a remote failure is only logged.
    pub fn record(&self, job: &JobPosting) -> Result<ApplicationRecord> {
        let record = ApplicationRecord::now(job);
        self.store.append(&record)?;

        if let Some(remote) = &self.remote {
            if let Err(e) = remote.create(&record) {
                tracing::warn!(url = %record.url, error = %e, "remote table log failed");
            }
        }
        tracing::info!(url = %job.url, "applied");
        Ok(record)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleSummary {
    pub loaded: usize,
    pub fetched: usize,
    pub skipped: usize,
    pub applied: usize,
    pub failed: usize,
}

/// One aggregate-then-apply pass.
pub struct Cycle {
    aggregator: Aggregator,
    applicator: Applicator,
    recorder: Recorder,
}

impl Cycle {
    pub fn new(aggregator: Aggregator, applicator: Applicator, recorder: Recorder) -> Self {
        Self {
            aggregator,
            applicator,
            recorder,
        }
    }

    pub fn run_once(&self) -> CycleSummary {
        let mut summary = CycleSummary::default();

        let mut applied = match self.recorder.store().load() {
            Ok(urls) => urls,
            Err(e) => {
                // Without the history every job would look new; sit this cycle out.
                tracing::error!(
                    path = %self.recorder.store().path().display(),
                    error = %e,
                    "could not load applied urls"
                );
                return summary;
            }
        };
        summary.loaded = applied.len();
        tracing::info!(count = summary.loaded, "loaded applied urls");

        let jobs = self.aggregator.collect();
        summary.fetched = jobs.len();
        tracing::info!(count = summary.fetched, "fetched jobs");

        for job in &jobs {
            if applied.contains(&job.url) {
                tracing::info!(url = %job.url, "skipping, already applied");
                summary.skipped += 1;
                continue;
            }

            let report = self.applicator.apply(job);
            if report.is_applied() {
                match self.recorder.record(job) {
                    Ok(_) => summary.applied += 1,
                    Err(e) => {
                        tracing::error!(url = %job.url, error = %e, "could not record application");
                        summary.failed += 1;
                    }
                }
            } else {
                summary.failed += 1;
            }
            applied.insert(job.url.clone());
        }

        tracing::info!(?summary, "cycle complete");
        summary
    }
}
