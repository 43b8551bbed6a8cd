//! Scrapes remote job boards, filters by keyword and drives a headless
//! browser through each new posting's application form.

pub mod aggregate;
pub mod apply;
pub mod config;
pub mod cycle;
pub mod error;
pub mod job;
pub mod liveness;
pub mod remote_log;
pub mod scheduler;
pub mod sources;
pub mod store;

pub use error::{Error, Result};
pub use job::{ApplicationRecord, JobPosting};
