//! Fills and submits one job's application form.
//!
//! The work is a fixed, ordered pipeline of [`Step`]s run against a
//! [`FormPage`]. A step either does its work, skips because the page offers
//! nothing for it, or fails; the first failure ends the pipeline. The page is
//! closed whatever happened.
//!
//! Clicking the submit control is the last thing done: nothing checks that
//! the site actually accepted the application.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::{ApplicantProfile, Config};
use crate::error::Result;
use crate::job::JobPosting;

pub mod chrome;
pub mod page;

pub use chrome::ChromeLauncher;
pub use page::{FormPage, PageLauncher};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Open,
    Settle,
    FillProfile,
    AttachResume,
    Submit,
}

const PIPELINE: [Step; 5] = [
    Step::Open,
    Step::Settle,
    Step::FillProfile,
    Step::AttachResume,
    Step::Submit,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Done(String),
    Skipped(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyReport {
    pub steps: Vec<(Step, StepOutcome)>,
    require_submit: bool,
}

impl ApplyReport {
    pub fn outcome(&self, step: Step) -> Option<&StepOutcome> {
        self.steps.iter().find(|(s, _)| *s == step).map(|(_, o)| o)
    }

    pub fn failure(&self) -> Option<(Step, &str)> {
        self.steps.iter().find_map(|(step, outcome)| match outcome {
            StepOutcome::Failed(reason) => Some((*step, reason.as_str())),
            _ => None,
        })
    }

    /// Whether the job counts as applied and should be recorded.
    pub fn is_applied(&self) -> bool {
        if self.failure().is_some() {
            return false;
        }
        match self.outcome(Step::Submit) {
            Some(StepOutcome::Done(_)) => true,
            Some(StepOutcome::Skipped(_)) => !self.require_submit,
            _ => false,
        }
    }
}

/// Which profile value a form input receives, judged by its `name` attribute.
pub fn profile_value<'a>(input_name: &str, profile: &'a ApplicantProfile) -> Option<&'a str> {
    let name = input_name.to_lowercase();
    if name.contains("email") {
        Some(&profile.email)
    } else if name.contains("name") {
        Some(&profile.full_name)
    } else if name.contains("phone") {
        Some(&profile.phone)
    } else {
        None
    }
}

fn is_submit_label(label: &str) -> bool {
    let label = label.to_lowercase();
    label.contains("submit") || label.contains("apply")
}

pub struct Applicator {
    launcher: Box<dyn PageLauncher>,
    profile: ApplicantProfile,
    resume_path: PathBuf,
    settle: Duration,
    require_submit: bool,
}

impl Applicator {
    pub fn new(
        launcher: Box<dyn PageLauncher>,
        profile: ApplicantProfile,
        resume_path: PathBuf,
        settle: Duration,
    ) -> Self {
        Self {
            launcher,
            profile,
            resume_path,
            settle,
            require_submit: false,
        }
    }

    pub fn from_config(launcher: Box<dyn PageLauncher>, config: &Config) -> Self {
        Self::new(
            launcher,
            config.user_data.clone(),
            config.resume_path.clone(),
            config.page_settle(),
        )
        .require_submit(config.require_submit_control)
    }

    pub fn require_submit(mut self, required: bool) -> Self {
        self.require_submit = required;
        self
    }

    pub fn apply(&self, job: &JobPosting) -> ApplyReport {
        tracing::info!(url = %job.url, "attempting apply");
        let mut report = ApplyReport {
            steps: Vec::with_capacity(PIPELINE.len()),
            require_submit: self.require_submit,
        };

        let mut page = match self.launcher.launch() {
            Ok(page) => page,
            Err(e) => {
                tracing::error!(url = %job.url, error = %e, "browser launch failed");
                report.steps.push((Step::Open, StepOutcome::Failed(e.to_string())));
                return report;
            }
        };

        for step in PIPELINE {
            let outcome = match self.run_step(step, page.as_mut(), job) {
                Ok(outcome) => outcome,
                Err(e) => StepOutcome::Failed(e.to_string()),
            };
            let failed = matches!(outcome, StepOutcome::Failed(_));
            match &outcome {
                StepOutcome::Done(detail) => tracing::debug!(?step, %detail, "step done"),
                StepOutcome::Skipped(reason) => tracing::debug!(?step, %reason, "step skipped"),
                StepOutcome::Failed(reason) => {
                    tracing::error!(url = %job.url, ?step, %reason, "failed to apply")
                }
            }
            report.steps.push((step, outcome));
            if failed {
                break;
            }
        }

        if let Err(e) = page.close() {
            tracing::warn!(url = %job.url, error = %e, "closing browser session failed");
        }
        report
    }

    fn run_step(&self, step: Step, page: &mut dyn FormPage, job: &JobPosting) -> Result<StepOutcome> {
        match step {
            Step::Open => {
                page.open(&job.url)?;
                Ok(StepOutcome::Done(job.url.clone()))
            }
            Step::Settle => {
                std::thread::sleep(self.settle);
                Ok(StepOutcome::Done(format!("{:?}", self.settle)))
            }
            Step::FillProfile => self.fill_profile(page),
            Step::AttachResume => self.attach_resume(page),
            Step::Submit => submit(page),
        }
    }

    fn fill_profile(&self, page: &dyn FormPage) -> Result<StepOutcome> {
        let mut filled = 0;
        for (index, name) in page.input_names()?.iter().enumerate() {
            let Some(name) = name.as_deref() else { continue };
            match profile_value(name, &self.profile) {
                Some(value) if !value.is_empty() => {
                    page.type_into_input(index, value)?;
                    filled += 1;
                }
                _ => {}
            }
        }
        Ok(match filled {
            0 => StepOutcome::Skipped("no recognised fields".into()),
            n => StepOutcome::Done(format!("{n} fields filled")),
        })
    }

    fn attach_resume(&self, page: &dyn FormPage) -> Result<StepOutcome> {
        let count = page.file_input_count()?;
        if count == 0 {
            return Ok(StepOutcome::Skipped("no file inputs".into()));
        }
        let resume = absolute(&self.resume_path)?;
        for index in 0..count {
            page.attach_file(index, &resume)?;
        }
        Ok(StepOutcome::Done(format!("{} attached to {count} inputs", resume.display())))
    }
}

fn submit(page: &dyn FormPage) -> Result<StepOutcome> {
    match page.button_labels()?.iter().position(|label| is_submit_label(label)) {
        Some(index) => {
            page.click_button(index)?;
            Ok(StepOutcome::Done(format!("clicked button #{index}")))
        }
        None => Ok(StepOutcome::Skipped("no submit control".into())),
    }
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
