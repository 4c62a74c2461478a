//! Structured outcome of a probe run.
//!
//! Each journey step yields a tagged outcome so callers can assert on the
//! run programmatically instead of parsing console text.

use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// The fixed journey, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Navigate,
    SelectProfile,
    Authenticate,
    VerifyDashboard,
    CaptureScreenshot,
}

impl Step {
    pub fn label(&self) -> &'static str {
        match self {
            Step::Navigate => "navigate",
            Step::SelectProfile => "select profile",
            Step::Authenticate => "authenticate",
            Step::VerifyDashboard => "verify dashboard",
            Step::CaptureScreenshot => "capture screenshot",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Passed,
    /// The step's precondition was absent; a valid negative observation.
    Skipped,
    Failed,
}

#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub step: Step,
    pub status: StepStatus,
    pub detail: Option<String>,
}

/// Aggregated result of one run.
#[derive(Debug, Clone)]
pub struct ProbeReport {
    pub started_at: DateTime<Utc>,
    pub steps: Vec<StepOutcome>,
    /// The error that aborted the sequence, if one fired.
    pub error: Option<String>,
    /// Where the evidence screenshot was written, if the run got that far.
    pub screenshot: Option<PathBuf>,
}

impl ProbeReport {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            steps: Vec::new(),
            error: None,
            screenshot: None,
        }
    }

    pub fn record(&mut self, step: Step, status: StepStatus, detail: Option<String>) {
        self.steps.push(StepOutcome {
            step,
            status,
            detail,
        });
    }

    /// Record `result` against `step` if it failed, keeping the error moving.
    pub fn check<T>(&mut self, step: Step, result: crate::Result<T>) -> crate::Result<T> {
        if let Err(e) = &result {
            self.record(step, StepStatus::Failed, Some(e.to_string()));
        }
        result
    }

    pub fn record_error(&mut self, error: &crate::Error) {
        self.error = Some(error.to_string());
    }

    pub fn status_of(&self, step: Step) -> Option<StepStatus> {
        self.steps
            .iter()
            .find(|outcome| outcome.step == step)
            .map(|outcome| outcome.status)
    }

    pub fn dashboard_reached(&self) -> bool {
        matches!(self.status_of(Step::VerifyDashboard), Some(StepStatus::Passed))
    }

    pub fn screenshot_written(&self) -> bool {
        self.screenshot.is_some()
    }

    /// The run counts as a success when nothing aborted it, the dashboard
    /// marker was seen, and the evidence artifact exists.
    pub fn succeeded(&self) -> bool {
        self.error.is_none() && self.dashboard_reached() && self.screenshot_written()
    }

    pub fn print_summary(&self) {
        println!();
        println!(
            "Probe run started {}",
            self.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
        for outcome in &self.steps {
            let mark = match outcome.status {
                StepStatus::Passed => "✅",
                StepStatus::Skipped => "⏭️ ",
                StepStatus::Failed => "❌",
            };
            match &outcome.detail {
                Some(detail) => println!("{mark} {}: {detail}", outcome.step.label()),
                None => println!("{mark} {}", outcome.step.label()),
            }
        }
        if let Some(error) = &self.error {
            println!("❌ run aborted: {error}");
        }
        match &self.screenshot {
            Some(path) => println!("📸 screenshot: {}", path.display()),
            None => println!("📸 no screenshot written"),
        }
    }
}

impl Default for ProbeReport {
    fn default() -> Self {
        Self::new()
    }
}
