//! The probe itself: a fixed navigate / select / authenticate / verify /
//! capture journey with soft failure tolerance.
//!
//! Optional steps skip when their precondition is absent. The first runtime
//! error aborts the remaining steps, is absorbed into the report, and never
//! escapes [`ProbeRunner::run`]; the browser session is released on every
//! path where it was acquired.

use crate::config::ProbeConfig;
use crate::dom;
use crate::report::{ProbeReport, Step, StepStatus};
use crate::session::BrowserSession;
use crate::wait::{self, WaitConfig};
use crate::{Error, Result};
use chromiumoxide::cdp::browser_protocol::page::{CaptureScreenshotFormat, EventLifecycleEvent};
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::Page;
use std::path::{Path, PathBuf};

pub struct ProbeRunner {
    config: ProbeConfig,
}

impl ProbeRunner {
    pub fn new(config: ProbeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Run the journey once.
    ///
    /// Never returns an error and never panics past this boundary: failures
    /// are printed as a single error line and recorded on the report.
    pub async fn run(&self) -> ProbeReport {
        let mut report = ProbeReport::new();

        let session = match BrowserSession::launch(self.config.viewport).await {
            Ok(session) => session,
            Err(e) => {
                println!("Error: {e}");
                report.record(
                    Step::Navigate,
                    StepStatus::Failed,
                    Some(format!("browser launch failed: {e}")),
                );
                report.record_error(&e);
                return report;
            }
        };

        if let Err(e) = self.drive(&session, &mut report).await {
            println!("Error: {e}");
            report.record_error(&e);
        }

        if let Err(e) = session.close().await {
            tracing::warn!("browser session did not close cleanly: {e}");
        }

        report
    }

    async fn drive(&self, session: &BrowserSession, report: &mut ProbeReport) -> Result<()> {
        let page = report.check(Step::Navigate, self.open_app(session).await)?;
        report.record(
            Step::Navigate,
            StepStatus::Passed,
            Some(self.config.base_url.clone()),
        );

        let clicked = report.check(Step::SelectProfile, self.select_profile(&page).await)?;
        if clicked {
            report.record(
                Step::SelectProfile,
                StepStatus::Passed,
                Some(format!("clicked \"{}\"", self.config.profile_label)),
            );
        } else {
            report.record(
                Step::SelectProfile,
                StepStatus::Skipped,
                Some(format!("\"{}\" not visible", self.config.profile_label)),
            );
        }

        let authenticated = report.check(Step::Authenticate, self.authenticate(&page).await)?;
        if authenticated {
            report.record(
                Step::Authenticate,
                StepStatus::Passed,
                Some("submitted PIN".to_string()),
            );
        } else {
            // A missing prompt and "no PIN required" look identical from
            // here; telling them apart is the target app's contract.
            report.record(
                Step::Authenticate,
                StepStatus::Skipped,
                Some("PIN prompt not shown".to_string()),
            );
        }

        let on_dashboard =
            report.check(Step::VerifyDashboard, self.verify_dashboard(&page).await)?;
        report.record(
            Step::VerifyDashboard,
            if on_dashboard {
                StepStatus::Passed
            } else {
                StepStatus::Failed
            },
            Some(format!(
                "\"{}\" {}",
                self.config.dashboard_marker,
                if on_dashboard { "visible" } else { "not visible" }
            )),
        );

        let path = report.check(Step::CaptureScreenshot, self.capture_screenshot(&page).await)?;
        println!("Screenshot taken");
        report.record(
            Step::CaptureScreenshot,
            StepStatus::Passed,
            Some(path.display().to_string()),
        );
        report.screenshot = Some(path);

        Ok(())
    }

    /// Step 1: open the application root and wait for the network to go
    /// quiet. A refused connection surfaces here as an error.
    async fn open_app(&self, session: &BrowserSession) -> Result<Page> {
        let page = session.new_page().await?;

        // Attach before navigating so the idle event cannot slip past.
        let mut lifecycle_events = page.event_listener::<EventLifecycleEvent>().await?;

        tracing::info!(url = %self.config.base_url, "navigating");
        page.goto(self.config.base_url.as_str()).await?;
        page.wait_for_navigation().await?;

        if !wait::network_idle(&mut lifecycle_events, self.config.network_idle_window).await {
            tracing::debug!(
                window = ?self.config.network_idle_window,
                "network never reached idle, continuing"
            );
        }

        Ok(page)
    }

    /// Step 2: click the profile tile if it is on screen. Absence is a
    /// valid negative observation, so this skips rather than fails.
    async fn select_profile(&self, page: &Page) -> Result<bool> {
        if !dom::is_text_visible(page, &self.config.profile_label).await? {
            return Ok(false);
        }

        println!("Clicking {}...", self.config.profile_label);
        dom::click_text(page, &self.config.profile_label).await?;

        // The click either opens the PIN prompt or lands straight on the
        // dashboard; wait for whichever renders first.
        let settled = dom::wait_until_any_visible(
            page,
            &[&self.config.greeting, &self.config.dashboard_marker],
            WaitConfig::new(self.config.transition_timeout)
                .with_poll_interval(self.config.poll_interval),
        )
        .await?;
        if !settled {
            tracing::debug!(
                timeout = ?self.config.transition_timeout,
                "no transition observed after clicking the profile tile"
            );
        }

        Ok(true)
    }

    /// Step 3: enter the PIN if the prompt greeting is on screen.
    async fn authenticate(&self, page: &Page) -> Result<bool> {
        if !dom::is_text_visible(page, &self.config.greeting).await? {
            return Ok(false);
        }

        println!("Entering PIN {}...", self.config.pin);
        dom::fill_password(page, &self.config.pin).await?;

        if !dom::click_button(page, &self.config.submit_label).await? {
            return Err(Error::Browser(format!(
                "no button named \"{}\" on the PIN prompt",
                self.config.submit_label
            )));
        }

        let landed = dom::wait_until_any_visible(
            page,
            &[&self.config.dashboard_marker],
            WaitConfig::new(self.config.login_timeout)
                .with_poll_interval(self.config.poll_interval),
        )
        .await?;
        if !landed {
            tracing::debug!(
                timeout = ?self.config.login_timeout,
                "dashboard marker did not appear after submitting the PIN"
            );
        }

        Ok(true)
    }

    /// Step 4: observational dashboard check. Never aborts the run.
    async fn verify_dashboard(&self, page: &Page) -> Result<bool> {
        let visible = dom::is_text_visible(page, &self.config.dashboard_marker).await?;
        if visible {
            println!("Dashboard loaded.");
        } else {
            println!("Dashboard NOT loaded??");
        }
        Ok(visible)
    }

    /// Step 5: persist the evidence screenshot, replacing any prior run's.
    async fn capture_screenshot(&self, page: &Page) -> Result<PathBuf> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(true)
            .build();
        let bytes = page.screenshot(params).await?;
        write_artifact(&self.config.screenshot_path, &bytes)?;
        Ok(self.config.screenshot_path.clone())
    }
}

/// Write the screenshot bytes, creating missing parent directories and
/// overwriting any previous artifact.
fn write_artifact(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_artifact_creates_missing_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("verification").join("dashboard_final.png");

        write_artifact(&path, b"png-bytes").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"png-bytes");
    }

    #[test]
    fn write_artifact_overwrites_the_previous_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dashboard_final.png");

        write_artifact(&path, b"first run").unwrap();
        write_artifact(&path, b"second run").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"second run");
        assert_eq!(
            std::fs::read_dir(dir.path()).unwrap().count(),
            1,
            "exactly one artifact at the fixed path"
        );
    }

    #[test]
    fn write_artifact_accepts_a_bare_filename() {
        let dir = tempfile::tempdir().unwrap();
        let previous = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();

        let result = write_artifact(Path::new("dashboard_final.png"), b"bytes");

        std::env::set_current_dir(previous).unwrap();
        result.unwrap();
    }

    #[test]
    fn runner_exposes_its_config() {
        let runner = ProbeRunner::new(ProbeConfig::default());
        assert_eq!(runner.config().base_url, "http://localhost:3000");
    }
}
