//! Headless-browser verification probe for the SuperTareas UI.
//!
//! Drives one fixed journey against a local deployment: pick the "Miguel"
//! profile, enter the PIN if the prompt appears, land on the points
//! dashboard, and leave a screenshot behind as evidence. Optional steps
//! skip instead of failing, the dashboard check is observational, and any
//! runtime error is absorbed into the [`ProbeReport`] — the browser session
//! is released on every exit path.

mod config;
mod dom;
mod error;
mod report;
mod runner;
mod session;
mod wait;

pub use config::{ProbeConfig, Viewport};
pub use error::{Error, Result};
pub use report::{ProbeReport, Step, StepOutcome, StepStatus};
pub use runner::ProbeRunner;
pub use session::BrowserSession;
pub use wait::WaitConfig;
