use std::path::PathBuf;
use std::time::Duration;

/// Logical pixel geometry of the probed page.
///
/// The default emulates a narrow phone layout; the avatar placement the
/// probe verifies only reproduces at mobile widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 400,
            height: 800,
        }
    }
}

/// The journey the probe drives, with defaults matching the local
/// SuperTareas deployment it was written against.
///
/// Fields are public so an embedding caller can point the probe at a
/// different deployment; the `centinela` binary always runs the defaults.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Root URL of the target application.
    pub base_url: String,
    pub viewport: Viewport,
    /// Text of the profile tile to click on the selection screen.
    pub profile_label: String,
    /// Greeting shown on the PIN prompt; its presence means a PIN is wanted.
    pub greeting: String,
    pub pin: String,
    /// Accessible name of the PIN submit button.
    pub submit_label: String,
    /// Text unique to the dashboard view.
    pub dashboard_marker: String,
    /// Where the evidence screenshot lands, overwritten on each run.
    pub screenshot_path: PathBuf,
    /// Bound on the post-navigation network quiescence wait.
    pub network_idle_window: Duration,
    /// Bound on the UI transition wait after clicking the profile tile.
    pub transition_timeout: Duration,
    /// Bound on the dashboard wait after submitting the PIN.
    pub login_timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            viewport: Viewport::default(),
            profile_label: "Miguel".to_string(),
            greeting: "Hola, Miguel".to_string(),
            pin: "0000".to_string(),
            submit_label: "Entrar".to_string(),
            dashboard_marker: "Puntos Totales".to_string(),
            screenshot_path: PathBuf::from("verification/dashboard_final.png"),
            network_idle_window: Duration::from_secs(10),
            transition_timeout: Duration::from_secs(5),
            login_timeout: Duration::from_secs(10),
            poll_interval: Duration::from_millis(100),
        }
    }
}
