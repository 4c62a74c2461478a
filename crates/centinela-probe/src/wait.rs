use chromiumoxide::cdp::browser_protocol::page::EventLifecycleEvent;
use futures::{Stream, StreamExt};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Bound and cadence for a polled wait. A missed deadline is a negative
/// observation, never an error.
#[derive(Debug, Clone, Copy)]
pub struct WaitConfig {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl WaitConfig {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

/// Wait for the page to report the `networkIdle` lifecycle event.
///
/// The listener must be attached before navigation starts or the event can
/// slip past unobserved. Returns false if the window elapses first.
pub async fn network_idle<S>(events: &mut S, window: Duration) -> bool
where
    S: Stream<Item = Arc<EventLifecycleEvent>> + Unpin,
{
    let reached = tokio::time::timeout(window, async {
        while let Some(event) = events.next().await {
            if event.name == "networkIdle" {
                return true;
            }
        }
        false
    })
    .await;

    reached.unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lifecycle_event(name: &str) -> Arc<EventLifecycleEvent> {
        let event: EventLifecycleEvent = serde_json::from_value(json!({
            "frameId": "frame-1",
            "loaderId": "loader-1",
            "name": name,
            "timestamp": 1.0,
        }))
        .expect("lifecycle event should deserialize");
        Arc::new(event)
    }

    #[tokio::test]
    async fn network_idle_sees_the_idle_event() {
        let events = vec![
            lifecycle_event("load"),
            lifecycle_event("networkAlmostIdle"),
            lifecycle_event("networkIdle"),
        ];
        let mut stream = futures::stream::iter(events);

        assert!(network_idle(&mut stream, Duration::from_secs(1)).await);
    }

    #[tokio::test]
    async fn network_idle_times_out_without_the_event() {
        let mut stream = futures::stream::pending::<Arc<EventLifecycleEvent>>();

        assert!(!network_idle(&mut stream, Duration::from_millis(20)).await);
    }

    #[tokio::test]
    async fn network_idle_is_false_when_the_stream_ends() {
        let events = vec![lifecycle_event("load")];
        let mut stream = futures::stream::iter(events);

        assert!(!network_idle(&mut stream, Duration::from_secs(1)).await);
    }

    #[test]
    fn wait_config_carries_the_default_cadence() {
        let config = WaitConfig::new(Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.poll_interval, DEFAULT_POLL_INTERVAL);

        let tighter = config.with_poll_interval(Duration::from_millis(10));
        assert_eq!(tighter.poll_interval, Duration::from_millis(10));
    }
}
