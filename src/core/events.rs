// ─── Status events ───
// Per-step progress the pipeline reports upward for display.

use std::fmt;

use tracing::{error, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepState {
    InProgress,
    Succeeded,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusEvent {
    pub step: String,
    pub state: StepState,
}

impl fmt::Display for StatusEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            StepState::InProgress => write!(f, "… {}", self.step),
            StepState::Succeeded => write!(f, "✔ {}", self.step),
            StepState::Failed(reason) => write!(f, "✖ {}: {}", self.step, reason),
        }
    }
}

/// Receiver of status events. The interactive layer plugs in here.
pub trait StatusSink: Send + Sync {
    fn report(&self, event: StatusEvent);

    fn started(&self, step: &str) {
        self.report(StatusEvent {
            step: step.to_string(),
            state: StepState::InProgress,
        });
    }

    fn succeeded(&self, step: &str) {
        self.report(StatusEvent {
            step: step.to_string(),
            state: StepState::Succeeded,
        });
    }

    fn failed(&self, step: &str, reason: String) {
        self.report(StatusEvent {
            step: step.to_string(),
            state: StepState::Failed(reason),
        });
    }
}

/// Renders events as log lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl StatusSink for LogSink {
    fn report(&self, event: StatusEvent) {
        match &event.state {
            StepState::Failed(_) => error!("{}", event),
            _ => info!("{}", event),
        }
    }
}

#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Keeps every event for assertions.
    #[derive(Default)]
    pub struct RecordingSink {
        events: Mutex<Vec<StatusEvent>>,
    }

    impl RecordingSink {
        pub fn events(&self) -> Vec<StatusEvent> {
            self.events.lock().map(|e| e.clone()).unwrap_or_default()
        }

        pub fn failures(&self) -> Vec<(String, String)> {
            self.events()
                .into_iter()
                .filter_map(|e| match e.state {
                    StepState::Failed(reason) => Some((e.step, reason)),
                    _ => None,
                })
                .collect()
        }
    }

    impl StatusSink for RecordingSink {
        fn report(&self, event: StatusEvent) {
            if let Ok(mut events) = self.events.lock() {
                events.push(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingSink;
    use super::*;

    #[test]
    fn helpers_emit_expected_states() {
        let sink = RecordingSink::default();
        sink.started("Writing extra files");
        sink.succeeded("Writing extra files");
        sink.failed("Mod spark", "not available".into());

        let states: Vec<_> = sink.events().into_iter().map(|e| e.state).collect();
        assert_eq!(
            states,
            [
                StepState::InProgress,
                StepState::Succeeded,
                StepState::Failed("not available".into())
            ]
        );
    }

    #[test]
    fn display_includes_reason() {
        let event = StatusEvent {
            step: "Fabric".into(),
            state: StepState::Failed("not supported".into()),
        };
        assert_eq!(event.to_string(), "✖ Fabric: not supported");
    }
}
