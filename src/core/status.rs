//! Host status channel
//!
//! The colony reports a human-readable turn label once per turn and a
//! closing message when the queen dies. Hosts decide how to show them.

/// Message published to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    /// "Day D, turn T", published at the start of every turn
    TurnLabel(String),
    /// End-of-simulation notice
    SimulationOver(String),
    /// The colony was torn down; any displayed label is stale
    Cleared,
}

/// Receiver for status messages
pub trait StatusSink {
    fn publish(&mut self, message: StatusMessage);
}

impl<F> StatusSink for F
where
    F: FnMut(StatusMessage),
{
    fn publish(&mut self, message: StatusMessage) {
        self(message)
    }
}

/// Default sink: forwards everything to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingStatus;

impl StatusSink for TracingStatus {
    fn publish(&mut self, message: StatusMessage) {
        match message {
            StatusMessage::TurnLabel(label) => tracing::debug!("{}", label),
            StatusMessage::SimulationOver(text) => tracing::info!("{}", text),
            StatusMessage::Cleared => tracing::debug!("status cleared"),
        }
    }
}

/// Label for a zero-based turn counter
pub fn turn_label(turn: u64, turns_per_day: u64) -> String {
    format!(
        "Day {}, turn {}",
        turn / turns_per_day + 1,
        turn % turns_per_day + 1
    )
}
