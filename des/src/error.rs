//! Error types for the event engine

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    /// The pending event set was empty when the next event was requested.
    #[error("event schedule is empty")]
    EmptySchedule,
}
