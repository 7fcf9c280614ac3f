//! Error types for the brew session

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The session task has stopped; the command was not applied
    #[error("brew session has stopped")]
    Closed,
}
