//! Harness errors
//!
//! Only usage errors leave a session; everything a test body does is
//! contained at the unit boundary.

use thiserror::Error;

/// Errors returned by the session and catalog lookups
#[derive(Error, Debug, PartialEq, Eq)]
pub enum HarnessError {
    #[error("Tests already running.")]
    AlreadyRunning,

    #[error("Unknown test group: {0}")]
    UnknownGroup(String),
}
