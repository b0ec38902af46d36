// src/exit.rs
//! Standardized process exit codes for `pkgscope`.
//!
//! Provides a stable contract for scripts and automation.

use std::process::Termination;

use crate::error::GraphError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum PkgscopeExit {
    /// Operation completed successfully.
    Success = 0,
    /// Generic error (e.g. IO, config, export).
    Error = 1,
    /// The graph document is malformed (missing collections, bad JSON).
    InvalidInput = 2,
    /// Unresolved dependency cycles remain and `fail_on_cycles` is set.
    CyclesFound = 3,
}

impl PkgscopeExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Maps a failed run to an exit code, looking through `anyhow` context.
    #[must_use]
    pub fn from_error(err: &anyhow::Error) -> Self {
        match err.downcast_ref::<GraphError>() {
            Some(graph_err) if graph_err.is_input_error() => Self::InvalidInput,
            _ => Self::Error,
        }
    }
}

impl Termination for PkgscopeExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}
