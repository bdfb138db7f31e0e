//! Shared configuration for building error contexts
//!
//! The binary loads this from its config file; library users may build it
//! directly or take the defaults.

use serde::{Deserialize, Serialize};

use crate::context::{ErrorContext, InternalErrorMode};
use crate::error::CodedError;

/// Settings applied to an [`ErrorContext`] before it is handed out
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContextConfig {
    /// Diagnostic prefix for internal errors
    #[serde(default = "default_name")]
    pub name: String,
    /// Panic instead of returning internal errors from the creation path
    #[serde(default)]
    pub abort_on_misuse: bool,
}

impl ContextConfig {
    pub fn internal_error_mode(&self) -> InternalErrorMode {
        if self.abort_on_misuse {
            InternalErrorMode::Abort
        } else {
            InternalErrorMode::Return
        }
    }

    /// Apply the configured mode to a context still being configured.
    ///
    /// Only abort mode is recorded; the default needs no call, which keeps
    /// the context open for further mappings.
    pub fn apply(&self, ctx: &ErrorContext) -> Result<(), CodedError> {
        match self.internal_error_mode() {
            InternalErrorMode::Abort => ctx.set_internal_error_mode(InternalErrorMode::Abort),
            InternalErrorMode::Return => Ok(()),
        }
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            abort_on_misuse: false,
        }
    }
}

fn default_name() -> String {
    "cache config".to_string()
}
