//! Coded error types

use std::fmt;
use thiserror::Error;

use crate::codes::{self, ErrorCode};

/// Root diagnostic of a [`CodedError`].
///
/// Set once when the error is minted and never touched by
/// [`CodedError::prepend`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct Cause(String);

impl Cause {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An error with a stable numeric code and a composable message chain.
///
/// `Display` renders the full composed message. The innermost diagnostic
/// stays available through [`CodedError::cause`] no matter how many
/// prefixes are added.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct CodedError {
    code: ErrorCode,
    message: String,
    cause: Cause,
}

impl CodedError {
    pub(crate) fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            cause: Cause(message.clone()),
            message,
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> &Cause {
        &self.cause
    }

    /// Whether this error reports misuse of the error framework.
    pub fn is_internal(&self) -> bool {
        codes::is_internal(self.code)
    }

    /// Prefix the message with `context`, separated by a single space.
    ///
    /// The code and cause are carried over unchanged.
    pub fn prepend(self, context: impl fmt::Display) -> Self {
        Self {
            message: format!("{} {}", context, self.message),
            ..self
        }
    }
}

/// Misuse of an [`ErrorContext`](crate::ErrorContext).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Misuse {
    #[error("error code {0} is not registered")]
    BadErrorCode(ErrorCode),

    #[error("error code {0} already has a default message")]
    DuplicateMapping(ErrorCode),

    #[error("no default message for error code {0}")]
    MissingMapping(ErrorCode),

    #[error("context is already in use and can no longer be configured")]
    InitTiming,

    #[error("error code {0} is reserved for internal errors")]
    ReservedCode(ErrorCode),
}

impl Misuse {
    pub fn code(&self) -> ErrorCode {
        match self {
            Misuse::BadErrorCode(_) => codes::BAD_ERROR_CODE,
            Misuse::DuplicateMapping(_) => codes::BAD_DUP_MAPPING,
            Misuse::MissingMapping(_) => codes::BAD_MAP_LOOKUP,
            Misuse::InitTiming => codes::BAD_INIT_TIMING,
            Misuse::ReservedCode(_) => codes::BAD_CODE_SET,
        }
    }

    /// Render as a coded error attributed to the named context.
    pub fn into_coded(self, context: &str) -> CodedError {
        CodedError::new(self.code(), format!("{}: internal error: {}", context, self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepend_composes_message() {
        let err = CodedError::new(codes::INVALID_IP, "invalid ip: bad_ip".to_string());
        let err = err.prepend("could not parse primary destination:");

        assert_eq!(
            err.to_string(),
            "could not parse primary destination: invalid ip: bad_ip"
        );
        assert_eq!(err.code(), codes::INVALID_IP);
        assert_eq!(err.cause().as_str(), "invalid ip: bad_ip");
    }

    #[test]
    fn test_prepend_keeps_cause_across_many_calls() {
        let mut err = CodedError::new(codes::INVALID_HOST, "root".to_string());
        for i in 0..50 {
            err = err.prepend(format_args!("layer {}:", i));
        }

        assert!(err.message().starts_with("layer 49: layer 48:"));
        assert!(err.message().ends_with("layer 0: root"));
        assert_eq!(err.cause().to_string(), "root");
        assert_eq!(err.code(), codes::INVALID_HOST);
    }

    #[test]
    fn test_misuse_codes() {
        assert_eq!(Misuse::BadErrorCode(7).code(), codes::BAD_ERROR_CODE);
        assert_eq!(Misuse::DuplicateMapping(7).code(), codes::BAD_DUP_MAPPING);
        assert_eq!(Misuse::MissingMapping(7).code(), codes::BAD_MAP_LOOKUP);
        assert_eq!(Misuse::InitTiming.code(), codes::BAD_INIT_TIMING);
        assert_eq!(Misuse::ReservedCode(-7).code(), codes::BAD_CODE_SET);
    }

    #[test]
    fn test_misuse_into_coded() {
        let err = Misuse::BadErrorCode(99).into_coded("cache config");

        assert!(err.is_internal());
        assert_eq!(err.code(), codes::BAD_ERROR_CODE);
        assert_eq!(
            err.to_string(),
            "cache config: internal error: error code 99 is not registered"
        );
    }
}
