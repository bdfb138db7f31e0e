//! Error codes
//!
//! Positive codes are grouped in bands by concern:
//!
//! | Band  | Concern                |
//! |-------|------------------------|
//! | 10–19 | rule structure         |
//! | 20–29 | primary destination    |
//! | 30–39 | secondary specifier    |
//! | 40–49 | action                 |
//!
//! Negative codes belong to the error framework itself and signal misuse of
//! an [`ErrorContext`](crate::ErrorContext), not a bad rule.

/// Numeric error code carried by every [`CodedError`](crate::CodedError).
pub type ErrorCode = i32;

// Framework misuse

/// Code was never registered with the context.
pub const BAD_ERROR_CODE: ErrorCode = -1;
/// A default message was registered twice for the same code.
pub const BAD_DUP_MAPPING: ErrorCode = -2;
/// No default message exists for a code created without format arguments.
pub const BAD_MAP_LOOKUP: ErrorCode = -3;
/// Reserved. Format arguments are type-checked, so this is never produced.
pub const BAD_FMT_STRING: ErrorCode = -4;
/// Configuration attempted after the context locked.
pub const BAD_INIT_TIMING: ErrorCode = -5;
/// The whitelist contained a code in the reserved range.
pub const BAD_CODE_SET: ErrorCode = -6;

// Rule structure

pub const NOT_ENOUGH_ASSIGNMENTS: ErrorCode = 10;
pub const BAD_ASSIGNMENT_MATCH: ErrorCode = 11;

// Primary destination

pub const INVALID_DESTINATION_LABEL: ErrorCode = 20;
pub const INVALID_HOST: ErrorCode = 21;
pub const INVALID_IP: ErrorCode = 22;
pub const INVALID_HOST_REGEX: ErrorCode = 23;
pub const INVALID_URL_REGEX: ErrorCode = 24;

// Secondary specifier

pub const INVALID_SECONDARY_LABEL: ErrorCode = 30;
pub const INVALID_PORT: ErrorCode = 31;
pub const INVALID_SCHEME: ErrorCode = 32;
pub const INVALID_METHOD: ErrorCode = 33;
pub const INVALID_SRC_IP: ErrorCode = 34;
pub const INVALID_INTERNAL: ErrorCode = 35;

// Action

pub const INVALID_ACTION_LABEL: ErrorCode = 40;

/// Every code a cache-config context accepts.
pub const CACHE_CONFIG_CODES: &[ErrorCode] = &[
    NOT_ENOUGH_ASSIGNMENTS,
    BAD_ASSIGNMENT_MATCH,
    INVALID_DESTINATION_LABEL,
    INVALID_HOST,
    INVALID_IP,
    INVALID_HOST_REGEX,
    INVALID_URL_REGEX,
    INVALID_SECONDARY_LABEL,
    INVALID_PORT,
    INVALID_SCHEME,
    INVALID_METHOD,
    INVALID_SRC_IP,
    INVALID_INTERNAL,
    INVALID_ACTION_LABEL,
];

/// Whether `code` belongs to the framework's reserved range.
pub fn is_internal(code: ErrorCode) -> bool {
    code < 0
}
