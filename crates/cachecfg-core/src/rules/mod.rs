//! Cache-config rule grammar
//!
//! A rule is one line of space-separated assignments:
//!
//! ```text
//! rule           := primary_dest " " secondary_spec* " " action
//! primary_dest   := ("dest_domain"|"dest_host"|"dest_ip"|"host_regex"|"url_regex") "=" token
//! secondary_spec := ("port"|"scheme"|"prefix"|"suffix"|"method"|"time"|"src_ip"|"internal") "=" token
//! action         := ("action"|"cache-responses-to-cookies"|"pin-in-cache"|"revalidate"|"ttl-in-cache") "=" token
//! ```

mod fields;
mod parser;
mod tokenizer;
mod validate;

pub use fields::{ActionField, Method, ParseFieldError, PrimaryField, Scheme, SecondaryField};
pub use parser::{LabelCounts, Rule, parse_rule, validate_rule, validate_rules};
pub use tokenizer::{Assignment, MIN_ASSIGNMENTS, split_tokens};
pub use validate::{
    is_valid_hostname, is_valid_port, validate_action, validate_primary, validate_secondary,
};

use crate::codes::{
    BAD_ASSIGNMENT_MATCH, CACHE_CONFIG_CODES, ErrorCode, INVALID_ACTION_LABEL,
    INVALID_DESTINATION_LABEL, INVALID_HOST, INVALID_HOST_REGEX, INVALID_INTERNAL, INVALID_IP,
    INVALID_METHOD, INVALID_PORT, INVALID_SCHEME, INVALID_SECONDARY_LABEL, INVALID_SRC_IP,
    INVALID_URL_REGEX, NOT_ENOUGH_ASSIGNMENTS,
};
use crate::config::ContextConfig;
use crate::context::ErrorContext;
use crate::error::CodedError;

const DEFAULT_MESSAGES: &[(ErrorCode, &str)] = &[
    (
        NOT_ENOUGH_ASSIGNMENTS,
        "not enough assignments in rule, need a primary destination and an action",
    ),
    (BAD_ASSIGNMENT_MATCH, "could not match assignment"),
    (INVALID_DESTINATION_LABEL, "invalid primary destination label"),
    (INVALID_HOST, "invalid host"),
    (INVALID_IP, "invalid ip"),
    (INVALID_HOST_REGEX, "invalid host regex"),
    (INVALID_URL_REGEX, "invalid url regex"),
    (INVALID_SECONDARY_LABEL, "invalid secondary specifier label"),
    (INVALID_PORT, "invalid port"),
    (INVALID_SCHEME, "invalid scheme"),
    (INVALID_METHOD, "invalid method"),
    (INVALID_SRC_IP, "invalid src_ip"),
    (INVALID_INTERNAL, "invalid internal"),
    (INVALID_ACTION_LABEL, "invalid action label"),
];

/// Build the error context for cache-config rules.
///
/// Registers every cache-config code with a default message, then applies
/// the configured internal error mode.
pub fn error_context(config: &ContextConfig) -> Result<ErrorContext, CodedError> {
    let ctx = ErrorContext::new(config.name.as_str(), CACHE_CONFIG_CODES.iter().copied())?;
    ctx.add_mappings(DEFAULT_MESSAGES.iter().copied())?;
    config.apply(&ctx)?;
    Ok(ctx)
}

#[cfg(test)]
pub(crate) fn test_context() -> ErrorContext {
    error_context(&ContextConfig::default()).unwrap()
}
