//! Per-position field validators
//!
//! Each validator checks one assignment and returns the recognized field on
//! success. Failures carry the offending key or value in the message.

use regex::Regex;
use std::net::IpAddr;
use std::sync::LazyLock;

use super::fields::{ActionField, Method, PrimaryField, Scheme, SecondaryField};
use super::tokenizer::Assignment;
use crate::codes::{
    INVALID_ACTION_LABEL, INVALID_DESTINATION_LABEL, INVALID_HOST, INVALID_HOST_REGEX,
    INVALID_INTERNAL, INVALID_IP, INVALID_METHOD, INVALID_PORT, INVALID_SCHEME,
    INVALID_SECONDARY_LABEL, INVALID_SRC_IP, INVALID_URL_REGEX,
};
use crate::coded_error;
use crate::context::ErrorContext;
use crate::error::CodedError;

/// Longest hostname accepted, excluding a trailing dot
const MAX_HOSTNAME_LEN: usize = 253;

static HOST_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?$")
        .expect("host label pattern is valid")
});

/// Validate the leading assignment of a rule
pub fn validate_primary(
    ctx: &ErrorContext,
    assignment: &Assignment<'_>,
) -> Result<PrimaryField, CodedError> {
    let field: PrimaryField = assignment.key.parse().map_err(|_| {
        coded_error!(
            ctx,
            INVALID_DESTINATION_LABEL,
            "invalid primary destination label '{}'",
            assignment.key
        )
    })?;
    let value = assignment.value;

    match field {
        PrimaryField::DestDomain | PrimaryField::DestHost => {
            if !is_valid_hostname(value) {
                return Err(coded_error!(ctx, INVALID_HOST, "invalid host '{}'", value));
            }
        }
        PrimaryField::DestIp => {
            if value.parse::<IpAddr>().is_err() {
                return Err(coded_error!(ctx, INVALID_IP, "invalid ip '{}'", value));
            }
        }
        PrimaryField::HostRegex => {
            if Regex::new(value).is_err() {
                return Err(coded_error!(
                    ctx,
                    INVALID_HOST_REGEX,
                    "invalid host regex '{}'",
                    value
                ));
            }
        }
        PrimaryField::UrlRegex => {
            if Regex::new(value).is_err() {
                return Err(coded_error!(
                    ctx,
                    INVALID_URL_REGEX,
                    "invalid url regex '{}'",
                    value
                ));
            }
        }
    }

    Ok(field)
}

/// Validate one assignment between the primary destination and the action
pub fn validate_secondary(
    ctx: &ErrorContext,
    assignment: &Assignment<'_>,
) -> Result<SecondaryField, CodedError> {
    let field: SecondaryField = assignment.key.parse().map_err(|_| {
        coded_error!(
            ctx,
            INVALID_SECONDARY_LABEL,
            "invalid secondary specifier label '{}'",
            assignment.key
        )
    })?;
    let value = assignment.value;

    match field {
        SecondaryField::Port => {
            if !is_valid_port(value) {
                return Err(coded_error!(ctx, INVALID_PORT, "invalid port '{}'", value));
            }
        }
        SecondaryField::Scheme => {
            if value.parse::<Scheme>().is_err() {
                return Err(coded_error!(ctx, INVALID_SCHEME, "invalid scheme '{}'", value));
            }
        }
        SecondaryField::Method => {
            if value.parse::<Method>().is_err() {
                return Err(coded_error!(ctx, INVALID_METHOD, "invalid method '{}'", value));
            }
        }
        SecondaryField::SrcIp => {
            if value.parse::<IpAddr>().is_err() {
                return Err(coded_error!(ctx, INVALID_SRC_IP, "invalid src_ip '{}'", value));
            }
        }
        SecondaryField::Internal => {
            if value != "true" && value != "false" {
                return Err(coded_error!(
                    ctx,
                    INVALID_INTERNAL,
                    "invalid internal '{}', expected 'true' or 'false'",
                    value
                ));
            }
        }
        // Accepted by name only
        SecondaryField::Prefix | SecondaryField::Suffix | SecondaryField::Time => {}
    }

    Ok(field)
}

/// Validate the trailing assignment of a rule. Values are not checked.
pub fn validate_action(
    ctx: &ErrorContext,
    assignment: &Assignment<'_>,
) -> Result<ActionField, CodedError> {
    assignment.key.parse().map_err(|_| {
        coded_error!(
            ctx,
            INVALID_ACTION_LABEL,
            "invalid action label '{}'",
            assignment.key
        )
    })
}

/// RFC 1123 hostname: dot-separated labels of letters, digits, and inner
/// hyphens. A single trailing dot is allowed.
pub fn is_valid_hostname(host: &str) -> bool {
    let host = host.strip_suffix('.').unwrap_or(host);
    if host.is_empty() || host.len() > MAX_HOSTNAME_LEN {
        return false;
    }
    host.split('.').all(|label| HOST_LABEL_RE.is_match(label))
}

/// Decimal port number in `0..=65535`
pub fn is_valid_port(port: &str) -> bool {
    !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) && port.parse::<u16>().is_ok()
}
