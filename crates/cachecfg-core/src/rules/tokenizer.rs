//! Splits a rule line into `key=value` assignments

use regex::Regex;
use std::sync::LazyLock;

use crate::codes::{BAD_ASSIGNMENT_MATCH, NOT_ENOUGH_ASSIGNMENTS};
use crate::coded_error;
use crate::context::ErrorContext;
use crate::error::CodedError;

/// Fewest tokens a rule may have: one primary destination and one action
pub const MIN_ASSIGNMENTS: usize = 2;

static ASSIGNMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z_0-9-]+)=(\S+)$").expect("assignment pattern is valid")
});

/// One `key=value` token of a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

impl<'a> Assignment<'a> {
    /// Match a single token against the assignment pattern
    pub fn parse(ctx: &ErrorContext, token: &'a str) -> Result<Self, CodedError> {
        let caps = ASSIGNMENT_RE.captures(token).ok_or_else(|| {
            coded_error!(
                ctx,
                BAD_ASSIGNMENT_MATCH,
                "could not match assignment '{}'",
                token
            )
        })?;

        match (caps.get(1), caps.get(2)) {
            (Some(key), Some(value)) => Ok(Self {
                key: key.as_str(),
                value: value.as_str(),
            }),
            _ => Err(coded_error!(
                ctx,
                BAD_ASSIGNMENT_MATCH,
                "could not match assignment '{}'",
                token
            )),
        }
    }
}

/// Split `line` on single spaces.
///
/// Runs of spaces are not collapsed, so they yield empty tokens that later
/// fail to match. Fewer than [`MIN_ASSIGNMENTS`] tokens is rejected before
/// any token is inspected.
pub fn split_tokens<'a>(ctx: &ErrorContext, line: &'a str) -> Result<Vec<&'a str>, CodedError> {
    let tokens: Vec<&str> = if line.is_empty() {
        Vec::new()
    } else {
        line.split(' ').collect()
    };

    if tokens.len() < MIN_ASSIGNMENTS {
        return Err(ctx.new_error(NOT_ENOUGH_ASSIGNMENTS));
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_context;

    #[test]
    fn test_assignment_parse() {
        let ctx = test_context();
        let a = Assignment::parse(&ctx, "dest_domain=example.com").unwrap();
        assert_eq!(a.key, "dest_domain");
        assert_eq!(a.value, "example.com");

        let a = Assignment::parse(&ctx, "ttl-in-cache=1d").unwrap();
        assert_eq!(a.key, "ttl-in-cache");
        assert_eq!(a.value, "1d");
    }

    #[test]
    fn test_value_keeps_equals_signs() {
        let ctx = test_context();
        let a = Assignment::parse(&ctx, "url_regex=a=b").unwrap();
        assert_eq!(a.key, "url_regex");
        assert_eq!(a.value, "a=b");
    }

    #[test]
    fn test_bad_assignments() {
        let ctx = test_context();
        for token in ["", "foo", "=bar", "foo=", "Foo=bar", "fo.o=bar", "foo=b\tar"] {
            let err = Assignment::parse(&ctx, token).unwrap_err();
            assert_eq!(err.code(), BAD_ASSIGNMENT_MATCH, "token {:?}", token);
            assert!(err.message().contains(&format!("'{}'", token)));
        }
    }

    #[test]
    fn test_split_tokens() {
        let ctx = test_context();
        assert_eq!(split_tokens(&ctx, "a=1 b=2").unwrap(), vec!["a=1", "b=2"]);
        assert_eq!(
            split_tokens(&ctx, "a=1  b=2").unwrap(),
            vec!["a=1", "", "b=2"]
        );
    }

    #[test]
    fn test_split_tokens_too_few() {
        let ctx = test_context();
        for line in ["", "dest_domain=example.com", "garbage"] {
            let err = split_tokens(&ctx, line).unwrap_err();
            assert_eq!(err.code(), NOT_ENOUGH_ASSIGNMENTS, "line {:?}", line);
        }

        // Token count is checked before token contents
        assert_eq!(split_tokens(&ctx, "not assignments").unwrap().len(), 2);
    }
}
