//! Property-based tests for cachecfg_core
//!
//! These tests use proptest to generate rule text and error-context usage and
//! verify the parser and error framework invariants hold.

use cachecfg_core::codes::{
    BAD_ASSIGNMENT_MATCH, BAD_ERROR_CODE, BAD_INIT_TIMING, CACHE_CONFIG_CODES,
    NOT_ENOUGH_ASSIGNMENTS,
};
use cachecfg_core::{
    ContextConfig, ErrorContext, InternalErrorMode, coded_error, rules, validate_rule,
    validate_rules,
};
use proptest::prelude::*;

fn context() -> ErrorContext {
    rules::error_context(&ContextConfig::default()).unwrap()
}

// ============================================================================
// STRUCTURE
// ============================================================================

proptest! {
    /// Lines without a space have at most one token
    #[test]
    fn single_token_lines_are_too_short(line in "[^ \n]{0,40}") {
        let ctx = context();
        let err = validate_rule(&ctx, &line).unwrap_err();
        prop_assert_eq!(err.code(), NOT_ENOUGH_ASSIGNMENTS);
    }

    /// A token without '=' fails to match and is quoted in the message
    #[test]
    fn token_without_equals_is_cited(token in "[a-zA-Z0-9_.]{1,20}") {
        let ctx = context();
        let line = format!("dest_domain=example.com {} revalidate=1d", token);
        let err = validate_rule(&ctx, &line).unwrap_err();

        prop_assert_eq!(err.code(), BAD_ASSIGNMENT_MATCH);
        prop_assert!(err.message().contains(&token));
    }

    /// Uppercase or punctuation in a key is never accepted
    #[test]
    fn disallowed_key_characters(key in "[a-z]{0,5}[A-Z.:/][a-z]{0,5}") {
        let ctx = context();
        let line = format!("{}=x revalidate=1d", key);
        let err = validate_rule(&ctx, &line).unwrap_err();

        prop_assert_eq!(err.code(), BAD_ASSIGNMENT_MATCH);
        prop_assert!(err.message().contains(&key));
    }

    /// Valid secondary specifiers in any number never change the outcome
    #[test]
    fn accepted_secondaries(count in 0usize..8) {
        let ctx = context();
        let secondaries = vec!["suffix=js"; count].join(" ");
        let line = if count == 0 {
            "dest_domain=example.com revalidate=1d".to_string()
        } else {
            format!("dest_domain=example.com {} revalidate=1d", secondaries)
        };
        prop_assert!(validate_rule(&ctx, &line).is_ok());
    }
}

// ============================================================================
// MULTI-LINE
// ============================================================================

proptest! {
    /// The failing line number is the first invalid line
    #[test]
    fn multi_line_reports_failing_line(valid_before in 1usize..10) {
        let ctx = context();
        let mut lines = vec!["dest_domain=example.com suffix=js revalidate=1d"; valid_before];
        lines.push("dest_ip=bad_ip foo1=foo");
        lines.push("also invalid");

        let err = validate_rules(&ctx, &lines.join("\n")).unwrap_err();
        let expected = format!("error on line {}: ", valid_before + 1);
        prop_assert!(err.message().starts_with(&expected));
    }
}

// ============================================================================
// ERROR CONTEXT
// ============================================================================

proptest! {
    /// Codes outside the whitelist never touch the counters
    #[test]
    fn unknown_codes_are_never_counted(code in any::<i32>()) {
        prop_assume!(!CACHE_CONFIG_CODES.contains(&code));
        let ctx = context();

        prop_assert_eq!(ctx.new_error(code).code(), BAD_ERROR_CODE);
        prop_assert_eq!(coded_error!(ctx, code, "x{}", 1).code(), BAD_ERROR_CODE);
        prop_assert!(ctx.usage_stats().is_none());
    }

    /// Cause survives any number of prepends
    #[test]
    fn prepend_preserves_cause(prefixes in prop::collection::vec("[a-z ]{0,12}", 0..20)) {
        let ctx = context();
        let original = coded_error!(ctx, NOT_ENOUGH_ASSIGNMENTS, "root cause");
        let mut err = original.clone();
        for prefix in &prefixes {
            err = err.prepend(prefix);
        }

        prop_assert_eq!(err.cause(), original.cause());
        prop_assert_eq!(err.code(), NOT_ENOUGH_ASSIGNMENTS);
        prop_assert!(err.message().ends_with("root cause"));
    }

    /// Counts only grow, and track exactly what was minted
    #[test]
    fn usage_stats_are_monotonic(picks in prop::collection::vec(0usize..14, 1..40)) {
        let ctx = context();
        let mut previous = 0;
        for &pick in &picks {
            let code = CACHE_CONFIG_CODES[pick % CACHE_CONFIG_CODES.len()];
            let before = ctx.usage_stats().map(|s| s.get(code)).unwrap_or(0);
            ctx.new_error(code);
            let stats = ctx.usage_stats().unwrap();

            prop_assert_eq!(stats.get(code), before + 1);
            prop_assert_eq!(stats.total(), previous + 1);
            previous = stats.total();
        }
    }

    /// No registration succeeds once abort mode is chosen
    #[test]
    fn abort_mode_locks_registration(code in 1i32..100) {
        let ctx = ErrorContext::new("prop", [code]).unwrap();
        ctx.set_internal_error_mode(InternalErrorMode::Abort).unwrap();

        let err = ctx.add_mapping(code, "late").unwrap_err();
        prop_assert_eq!(err.code(), BAD_INIT_TIMING);
    }
}
