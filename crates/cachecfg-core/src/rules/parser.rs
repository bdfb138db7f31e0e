//! Rule and multi-line drivers

use std::collections::BTreeMap;
use tracing::debug;

use super::tokenizer::{Assignment, split_tokens};
use super::validate::{validate_action, validate_primary, validate_secondary};
use crate::codes::NOT_ENOUGH_ASSIGNMENTS;
use crate::context::ErrorContext;
use crate::error::CodedError;

/// Occurrences of each field name within one rule
pub type LabelCounts<'a> = BTreeMap<&'a str, usize>;

/// One rule line split into its positional roles.
///
/// Roles come from position alone: the first assignment is the primary
/// destination, the last is the action, and everything between is a
/// secondary specifier. Field names are not checked until
/// [`Rule::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule<'a> {
    pub primary: Assignment<'a>,
    pub secondary: Vec<Assignment<'a>>,
    pub action: Assignment<'a>,
    pub label_counts: LabelCounts<'a>,
}

impl Rule<'_> {
    /// Run the primary, secondary, and action validators in order.
    ///
    /// Stops at the first failure and prefixes it with the failing stage.
    pub fn validate(&self, ctx: &ErrorContext) -> Result<(), CodedError> {
        validate_primary(ctx, &self.primary)
            .map_err(|e| e.prepend("could not parse primary destination:"))?;

        for assignment in &self.secondary {
            validate_secondary(ctx, assignment)
                .map_err(|e| e.prepend("could not parse secondary specifier:"))?;
        }

        validate_action(ctx, &self.action).map_err(|e| e.prepend("could not parse action:"))?;
        Ok(())
    }

    /// Number of assignments in the rule
    pub fn assignment_count(&self) -> usize {
        self.secondary.len() + 2
    }
}

/// Split `line` into a [`Rule`] without checking field semantics
pub fn parse_rule<'a>(ctx: &ErrorContext, line: &'a str) -> Result<Rule<'a>, CodedError> {
    let tokens = split_tokens(ctx, line)?;

    let mut label_counts = LabelCounts::new();
    let mut assignments = Vec::with_capacity(tokens.len());
    for token in tokens {
        let assignment = Assignment::parse(ctx, token)?;
        *label_counts.entry(assignment.key).or_insert(0) += 1;
        assignments.push(assignment);
    }

    let mut iter = assignments.into_iter();
    match (iter.next(), iter.next_back()) {
        (Some(primary), Some(action)) => Ok(Rule {
            primary,
            secondary: iter.collect(),
            action,
            label_counts,
        }),
        _ => Err(ctx.new_error(NOT_ENOUGH_ASSIGNMENTS)),
    }
}

/// Parse and validate a single rule line
pub fn validate_rule(ctx: &ErrorContext, line: &str) -> Result<(), CodedError> {
    let rule = parse_rule(ctx, line)?;
    rule.validate(ctx)?;
    debug!(
        "Validated rule: {}={} with {} secondary specifiers",
        rule.primary.key,
        rule.primary.value,
        rule.secondary.len()
    );
    Ok(())
}

/// Validate newline-separated rules.
///
/// Input without a newline is validated as one rule with no line
/// annotation. Otherwise each line is validated in turn; the first failure
/// is prefixed with its 1-based line number and returned without looking at
/// later lines. Empty lines are not skipped.
pub fn validate_rules(ctx: &ErrorContext, text: &str) -> Result<(), CodedError> {
    if !text.contains('\n') {
        return validate_rule(ctx, text);
    }

    for (idx, line) in text.split('\n').enumerate() {
        validate_rule(ctx, line).map_err(|e| e.prepend(format_args!("error on line {}:", idx + 1)))?;
    }
    Ok(())
}
