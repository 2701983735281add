//! Rule plumbing shared by provider validators
//!
//! A rule is a plain function from a configuration object and a machine type
//! resolver to an [`ErrorList`]. Entry points hold an ordered table of named
//! rules so each one can also be run on its own.
//!
//! Copyright (c) 2025 Clusterlint Team
//! Licensed under the Apache-2.0 license

use super::errors::{ErrorList, ValidationError};
use super::path::FieldPath;
use crate::machine_types::MachineTypeResolver;

/// Signature of a rule over `T`
pub type RuleFn<T> = fn(&T, &dyn MachineTypeResolver) -> ErrorList;

/// A named validation rule
pub struct Rule<T: 'static> {
    /// Stable identifier used in logs
    pub name: &'static str,
    /// The check itself
    pub check: RuleFn<T>,
}

impl<T: 'static> Rule<T> {
    /// Run this rule in isolation
    pub fn run(&self, target: &T, resolver: &dyn MachineTypeResolver) -> ErrorList {
        (self.check)(target, resolver)
    }
}

impl<T: 'static> std::fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// Run every rule of `rules` in order against `target`
///
/// A failing rule never suppresses the ones after it.
pub fn run_rules<T: 'static>(
    rules: &[Rule<T>],
    target: &T,
    resolver: &dyn MachineTypeResolver,
) -> ErrorList {
    let mut errors = ErrorList::new();
    for rule in rules {
        let found = rule.run(target, resolver);
        tracing::debug!(rule = rule.name, violations = found.len(), "Rule evaluated");
        errors.append(found);
    }
    errors
}

/// Check that `value` is one of `valid_values`
///
/// Produces a single `Invalid` error listing the accepted values when it is
/// not, and an empty list otherwise.
pub fn is_valid_value(path: &FieldPath, value: &str, valid_values: &[&str]) -> ErrorList {
    let mut errors = ErrorList::new();
    if !valid_values.contains(&value) {
        errors.push(ValidationError::invalid(
            path.clone(),
            value,
            format!("Invalid value: {}, valid values: {}", value, valid_values.join(",")),
        ));
    }
    errors
}
