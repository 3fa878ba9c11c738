//! Variable aggregation across replacement rules
//!
//! Rules are folded in declaration order. A rule applies to a resource when it has no
//! targets or when any of its targets selects the resource. Every applying rule copies
//! its variables into the binding table; a later rule overwrites an earlier one.

use crate::config::Replacement;
use crate::resource::ResourceDescriptor;
use std::collections::BTreeMap;

/// Variables bound for one resource
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    /// Merged binding table
    pub variables: BTreeMap<String, String>,

    /// Whether at least one rule applied
    pub matched_any: bool,
}

impl Replacement {
    /// Check if this rule applies to a resource
    pub fn applies_to(&self, resource: &ResourceDescriptor) -> bool {
        self.targets.is_empty() || self.targets.iter().any(|t| t.matches(resource))
    }
}

/// Merge the variables of every rule that applies to `resource`
pub fn aggregate(rules: &[Replacement], resource: &ResourceDescriptor) -> Aggregation {
    rules
        .iter()
        .filter(|rule| rule.applies_to(resource))
        .fold(Aggregation::default(), |mut acc, rule| {
            acc.variables.extend(
                rule.variables
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone())),
            );
            acc.matched_any = true;
            acc
        })
}
