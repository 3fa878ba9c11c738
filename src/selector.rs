//! Resource selectors for replacement targets
//!
//! A selector names any subset of group, version, kind, name and namespace.
//! Supports:
//! - Exact matches: `kind: Ingress` (case-sensitive, byte equality)
//! - Wildcards: any field left out (or given as an empty string) matches everything
//! - Conjunction: every field that is present must match

use crate::resource::ResourceDescriptor;
use serde::{Deserialize, Deserializer};

/// Selector that determines which resources a replacement applies to
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Selector {
    #[serde(default, deserialize_with = "empty_as_wildcard")]
    pub group: Option<String>,
    #[serde(default, deserialize_with = "empty_as_wildcard")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "empty_as_wildcard")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "empty_as_wildcard")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "empty_as_wildcard")]
    pub namespace: Option<String>,
}

impl Selector {
    /// Create a selector that matches every resource
    pub fn any() -> Self {
        Self::default()
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = non_empty(group.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = non_empty(version.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = non_empty(kind.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = non_empty(name.into());
        self
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = non_empty(namespace.into());
        self
    }

    /// Check if a resource is selected
    pub fn matches(&self, resource: &ResourceDescriptor) -> bool {
        field_matches(&self.group, &resource.group)
            && field_matches(&self.version, &resource.version)
            && field_matches(&self.kind, &resource.kind)
            && field_matches(&self.name, &resource.name)
            && field_matches(&self.namespace, &resource.namespace)
    }
}

fn field_matches(expected: &Option<String>, actual: &str) -> bool {
    match expected {
        None => true,
        Some(value) => value == actual,
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

// Existing configurations spell "any" as ""
fn empty_as_wildcard<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.and_then(non_empty))
}
