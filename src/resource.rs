//! Resource identity extraction
//!
//! Reads the five identity fields (group, version, kind, name, namespace) from a
//! manifest without touching it. Missing or non-string fields come back empty.

use serde_yaml::Value;

/// Identity of a single resource manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceDescriptor {
    pub group: String,
    pub version: String,
    pub kind: String,
    pub name: String,
    pub namespace: String,
}

impl ResourceDescriptor {
    /// Extract the descriptor of a manifest
    pub fn from_document(document: &Value) -> Self {
        let (group, version) = split_api_version(string_at(document, &["apiVersion"]));

        Self {
            group: group.to_string(),
            version: version.to_string(),
            kind: string_at(document, &["kind"]).to_string(),
            name: string_at(document, &["metadata", "name"]).to_string(),
            namespace: string_at(document, &["metadata", "namespace"]).to_string(),
        }
    }
}

/// Split `group/version` on the first slash; core resources have no group
pub fn split_api_version(api_version: &str) -> (&str, &str) {
    match api_version.split_once('/') {
        Some((group, version)) => (group, version),
        None => ("", api_version),
    }
}

fn string_at<'a>(document: &'a Value, path: &[&str]) -> &'a str {
    let mut current = document;
    for key in path {
        match current.get(*key) {
            Some(next) => current = next,
            None => return "",
        }
    }
    current.as_str().unwrap_or("")
}
