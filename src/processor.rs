//! Per-document orchestration
//!
//! For each document: extract its identity, fold the replacement rules into a binding
//! table, and expand placeholders only when at least one rule applied. Documents no
//! rule applies to are returned untouched. The first error aborts the whole batch.

use crate::aggregate::aggregate;
use crate::config::Config;
use crate::error::Result;
use crate::expand::expand;
use crate::resource::ResourceDescriptor;
use serde_yaml::Value;
use tracing::debug;

/// Expand placeholders in one document according to `config`
pub fn process(document: Value, config: &Config) -> Result<Value> {
    let resource = ResourceDescriptor::from_document(&document);
    let aggregation = aggregate(&config.replacements, &resource);

    if !aggregation.matched_any {
        debug!(
            kind = %resource.kind,
            name = %resource.name,
            "no replacement applies, document left unchanged"
        );
        return Ok(document);
    }

    debug!(
        kind = %resource.kind,
        name = %resource.name,
        variables = aggregation.variables.len(),
        "expanding document"
    );
    expand(document, &aggregation.variables, config.prefix())
}

/// Process every document in order, stopping at the first failure
pub fn process_all(documents: Vec<Value>, config: &Config) -> Result<Vec<Value>> {
    documents
        .into_iter()
        .map(|document| process(document, config))
        .collect()
}
