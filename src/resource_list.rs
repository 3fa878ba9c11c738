//! KRM ResourceList input and output
//!
//! The function normally reads one ResourceList from stdin and writes one to stdout:
//!
//! ```yaml
//! apiVersion: config.kubernetes.io/v1
//! kind: ResourceList
//! items:
//!   - apiVersion: v1
//!     kind: Service
//!     ...
//! functionConfig:
//!   replacements: [...]
//! ```
//!
//! Everything besides `items` is written back as it was read, in its original key order.
//! Input that is not a single ResourceList is taken as a plain `---` separated stream of
//! resources and written back the same way.

use crate::cli::OutputFormat;
use crate::error::{InjectorError, Result};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};

pub const RESOURCE_LIST_KIND: &str = "ResourceList";

/// Where the items came from, and how to write them back
#[derive(Debug, Clone, PartialEq)]
enum Envelope {
    /// A ResourceList document; its `items` key stays in place as an empty slot
    List(Mapping),
    /// A plain multi-document stream
    Stream,
}

/// Parsed ResourceList envelope or plain document stream
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceList {
    /// Resources to process, in stream order
    pub items: Vec<Value>,

    /// Raw function configuration (`Value::Null` when absent)
    pub function_config: Value,

    envelope: Envelope,
}

impl ResourceList {
    /// Wrap plain resources that arrived without a ResourceList envelope
    pub fn from_stream(items: Vec<Value>) -> Result<Self> {
        for (index, item) in items.iter().enumerate() {
            if !item.is_mapping() {
                return Err(InjectorError::InvalidResourceList(format!(
                    "document {} is not a mapping",
                    index
                )));
            }
            if is_resource_list(item) {
                return Err(InjectorError::InvalidResourceList(format!(
                    "document {} is a {} inside a multi-document stream",
                    index, RESOURCE_LIST_KIND
                )));
            }
        }

        Ok(Self {
            items,
            function_config: Value::Null,
            envelope: Envelope::Stream,
        })
    }

    /// Parse a ResourceList, or a plain YAML stream, from YAML or JSON text
    pub fn parse(text: &str) -> Result<Self> {
        let mut documents = Vec::new();
        for document in serde_yaml::Deserializer::from_str(text) {
            let value = Value::deserialize(document)?;
            if !value.is_null() {
                documents.push(value);
            }
        }

        if documents.len() == 1 && is_resource_list(&documents[0]) {
            if let Some(Value::Mapping(envelope)) = documents.pop() {
                return Self::from_envelope(envelope);
            }
        }

        Self::from_stream(documents)
    }

    fn from_envelope(mut envelope: Mapping) -> Result<Self> {
        let items = match envelope.get_mut("items").map(std::mem::take) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Sequence(items)) => items,
            Some(_) => {
                return Err(InjectorError::InvalidResourceList(
                    "items must be a list".to_string(),
                ))
            }
        };

        let function_config = envelope.get("functionConfig").cloned().unwrap_or(Value::Null);

        Ok(Self {
            items,
            function_config,
            envelope: Envelope::List(envelope),
        })
    }

    /// True when the input was a plain stream rather than a ResourceList
    pub fn is_stream(&self) -> bool {
        matches!(self.envelope, Envelope::Stream)
    }

    /// Replace the processed items
    pub fn with_items(mut self, items: Vec<Value>) -> Self {
        self.items = items;
        self
    }

    /// Assemble the output: the envelope for a ResourceList, the bare items for a stream
    pub fn to_value(&self) -> Value {
        match &self.envelope {
            Envelope::List(envelope) => {
                let mut envelope = envelope.clone();
                envelope.insert("items".into(), Value::Sequence(self.items.clone()));
                Value::Mapping(envelope)
            }
            Envelope::Stream => Value::Sequence(self.items.clone()),
        }
    }

    /// Serialize in the requested output format
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match (format, &self.envelope) {
            (OutputFormat::Yaml, Envelope::Stream) => {
                let documents = self
                    .items
                    .iter()
                    .map(serde_yaml::to_string)
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(documents.join("---\n"))
            }
            (OutputFormat::Yaml, Envelope::List(_)) => Ok(serde_yaml::to_string(&self.to_value())?),
            (OutputFormat::Json, _) => {
                let mut json = serde_json::to_string_pretty(&self.to_value())?;
                json.push('\n');
                Ok(json)
            }
        }
    }
}

fn is_resource_list(document: &Value) -> bool {
    document.get("kind").and_then(Value::as_str) == Some(RESOURCE_LIST_KIND)
}
