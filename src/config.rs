//! Function configuration
//!
//! The configuration is usually the `functionConfig` of the incoming ResourceList,
//! but can also be loaded from a standalone YAML file.
//!
//! # Example
//!
//! ```yaml
//! apiVersion: example.com/v1
//! kind: VariableInjector
//! prefix: INJECT_
//! replacements:
//!   - targets:
//!       - kind: Ingress
//!     variables:
//!       DOMAIN: example.com
//!   - variables:          # no targets: applies to every resource
//!       REGION: eu-west-1
//! ```

use crate::error::{InjectorError, Result};
use crate::selector::Selector;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Top-level keys accepted in a configuration document
const KNOWN_FIELDS: &[&str] = &["apiVersion", "kind", "metadata", "replacements", "prefix"];

/// Variable injector configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    /// Replacement rules, applied in declaration order
    #[serde(default)]
    pub replacements: Vec<Replacement>,

    /// Only placeholders starting with this prefix are expanded
    #[serde(default)]
    pub prefix: Option<String>,
}

/// A set of target selectors and the variables bound for matching resources
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Replacement {
    /// Resources this replacement applies to; empty selects every resource
    #[serde(default)]
    pub targets: Vec<Selector>,

    #[serde(default, deserialize_with = "scalar_map")]
    pub variables: BTreeMap<String, String>,
}

impl Config {
    /// Parse configuration from a YAML value (e.g. a ResourceList functionConfig)
    pub fn from_value(value: Value) -> Result<Self> {
        if value.is_null() {
            return Ok(Self::default());
        }
        if let Value::Mapping(mapping) = &value {
            if let Some(key) = mapping
                .keys()
                .find(|key| !key.as_str().is_some_and(|k| KNOWN_FIELDS.contains(&k)))
            {
                return Err(InjectorError::InvalidConfig(format!(
                    "unknown field {}, expected one of {}",
                    serde_yaml::to_string(key)
                        .map(|k| k.trim_end().to_string())
                        .unwrap_or_default(),
                    KNOWN_FIELDS.join(", ")
                )));
            }
        }
        let config: Config = serde_yaml::from_value(value)
            .map_err(|e| InjectorError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(text: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(text)
            .map_err(|e| InjectorError::InvalidConfig(e.to_string()))?;
        Self::from_value(value)
    }

    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&text)
    }

    /// Prefix to hand to the expander, if one is set
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref().filter(|p| !p.is_empty())
    }

    /// Reject configuration that could never expand cleanly
    pub fn validate(&self) -> Result<()> {
        if let Some(prefix) = self.prefix() {
            if prefix.contains(['$', '{', '}']) {
                return Err(InjectorError::InvalidConfig(format!(
                    "prefix {:?} must not contain '$', '{{' or '}}'",
                    prefix
                )));
            }
        }

        for (index, replacement) in self.replacements.iter().enumerate() {
            for name in replacement.variables.keys() {
                if name.is_empty() {
                    return Err(InjectorError::InvalidConfig(format!(
                        "replacements[{}]: empty variable name",
                        index
                    )));
                }
                if name.contains(['}', ':']) {
                    return Err(InjectorError::InvalidConfig(format!(
                        "replacements[{}]: variable name {:?} must not contain '}}' or ':'",
                        index, name
                    )));
                }
            }
        }

        Ok(())
    }
}

impl Replacement {
    pub fn new(targets: Vec<Selector>, variables: BTreeMap<String, String>) -> Self {
        Self { targets, variables }
    }
}

// Values like `PORT: 8080` arrive as YAML numbers; keep their textual form
fn scalar_map<'de, D>(deserializer: D) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let raw: Option<BTreeMap<String, Value>> = Option::deserialize(deserializer)?;
    let mut variables = BTreeMap::new();
    for (name, value) in raw.unwrap_or_default() {
        let text = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => String::new(),
            _ => {
                return Err(D::Error::custom(format!(
                    "variable {} must be a scalar value",
                    name
                )))
            }
        };
        variables.insert(name, text);
    }
    Ok(variables)
}
