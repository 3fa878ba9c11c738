//! Placeholder expansion over YAML documents
//!
//! Supported placeholder forms inside string scalars:
//! - `${NAME}`: bound value, error when unbound
//! - `${NAME:-default}`: bound value, or the literal default
//! - `${NAME:number}`: bound value emitted as a YAML number
//! - `${NAME:boolean}`: bound value emitted as a YAML boolean
//!
//! Typed placeholders only change the scalar type when they make up the whole string;
//! inside a longer string the value is spliced in as text. With a prefix configured,
//! only names starting with the prefix are resolved (prefix stripped); every other
//! placeholder is left untouched.
//!
//! A token runs from `${` to its matching `}`, so defaults may carry balanced braces
//! (`${CFG:-{}}`) or further placeholders (`${A:-${B}}`). Defaults are expanded only
//! when they are used.

use crate::error::{InjectorError, Result};
use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Number, Value};
use std::collections::BTreeMap;
use std::ops::Range;
use tracing::trace;

/// One `${...}` token located in a string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'t> {
    /// Byte range of the whole token, `${` through the closing `}`
    pub range: Range<usize>,
    /// Text between `${` and the matching `}`
    pub body: &'t str,
}

/// Iterator over the balanced `${...}` tokens of a string
///
/// Scanning stops at the first unterminated token; the rest of the text is literal.
#[derive(Debug, Clone)]
pub struct Tokens<'t> {
    text: &'t str,
    pos: usize,
}

impl<'t> Tokens<'t> {
    pub fn new(text: &'t str) -> Self {
        Self { text, pos: 0 }
    }
}

impl<'t> Iterator for Tokens<'t> {
    type Item = Token<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos + self.text.get(self.pos..)?.find("${")?;
        let mut depth = 0usize;
        for (offset, ch) in self.text[start + 1..].char_indices() {
            match ch {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        let end = start + 1 + offset + 1;
                        self.pos = end;
                        return Some(Token {
                            range: start..end,
                            body: &self.text[start + 2..end - 1],
                        });
                    }
                }
                _ => {}
            }
        }
        self.pos = self.text.len();
        None
    }
}

/// Scalar type requested by a placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    Text,
    Number,
    Boolean,
}

/// A parsed `${...}` token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'t> {
    pub name: &'t str,
    pub default: Option<&'t str>,
    pub coercion: Coercion,
}

impl<'t> Placeholder<'t> {
    /// Parse the text between `${` and `}`; `None` if it is not a placeholder we own
    pub fn parse(body: &'t str) -> Option<Self> {
        let (name, default, coercion) = if let Some((name, default)) = body.split_once(":-") {
            (name, Some(default), Coercion::Text)
        } else if let Some(name) = body.strip_suffix(":number") {
            (name, None, Coercion::Number)
        } else if let Some(name) = body.strip_suffix(":boolean") {
            (name, None, Coercion::Boolean)
        } else {
            (body, None, Coercion::Text)
        };

        if name.is_empty()
            || name.contains([':', '$', '{', '}'])
            || name.chars().any(char::is_whitespace)
        {
            return None;
        }

        Some(Self {
            name,
            default,
            coercion,
        })
    }
}

/// Expands placeholders against one binding table
#[derive(Debug, Clone, Copy)]
pub struct Expander<'a> {
    variables: &'a BTreeMap<String, String>,
    prefix: Option<&'a str>,
}

impl<'a> Expander<'a> {
    pub fn new(variables: &'a BTreeMap<String, String>, prefix: Option<&'a str>) -> Self {
        Self {
            variables,
            prefix: prefix.filter(|p| !p.is_empty()),
        }
    }

    /// Expand every string scalar in a document
    pub fn expand_value(&self, value: Value) -> Result<Value> {
        match value {
            Value::String(text) => self.expand_str(text),
            Value::Sequence(items) => items
                .into_iter()
                .map(|item| self.expand_value(item))
                .collect::<Result<Vec<_>>>()
                .map(Value::Sequence),
            Value::Mapping(mapping) => {
                let mut expanded = Mapping::with_capacity(mapping.len());
                for (key, item) in mapping {
                    expanded.insert(key, self.expand_value(item)?);
                }
                Ok(Value::Mapping(expanded))
            }
            Value::Tagged(tagged) => {
                let TaggedValue { tag, value } = *tagged;
                Ok(Value::Tagged(Box::new(TaggedValue {
                    tag,
                    value: self.expand_value(value)?,
                })))
            }
            other => Ok(other),
        }
    }

    /// Expand one string scalar
    pub fn expand_str(&self, text: String) -> Result<Value> {
        if !text.contains("${") {
            return Ok(Value::String(text));
        }

        if let Some(typed) = self.expand_typed(&text)? {
            return Ok(typed);
        }

        self.splice(&text).map(Value::String)
    }

    /// Replace every resolvable token in `text`, keeping the rest verbatim
    fn splice(&self, text: &str) -> Result<String> {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for token in Tokens::new(text) {
            out.push_str(&text[last..token.range.start]);
            last = token.range.end;

            let resolved = match Placeholder::parse(token.body) {
                Some(placeholder) => match self.resolve(&placeholder)? {
                    Some(value) => {
                        coerce(&placeholder, value.clone())?;
                        Some(value)
                    }
                    None => None,
                },
                None => None,
            };

            match resolved {
                Some(value) => out.push_str(&value),
                None => out.push_str(&text[token.range]),
            }
        }
        out.push_str(&text[last..]);

        Ok(out)
    }

    /// A lone typed placeholder becomes a typed scalar
    fn expand_typed(&self, text: &str) -> Result<Option<Value>> {
        let Some(token) = Tokens::new(text).next() else {
            return Ok(None);
        };
        if token.range != (0..text.len()) {
            return Ok(None);
        }
        let Some(placeholder) = Placeholder::parse(token.body) else {
            return Ok(None);
        };
        if placeholder.coercion == Coercion::Text {
            return Ok(None);
        }

        match self.resolve(&placeholder)? {
            Some(value) => coerce(&placeholder, value).map(Some),
            None => Ok(None),
        }
    }

    /// Resolve a placeholder; `Ok(None)` leaves it in place
    fn resolve(&self, placeholder: &Placeholder<'_>) -> Result<Option<String>> {
        let key = match self.prefix {
            Some(prefix) => match placeholder.name.strip_prefix(prefix) {
                Some(stripped) => stripped,
                None => {
                    trace!(name = placeholder.name, "placeholder outside prefix, left as is");
                    return Ok(None);
                }
            },
            None => placeholder.name,
        };

        if let Some(value) = self.variables.get(key) {
            trace!(name = placeholder.name, "placeholder resolved from bindings");
            return Ok(Some(value.clone()));
        }

        match placeholder.default {
            Some(default) => {
                trace!(name = placeholder.name, "placeholder resolved from default");
                self.splice(default).map(Some)
            }
            None => Err(InjectorError::MissingVariable {
                name: placeholder.name.to_string(),
            }),
        }
    }
}

fn coerce(placeholder: &Placeholder<'_>, value: String) -> Result<Value> {
    match placeholder.coercion {
        Coercion::Text => Ok(Value::String(value)),
        Coercion::Number => parse_number(&value)
            .map(Value::Number)
            .ok_or_else(|| InjectorError::InvalidNumber {
                name: placeholder.name.to_string(),
                value,
            }),
        Coercion::Boolean => match value.as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(InjectorError::InvalidBoolean {
                name: placeholder.name.to_string(),
                value,
            }),
        },
    }
}

fn parse_number(text: &str) -> Option<Number> {
    let text = text.trim();
    if let Ok(n) = text.parse::<i64>() {
        return Some(Number::from(n));
    }
    if let Ok(n) = text.parse::<u64>() {
        return Some(Number::from(n));
    }
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(Number::from(n)),
        _ => None,
    }
}

/// Expand all placeholders in `document` using `variables`
pub fn expand(
    document: Value,
    variables: &BTreeMap<String, String>,
    prefix: Option<&str>,
) -> Result<Value> {
    Expander::new(variables, prefix).expand_value(document)
}
