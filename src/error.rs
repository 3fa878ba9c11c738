//! Error types for variable injection
//!
//! Selector matching and variable aggregation cannot fail. Everything here comes from
//! loading input, validating configuration, or expanding placeholders.

use thiserror::Error;

/// Errors that can occur while injecting variables into a resource stream
#[derive(Error, Debug)]
pub enum InjectorError {
    /// A placeholder without a default referenced an unbound variable
    #[error("variable {name} is missing")]
    MissingVariable { name: String },

    #[error("variable {name} with value {value:?} is not a number")]
    InvalidNumber { name: String, value: String },

    #[error("variable {name} with value {value:?} is not a boolean")]
    InvalidBoolean { name: String, value: String },

    #[error("Invalid function config: {0}")]
    InvalidConfig(String),

    #[error("Invalid resource list: {0}")]
    InvalidResourceList(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, InjectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_variable_message() {
        let err = InjectorError::MissingVariable {
            name: "DOMAIN".to_string(),
        };
        assert_eq!(err.to_string(), "variable DOMAIN is missing");
    }

    #[test]
    fn test_invalid_number_message() {
        let err = InjectorError::InvalidNumber {
            name: "PORT".to_string(),
            value: "http".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "variable PORT with value \"http\" is not a number"
        );
    }

    #[test]
    fn test_yaml_error_converts() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("a: [").unwrap_err();
        let err: InjectorError = yaml_err.into();
        assert!(err.to_string().starts_with("YAML error"));
    }
}
