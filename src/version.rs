//! Build metadata for `--version`
//!
//! Release builds stamp commit, date and builder through environment variables at
//! compile time; local builds only report the crate version.

use std::fmt;

/// Version plus optional build provenance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FullVersion {
    pub version: String,
    pub commit: Option<String>,
    pub date: Option<String>,
    pub built_by: Option<String>,
}

impl FullVersion {
    /// Version information baked into this binary
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            commit: stamped(option_env!("VARIABLE_INJECTOR_COMMIT")),
            date: stamped(option_env!("VARIABLE_INJECTOR_DATE")),
            built_by: stamped(option_env!("VARIABLE_INJECTOR_BUILT_BY")),
        }
    }
}

fn stamped(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(String::from)
}

impl fmt::Display for FullVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.version)?;
        if let Some(commit) = &self.commit {
            write!(f, "\ncommit: {}", commit)?;
        }
        if let Some(date) = &self.date {
            write!(f, "\nbuilt at: {}", date)?;
        }
        if let Some(built_by) = &self.built_by {
            write!(f, "\nbuilt by: {}", built_by)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_version() {
        let v = FullVersion {
            version: "1.2.3".to_string(),
            ..Default::default()
        };
        assert_eq!(v.to_string(), "1.2.3");
    }

    #[test]
    fn test_full_version() {
        let v = FullVersion {
            version: "1.2.3".to_string(),
            commit: Some("abc123".to_string()),
            date: Some("2026-01-01".to_string()),
            built_by: Some("ci".to_string()),
        };
        assert_eq!(
            v.to_string(),
            "1.2.3\ncommit: abc123\nbuilt at: 2026-01-01\nbuilt by: ci"
        );
    }

    #[test]
    fn test_current_uses_package_version() {
        let v = FullVersion::current();
        assert_eq!(v.version, env!("CARGO_PKG_VERSION"));
    }
}
