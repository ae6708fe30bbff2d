//! Environment-based configuration helpers

use std::str::FromStr;
use thiserror::Error;

/// Errors raised while reading configuration from the environment
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    /// A required variable is unset or empty
    #[error("{0} is not set")]
    Missing(String),

    /// A variable is set but could not be parsed
    #[error("{key} has an invalid value {value:?}")]
    Invalid { key: String, value: String },
}

/// Load a `.env` file from the working directory if one exists
///
/// Returns the path that was loaded, if any.
pub fn load_dotenv() -> Option<std::path::PathBuf> {
    match dotenvy::dotenv() {
        Ok(path) => Some(path),
        Err(e) if e.not_found() => None,
        Err(e) => {
            tracing::warn!("Failed to load .env file: {}", e);
            None
        }
    }
}

/// Typed lookups over an environment source
///
/// The process environment is the usual source; tests supply a closure instead.
pub struct EnvReader<F> {
    lookup: F,
}

impl EnvReader<fn(&str) -> Option<String>> {
    /// Read from the process environment
    pub fn process() -> Self {
        fn lookup(key: &str) -> Option<String> {
            std::env::var(key).ok()
        }
        Self { lookup }
    }
}

impl<F> EnvReader<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Read from an arbitrary lookup function
    pub fn from_fn(lookup: F) -> Self {
        Self { lookup }
    }

    /// Get a variable, treating blank values as unset
    pub fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    /// Get a variable that must be present
    pub fn required(&self, key: &str) -> Result<String, EnvError> {
        self.optional(key)
            .ok_or_else(|| EnvError::Missing(key.to_string()))
    }

    /// Parse a variable, falling back to `default` when unset
    pub fn parse_or<T: FromStr>(&self, key: &str, default: T) -> Result<T, EnvError> {
        match self.optional(key) {
            Some(value) => value.parse().map_err(|_| EnvError::Invalid {
                key: key.to_string(),
                value,
            }),
            None => Ok(default),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn reader(vars: &[(&str, &str)]) -> EnvReader<impl Fn(&str) -> Option<String>> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        EnvReader::from_fn(move |key: &str| vars.get(key).cloned())
    }

    #[test]
    fn test_required() {
        let env = reader(&[("TOKEN", "abc"), ("BLANK", "  ")]);
        assert_eq!(env.required("TOKEN").unwrap(), "abc");
        assert_eq!(
            env.required("BLANK"),
            Err(EnvError::Missing("BLANK".to_string()))
        );
        assert!(env.required("NOPE").is_err());
    }

    #[test]
    fn test_parse_or() {
        let env = reader(&[("PORT", "8080"), ("BAD", "eighty")]);
        assert_eq!(env.parse_or("PORT", 3000_u16).unwrap(), 8080);
        assert_eq!(env.parse_or("MISSING", 3000_u16).unwrap(), 3000);

        let err = env.parse_or("BAD", 3000_u16).unwrap_err();
        assert_eq!(err.to_string(), "BAD has an invalid value \"eighty\"");
    }
}
