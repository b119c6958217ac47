//! Environment-variable reading with aggregated reporting of missing values.
//!
//! [`EnvReader`] records every required variable that is absent so a
//! binary can print the full list in one go instead of failing on the
//! first gap.

use std::str::FromStr;

/// Errors produced while reading configuration from the environment.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum EnvError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Look up a variable in the process environment, treating blank values as unset.
pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Reads variables through a lookup function and tracks missing required ones.
pub struct EnvReader<'a> {
    lookup: Box<dyn Fn(&str) -> Option<String> + 'a>,
    missing: Vec<&'static str>,
}

impl EnvReader<'static> {
    /// Reader backed by the process environment.
    pub fn process() -> Self {
        Self::new(process_env)
    }
}

impl<'a> EnvReader<'a> {
    pub fn new(lookup: impl Fn(&str) -> Option<String> + 'a) -> Self {
        Self {
            lookup: Box::new(lookup),
            missing: Vec::new(),
        }
    }

    /// Read a required variable. When absent it is recorded and an empty
    /// string is returned; call [`finish`](Self::finish) before using the values.
    pub fn required(&mut self, name: &'static str) -> String {
        match (self.lookup)(name) {
            Some(value) => value,
            None => {
                if !self.missing.contains(&name) {
                    self.missing.push(name);
                }
                String::new()
            }
        }
    }

    pub fn optional(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
    }

    pub fn or_default(&self, name: &str, default: &str) -> String {
        self.optional(name).unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable, falling back to `default` when unset.
    pub fn parsed_or<T>(&self, name: &'static str, default: T) -> Result<T, EnvError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.optional(name) {
            Some(raw) => raw.trim().parse().map_err(|e: T::Err| EnvError::Invalid {
                name,
                reason: e.to_string(),
            }),
            None => Ok(default),
        }
    }

    /// Fail with every missing required variable, in the order they were requested.
    pub fn finish(self) -> Result<(), EnvError> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(EnvError::Missing(self.missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn reader(vars: &[(&str, &str)]) -> EnvReader<'static> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvReader::new(move |name| map.get(name).cloned())
    }

    #[test]
    fn missing_required_vars_are_reported_together() {
        let mut env = reader(&[("B", "present")]);
        assert_eq!(env.required("A"), "");
        assert_eq!(env.required("B"), "present");
        env.required("C");
        env.required("A");

        let err = env.finish().unwrap_err();
        assert_eq!(err, EnvError::Missing(vec!["A", "C"]));
        assert_eq!(
            err.to_string(),
            "Missing required environment variables: A, C"
        );
    }

    #[test]
    fn defaults_apply_only_when_unset() {
        let env = reader(&[("PORT", "8080")]);
        assert_eq!(env.parsed_or("PORT", 3000u16).unwrap(), 8080);
        assert_eq!(env.parsed_or("OTHER_PORT", 3000u16).unwrap(), 3000);
        assert_eq!(env.or_default("HOST", "0.0.0.0"), "0.0.0.0");
        assert!(env.finish().is_ok());
    }

    #[test]
    fn unparseable_value_is_invalid() {
        let env = reader(&[("PORT", "eighty")]);
        let err = env.parsed_or("PORT", 3000u16).unwrap_err();
        assert!(matches!(err, EnvError::Invalid { name: "PORT", .. }));
    }
}
