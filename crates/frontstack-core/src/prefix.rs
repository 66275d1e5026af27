//! Naming prefix

use crate::error::{Result, StackError};
use serde::{Deserialize, Serialize};

/// Suffix of the `Application` tag value
pub const APPLICATION_SUFFIX: &str = "frontend";

/// Short token that disambiguates resource names across repeated
/// deployments of the same stack
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Prefix(String);

impl Prefix {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let reason = if value.is_empty() {
            Some("must not be empty")
        } else if value.contains('/') {
            Some("must not contain '/'")
        } else if value.chars().any(char::is_whitespace) {
            Some("must not contain whitespace")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(StackError::InvalidPrefix {
                prefix: value,
                reason: reason.to_string(),
            }),
            None => Ok(Self(value)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `"{prefix}-"`, the form every rewritten name starts with
    pub fn qualified(&self) -> String {
        format!("{}-", self.0)
    }

    /// True if `name` already carries this prefix
    pub fn is_applied_to(&self, name: &str) -> bool {
        name.strip_prefix(self.0.as_str())
            .is_some_and(|rest| rest.starts_with('-'))
    }

    /// `"{prefix}-{name}"`, or `name` unchanged if it is already prefixed
    pub fn apply(&self, name: &str) -> String {
        if self.is_applied_to(name) {
            name.to_string()
        } else {
            format!("{}-{}", self.0, name)
        }
    }

    /// Value of the `Application` tag
    pub fn application(&self) -> String {
        format!("{}-{}", self.0, APPLICATION_SUFFIX)
    }
}

impl std::fmt::Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Prefix {
    type Err = StackError;

    fn from_str(s: &str) -> Result<Self> {
        Prefix::new(s)
    }
}

impl TryFrom<String> for Prefix {
    type Error = StackError;

    fn try_from(value: String) -> Result<Self> {
        Prefix::new(value)
    }
}

impl From<Prefix> for String {
    fn from(prefix: Prefix) -> Self {
        prefix.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_prefixes() {
        assert!(Prefix::new("").is_err());
        assert!(Prefix::new("a/b").is_err());
        assert!(Prefix::new("a b").is_err());
        assert!(Prefix::new("acme").is_ok());
    }

    #[test]
    fn test_apply_is_idempotent() {
        let prefix = Prefix::new("acme").unwrap();
        let once = prefix.apply("site");
        assert_eq!(once, "acme-site");
        assert_eq!(prefix.apply(&once), once);
    }

    #[test]
    fn test_bare_prefix_match_is_not_enough() {
        // "acmesite" starts with "acme" but not with "acme-"
        let prefix = Prefix::new("acme").unwrap();
        assert!(!prefix.is_applied_to("acmesite"));
        assert_eq!(prefix.apply("acmesite"), "acme-acmesite");
    }

    #[test]
    fn test_application_tag_value() {
        let prefix = Prefix::new("acme").unwrap();
        assert_eq!(prefix.application(), "acme-frontend");
        assert_eq!(prefix.qualified(), "acme-");
    }
}
