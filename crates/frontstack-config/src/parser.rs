//! `frontstack.kdl` parsing

use crate::StackConfig;
use crate::error::{ConfigError, Result};
use kdl::{KdlDocument, KdlNode};
use std::path::Path;
use tracing::{instrument, warn};

/// Read and parse a config file
#[instrument(skip(path), fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<StackConfig> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse a config document
///
/// ```kdl
/// stack "frontend" {
///     prefix "acme"
///     region "ap-northeast-1"
///     tags { Team "web" }
/// }
/// ```
pub fn parse_config(content: &str) -> Result<StackConfig> {
    let doc: KdlDocument = content.parse()?;

    let mut stacks = doc.nodes().iter().filter(|n| n.name().value() == "stack");
    let node = stacks
        .next()
        .ok_or_else(|| ConfigError::InvalidConfig("missing `stack` node".to_string()))?;
    if stacks.next().is_some() {
        return Err(ConfigError::InvalidConfig(
            "only one `stack` node is allowed".to_string(),
        ));
    }

    for other in doc.nodes().iter().filter(|n| n.name().value() != "stack") {
        warn!(node = other.name().value(), "ignoring unknown top-level node");
    }

    parse_stack(node)
}

fn parse_stack(node: &KdlNode) -> Result<StackConfig> {
    let mut config = StackConfig::default();

    let Some(children) = node.children() else {
        return Ok(config);
    };

    for child in children.nodes() {
        match child.name().value() {
            "prefix" => {
                if let Some(prefix) = first_string(child) {
                    config.prefix = prefix;
                }
            }
            "account" => config.account = account(child)?,
            "region" => {
                if let Some(region) = first_string(child) {
                    config.region = region;
                }
            }
            "domain" | "domain-name" | "domain_name" => config.domain = first_string(child),
            "hosted-zone-id" | "hosted_zone_id" => config.hosted_zone_id = first_string(child),
            "certificate-arn" | "certificate_arn" => {
                config.certificate_arn = first_string(child)
            }
            "tags" => {
                if let Some(tag_children) = child.children() {
                    for tag in tag_children.nodes() {
                        let key = tag.name().value().to_string();
                        match first_string(tag) {
                            Some(value) => {
                                config.tags.insert(key, value);
                            }
                            None => warn!(tag = %key, "tag without a value"),
                        }
                    }
                }
            }
            other => warn!(node = other, "ignoring unknown stack setting"),
        }
    }

    Ok(config)
}

/// Account ids must be quoted: an unquoted `012345678901` parses as an
/// integer and loses its leading zero
fn account(node: &KdlNode) -> Result<Option<String>> {
    let Some(entry) = node.entries().first() else {
        return Ok(None);
    };
    match entry.value().as_string() {
        Some(account) => Ok(Some(account.to_string())),
        None => Err(ConfigError::InvalidValue {
            field: "account",
            reason: format!("expected a quoted string, got {:?}", entry.value()),
        }),
    }
}

/// First argument as a string; integers are accepted for numeric tag
/// values
fn first_string(node: &KdlNode) -> Option<String> {
    let value = node.entries().first()?.value();
    value
        .as_string()
        .map(|s| s.to_string())
        .or_else(|| value.as_integer().map(|i| i.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let kdl = r#"
            stack "frontend" {
                prefix "acme"
                account "123456789012"
                region "ap-northeast-1"
                domain "example.com"
                hosted-zone-id "Z123"
                certificate-arn "arn:aws:acm:us-east-1:123456789012:certificate/abc"
                tags {
                    Team "web"
                    CostCenter "42"
                }
            }
        "#;

        let config = parse_config(kdl).unwrap();
        assert_eq!(config.prefix, "acme");
        assert_eq!(config.account.as_deref(), Some("123456789012"));
        assert_eq!(config.region, "ap-northeast-1");
        assert_eq!(config.domain.as_deref(), Some("example.com"));
        assert_eq!(config.hosted_zone_id.as_deref(), Some("Z123"));
        assert!(config.certificate_arn.is_some());
        assert_eq!(config.tags.get("Team").map(String::as_str), Some("web"));
        assert_eq!(config.tags.len(), 2);
    }

    #[test]
    fn test_parse_minimal_config_keeps_defaults() {
        let config = parse_config(r#"stack "frontend""#).unwrap();
        assert_eq!(config, StackConfig::default());
    }

    #[test]
    fn test_unquoted_account_id_is_rejected() {
        let result = parse_config("stack { account 123456789012 }");
        assert!(
            matches!(result, Err(ConfigError::InvalidValue { field: "account", .. })),
            "{:?}",
            result
        );
    }

    #[test]
    fn test_quoted_account_keeps_leading_zero() {
        let config = parse_config(r#"stack { account "012345678901" }"#).unwrap();
        assert_eq!(config.account.as_deref(), Some("012345678901"));
    }

    #[test]
    fn test_missing_stack_node() {
        let result = parse_config(r#"prefix "acme""#);
        assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
    }

    #[test]
    fn test_multiple_stack_nodes() {
        let result = parse_config("stack \"a\"\nstack \"b\"");
        assert!(matches!(result, Err(ConfigError::InvalidConfig(_))));
    }

    #[test]
    fn test_invalid_kdl() {
        let result = parse_config("stack {");
        assert!(matches!(result, Err(ConfigError::KdlParse(_))));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config(Path::new("/nonexistent/frontstack.kdl"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frontstack.kdl");
        std::fs::write(&path, r#"stack "frontend" { prefix "docs" }"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.prefix, "docs");
    }
}
