//! Property values
//!
//! A value in a template is either a literal string or something the
//! provisioning engine resolves at deploy time (`Ref`, `Fn::GetAtt`,
//! `Fn::Join`, ...). Only literals are ever rewritten by visitors.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Pseudo parameter resolving to the deploying account id
pub const ACCOUNT_ID: &str = "AWS::AccountId";

/// Pseudo parameter resolving to the deploying region
pub const REGION: &str = "AWS::Region";

/// A literal or unresolved property value
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Plain string known at synthesis time
    Literal(String),

    /// `{"Ref": "LogicalId"}`
    Ref(String),

    /// `{"Fn::GetAtt": ["LogicalId", "Attribute"]}`
    GetAtt(String, String),

    /// `{"Fn::Join": ["sep", [...]]}`
    Join(String, Vec<Expr>),

    /// Any other value, kept verbatim (`Fn::Sub`, `Fn::If`, numbers, ...)
    Raw(Value),
}

impl Expr {
    pub fn literal(value: impl Into<String>) -> Self {
        Expr::Literal(value.into())
    }

    pub fn reference(logical_id: impl Into<String>) -> Self {
        Expr::Ref(logical_id.into())
    }

    pub fn get_att(logical_id: impl Into<String>, attribute: impl Into<String>) -> Self {
        Expr::GetAtt(logical_id.into(), attribute.into())
    }

    pub fn join(separator: impl Into<String>, parts: Vec<Expr>) -> Self {
        Expr::Join(separator.into(), parts)
    }

    /// `Fn::Join` with an empty separator
    pub fn concat(parts: Vec<Expr>) -> Self {
        Expr::join("", parts)
    }

    /// Returns the string if this is a literal
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Expr::Literal(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Expr::Literal(_))
    }

    /// Encode into the provider's intrinsic-function JSON shape
    pub fn to_json(&self) -> Value {
        match self {
            Expr::Literal(s) => Value::String(s.clone()),
            Expr::Ref(id) => json!({ "Ref": id }),
            Expr::GetAtt(id, attr) => json!({ "Fn::GetAtt": [id, attr] }),
            Expr::Join(sep, parts) => {
                let parts: Vec<Value> = parts.iter().map(Expr::to_json).collect();
                json!({ "Fn::Join": [sep, parts] })
            }
            Expr::Raw(v) => v.clone(),
        }
    }

    /// Decode from JSON. Never fails: shapes that are not recognised are
    /// kept as [`Expr::Raw`].
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::String(s) => Expr::Literal(s),
            Value::Object(map) if map.len() == 1 => {
                let decoded = map
                    .iter()
                    .next()
                    .and_then(|(key, inner)| decode_intrinsic(key, inner));
                decoded.unwrap_or(Expr::Raw(Value::Object(map)))
            }
            other => Expr::Raw(other),
        }
    }
}

fn decode_intrinsic(key: &str, inner: &Value) -> Option<Expr> {
    match (key, inner) {
        ("Ref", Value::String(id)) => Some(Expr::Ref(id.clone())),
        ("Fn::GetAtt", Value::Array(items)) => match items.as_slice() {
            [Value::String(id), Value::String(attr)] => {
                Some(Expr::GetAtt(id.clone(), attr.clone()))
            }
            _ => None,
        },
        ("Fn::GetAtt", Value::String(dotted)) => dotted
            .split_once('.')
            .map(|(id, attr)| Expr::GetAtt(id.to_string(), attr.to_string())),
        ("Fn::Join", Value::Array(items)) => match items.as_slice() {
            [Value::String(sep), Value::Array(parts)] => Some(Expr::Join(
                sep.clone(),
                parts.iter().cloned().map(Expr::from_json).collect(),
            )),
            _ => None,
        },
        _ => None,
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Expr::Literal(value.to_string())
    }
}

impl From<String> for Expr {
    fn from(value: String) -> Self {
        Expr::Literal(value)
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Literal(s) => write!(f, "{}", s),
            Expr::Ref(id) => write!(f, "${{{}}}", id),
            Expr::GetAtt(id, attr) => write!(f, "${{{}.{}}}", id, attr),
            Expr::Join(sep, parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        write!(f, "{}", sep)?;
                    }
                    write!(f, "{}", part)?;
                }
                Ok(())
            }
            Expr::Raw(v) => write!(f, "{}", v),
        }
    }
}

impl Serialize for Expr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Expr {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Expr::from_json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_round_trip() {
        let expr: Expr = serde_json::from_str(r#""my-bucket""#).unwrap();
        assert_eq!(expr, Expr::literal("my-bucket"));
        assert_eq!(serde_json::to_string(&expr).unwrap(), r#""my-bucket""#);
    }

    #[test]
    fn test_get_att_accepts_dotted_form() {
        let expr: Expr =
            serde_json::from_str(r#"{"Fn::GetAtt": "WebsiteBucket.Arn"}"#).unwrap();
        assert_eq!(expr, Expr::get_att("WebsiteBucket", "Arn"));
        assert_eq!(
            expr.to_json(),
            json!({ "Fn::GetAtt": ["WebsiteBucket", "Arn"] })
        );
    }

    #[test]
    fn test_join_nested_refs() {
        let value = json!({
            "Fn::Join": ["", ["arn:aws:s3:::", { "Ref": "WebsiteBucket" }, "/*"]]
        });
        let expr = Expr::from_json(value.clone());
        assert_eq!(
            expr,
            Expr::concat(vec![
                Expr::literal("arn:aws:s3:::"),
                Expr::reference("WebsiteBucket"),
                Expr::literal("/*"),
            ])
        );
        assert_eq!(expr.to_json(), value);
    }

    #[test]
    fn test_unknown_intrinsic_is_kept_verbatim() {
        let value = json!({ "Fn::Sub": "${AWS::StackName}-site" });
        let expr = Expr::from_json(value.clone());
        assert!(matches!(expr, Expr::Raw(_)));
        assert_eq!(expr.to_json(), value);
    }

    #[test]
    fn test_malformed_ref_is_raw() {
        let expr = Expr::from_json(json!({ "Ref": 42 }));
        assert!(!expr.is_literal());
        assert!(matches!(expr, Expr::Raw(_)));
    }

    #[test]
    fn test_display() {
        let expr = Expr::concat(vec![
            Expr::literal("https://"),
            Expr::get_att("Distribution", "DomainName"),
        ]);
        assert_eq!(expr.to_string(), "https://${Distribution.DomainName}");
    }
}
