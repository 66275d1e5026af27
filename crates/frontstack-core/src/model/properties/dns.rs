//! Certificate and Route 53 property records

use crate::model::Expr;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `AWS::CertificateManager::Certificate`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CertificateProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<Expr>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subject_alternative_names: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_method: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `AWS::Route53::RecordSet`
///
/// Identified by name and type; `Name` is not a renamable identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RecordSetProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosted_zone_id: Option<Expr>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Expr>,

    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias_target: Option<AliasTarget>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AliasTarget {
    #[serde(rename = "DNSName")]
    pub dns_name: Expr,

    pub hosted_zone_id: Expr,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluate_target_health: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
