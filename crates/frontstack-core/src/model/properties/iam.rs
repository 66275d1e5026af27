//! IAM property records and policy documents

use super::OneOrMany;
use crate::model::Expr;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const POLICY_VERSION: &str = "2012-10-17";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// A lone statement object stays a lone object on render
    pub statement: OneOrMany<PolicyStatement>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PolicyDocument {
    pub fn new(statement: Vec<PolicyStatement>) -> Self {
        Self {
            version: Some(POLICY_VERSION.to_string()),
            statement: OneOrMany::Many(statement),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    Allow,
    Deny,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,

    pub effect: Effect,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal: Option<Value>,

    /// Unset when the statement uses `NotAction`, which stays in `extra`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<OneOrMany<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<OneOrMany<Expr>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `AWS::IAM::Policy`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_name: Option<Expr>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_document: Option<PolicyDocument>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<Expr>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `AWS::IAM::Role`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoleProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_name: Option<Expr>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assume_role_policy_document: Option<PolicyDocument>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub managed_policy_arns: Vec<Expr>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
