//! Lambda property records

use crate::model::Expr;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `AWS::Lambda::Function`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FunctionProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_name: Option<Expr>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Expr>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
