//! Typed property records
//!
//! Each known resource kind has its own record; anything else keeps its
//! properties as an untyped JSON map. Keys a record does not model are
//! kept in its flattened `extra` map so foreign templates round-trip.

mod cloudfront;
mod dns;
mod iam;
mod lambda;
mod s3;

pub use cloudfront::*;
pub use dns::*;
pub use iam::*;
pub use lambda::*;
pub use s3::*;

use super::{Expr, ResourceKind};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single value or a list, as policy documents allow for both
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            OneOrMany::Many(items) => items.iter(),
            OneOrMany::One(item) => std::slice::from_ref(item).iter(),
        }
    }
}

/// Properties of one resource node
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceProperties {
    Bucket(BucketProperties),
    Distribution(DistributionProperties),
    OriginAccessControl(OriginAccessControlProperties),
    Certificate(CertificateProperties),
    RecordSet(RecordSetProperties),
    BucketPolicy(BucketPolicyProperties),
    Policy(PolicyProperties),
    Role(RoleProperties),
    Function(FunctionProperties),
    Other {
        type_name: String,
        properties: Map<String, Value>,
    },
}

impl ResourceProperties {
    pub fn other(type_name: impl Into<String>, properties: Map<String, Value>) -> Self {
        ResourceProperties::Other {
            type_name: type_name.into(),
            properties,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceProperties::Bucket(_) => ResourceKind::StorageBucket,
            ResourceProperties::Distribution(_) => ResourceKind::CdnDistribution,
            ResourceProperties::OriginAccessControl(_) => ResourceKind::AccessControlConfig,
            ResourceProperties::Certificate(_) => ResourceKind::Certificate,
            ResourceProperties::RecordSet(_) => ResourceKind::DnsRecord,
            ResourceProperties::BucketPolicy(_) => ResourceKind::BucketPolicy,
            ResourceProperties::Policy(_) => ResourceKind::IamPolicy,
            ResourceProperties::Role(_) => ResourceKind::IamRole,
            ResourceProperties::Function(_) => ResourceKind::Function,
            ResourceProperties::Other { type_name, .. } => ResourceKind::from_type_name(type_name),
        }
    }

    /// The naming property slot, for kinds that have one
    pub fn naming_field_mut(&mut self) -> Option<&mut Option<Expr>> {
        match self {
            ResourceProperties::Bucket(p) => Some(&mut p.bucket_name),
            ResourceProperties::OriginAccessControl(p) => {
                Some(&mut p.origin_access_control_config.name)
            }
            ResourceProperties::Policy(p) => Some(&mut p.policy_name),
            ResourceProperties::Role(p) => Some(&mut p.role_name),
            ResourceProperties::Function(p) => Some(&mut p.function_name),
            ResourceProperties::Distribution(_)
            | ResourceProperties::Certificate(_)
            | ResourceProperties::RecordSet(_)
            | ResourceProperties::BucketPolicy(_)
            | ResourceProperties::Other { .. } => None,
        }
    }

    /// Current value of the naming property, if any
    pub fn naming_field(&self) -> Option<&Expr> {
        match self {
            ResourceProperties::Bucket(p) => p.bucket_name.as_ref(),
            ResourceProperties::OriginAccessControl(p) => {
                p.origin_access_control_config.name.as_ref()
            }
            ResourceProperties::Policy(p) => p.policy_name.as_ref(),
            ResourceProperties::Role(p) => p.role_name.as_ref(),
            ResourceProperties::Function(p) => p.function_name.as_ref(),
            ResourceProperties::Distribution(_)
            | ResourceProperties::Certificate(_)
            | ResourceProperties::RecordSet(_)
            | ResourceProperties::BucketPolicy(_)
            | ResourceProperties::Other { .. } => None,
        }
    }

    /// Encode as the `Properties` map of a template resource
    pub fn to_json_map(&self) -> serde_json::Result<Map<String, Value>> {
        let value = match self {
            ResourceProperties::Bucket(p) => serde_json::to_value(p)?,
            ResourceProperties::Distribution(p) => serde_json::to_value(p)?,
            ResourceProperties::OriginAccessControl(p) => serde_json::to_value(p)?,
            ResourceProperties::Certificate(p) => serde_json::to_value(p)?,
            ResourceProperties::RecordSet(p) => serde_json::to_value(p)?,
            ResourceProperties::BucketPolicy(p) => serde_json::to_value(p)?,
            ResourceProperties::Policy(p) => serde_json::to_value(p)?,
            ResourceProperties::Role(p) => serde_json::to_value(p)?,
            ResourceProperties::Function(p) => serde_json::to_value(p)?,
            ResourceProperties::Other { properties, .. } => return Ok(properties.clone()),
        };
        match value {
            Value::Object(map) => Ok(map),
            _ => Ok(Map::new()),
        }
    }

    /// Decode a `Properties` map into the record for `kind`
    pub fn from_json_map(kind: &ResourceKind, map: Map<String, Value>) -> serde_json::Result<Self> {
        let properties = match kind {
            ResourceKind::StorageBucket => ResourceProperties::Bucket(from_map(map)?),
            ResourceKind::CdnDistribution => ResourceProperties::Distribution(from_map(map)?),
            ResourceKind::AccessControlConfig => {
                ResourceProperties::OriginAccessControl(from_map(map)?)
            }
            ResourceKind::Certificate => ResourceProperties::Certificate(from_map(map)?),
            ResourceKind::DnsRecord => ResourceProperties::RecordSet(from_map(map)?),
            ResourceKind::BucketPolicy => ResourceProperties::BucketPolicy(from_map(map)?),
            ResourceKind::IamPolicy => ResourceProperties::Policy(from_map(map)?),
            ResourceKind::IamRole => ResourceProperties::Role(from_map(map)?),
            ResourceKind::Function => ResourceProperties::Function(from_map(map)?),
            ResourceKind::Other(type_name) => ResourceProperties::other(type_name.clone(), map),
        };
        Ok(properties)
    }
}

fn from_map<T: DeserializeOwned>(map: Map<String, Value>) -> serde_json::Result<T> {
    serde_json::from_value(Value::Object(map))
}

impl From<BucketProperties> for ResourceProperties {
    fn from(p: BucketProperties) -> Self {
        ResourceProperties::Bucket(p)
    }
}

impl From<DistributionProperties> for ResourceProperties {
    fn from(p: DistributionProperties) -> Self {
        ResourceProperties::Distribution(p)
    }
}

impl From<OriginAccessControlProperties> for ResourceProperties {
    fn from(p: OriginAccessControlProperties) -> Self {
        ResourceProperties::OriginAccessControl(p)
    }
}

impl From<CertificateProperties> for ResourceProperties {
    fn from(p: CertificateProperties) -> Self {
        ResourceProperties::Certificate(p)
    }
}

impl From<RecordSetProperties> for ResourceProperties {
    fn from(p: RecordSetProperties) -> Self {
        ResourceProperties::RecordSet(p)
    }
}

impl From<BucketPolicyProperties> for ResourceProperties {
    fn from(p: BucketPolicyProperties) -> Self {
        ResourceProperties::BucketPolicy(p)
    }
}

impl From<PolicyProperties> for ResourceProperties {
    fn from(p: PolicyProperties) -> Self {
        ResourceProperties::Policy(p)
    }
}

impl From<RoleProperties> for ResourceProperties {
    fn from(p: RoleProperties) -> Self {
        ResourceProperties::Role(p)
    }
}

impl From<FunctionProperties> for ResourceProperties {
    fn from(p: FunctionProperties) -> Self {
        ResourceProperties::Function(p)
    }
}
