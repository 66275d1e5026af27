//! CloudFront property records

use crate::model::Expr;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Managed cache policy `CachingOptimized`
pub const CACHING_OPTIMIZED: &str = "658327ea-f89d-4fab-a63d-7e88639e58f6";

/// Managed cache policy `CachingDisabled`
pub const CACHING_DISABLED: &str = "4135ea2d-6df8-44a3-9df3-4b5a84be39ad";

/// Hosted zone id used by every CloudFront alias target
pub const CLOUDFRONT_HOSTED_ZONE_ID: &str = "Z2FDTNDATAQYW2";

/// `AWS::CloudFront::OriginAccessControl`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OriginAccessControlProperties {
    /// Always present; a template that omits it gets an empty record
    #[serde(default)]
    pub origin_access_control_config: OriginAccessControlConfig,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OriginAccessControlConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Expr>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_access_control_origin_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_behavior: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_protocol: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `AWS::CloudFront::Distribution`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DistributionProperties {
    #[serde(default)]
    pub distribution_config: DistributionConfig,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DistributionConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_root_object: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_version: Option<String>,

    #[serde(
        rename = "IPV6Enabled",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ipv6_enabled: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_class: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub origins: Vec<Origin>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_cache_behavior: Option<CacheBehavior>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cache_behaviors: Vec<CacheBehavior>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_error_responses: Vec<CustomErrorResponse>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewer_certificate: Option<ViewerCertificate>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Origin {
    pub id: String,

    pub domain_name: Expr,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_access_control_id: Option<Expr>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_origin_config: Option<CustomOriginConfig>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomOriginConfig {
    pub origin_protocol_policy: String,

    #[serde(
        rename = "OriginSSLProtocols",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub origin_ssl_protocols: Vec<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CustomOriginConfig {
    pub fn https_only() -> Self {
        Self {
            origin_protocol_policy: "https-only".to_string(),
            origin_ssl_protocols: vec!["TLSv1.2".to_string()],
            extra: Map::new(),
        }
    }
}

/// Default or path-scoped cache behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CacheBehavior {
    /// Unset for the default behavior
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_pattern: Option<String>,

    pub target_origin_id: String,

    pub viewer_protocol_policy: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_methods: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cached_methods: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_policy_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compress: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomErrorResponse {
    pub error_code: u16,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_code: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_page_path: Option<String>,

    #[serde(
        rename = "ErrorCachingMinTTL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub error_caching_min_ttl: Option<u64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ViewerCertificate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acm_certificate_arn: Option<Expr>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_support_method: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_protocol_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_front_default_certificate: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
