//! Resource kinds and their naming policies

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Kind of a declared resource
///
/// Known kinds are closed variants; anything else is carried as
/// [`ResourceKind::Other`] with its provider type token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    StorageBucket,
    CdnDistribution,
    AccessControlConfig,
    Certificate,
    DnsRecord,
    BucketPolicy,
    IamPolicy,
    IamRole,
    Function,
    Other(String),
}

/// What the prefix pass does to a resource of a given kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingPolicy {
    /// Rewrite the naming property found at `path`
    Rename { path: &'static [&'static str] },
    /// No renamable identity; attach identification tags instead
    TagOnly,
}

impl NamingPolicy {
    /// Dotted form of the naming path, for logs
    pub fn dotted_path(&self) -> Option<String> {
        match self {
            NamingPolicy::Rename { path } => Some(path.join(".")),
            NamingPolicy::TagOnly => None,
        }
    }
}

impl ResourceKind {
    /// All closed variants, in declaration order
    pub const KNOWN: [ResourceKind; 9] = [
        ResourceKind::StorageBucket,
        ResourceKind::CdnDistribution,
        ResourceKind::AccessControlConfig,
        ResourceKind::Certificate,
        ResourceKind::DnsRecord,
        ResourceKind::BucketPolicy,
        ResourceKind::IamPolicy,
        ResourceKind::IamRole,
        ResourceKind::Function,
    ];

    /// Resolve a provider type token. Unknown tokens become `Other`.
    pub fn from_type_name(type_name: &str) -> Self {
        match type_name {
            "AWS::S3::Bucket" => ResourceKind::StorageBucket,
            "AWS::CloudFront::Distribution" => ResourceKind::CdnDistribution,
            "AWS::CloudFront::OriginAccessControl" => ResourceKind::AccessControlConfig,
            "AWS::CertificateManager::Certificate" => ResourceKind::Certificate,
            "AWS::Route53::RecordSet" => ResourceKind::DnsRecord,
            "AWS::S3::BucketPolicy" => ResourceKind::BucketPolicy,
            "AWS::IAM::Policy" => ResourceKind::IamPolicy,
            "AWS::IAM::Role" => ResourceKind::IamRole,
            "AWS::Lambda::Function" => ResourceKind::Function,
            other => ResourceKind::Other(other.to_string()),
        }
    }

    /// Provider type token (e.g. `AWS::S3::Bucket`)
    pub fn type_name(&self) -> &str {
        match self {
            ResourceKind::StorageBucket => "AWS::S3::Bucket",
            ResourceKind::CdnDistribution => "AWS::CloudFront::Distribution",
            ResourceKind::AccessControlConfig => "AWS::CloudFront::OriginAccessControl",
            ResourceKind::Certificate => "AWS::CertificateManager::Certificate",
            ResourceKind::DnsRecord => "AWS::Route53::RecordSet",
            ResourceKind::BucketPolicy => "AWS::S3::BucketPolicy",
            ResourceKind::IamPolicy => "AWS::IAM::Policy",
            ResourceKind::IamRole => "AWS::IAM::Role",
            ResourceKind::Function => "AWS::Lambda::Function",
            ResourceKind::Other(type_name) => type_name,
        }
    }

    /// Short label used in CLI summaries
    pub fn label(&self) -> &str {
        match self {
            ResourceKind::StorageBucket => "storage-bucket",
            ResourceKind::CdnDistribution => "cdn-distribution",
            ResourceKind::AccessControlConfig => "access-control-config",
            ResourceKind::Certificate => "certificate",
            ResourceKind::DnsRecord => "dns-record",
            ResourceKind::BucketPolicy => "bucket-policy",
            ResourceKind::IamPolicy => "iam-policy",
            ResourceKind::IamRole => "iam-role",
            ResourceKind::Function => "function",
            ResourceKind::Other(type_name) => type_name,
        }
    }

    /// Naming rule for this kind
    ///
    /// Must agree with `ResourceProperties::naming_field_mut`: a kind has a
    /// `Rename` policy exactly when its property record exposes a naming
    /// field.
    pub fn naming_policy(&self) -> NamingPolicy {
        match self {
            ResourceKind::StorageBucket => NamingPolicy::Rename {
                path: &["BucketName"],
            },
            ResourceKind::AccessControlConfig => NamingPolicy::Rename {
                path: &["OriginAccessControlConfig", "Name"],
            },
            ResourceKind::IamPolicy => NamingPolicy::Rename {
                path: &["PolicyName"],
            },
            ResourceKind::IamRole => NamingPolicy::Rename {
                path: &["RoleName"],
            },
            ResourceKind::Function => NamingPolicy::Rename {
                path: &["FunctionName"],
            },
            ResourceKind::CdnDistribution
            | ResourceKind::Certificate
            | ResourceKind::DnsRecord
            | ResourceKind::BucketPolicy
            | ResourceKind::Other(_) => NamingPolicy::TagOnly,
        }
    }

    /// Whether the provider accepts a `Tags` property on this kind
    pub fn supports_tags(&self) -> bool {
        !matches!(self, ResourceKind::DnsRecord | ResourceKind::BucketPolicy)
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

impl Serialize for ResourceKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.type_name())
    }
}

impl<'de> Deserialize<'de> for ResourceKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let type_name = String::deserialize(deserializer)?;
        Ok(ResourceKind::from_type_name(&type_name))
    }
}
