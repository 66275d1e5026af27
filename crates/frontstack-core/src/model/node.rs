//! Resource nodes

use super::properties::OneOrMany;
use super::{ResourceKind, ResourceProperties, Tags};
use serde::de::{Deserializer, Error as _};
use serde::ser::{Error as _, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const TAGS_KEY: &str = "Tags";

/// What the provisioning engine does with a resource when it leaves the stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalPolicy {
    Delete,
    Retain,
    RetainExceptOnCreate,
    Snapshot,
}

/// One declared infrastructure object
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceNode {
    /// Typed properties; the node's kind is derived from the variant
    pub properties: ResourceProperties,

    /// Identification tags, rendered into `Properties.Tags`
    pub tags: Tags,

    /// Logical ids this resource must be created after
    pub depends_on: Vec<String>,

    pub deletion_policy: Option<RemovalPolicy>,

    pub update_replace_policy: Option<RemovalPolicy>,

    pub condition: Option<String>,

    pub metadata: Option<Value>,
}

impl ResourceNode {
    pub fn new(properties: impl Into<ResourceProperties>) -> Self {
        Self {
            properties: properties.into(),
            tags: Tags::new(),
            depends_on: Vec::new(),
            deletion_policy: None,
            update_replace_policy: None,
            condition: None,
            metadata: None,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.properties.kind()
    }

    /// Set both the deletion and the update-replace policy
    pub fn with_removal_policy(mut self, policy: RemovalPolicy) -> Self {
        self.deletion_policy = Some(policy);
        self.update_replace_policy = Some(policy);
        self
    }

    pub fn with_depends_on(mut self, logical_id: impl Into<String>) -> Self {
        let logical_id = logical_id.into();
        if !self.depends_on.contains(&logical_id) {
            self.depends_on.push(logical_id);
        }
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key, value);
        self
    }

    pub(crate) fn from_raw(raw: RawResource) -> serde_json::Result<Self> {
        let kind = ResourceKind::from_type_name(&raw.type_name);
        let mut properties = raw.properties;

        // Only the provider's list shape on a taggable kind is lifted into
        // `tags`; anything else stays in the property map untouched.
        let lifted = match properties.get(TAGS_KEY) {
            Some(value) if kind.supports_tags() => {
                serde_json::from_value::<Tags>(value.clone()).ok()
            }
            _ => None,
        };
        let tags = match lifted {
            Some(tags) => {
                properties.remove(TAGS_KEY);
                tags
            }
            None => Tags::new(),
        };

        let depends_on = match raw.depends_on {
            Some(OneOrMany::One(id)) => vec![id],
            Some(OneOrMany::Many(ids)) => ids,
            None => Vec::new(),
        };

        Ok(Self {
            properties: ResourceProperties::from_json_map(&kind, properties)?,
            tags,
            depends_on,
            deletion_policy: raw.deletion_policy,
            update_replace_policy: raw.update_replace_policy,
            condition: raw.condition,
            metadata: raw.metadata,
        })
    }

    pub(crate) fn to_raw(&self) -> serde_json::Result<RawResource> {
        let kind = self.kind();
        let mut properties = self.properties.to_json_map()?;

        if kind.supports_tags() && !self.tags.is_empty() {
            match properties.get_mut(TAGS_KEY) {
                // Map-shaped tags (some resource types use `{"k": "v"}`)
                Some(Value::Object(existing)) => {
                    for (key, value) in self.tags.iter() {
                        existing.insert(key.to_string(), Value::String(value.to_string()));
                    }
                }
                Some(_) => {}
                None => {
                    properties.insert(TAGS_KEY.to_string(), serde_json::to_value(&self.tags)?);
                }
            }
        }

        let depends_on = match self.depends_on.as_slice() {
            [] => None,
            [id] => Some(OneOrMany::One(id.clone())),
            ids => Some(OneOrMany::Many(ids.to_vec())),
        };

        Ok(RawResource {
            type_name: kind.type_name().to_string(),
            properties,
            depends_on,
            deletion_policy: self.deletion_policy,
            update_replace_policy: self.update_replace_policy,
            condition: self.condition.clone(),
            metadata: self.metadata.clone(),
        })
    }
}

/// Resource as it appears in a template, before typing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct RawResource {
    #[serde(rename = "Type")]
    pub type_name: String,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub properties: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<OneOrMany<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletion_policy: Option<RemovalPolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_replace_policy: Option<RemovalPolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl Serialize for ResourceNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_raw()
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ResourceNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawResource::deserialize(deserializer)?;
        ResourceNode::from_raw(raw).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BucketProperties, Expr, RecordSetProperties};
    use serde_json::json;

    #[test]
    fn test_tags_are_lifted_out_of_properties() {
        let node: ResourceNode = serde_json::from_value(json!({
            "Type": "AWS::CloudFront::Distribution",
            "Properties": {
                "DistributionConfig": { "Enabled": true },
                "Tags": [{ "Key": "Team", "Value": "web" }]
            }
        }))
        .unwrap();

        assert_eq!(node.kind(), ResourceKind::CdnDistribution);
        assert!(node.tags.contains("Team", "web"));
        let map = node.properties.to_json_map().unwrap();
        assert!(!map.contains_key("Tags"));
    }

    #[test]
    fn test_tags_render_into_properties() {
        let node = ResourceNode::new(BucketProperties {
            bucket_name: Some(Expr::literal("site")),
            ..Default::default()
        })
        .with_tag("Prefix", "acme")
        .with_removal_policy(RemovalPolicy::Delete);

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            json!({
                "Type": "AWS::S3::Bucket",
                "Properties": {
                    "BucketName": "site",
                    "Tags": [{ "Key": "Prefix", "Value": "acme" }]
                },
                "DeletionPolicy": "Delete",
                "UpdateReplacePolicy": "Delete"
            })
        );
    }

    #[test]
    fn test_untaggable_kind_keeps_tags_off_the_wire() {
        let node = ResourceNode::new(RecordSetProperties {
            name: Some(Expr::literal("example.com.")),
            record_type: Some("A".to_string()),
            ..Default::default()
        })
        .with_tag("Prefix", "acme");

        let json = serde_json::to_value(&node).unwrap();
        assert!(json["Properties"].get("Tags").is_none());
        assert!(node.tags.contains("Prefix", "acme"));
    }

    #[test]
    fn test_tags_on_untaggable_kind_stay_in_properties() {
        let input = json!({
            "Type": "AWS::Route53::RecordSet",
            "Properties": {
                "Name": "example.com.",
                "Type": "A",
                "Tags": [{ "Key": "Team", "Value": "web" }]
            }
        });
        let node: ResourceNode = serde_json::from_value(input.clone()).unwrap();
        assert!(node.tags.is_empty());
        assert_eq!(serde_json::to_value(&node).unwrap(), input);
    }

    #[test]
    fn test_map_shaped_tags_are_merged() {
        let mut node: ResourceNode = serde_json::from_value(json!({
            "Type": "AWS::SSM::Parameter",
            "Properties": {
                "Type": "String",
                "Value": "v",
                "Tags": { "Team": "web" }
            }
        }))
        .unwrap();
        assert!(node.tags.is_empty());

        node.tags.insert("Prefix", "acme");
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json["Properties"]["Tags"],
            json!({ "Team": "web", "Prefix": "acme" })
        );
    }

    #[test]
    fn test_depends_on_single_and_list() {
        let node: ResourceNode = serde_json::from_value(json!({
            "Type": "AWS::SNS::Topic",
            "DependsOn": "Queue"
        }))
        .unwrap();
        assert_eq!(node.depends_on, vec!["Queue".to_string()]);

        let node = node.with_depends_on("Bucket");
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["DependsOn"], json!(["Queue", "Bucket"]));
    }
}
