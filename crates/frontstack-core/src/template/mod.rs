//! Deployment templates
//!
//! A [`Template`] is the resource tree plus the stack-level sections the
//! provisioning engine reads (description, parameters, outputs). It
//! serializes to the provider's JSON or YAML template format.

use crate::error::{Result, StackError};
use crate::model::{Expr, RawResource, ResourceKind, ResourceNode};
use crate::visitor::Visitor;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

pub const FORMAT_VERSION: &str = "2010-09-09";

/// On-disk template format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateFormat {
    #[default]
    Json,
    Yaml,
}

impl TemplateFormat {
    /// Guess from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(TemplateFormat::Json),
            Some("yaml") | Some("yml") => Some(TemplateFormat::Yaml),
            _ => None,
        }
    }

    /// Guess from content: JSON documents start with `{`
    pub fn sniff(content: &str) -> Self {
        if content.trim_start().starts_with('{') {
            TemplateFormat::Json
        } else {
            TemplateFormat::Yaml
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            TemplateFormat::Json => "json",
            TemplateFormat::Yaml => "yaml",
        }
    }
}

impl std::fmt::Display for TemplateFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for TemplateFormat {
    type Err = StackError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(TemplateFormat::Json),
            "yaml" | "yml" => Ok(TemplateFormat::Yaml),
            other => Err(StackError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Stack output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Output {
    pub value: Expr,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
}

impl Output {
    pub fn new(value: Expr, description: impl Into<String>) -> Self {
        Self {
            value,
            description: Some(description.into()),
            export: None,
            condition: None,
        }
    }
}

/// A deployment template: the resource tree and its stack-level sections
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Template {
    pub format_version: Option<String>,

    pub description: Option<String>,

    pub parameters: Map<String, Value>,

    /// Resources keyed by logical id
    pub resources: BTreeMap<String, ResourceNode>,

    pub outputs: BTreeMap<String, Output>,

    /// Other top-level sections (`Conditions`, `Mappings`, `Transform`, ...)
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize)]
struct RawTemplate {
    #[serde(
        rename = "AWSTemplateFormatVersion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    format_version: Option<String>,

    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    #[serde(rename = "Parameters", default, skip_serializing_if = "Map::is_empty")]
    parameters: Map<String, Value>,

    #[serde(rename = "Resources", default)]
    resources: BTreeMap<String, RawResource>,

    #[serde(rename = "Outputs", default, skip_serializing_if = "BTreeMap::is_empty")]
    outputs: BTreeMap<String, Output>,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Template {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            format_version: Some(FORMAT_VERSION.to_string()),
            description: Some(description.into()),
            ..Default::default()
        }
    }

    /// Add a resource under a new logical id
    pub fn add_resource(&mut self, logical_id: impl Into<String>, node: ResourceNode) -> Result<()> {
        let logical_id = logical_id.into();
        if self.resources.contains_key(&logical_id) {
            return Err(StackError::DuplicateLogicalId(logical_id));
        }
        debug!(logical_id = %logical_id, kind = %node.kind(), "resource declared");
        self.resources.insert(logical_id, node);
        Ok(())
    }

    pub fn add_output(&mut self, name: impl Into<String>, output: Output) -> Result<()> {
        let name = name.into();
        if self.outputs.contains_key(&name) {
            return Err(StackError::DuplicateOutput(name));
        }
        self.outputs.insert(name, output);
        Ok(())
    }

    pub fn resource(&self, logical_id: &str) -> Option<&ResourceNode> {
        self.resources.get(logical_id)
    }

    pub fn resource_mut(&mut self, logical_id: &str) -> Option<&mut ResourceNode> {
        self.resources.get_mut(logical_id)
    }

    /// Resources of one kind, in logical id order
    pub fn by_kind(&self, kind: &ResourceKind) -> Vec<(&str, &ResourceNode)> {
        self.resources
            .iter()
            .filter(|(_, node)| node.kind() == *kind)
            .map(|(id, node)| (id.as_str(), node))
            .collect()
    }

    pub fn count_by_kind(&self, kind: &ResourceKind) -> usize {
        self.resources
            .values()
            .filter(|node| node.kind() == *kind)
            .count()
    }

    /// Number of resources per kind
    pub fn kind_summary(&self) -> BTreeMap<ResourceKind, usize> {
        let mut summary = BTreeMap::new();
        for node in self.resources.values() {
            *summary.entry(node.kind()).or_insert(0) += 1;
        }
        summary
    }

    /// Hand every resource to `visitor`, exactly once each
    pub fn walk<V: Visitor + ?Sized>(&mut self, visitor: &V) {
        debug!(resources = self.resources.len(), "walking resource tree");
        for (logical_id, node) in self.resources.iter_mut() {
            visitor.visit(logical_id, node);
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: RawTemplate = serde_json::from_str(content)?;
        Self::from_raw(raw)
    }

    /// Parse a YAML template. Short-form intrinsic tags (`!Ref`) are not
    /// supported; use the long form (`Ref:`).
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let raw: RawTemplate = serde_yaml::from_str(content)?;
        Self::from_raw(raw)
    }

    pub fn parse(content: &str, format: TemplateFormat) -> Result<Self> {
        match format {
            TemplateFormat::Json => Self::from_json_str(content),
            TemplateFormat::Yaml => Self::from_yaml_str(content),
        }
    }

    /// Read a template file, choosing the format by extension or content
    pub fn load(path: &Path) -> Result<(Self, TemplateFormat)> {
        let content = std::fs::read_to_string(path).map_err(|source| StackError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let format = TemplateFormat::from_path(path).unwrap_or_else(|| TemplateFormat::sniff(&content));
        let template = Self::parse(&content, format)?;
        debug!(
            path = %path.display(),
            format = %format,
            resources = template.resources.len(),
            "template loaded"
        );
        Ok((template, format))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_raw()?)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.to_raw()?)?)
    }

    pub fn render(&self, format: TemplateFormat) -> Result<String> {
        match format {
            TemplateFormat::Json => self.to_json_pretty(),
            TemplateFormat::Yaml => self.to_yaml(),
        }
    }

    fn from_raw(raw: RawTemplate) -> Result<Self> {
        let mut resources = BTreeMap::new();
        for (logical_id, resource) in raw.resources {
            let node = ResourceNode::from_raw(resource).map_err(|e| {
                StackError::MalformedResource {
                    logical_id: logical_id.clone(),
                    message: e.to_string(),
                }
            })?;
            resources.insert(logical_id, node);
        }

        Ok(Self {
            format_version: raw.format_version,
            description: raw.description,
            parameters: raw.parameters,
            resources,
            outputs: raw.outputs,
            extra: raw.extra,
        })
    }

    fn to_raw(&self) -> Result<RawTemplate> {
        let mut resources = BTreeMap::new();
        for (logical_id, node) in &self.resources {
            let raw = node.to_raw().map_err(|e| StackError::MalformedResource {
                logical_id: logical_id.clone(),
                message: e.to_string(),
            })?;
            resources.insert(logical_id.clone(), raw);
        }

        Ok(RawTemplate {
            format_version: self.format_version.clone(),
            description: self.description.clone(),
            parameters: self.parameters.clone(),
            resources,
            outputs: self.outputs.clone(),
            extra: self.extra.clone(),
        })
    }
}
