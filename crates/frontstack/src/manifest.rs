//! `manifest.json`, written next to the synthesized template

use chrono::{DateTime, Utc};
use frontstack_config::StackConfig;
use frontstack_stack::Synthesized;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const MANIFEST_FILE: &str = "manifest.json";
pub const MANIFEST_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub version: u32,
    pub stack_name: String,
    pub account: Option<String>,
    pub region: String,
    pub prefix: String,
    pub template_file: String,
    pub resource_count: usize,
    pub generated_at: DateTime<Utc>,
}

impl Manifest {
    pub fn new(config: &StackConfig, synthesized: &Synthesized, template_file: &str) -> Self {
        Self {
            version: MANIFEST_VERSION,
            stack_name: synthesized.stack_name.clone(),
            account: config.account.clone(),
            region: config.region.clone(),
            prefix: config.prefix.clone(),
            template_file: template_file.to_string(),
            resource_count: synthesized.template.resources.len(),
            generated_at: Utc::now(),
        }
    }

    /// Write into `dir`, returning the file path
    pub async fn write(&self, dir: &Path) -> anyhow::Result<PathBuf> {
        let path = dir.join(MANIFEST_FILE);
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(&path, content).await?;
        Ok(path)
    }
}
