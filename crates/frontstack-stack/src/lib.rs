//! Frontend delivery stack
//!
//! Builds the resource tree for a static website (bucket, access control,
//! distribution, optional certificate and DNS records) and runs the
//! naming passes over it.

pub mod error;
pub mod frontend;

pub use error::{BuildError, Result};
pub use frontend::{CertificateSource, FrontendStack, ids};

use frontstack_config::StackConfig;
use frontstack_core::{PrefixVisitor, TagVisitor, Template};
use tracing::{info, instrument};

/// A synthesized stack, ready to be written out
#[derive(Debug, Clone)]
pub struct Synthesized {
    pub stack_name: String,
    pub template: Template,
}

/// Build the stack and apply the prefix pass, then the stack tags
#[instrument(skip(config), fields(prefix = %config.prefix))]
pub fn synth(config: &StackConfig) -> Result<Synthesized> {
    let stack = FrontendStack::new(config)?;
    let mut template = stack.synthesize()?;

    template.walk(&PrefixVisitor::new(stack.prefix().clone()));

    let tagger = TagVisitor::new(config.stack_tags());
    if !tagger.is_empty() {
        template.walk(&tagger);
    }

    let stack_name = config.stack_name();
    info!(stack = %stack_name, resources = template.resources.len(), "stack ready");
    Ok(Synthesized {
        stack_name,
        template,
    })
}

#[cfg(test)]
mod tests;
