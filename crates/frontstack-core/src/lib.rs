//! frontstack core
//!
//! Resource tree model for static-site delivery stacks: a storage bucket
//! behind a CDN distribution, with optional certificate and DNS records.
//! Stacks are synthesized into a deployment template and rewritten by
//! visitors before they are handed to the provisioning engine.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                 frontstack CLI                   │
//! │            (frontstack synth/prefix)             │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               frontstack-stack                   │
//! │          FrontendStack::synthesize               │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               frontstack-core                    │
//! │  ┌──────────────┐  ┌──────────────────────┐     │
//! │  │    Model     │  │      Template        │     │
//! │  │ ResourceNode │  │  JSON / YAML codec   │     │
//! │  └──────────────┘  └──────────────────────┘     │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │  trait Visitor { fn visit(..) }           │   │
//! │  │  PrefixVisitor, TagVisitor                │   │
//! │  └──────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod model;
pub mod prefix;
pub mod template;
pub mod visitor;

// Re-exports
pub use error::{Result, StackError};
pub use model::{
    Expr, NamingPolicy, RemovalPolicy, ResourceKind, ResourceNode, ResourceProperties, Tag, Tags,
};
pub use prefix::Prefix;
pub use template::{Output, Template, TemplateFormat};
pub use visitor::{PrefixOutcome, PrefixVisitor, TagVisitor, Visitor};
