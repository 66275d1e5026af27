//! Resource tree model
//!
//! Typed resource nodes, their kinds and property values.

mod expr;
mod kind;
mod node;
mod properties;
mod tags;

// Re-exports
pub use expr::*;
pub use kind::*;
pub use node::{RemovalPolicy, ResourceNode};
pub(crate) use node::RawResource;
pub use properties::*;
pub use tags::*;
