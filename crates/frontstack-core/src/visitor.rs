//! Post-construction passes over the resource tree
//!
//! A [`Visitor`] is handed every node of a [`Template`](crate::Template)
//! exactly once and may mutate the node's properties and tags. Visitors
//! never add or remove nodes, and each visit depends only on the node it
//! is given, so the order of visits does not matter.

use crate::model::{Expr, NamingPolicy, ResourceNode, Tags};
use crate::prefix::Prefix;
use tracing::debug;

/// Tag key carrying the raw prefix
pub const PREFIX_TAG: &str = "Prefix";

/// Tag key carrying `{prefix}-frontend`
pub const APPLICATION_TAG: &str = "Application";

/// A per-node pass over the resource tree
pub trait Visitor {
    fn visit(&self, logical_id: &str, node: &mut ResourceNode);
}

/// Outcome of visiting one node, for logs and tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefixOutcome {
    /// Naming property rewritten from `from` to `to`
    Renamed { from: String, to: String },
    /// Naming property already carried the prefix
    AlreadyPrefixed,
    /// Naming property absent or empty; nothing to prefix
    NoValue,
    /// Naming property is a reference resolved at deploy time
    Unresolved,
    /// Kind has no renamable identity; identification tags attached
    Tagged,
}

/// Rewrites naming properties with a prefix, or tags nodes that have none
///
/// Unknown kinds are tagged, never rejected.
#[derive(Debug, Clone)]
pub struct PrefixVisitor {
    prefix: Prefix,
}

impl PrefixVisitor {
    pub fn new(prefix: Prefix) -> Self {
        Self { prefix }
    }

    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    /// Apply the prefix rule to a single node
    pub fn apply(&self, node: &mut ResourceNode) -> PrefixOutcome {
        match node.kind().naming_policy() {
            NamingPolicy::Rename { .. } => match node.properties.naming_field_mut() {
                Some(field) => self.rename(field),
                // Policy and property record disagree; treat like a kind
                // without a naming field.
                None => self.tag(&mut node.tags),
            },
            NamingPolicy::TagOnly => self.tag(&mut node.tags),
        }
    }

    fn rename(&self, field: &mut Option<Expr>) -> PrefixOutcome {
        match field {
            None => PrefixOutcome::NoValue,
            Some(Expr::Literal(current)) if current.is_empty() => PrefixOutcome::NoValue,
            Some(Expr::Literal(current)) if self.prefix.is_applied_to(current.as_str()) => {
                PrefixOutcome::AlreadyPrefixed
            }
            Some(Expr::Literal(current)) => {
                let renamed = self.prefix.apply(current.as_str());
                let from = std::mem::replace(current, renamed.clone());
                PrefixOutcome::Renamed { from, to: renamed }
            }
            Some(_) => PrefixOutcome::Unresolved,
        }
    }

    fn tag(&self, tags: &mut Tags) -> PrefixOutcome {
        tags.insert(PREFIX_TAG, self.prefix.as_str());
        tags.insert(APPLICATION_TAG, self.prefix.application());
        PrefixOutcome::Tagged
    }
}

impl PrefixVisitor {
    /// [`apply`](Self::apply) with the per-node debug log
    pub fn visit_node(&self, logical_id: &str, node: &mut ResourceNode) -> PrefixOutcome {
        let kind = node.kind();
        let path = kind.naming_policy().dotted_path();
        let outcome = self.apply(node);
        debug!(
            logical_id,
            kind = %kind,
            path = path.as_deref().unwrap_or("-"),
            outcome = ?outcome,
            "prefix applied"
        );
        outcome
    }
}

impl Visitor for PrefixVisitor {
    fn visit(&self, logical_id: &str, node: &mut ResourceNode) {
        self.visit_node(logical_id, node);
    }
}

/// Adds a fixed set of tags to every node
#[derive(Debug, Clone, Default)]
pub struct TagVisitor {
    tags: Tags,
}

impl TagVisitor {
    pub fn new(tags: Tags) -> Self {
        Self { tags }
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

impl Visitor for TagVisitor {
    fn visit(&self, logical_id: &str, node: &mut ResourceNode) {
        let mut added = 0usize;
        for (key, value) in self.tags.iter() {
            if node.tags.insert(key, value) {
                added += 1;
            }
        }
        debug!(logical_id, added, "stack tags applied");
    }
}
