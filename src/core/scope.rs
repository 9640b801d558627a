//! Immutable chain of handler scopes
//!
//! Every `with_attrs`/`with_group` derivation creates a new [`ScopeNode`]
//! pointing at its parent. Nodes are never mutated after creation, so a
//! chain can be shared and walked from any thread without locking. Parents
//! hold no reference to their children.

use super::attr::Attr;
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct ScopeNode {
    attrs: Vec<Attr>,
    group: Option<String>,
    parent: Option<Arc<ScopeNode>>,
}

impl ScopeNode {
    /// Root of a new chain
    pub fn root() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Child carrying attributes
    pub fn with_attrs(parent: &Arc<ScopeNode>, attrs: Vec<Attr>) -> Self {
        Self {
            attrs,
            group: None,
            parent: Some(Arc::clone(parent)),
        }
    }

    /// Child opening a group
    pub fn with_group(parent: &Arc<ScopeNode>, name: impl Into<String>) -> Self {
        Self {
            attrs: Vec::new(),
            group: Some(name.into()),
            parent: Some(Arc::clone(parent)),
        }
    }

    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn parent(&self) -> Option<&Arc<ScopeNode>> {
        self.parent.as_ref()
    }

    /// Nodes from the root down to `self`
    pub fn chain(&self) -> Vec<&ScopeNode> {
        let mut chain = Vec::new();
        let mut node = Some(self);
        while let Some(current) = node {
            chain.push(current);
            node = current.parent.as_deref();
        }
        chain.reverse();
        chain
    }

    /// Group names from the root down to `self`
    pub fn group_path(&self) -> Vec<String> {
        self.chain()
            .into_iter()
            .filter_map(|n| n.group.clone())
            .collect()
    }
}
