//! [crate::tree] defines the interface this crate needs from a tree store.
//!
//! Implementations hand out cheap, cloneable handles. Errors raised by the store travel through
//! the algorithms in this crate unchanged.
use std::collections::BTreeSet;

use crate::TreeError;

/// Anything in the tree that has a name and can be removed: nodes and properties.
pub trait TreeItem {
    fn name(&self) -> Result<String, TreeError>;

    /// Detach this item (and, for nodes, its whole subtree) from the tree.
    fn remove(&self) -> Result<(), TreeError>;
}

pub trait TreeNode: TreeItem + Clone + Sized {
    type Property: TreeItem;

    fn has_child(&self, name: &str) -> Result<bool, TreeError>;

    /// Fails with [`TreeError::NotFound`] when there is no such child.
    fn get_child(&self, name: &str) -> Result<Self, TreeError>;

    /// Create a child named `name`. The store validates the name against its own rules and
    /// may refuse duplicates.
    fn add_child(&self, name: &str) -> Result<Self, TreeError>;

    fn children(&self) -> Result<Vec<Self>, TreeError>;

    fn properties(&self) -> Result<Vec<Self::Property>, TreeError>;
}

/// Names of the direct children of `node`, the sibling set a new child's name must avoid.
pub fn child_names<N: TreeNode>(node: &N) -> Result<BTreeSet<String>, TreeError> {
    node.children()?
        .iter()
        .map(|child| child.name())
        .collect()
}
