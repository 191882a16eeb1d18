//! Shared test utilities for tree and naming tests

use crate::{
    memory::{MemoryNode, MemoryTree},
    namespace::NamespaceTable,
    tree::{TreeItem, TreeNode},
};

pub const EXAMPLE_URI: &str = "http://example.org/ns";

/// Initialize logging for tests
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// The builtin namespaces plus `ex` -> [EXAMPLE_URI].
pub fn example_namespaces() -> NamespaceTable {
    let mut namespaces = NamespaceTable::builtin();
    namespaces.insert("ex", EXAMPLE_URI);
    namespaces
}

/// A tree shaped like a freshly initialized repository:
///
/// ```text
/// /
/// ├── jcr:system
/// ├── rep:security
/// ├── content
/// │   └── page
/// └── ex:data
/// ```
///
/// with properties `jcr:primaryType`, `rep:policy` and `title` on the root.
pub fn create_test_tree() -> MemoryTree {
    init_logging();
    let tree = MemoryTree::with_namespaces(example_namespaces());
    let root = tree.root();
    root.add_child("jcr:system").unwrap();
    root.add_child("rep:security").unwrap();
    root.add_child("content")
        .unwrap()
        .add_child("page")
        .unwrap();
    root.add_child("ex:data").unwrap();
    root.set_property("jcr:primaryType", "rep:root").unwrap();
    root.set_property("rep:policy", "deny").unwrap();
    root.set_property("title", "home").unwrap();
    tree
}

/// Names of the direct children of `node`, in creation order.
pub fn names_of(node: &MemoryNode) -> Vec<String> {
    node.children()
        .unwrap()
        .iter()
        .map(|child| child.name().unwrap())
        .collect()
}

/// Assert no node below `node` has two children with the same name.
pub fn assert_no_duplicate_children(node: &MemoryNode) {
    let mut names = names_of(node);
    let total = names.len();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), total, "duplicate children under {node:?}");
    for child in node.children().unwrap() {
        assert_no_duplicate_children(&child);
    }
}
