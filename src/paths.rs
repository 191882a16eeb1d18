//! [crate::paths] materializes root-relative paths in a tree, creating missing nodes on the way
//! down, like `mkdir -p`.
use crate::{tree::TreeNode, TreeError};

/// The non-empty `/`-separated segments of `path`. Leading, trailing and repeated slashes
/// contribute nothing.
pub fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|segment| !segment.is_empty())
}

/// Return the child of `node` named `name`, creating it when missing.
///
/// The existence check and the creation are two separate calls into the tree; a concurrent
/// writer may slip in between, in which case the tree's own error for the duplicate is returned.
pub fn get_or_add_child<N: TreeNode>(node: &N, name: &str) -> Result<N, TreeError> {
    if node.has_child(name)? {
        node.get_child(name)
    } else {
        tracing::debug!("[paths::get_or_add_child] creating '{name}'");
        node.add_child(name)
    }
}

/// Walk `path` from `root`, creating every segment that does not exist yet, and return the node
/// for the last segment. A path without segments returns `root` itself.
///
/// Segment names are not checked here; the tree rejects the ones it does not accept. Nodes
/// created before such a failure are left in place.
///
/// ```
/// use nstree::{memory::MemoryTree, paths::create_path, tree::TreeNode};
///
/// let tree = MemoryTree::new();
/// let root = tree.root();
/// let leaf = create_path(&root, "/content/site//en/").unwrap();
/// assert_eq!(create_path(&root, "content/site/en").unwrap(), leaf);
/// assert!(root.get_child("content").unwrap().has_child("site").unwrap());
/// ```
#[tracing::instrument(skip(root))]
pub fn create_path<N: TreeNode>(root: &N, path: &str) -> Result<N, TreeError> {
    let mut current = root.clone();
    for segment in path_segments(path) {
        current = get_or_add_child(&current, segment)?;
    }
    Ok(current)
}
