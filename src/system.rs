//! [crate::system] separates implementation-reserved items from user content.
use crate::{
    tree::{TreeItem, TreeNode},
    TreeError,
};

/// Name prefixes reserved by the repository implementation.
pub const SYSTEM_PREFIXES: [&str; 2] = ["jcr:", "rep:"];

/// True iff `name` lives in one of the [`SYSTEM_PREFIXES`] namespaces.
///
/// ```
/// use nstree::system::is_system_item;
///
/// assert!(is_system_item("jcr:primaryType"));
/// assert!(!is_system_item("content"));
/// ```
pub fn is_system_item(name: &str) -> bool {
    SYSTEM_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
}

/// Remove every direct child and property of `root` that is not a system item, returning how
/// many items were removed.
///
/// Stops at the first error reported by the tree; items removed before that stay removed.
#[tracing::instrument(skip(root))]
pub fn remove_non_system_items<N: TreeNode>(root: &N) -> Result<usize, TreeError> {
    let mut removed = 0;
    for child in root.children()? {
        removed += remove_unless_system(&child)?;
    }
    for property in root.properties()? {
        removed += remove_unless_system(&property)?;
    }
    tracing::debug!("removed {removed} non-system items");
    Ok(removed)
}

fn remove_unless_system<I: TreeItem>(item: &I) -> Result<usize, TreeError> {
    let name = item.name()?;
    if is_system_item(&name) {
        return Ok(0);
    }
    tracing::trace!("removing '{name}'");
    item.remove()?;
    Ok(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_prefixes() {
        assert!(is_system_item("jcr:primaryType"));
        assert!(is_system_item("rep:root"));
        assert!(is_system_item("jcr:"));
        assert!(!is_system_item("content"));
        assert!(!is_system_item("jcr"));
        assert!(!is_system_item("nt:file"));
        assert!(!is_system_item("xjcr:content"));
        assert!(!is_system_item(""));
    }
}
