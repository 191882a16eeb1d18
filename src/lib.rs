//! # nstree
//!
//! Utilities for namespace-aware content trees: materializing paths and naming new nodes.
//!
//! ## Overview
//!
//! A content tree is a single-rooted hierarchy of nodes. Every node and property carries a
//! name that is either unqualified (`local`) or namespace-qualified (`prefix:local`), where the
//! prefix is mapped to a namespace URI by a registry. nstree provides the logic that sits on top
//! of such a tree without owning its storage:
//!
//! - **Path materialization**: [`paths::create_path`] walks a slash-separated path from a root,
//!   creating whatever is missing, like `mkdir -p`.
//! - **Automatic naming**: [`naming::NameGenerator`] turns an optional name hint such as
//!   `"nt:"`, `"{http://example.org/ns}item"` or `"ex:child"` into a valid name that does not
//!   collide with existing siblings.
//! - **System items**: [`system::is_system_item`] tells reserved `jcr:` / `rep:` items apart
//!   from user content; [`system::remove_non_system_items`] clears the latter.
//!
//! ## Architecture
//!
//! - **[`tree`]**: the [`tree::TreeNode`] / [`tree::TreeItem`] traits a store implements
//! - **[`namespace`]**: [`namespace::NamespaceRegistry`] and the ordered
//!   [`namespace::NamespaceTable`]
//! - **[`naming`]**: hint classification ([`naming::NameHint`]) and name synthesis
//! - **[`paths`]**: path materialization
//! - **[`system`]**: the system-item predicate and bulk cleanup
//! - **[`memory`]**: an in-memory tree, handy for tests and as a reference implementation
//! - **[`config`]**: TOML-backed namespace and generator settings
//!
//! Nothing is cached between calls. Every operation takes what it needs as arguments, and the
//! only global values are compiled regular expressions.
//!
//! ## Quick Start
//!
//! ```rust
//! use nstree::{
//!     memory::MemoryTree,
//!     namespace::NamespaceTable,
//!     naming::{add_auto_named_child, NameGenerator},
//!     paths::create_path,
//!     tree::TreeItem,
//!     TreeError,
//! };
//!
//! # fn main() -> Result<(), TreeError> {
//! let mut namespaces = NamespaceTable::builtin();
//! namespaces.insert("ex", "http://example.org/ns");
//!
//! let tree = MemoryTree::with_namespaces(namespaces.clone());
//! let folder = create_path(&tree.root(), "/content/ex:folder")?;
//!
//! let mut generator = NameGenerator::default();
//! let child = add_auto_named_child(&folder, &mut generator, &namespaces, "", Some("ex:item"))?;
//! assert!(child.name()?.starts_with("ex:item"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! All fallible operations return [`TreeError`]. Hint problems surface as
//! [`TreeError::InvalidHint`] or [`TreeError::UnknownNamespace`]; errors raised by the tree
//! store are passed through unchanged.

pub mod config;
pub mod error;
pub mod memory;
pub mod namespace;
pub mod naming;
pub mod paths;
pub mod system;
#[cfg(test)]
mod tests;
pub mod tree;

pub use error::*;
