//! [crate::naming] produces collision-free node names from optional caller hints.
//!
//! A hint is first classified into one of six grammars ([`NameHint`]):
//!
//! | hint                | meaning                                        |
//! |---------------------|------------------------------------------------|
//! | absent              | default namespace, no seed                     |
//! | `""`, `":"`, `"{}"` | empty namespace, no seed                       |
//! | `"prefix:"`         | registered prefix, no seed                     |
//! | `"{uri}"`           | prefix registered for a valid URL, no seed     |
//! | `"prefix:seed"`     | registered prefix, local part starts with seed |
//! | `"{uri}seed"`       | prefix registered for uri, seed                |
//!
//! Anything else is rejected with [`TreeError::InvalidHint`]. References to prefixes or URIs
//! missing from the namespace table are rejected with [`TreeError::UnknownNamespace`]; there is
//! no fallback to the default namespace.
//!
//! The resolved `(prefix, seed)` pair is then handed to [`NameGenerator::synthesize`], which
//! appends random suffixes until it finds a name absent from the sibling set.
use std::collections::BTreeSet;

use crate::{
    config::GeneratorConfig,
    namespace::NamespaceRegistry,
    tree::{child_names, TreeNode},
    TreeError,
};

mod generator;
mod hint;
mod name;

pub use generator::{EntropySource, NameGenerator, SequenceSource, SuffixSource};
pub use hint::NameHint;
pub use name::{is_name_part, qualifier, split_prefix};

/// Generate an unused node name for `hint` using OS entropy and the default
/// [`GeneratorConfig`].
///
/// ```
/// use nstree::{namespace::NamespaceTable, naming::generate_auto_node_name};
/// use std::collections::BTreeSet;
///
/// let namespaces = NamespaceTable::builtin();
/// let used = BTreeSet::new();
/// let name = generate_auto_node_name(&used, &namespaces, "", Some("jcr:content")).unwrap();
/// assert!(name.starts_with("jcr:content"));
/// ```
pub fn generate_auto_node_name<N: NamespaceRegistry + ?Sized>(
    used_names: &BTreeSet<String>,
    namespaces: &N,
    default_namespace: &str,
    hint: Option<&str>,
) -> Result<String, TreeError> {
    NameGenerator::new(GeneratorConfig::default()).generate(
        used_names,
        namespaces,
        default_namespace,
        hint,
    )
}

/// Create a child of `parent` whose name is generated from `hint`, avoiding the names of the
/// children `parent` already has.
///
/// Hint failures are reported before the tree is touched for writing; errors from `add_child`
/// are passed through.
#[tracing::instrument(skip(parent, generator, namespaces))]
pub fn add_auto_named_child<N, S, R>(
    parent: &N,
    generator: &mut NameGenerator<S>,
    namespaces: &R,
    default_namespace: &str,
    hint: Option<&str>,
) -> Result<N, TreeError>
where
    N: TreeNode,
    S: SuffixSource,
    R: NamespaceRegistry + ?Sized,
{
    let used_names = child_names(parent)?;
    let name = generator.generate(&used_names, namespaces, default_namespace, hint)?;
    tracing::debug!("adding auto-named child '{name}'");
    parent.add_child(&name)
}
