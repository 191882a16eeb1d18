/// [crate::namespace] holds the prefix <-> URI mapping consulted when qualifying names.
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
};

pub const NAMESPACE_JCR: &str = "http://www.jcp.org/jcr/1.0";
pub const NAMESPACE_NT: &str = "http://www.jcp.org/jcr/nt/1.0";
pub const NAMESPACE_MIX: &str = "http://www.jcp.org/jcr/mix/1.0";
pub const NAMESPACE_XML: &str = "http://www.w3.org/XML/1998/namespace";
pub const NAMESPACE_REP: &str = "internal";

/// Read-only view of a namespace registry, queryable in both directions.
pub trait NamespaceRegistry {
    /// The URI registered for `prefix`, if any.
    fn uri(&self, prefix: &str) -> Option<&str>;

    /// The prefix registered for `uri`, if any. When several prefixes map to the same URI the
    /// implementation must answer with one of them deterministically.
    fn prefix(&self, uri: &str) -> Option<&str>;

    fn has_prefix(&self, prefix: &str) -> bool {
        self.uri(prefix).is_some()
    }
}

/// An ordered prefix -> URI table.
///
/// Reverse lookups walk the table in prefix order, so when one URI is registered under several
/// prefixes the lexicographically smallest prefix is returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NamespaceTable(BTreeMap<String, String>);

impl NamespaceTable {
    pub fn new() -> Self {
        NamespaceTable(BTreeMap::new())
    }

    /// The mappings every repository starts out with, including the empty namespace.
    pub fn builtin() -> Self {
        [
            ("", ""),
            ("jcr", NAMESPACE_JCR),
            ("nt", NAMESPACE_NT),
            ("mix", NAMESPACE_MIX),
            ("xml", NAMESPACE_XML),
            ("rep", NAMESPACE_REP),
        ]
        .into_iter()
        .collect()
    }

    /// Register `prefix` for `uri`, returning the URI it previously mapped to.
    pub fn insert<P: Into<String>, U: Into<String>>(&mut self, prefix: P, uri: U) -> Option<String> {
        self.0.insert(prefix.into(), uri.into())
    }

    pub fn remove(&mut self, prefix: &str) -> Option<String> {
        self.0.remove(prefix)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(p, u)| (p.as_str(), u.as_str()))
    }
}

impl NamespaceRegistry for NamespaceTable {
    fn uri(&self, prefix: &str) -> Option<&str> {
        self.0.get(prefix).map(String::as_str)
    }

    fn prefix(&self, uri: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(_prefix, registered)| registered.as_str() == uri)
            .map(|(prefix, _uri)| prefix.as_str())
    }
}

impl<P: Into<String>, U: Into<String>> FromIterator<(P, U)> for NamespaceTable {
    fn from_iter<I: IntoIterator<Item = (P, U)>>(iter: I) -> Self {
        NamespaceTable(
            iter.into_iter()
                .map(|(prefix, uri)| (prefix.into(), uri.into()))
                .collect(),
        )
    }
}

impl Display for NamespaceTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let entries = self
            .iter()
            .map(|(prefix, uri)| format!("{prefix}={uri}"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{{{entries}}}")
    }
}
