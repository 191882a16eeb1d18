use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use super::name::{is_name_part, qualifier, NAME_PART_PATTERN};
use crate::{namespace::NamespaceRegistry, TreeError};

static BARE_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^({NAME_PART_PATTERN}):$")).expect("bare prefix pattern to compile")
});

static BARE_URI: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\{([^}]+)\}$").expect("bare uri pattern to compile"));

static PREFIXED_SEED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^({NAME_PART_PATTERN}):({NAME_PART_PATTERN})$"))
        .expect("prefixed seed pattern to compile")
});

static URI_SEED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^\{{([^}}]*)\}}({NAME_PART_PATTERN})$"))
        .expect("uri seed pattern to compile")
});

/// A caller-supplied name hint, classified into exactly one of the accepted grammars.
///
/// Variants borrow from the hint string; classification never allocates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameHint<'a> {
    /// No hint given: use the default namespace.
    Absent,
    /// `""`, `":"` or `"{}"`.
    EmptyNamespace,
    /// `"prefix:"`
    BarePrefix(&'a str),
    /// `"{uri}"` where `uri` parses as a URL.
    BareUri(&'a str),
    /// `"prefix:seed"`
    PrefixedSeed { prefix: &'a str, seed: &'a str },
    /// `"{uri}seed"`
    UriSeed { uri: &'a str, seed: &'a str },
}

impl<'a> NameHint<'a> {
    /// Classify `hint`. Grammars are tried in the order of the variants above and the first
    /// structural match wins.
    pub fn classify(hint: Option<&'a str>) -> Result<NameHint<'a>, TreeError> {
        let Some(hint) = hint else {
            return Ok(NameHint::Absent);
        };

        if matches!(hint, "" | ":" | "{}") {
            return Ok(NameHint::EmptyNamespace);
        }

        if let Some(caps) = BARE_PREFIX.captures(hint) {
            let (_, [prefix]) = caps.extract();
            return Ok(NameHint::BarePrefix(prefix));
        }

        if let Some(caps) = BARE_URI.captures(hint) {
            let (_, [uri]) = caps.extract();
            if Url::parse(uri).is_ok() {
                return Ok(NameHint::BareUri(uri));
            }
            tracing::trace!("[NameHint::classify] '{uri}' is not a valid URL");
        }

        if let Some(caps) = PREFIXED_SEED.captures(hint) {
            let (_, [prefix, seed]) = caps.extract();
            return Ok(NameHint::PrefixedSeed { prefix, seed });
        }

        if let Some(caps) = URI_SEED.captures(hint) {
            let (_, [uri, seed]) = caps.extract();
            return Ok(NameHint::UriSeed { uri, seed });
        }

        Err(TreeError::InvalidHint(format!(
            "'{hint}' matches none of the accepted forms: \"\", \":\", \"{{}}\", \"prefix:\", \
             \"{{uri}}\", \"prefix:local\", \"{{uri}}local\""
        )))
    }

    /// The local-name seed carried by the hint, empty when there is none.
    pub fn seed(&self) -> &'a str {
        match self {
            NameHint::PrefixedSeed { seed, .. } | NameHint::UriSeed { seed, .. } => *seed,
            _ => "",
        }
    }

    /// Resolve the hint against `namespaces` into the `(qualifier, seed)` pair fed to name
    /// synthesis. The qualifier is empty for the empty namespace and ends in `:` otherwise.
    ///
    /// `default_namespace` is only checked for shape, not looked up in `namespaces`.
    pub fn resolve<N: NamespaceRegistry + ?Sized>(
        &self,
        namespaces: &N,
        default_namespace: &str,
    ) -> Result<(String, &'a str), TreeError> {
        let prefix = match self {
            NameHint::Absent => {
                let bare = default_namespace
                    .strip_suffix(':')
                    .unwrap_or(default_namespace);
                if !bare.is_empty() && !is_name_part(bare) {
                    return Err(TreeError::InvalidHint(format!(
                        "default namespace '{default_namespace}' is not a valid prefix"
                    )));
                }
                qualifier(bare)
            }
            NameHint::EmptyNamespace => String::new(),
            NameHint::BarePrefix(prefix) | NameHint::PrefixedSeed { prefix, .. } => {
                if !namespaces.has_prefix(prefix) {
                    return Err(TreeError::UnknownNamespace(format!(
                        "prefix '{prefix}' is not registered"
                    )));
                }
                qualifier(prefix)
            }
            NameHint::BareUri(uri) | NameHint::UriSeed { uri, .. } => {
                match namespaces.prefix(uri) {
                    Some(prefix) => qualifier(prefix),
                    None => {
                        return Err(TreeError::UnknownNamespace(format!(
                            "no prefix is registered for uri '{uri}'"
                        )))
                    }
                }
            }
        };
        Ok((prefix, self.seed()))
    }
}
