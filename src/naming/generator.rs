use std::collections::BTreeSet;

use super::hint::NameHint;
use crate::{config::GeneratorConfig, namespace::NamespaceRegistry, TreeError};

/// Supplies the integers appended to generated names.
pub trait SuffixSource {
    fn next_suffix(&mut self) -> Result<u64, TreeError>;
}

/// Draws suffixes from the operating system's random number generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct EntropySource;

impl SuffixSource for EntropySource {
    fn next_suffix(&mut self) -> Result<u64, TreeError> {
        let mut buf = [0u8; 8];
        getrandom::getrandom(&mut buf)?;
        Ok(u64::from_le_bytes(buf))
    }
}

/// Replays a fixed sequence of suffixes, wrapping around at the end.
#[derive(Debug, Clone, Default)]
pub struct SequenceSource {
    values: Vec<u64>,
    cursor: usize,
}

impl SequenceSource {
    pub fn new<I: IntoIterator<Item = u64>>(values: I) -> Self {
        SequenceSource {
            values: values.into_iter().collect(),
            cursor: 0,
        }
    }
}

impl SuffixSource for SequenceSource {
    fn next_suffix(&mut self) -> Result<u64, TreeError> {
        if self.values.is_empty() {
            return Err(TreeError::Entropy(
                "SequenceSource has no values to replay".to_string(),
            ));
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor = (self.cursor + 1) % self.values.len();
        Ok(value)
    }
}

/// Hint-driven node name generator.
///
/// Holds no state about the tree: the set of sibling names is passed in on every call, so the
/// caller is responsible for keeping it consistent with the parent node it names children for.
#[derive(Debug, Clone)]
pub struct NameGenerator<S = EntropySource> {
    config: GeneratorConfig,
    source: S,
}

impl NameGenerator<EntropySource> {
    pub fn new(config: GeneratorConfig) -> Self {
        NameGenerator {
            config,
            source: EntropySource,
        }
    }
}

impl Default for NameGenerator<EntropySource> {
    fn default() -> Self {
        NameGenerator::new(GeneratorConfig::default())
    }
}

impl<S: SuffixSource> NameGenerator<S> {
    pub fn with_source(config: GeneratorConfig, source: S) -> Self {
        NameGenerator { config, source }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Classify `hint`, resolve its namespace and synthesize a name not contained in
    /// `used_names`.
    pub fn generate<N: NamespaceRegistry + ?Sized>(
        &mut self,
        used_names: &BTreeSet<String>,
        namespaces: &N,
        default_namespace: &str,
        hint: Option<&str>,
    ) -> Result<String, TreeError> {
        let classified = NameHint::classify(hint)?;
        let (prefix, base) = classified.resolve(namespaces, default_namespace)?;
        tracing::debug!(
            "[NameGenerator::generate] hint {:?} classified as {:?}, generating with prefix '{}' \
             and base '{}'",
            hint,
            classified,
            prefix,
            base
        );
        self.synthesize(used_names, &prefix, base)
    }

    /// Append suffixes to `prefix` + `base` until the result is not in `used_names`.
    ///
    /// Fails with [`TreeError::NamespaceExhausted`] once [`GeneratorConfig::max_attempts`]
    /// candidates have collided.
    pub fn synthesize(
        &mut self,
        used_names: &BTreeSet<String>,
        prefix: &str,
        base: &str,
    ) -> Result<String, TreeError> {
        let mut attempts = 0u64;
        loop {
            if let Some(max_attempts) = self.config.max_attempts {
                if attempts >= max_attempts.get() {
                    tracing::warn!(
                        "[NameGenerator::synthesize] gave up on '{prefix}{base}' after {attempts} \
                         attempts against {} used names",
                        used_names.len()
                    );
                    return Err(TreeError::NamespaceExhausted {
                        prefix: prefix.to_string(),
                        base: base.to_string(),
                        attempts,
                    });
                }
            }
            attempts += 1;

            let suffix = self.config.bound(self.source.next_suffix()?);
            let candidate = format!("{prefix}{base}{suffix}");
            if !used_names.contains(&candidate) {
                return Ok(candidate);
            }
            tracing::trace!("[NameGenerator::synthesize] '{candidate}' already in use");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::namespace::NamespaceTable;
    use crate::naming::split_prefix;
    use std::num::NonZeroU64;

    fn table() -> NamespaceTable {
        let mut table = NamespaceTable::builtin();
        table.insert("ex", "http://example.org/ns");
        table
    }

    // A zero `max_attempts` means unbounded.
    fn small(max_suffix: u64, max_attempts: u64) -> GeneratorConfig {
        GeneratorConfig {
            max_suffix,
            max_attempts: NonZeroU64::new(max_attempts),
        }
    }

    fn is_digits(s: &str) -> bool {
        !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
    }

    #[test]
    fn sequence_source_wraps() {
        let mut source = SequenceSource::new([3, 1]);
        assert_eq!(source.next_suffix(), Ok(3));
        assert_eq!(source.next_suffix(), Ok(1));
        assert_eq!(source.next_suffix(), Ok(3));
        assert!(SequenceSource::default().next_suffix().is_err());
    }

    #[test]
    fn synthesize_skips_used_candidates() {
        let used: BTreeSet<String> = ["ex:item0", "ex:item1"].map(String::from).into();
        let mut generator =
            NameGenerator::with_source(small(100, 10), SequenceSource::new([0, 1, 2]));
        assert_eq!(
            generator.synthesize(&used, "ex:", "item"),
            Ok("ex:item2".to_string())
        );
    }

    #[test]
    fn synthesize_finds_the_last_free_candidate() {
        let used: BTreeSet<String> = (0..10).filter(|n| *n != 7).map(|n| format!("x{n}")).collect();

        let mut replay = NameGenerator::with_source(small(9, 10), SequenceSource::new(0..10));
        assert_eq!(replay.synthesize(&used, "", "x"), Ok("x7".to_string()));

        let mut random = NameGenerator::new(small(9, 100_000));
        assert_eq!(random.synthesize(&used, "", "x"), Ok("x7".to_string()));
    }

    #[test]
    fn synthesize_reports_exhaustion() {
        let used: BTreeSet<String> = (0..4).map(|n| format!("ex:{n}")).collect();
        let mut generator =
            NameGenerator::with_source(small(3, 8), SequenceSource::new(0..4));
        assert_eq!(
            generator.synthesize(&used, "ex:", ""),
            Err(TreeError::NamespaceExhausted {
                prefix: "ex:".to_string(),
                base: String::new(),
                attempts: 8,
            })
        );
    }

    #[test]
    fn generate_shapes_per_grammar() {
        let table = table();
        let used = BTreeSet::new();
        let mut generator = NameGenerator::default();

        let absent = generator.generate(&used, &table, "nt", None).unwrap();
        assert_eq!(split_prefix(&absent).0, Some("nt"));
        assert!(is_digits(split_prefix(&absent).1));

        for empty in ["", ":", "{}"] {
            let name = generator.generate(&used, &table, "nt", Some(empty)).unwrap();
            assert!(is_digits(&name), "{name}");
        }

        let bare = generator.generate(&used, &table, "", Some("ex:")).unwrap();
        assert!(bare.starts_with("ex:") && is_digits(&bare[3..]), "{bare}");

        let by_uri = generator
            .generate(&used, &table, "", Some("{http://example.org/ns}"))
            .unwrap();
        assert!(by_uri.starts_with("ex:") && is_digits(&by_uri[3..]), "{by_uri}");

        let seeded = generator.generate(&used, &table, "", Some("ex:item")).unwrap();
        assert!(seeded.starts_with("ex:item") && is_digits(&seeded[7..]), "{seeded}");

        let uri_seeded = generator
            .generate(&used, &table, "", Some("{http://example.org/ns}item"))
            .unwrap();
        assert!(
            uri_seeded.starts_with("ex:item") && is_digits(&uri_seeded[7..]),
            "{uri_seeded}"
        );
    }

    #[test]
    fn generate_fails_fast() {
        let table = table();
        let used = BTreeSet::new();
        let mut generator = NameGenerator::default();
        assert!(matches!(
            generator.generate(&used, &table, "", Some("foo:")),
            Err(TreeError::UnknownNamespace(_))
        ));
        assert!(matches!(
            generator.generate(&used, &table, "", Some("{http://example.org/other}")),
            Err(TreeError::UnknownNamespace(_))
        ));
        assert!(matches!(
            generator.generate(&used, &table, "", Some("1prefix:name")),
            Err(TreeError::InvalidHint(_))
        ));
    }
}
