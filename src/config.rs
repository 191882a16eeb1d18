use crate::{
    error::TreeError,
    namespace::NamespaceTable,
    naming::{EntropySource, NameGenerator},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fs::{read_to_string, write},
    num::NonZeroU64,
    path::{Path, PathBuf},
};

/// Largest suffix drawn by default. Keeps generated local names inside the range of a signed
/// 32 bit integer.
pub const DEFAULT_MAX_SUFFIX: u64 = i32::MAX as u64;

/// Default number of candidates tried before name synthesis gives up.
pub const DEFAULT_MAX_ATTEMPTS: u64 = 1_000_000;

/// Bounds applied while synthesizing names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Suffixes are drawn from `0..=max_suffix`.
    pub max_suffix: u64,
    /// `None` retries until an unused name turns up. Written as `0` in config files.
    #[serde(with = "attempts_repr")]
    pub max_attempts: Option<NonZeroU64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            max_suffix: DEFAULT_MAX_SUFFIX,
            max_attempts: NonZeroU64::new(DEFAULT_MAX_ATTEMPTS),
        }
    }
}

impl GeneratorConfig {
    /// Fold a raw draw from a suffix source into `0..=max_suffix`.
    pub fn bound(&self, raw: u64) -> u64 {
        match self.max_suffix.checked_add(1) {
            Some(modulus) => raw % modulus,
            None => raw,
        }
    }
}

mod attempts_repr {
    use super::*;

    pub(super) fn serialize<S: Serializer>(
        attempts: &Option<NonZeroU64>,
        ser: S,
    ) -> Result<S::Ok, S::Error> {
        ser.serialize_u64(attempts.map_or(0, NonZeroU64::get))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        de: D,
    ) -> Result<Option<NonZeroU64>, D::Error> {
        Ok(NonZeroU64::new(u64::deserialize(de)?))
    }
}

/// Everything needed to name nodes in one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameConfig {
    pub default_namespace: String,
    pub namespaces: NamespaceTable,
    pub generator: GeneratorConfig,
}

impl Default for NameConfig {
    fn default() -> Self {
        NameConfig {
            default_namespace: String::new(),
            namespaces: NamespaceTable::builtin(),
            generator: GeneratorConfig::default(),
        }
    }
}

impl NameConfig {
    pub fn name_generator(&self) -> NameGenerator<EntropySource> {
        NameGenerator::new(self.generator)
    }
}

pub trait NameConfigProvider: Send + Sync {
    fn get_config(&self) -> Result<NameConfig, TreeError>;
    fn set_config(&self, config: &NameConfig) -> Result<(), TreeError>;

    fn get_namespaces(&self) -> Result<NamespaceTable, TreeError> {
        Ok(self.get_config()?.namespaces)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TomlConfigProvider {
    path: PathBuf,
}

impl TomlConfigProvider {
    pub fn new(path: PathBuf) -> Self {
        TomlConfigProvider { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NameConfigProvider for TomlConfigProvider {
    fn get_config(&self) -> Result<NameConfig, TreeError> {
        tracing::debug!("Attempting to read naming config from: {:?}", &self.path);
        if !self.path.exists() {
            tracing::debug!("Config file not found, returning default naming config.");
            return Ok(NameConfig::default());
        }
        let content = read_to_string(&self.path)?;
        Ok(toml::from_str(&content)?)
    }

    fn set_config(&self, config: &NameConfig) -> Result<(), TreeError> {
        tracing::debug!("Attempting to write naming config to: {:?}", &self.path);
        let toml_string = toml::to_string(config)?;
        write(&self.path, toml_string)?;
        Ok(())
    }
}
