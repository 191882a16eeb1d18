//! Shared test utilities for integration tests.
//!
//! Import from integration test files as:
//! ```ignore
//! mod common;
//! ```

use nstree::namespace::NamespaceTable;
use std::path::PathBuf;
use tempfile::TempDir;

pub const EXAMPLE_URI: &str = "http://example.org/ns";

/// Initialize tracing for tests, respecting RUST_LOG env var.
///
/// Safe to call multiple times; subsequent calls are no-ops.
#[allow(dead_code)]
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// The builtin namespaces plus `ex` -> [EXAMPLE_URI].
#[allow(dead_code)]
pub fn example_namespaces() -> NamespaceTable {
    let mut namespaces = NamespaceTable::builtin();
    namespaces.insert("ex", EXAMPLE_URI);
    namespaces
}

/// Write a naming config to `<temp_dir>/naming.toml` and return its path.
///
/// The config registers `ex` and `alt` (both for [EXAMPLE_URI]), makes `ex` the default
/// namespace and keeps suffixes small.
#[allow(dead_code)]
pub fn create_test_config(temp_dir: &TempDir) -> PathBuf {
    let path = temp_dir.path().join("naming.toml");
    let config = format!(
        r#"default_namespace = "ex"

[namespaces]
"" = ""
jcr = "http://www.jcp.org/jcr/1.0"
rep = "internal"
ex = "{EXAMPLE_URI}"
alt = "{EXAMPLE_URI}"

[generator]
max_suffix = 999
max_attempts = 5000
"#
    );
    std::fs::write(&path, config).unwrap();
    path
}

/// True if `s` is a non-empty run of ASCII digits.
#[allow(dead_code)]
pub fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}
