use once_cell::sync::Lazy;
use regex::Regex;

/// Pattern shared by namespace prefixes and caller-supplied local seeds.
pub(crate) const NAME_PART_PATTERN: &str = "[a-zA-Z][a-zA-Z0-9]*";

static NAME_PART: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^{NAME_PART_PATTERN}$")).expect("name part pattern to be a valid regex")
});

/// True if `part` is usable as a namespace prefix or as a local-name seed.
pub fn is_name_part(part: &str) -> bool {
    NAME_PART.is_match(part)
}

/// The string placed in front of a local name for `prefix`: empty for the empty namespace,
/// otherwise `prefix:`. A trailing colon on the input is tolerated.
pub fn qualifier(prefix: &str) -> String {
    let prefix = prefix.strip_suffix(':').unwrap_or(prefix);
    if prefix.is_empty() {
        String::new()
    } else {
        format!("{prefix}:")
    }
}

/// Split `name` at its first colon into `(prefix, local)`. Unqualified names have no prefix.
pub fn split_prefix(name: &str) -> (Option<&str>, &str) {
    match name.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_parts() {
        assert!(is_name_part("a"));
        assert!(is_name_part("content2"));
        assert!(is_name_part("Ab9"));
        assert!(!is_name_part(""));
        assert!(!is_name_part("1abc"));
        assert!(!is_name_part("a-b"));
        assert!(!is_name_part("a:b"));
        assert!(!is_name_part("é"));
    }

    #[test]
    fn qualifiers() {
        assert_eq!(qualifier(""), "");
        assert_eq!(qualifier(":"), "");
        assert_eq!(qualifier("nt"), "nt:");
        assert_eq!(qualifier("nt:"), "nt:");
    }

    #[test]
    fn split() {
        assert_eq!(split_prefix("jcr:content"), (Some("jcr"), "content"));
        assert_eq!(split_prefix("content"), (None, "content"));
        assert_eq!(split_prefix(":x"), (Some(""), "x"));
    }
}
