//! Name → URL-safe slug derivation.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Any run of characters that may not appear in a slug
    static ref NON_SLUG_CHARS: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

/// Derive a slug from a display name.
///
/// Lowercases the input, collapses every run of characters outside `[a-z0-9]`
/// into a single hyphen and strips hyphens from both ends. The transform is
/// lossy (`"Café"` becomes `"caf"`) and may return an empty string for names
/// made only of punctuation. Uniqueness is not guaranteed here.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    NON_SLUG_CHARS
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}
