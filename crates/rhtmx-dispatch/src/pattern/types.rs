//! Placeholder type registry
//!
//! Maps the short tag written inside a placeholder (`[i:id]` → `i`) to the
//! regular expression fragment it stands for. Lookups are verbatim; a tag
//! with no entry is emitted as-is, so `[z:name]` matches the literal `z`.

use std::collections::HashMap;

/// Built-in placeholder tags and their fragments
///
/// The empty tag is the default used by `[]` and `[:name]`.
pub const BUILTIN_TYPES: [(&str, &str); 6] = [
    ("i", "[0-9]+"),
    ("a", "[0-9A-Za-z]+"),
    ("h", "[0-9A-Fa-f]+"),
    ("*", ".+?"),
    ("**", ".+"),
    ("", r"[^/\.]+"),
];

/// Lookup table from placeholder tag to regex fragment
///
/// # Examples
///
/// ```
/// use rhtmx_dispatch::MatchTypes;
///
/// let types = MatchTypes::default().with_type("slug", "[a-z0-9-]+");
///
/// assert_eq!(types.resolve("i"), "[0-9]+");
/// assert_eq!(types.resolve("slug"), "[a-z0-9-]+");
/// // Unknown tags pass through untouched
/// assert_eq!(types.resolve("z"), "z");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchTypes {
    fragments: HashMap<String, String>,
}

impl MatchTypes {
    /// Registry holding only the built-in tags
    pub fn new() -> Self {
        let fragments = BUILTIN_TYPES
            .iter()
            .map(|(tag, fragment)| (tag.to_string(), fragment.to_string()))
            .collect();
        Self { fragments }
    }

    /// Adds or overrides a tag
    pub fn with_type(mut self, tag: impl Into<String>, fragment: impl Into<String>) -> Self {
        self.insert(tag, fragment);
        self
    }

    /// Adds several tags at once
    pub fn with_types<I, K, V>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (tag, fragment) in types {
            self.insert(tag, fragment);
        }
        self
    }

    /// Adds or overrides a tag in place, returning the previous fragment
    pub fn insert(&mut self, tag: impl Into<String>, fragment: impl Into<String>) -> Option<String> {
        self.fragments.insert(tag.into(), fragment.into())
    }

    /// Fragment registered for `tag`, if any
    pub fn get(&self, tag: &str) -> Option<&str> {
        self.fragments.get(tag).map(String::as_str)
    }

    /// Resolves a tag, falling back to the tag text itself
    pub fn resolve<'a>(&'a self, tag: &'a str) -> &'a str {
        self.get(tag).unwrap_or(tag)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.fragments.contains_key(tag)
    }
}

impl Default for MatchTypes {
    fn default() -> Self {
        Self::new()
    }
}
