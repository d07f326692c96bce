use std::collections::HashMap;

/// Named path parameters extracted by a match
///
/// Entries keep the left-to-right order in which the placeholders appear in
/// the pattern. Optional placeholders that were skipped are absent rather
/// than present with an empty value.
///
/// # Examples
///
/// ```
/// use rhtmx_dispatch::compile;
///
/// let pattern = compile("/posts/[i:year]/[:slug]").unwrap();
/// let params = pattern.captures("/posts/2024/hello-world").unwrap();
///
/// assert_eq!(params.get("year"), Some("2024"));
/// assert_eq!(params.get("slug"), Some("hello-world"));
/// assert_eq!(params.names().collect::<Vec<_>>(), vec!["year", "slug"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a captured value
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Value captured for `name`, if the placeholder participated
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(name, value)` pairs in capture order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Collects into a map, for callers that only need keyed access
    pub fn to_map(&self) -> HashMap<String, String> {
        self.entries.iter().cloned().collect()
    }

    pub fn into_vec(self) -> Vec<(String, String)> {
        self.entries
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl IntoIterator for Params {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
