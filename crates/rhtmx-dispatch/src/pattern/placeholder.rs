//! Placeholder scanning
//!
//! A placeholder is `[type:name]`, optionally preceded by a `/` or `.`
//! separator and optionally followed by `?`. The separator belongs to the
//! placeholder so that an absent optional placeholder also drops it.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::types::MatchTypes;

/// Finds every `(<sep>)?[<type>(:<name>)?](?)?` occurrence
///
/// Type and name are any run without `:` or `]`. Anything that does not fit
/// this shape (an unclosed `[`, for instance) is left as literal text.
pub(crate) static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(/|\.|)\[([^:\]]*)(?::([^:\]]*))?\](\?|)").unwrap()
});

/// Separator written immediately before a placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Separator {
    /// `/`
    Slash,
    /// `.`
    Dot,
}

impl Separator {
    fn parse(text: &str) -> Option<Self> {
        match text {
            "/" => Some(Separator::Slash),
            "." => Some(Separator::Dot),
            _ => None,
        }
    }

    /// Regex text for the separator; only the dot needs escaping
    pub fn as_regex(self) -> &'static str {
        match self {
            Separator::Slash => "/",
            Separator::Dot => r"\.",
        }
    }
}

/// One placeholder occurrence, borrowed from the pattern text
///
/// # Examples
///
/// ```
/// use rhtmx_dispatch::pattern::{placeholders, Separator};
///
/// let found: Vec<_> = placeholders("/users/[i:id]/avatar.[a:ext]?").collect();
/// assert_eq!(found.len(), 2);
///
/// assert_eq!(found[0].separator, Some(Separator::Slash));
/// assert_eq!(found[0].tag, "i");
/// assert_eq!(found[0].name, Some("id"));
/// assert!(!found[0].optional);
///
/// assert_eq!(found[1].separator, Some(Separator::Dot));
/// assert!(found[1].optional);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Full matched text, separator and `?` included
    pub text: &'a str,
    pub separator: Option<Separator>,
    /// Type tag, possibly empty
    pub tag: &'a str,
    /// Parameter name; `None` for `[type]` and `[type:]`
    pub name: Option<&'a str>,
    pub optional: bool,
}

impl<'a> Placeholder<'a> {
    pub(crate) fn from_captures(caps: &Captures<'a>) -> Self {
        let text = caps.get(0).map_or("", |m| m.as_str());
        let separator = caps.get(1).and_then(|m| Separator::parse(m.as_str()));
        let tag = caps.get(2).map_or("", |m| m.as_str());
        let name = caps
            .get(3)
            .map(|m| m.as_str())
            .filter(|name| !name.is_empty());
        let optional = caps.get(4).is_some_and(|m| m.as_str() == "?");

        Self {
            text,
            separator,
            tag,
            name,
            optional,
        }
    }

    /// Builds the replacement group
    ///
    /// `(?:<sep>(?P<name><fragment>))`, or with an unnamed inner group when
    /// there is no name. Optional placeholders put `?` on both groups so the
    /// separator is skipped together with the value.
    pub fn to_group(&self, types: &MatchTypes) -> String {
        let fragment = types.resolve(self.tag);
        let separator = self.separator.map_or("", Separator::as_regex);
        let quantifier = if self.optional { "?" } else { "" };

        let mut group = String::with_capacity(fragment.len() + 24);
        group.push_str("(?:");
        group.push_str(separator);
        group.push('(');
        if let Some(name) = self.name {
            group.push_str("?P<");
            group.push_str(name);
            group.push('>');
        }
        group.push_str(fragment);
        group.push(')');
        group.push_str(quantifier);
        group.push(')');
        group.push_str(quantifier);
        group
    }
}

/// Iterates the placeholders of a pattern left to right
pub fn placeholders(pattern: &str) -> impl Iterator<Item = Placeholder<'_>> {
    PLACEHOLDER
        .captures_iter(pattern)
        .map(|caps| Placeholder::from_captures(&caps))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(pattern: &str) -> Placeholder<'_> {
        placeholders(pattern).next().unwrap()
    }

    #[test]
    fn test_named_placeholder() {
        let p = first("/users/[i:id]");
        assert_eq!(p.text, "/[i:id]");
        assert_eq!(p.separator, Some(Separator::Slash));
        assert_eq!(p.tag, "i");
        assert_eq!(p.name, Some("id"));
        assert!(!p.optional);
    }

    #[test]
    fn test_bare_placeholders() {
        let p = first("[]");
        assert_eq!(p.separator, None);
        assert_eq!(p.tag, "");
        assert_eq!(p.name, None);

        let p = first("/[h]");
        assert_eq!(p.tag, "h");
        assert_eq!(p.name, None);
    }

    #[test]
    fn test_empty_name_is_unnamed() {
        let p = first("/[i:]");
        assert_eq!(p.name, None);
    }

    #[test]
    fn test_default_type_with_name() {
        let p = first("/[:slug]?");
        assert_eq!(p.tag, "");
        assert_eq!(p.name, Some("slug"));
        assert!(p.optional);
    }

    #[test]
    fn test_unclosed_bracket_is_not_a_placeholder() {
        assert_eq!(placeholders("/users/[i:id").count(), 0);
        assert_eq!(placeholders("/users/[i:id:x]").count(), 0);
    }

    #[test]
    fn test_to_group_required() {
        let types = MatchTypes::new();
        assert_eq!(
            first("/[i:id]").to_group(&types),
            "(?:/(?P<id>[0-9]+))"
        );
        assert_eq!(first("[a]").to_group(&types), "(?:([0-9A-Za-z]+))");
    }

    #[test]
    fn test_to_group_optional_dot() {
        let types = MatchTypes::new();
        assert_eq!(
            first(".[a:ext]?").to_group(&types),
            r"(?:\.(?P<ext>[0-9A-Za-z]+)?)?"
        );
    }

    #[test]
    fn test_to_group_unknown_tag() {
        let types = MatchTypes::new();
        assert_eq!(first("/[z:name]").to_group(&types), "(?:/(?P<name>z))");
    }
}
