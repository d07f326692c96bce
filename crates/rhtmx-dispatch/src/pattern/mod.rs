//! Pattern compiler
//!
//! Turns a route pattern such as `/users/[i:id]/posts/[:slug]?` into an
//! anchored regular expression with one named group per named placeholder.
//!
//! Text outside placeholders is copied into the expression unescaped. A
//! literal `+` or `(` in a pattern is therefore regex syntax, not a path
//! character; authors who need those characters literally must escape them
//! themselves (`/c\+\+`).

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::error::{Result, RouterError};
use crate::params::Params;

pub mod placeholder;
pub mod types;

pub use placeholder::{placeholders, Placeholder, Separator};
pub use types::{MatchTypes, BUILTIN_TYPES};

static DEFAULT_TYPES: Lazy<MatchTypes> = Lazy::new(MatchTypes::new);

/// Expands placeholders and anchors the result (pure function)
///
/// No regex is built here, so the output may be an invalid expression when
/// the pattern contains malformed placeholders. Identical inputs always give
/// byte-identical output.
///
/// # Examples
///
/// ```
/// use rhtmx_dispatch::pattern::{translate, MatchTypes};
///
/// let types = MatchTypes::default();
/// assert_eq!(translate("/about", &types), "^/about$");
/// assert_eq!(
///     translate("/users/[i:id]", &types),
///     "^/users(?:/(?P<id>[0-9]+))$"
/// );
/// assert_eq!(
///     translate("/items/[i:id]?", &types),
///     "^/items(?:/(?P<id>[0-9]+)?)?$"
/// );
/// ```
pub fn translate(pattern: &str, types: &MatchTypes) -> String {
    let body = placeholder::PLACEHOLDER.replace_all(pattern, |caps: &Captures<'_>| {
        Placeholder::from_captures(caps).to_group(types)
    });
    format!("^{body}$")
}

/// Compiles a pattern with the built-in placeholder types
///
/// # Examples
///
/// ```
/// use rhtmx_dispatch::compile;
///
/// let pattern = compile("/items[i:id]?").unwrap();
///
/// assert!(pattern.captures("/items").unwrap().is_empty());
/// assert_eq!(pattern.captures("/items42").unwrap().get("id"), Some("42"));
/// assert!(pattern.captures("/items/42").is_none());
/// ```
pub fn compile(pattern: &str) -> Result<CompiledPattern> {
    compile_with(pattern, &DEFAULT_TYPES)
}

/// Compiles a pattern against a custom placeholder registry
pub fn compile_with(pattern: &str, types: &MatchTypes) -> Result<CompiledPattern> {
    let source = translate(pattern, types);
    let regex = Regex::new(&source).map_err(|source| RouterError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let param_names = regex
        .capture_names()
        .flatten()
        .map(Arc::<str>::from)
        .collect();

    Ok(CompiledPattern {
        pattern: pattern.to_string(),
        regex,
        param_names,
    })
}

/// Anchored expression built from one route pattern
///
/// Immutable once built. Cloning is cheap relative to compiling: the regex
/// program is shared.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pattern: String,
    regex: Regex,
    param_names: Vec<Arc<str>>,
}

impl CompiledPattern {
    /// Pattern text this expression was built from
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Generated expression, `^...$` included
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Named groups, left to right
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.param_names.iter().map(|name| name.as_ref())
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Matches the whole path and extracts the named captures
    ///
    /// Unnamed groups are only used for matching. Named groups that did not
    /// participate (a skipped optional placeholder) are left out.
    pub fn captures(&self, path: &str) -> Option<Params> {
        let caps = self.regex.captures(path)?;

        Some(
            self.param_names
                .iter()
                .filter_map(|name| {
                    caps.name(name)
                        .map(|value| (name.to_string(), value.as_str().to_string()))
                })
                .collect(),
        )
    }
}

impl std::fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
