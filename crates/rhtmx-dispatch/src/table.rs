//! Route table and dispatcher
//!
//! Routes are kept per method in registration order. Dispatch walks the
//! routes of the request method from first to last and stops at the first
//! pattern that matches the whole normalized path. There is no specificity
//! scoring: whichever pattern was registered first wins.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::error::Result;
use crate::params::Params;
use crate::path::normalize_request_path;
use crate::pattern::{compile_with, CompiledPattern, MatchTypes};

/// Methods registered by [`RouteTable::any`]
pub const STANDARD_METHODS: [&str; 6] = ["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"];

/// Uppercases a method name (ASCII only)
///
/// ```
/// use rhtmx_dispatch::normalize_method;
///
/// assert_eq!(normalize_method("get"), "GET");
/// assert_eq!(normalize_method("Purge"), "PURGE");
/// ```
pub fn normalize_method(method: &str) -> String {
    method.to_ascii_uppercase()
}

/// A registered pattern and its handler
#[derive(Debug)]
pub struct RouteEntry<H> {
    compiled: Arc<CompiledPattern>,
    handler: H,
}

impl<H> RouteEntry<H> {
    /// Full pattern, base path included
    pub fn pattern(&self) -> &str {
        self.compiled.pattern()
    }

    pub fn compiled(&self) -> &CompiledPattern {
        &self.compiled
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }
}

/// Successful dispatch
#[derive(Debug)]
pub struct RouteMatch<'a, H> {
    /// Uppercased request method
    pub method: String,
    /// Normalized request path that was matched
    pub path: String,
    /// Registered pattern that matched
    pub pattern: &'a str,
    pub handler: &'a H,
    /// Named captures, left to right
    pub params: Params,
}

impl<'a, H> RouteMatch<'a, H> {
    /// Shorthand for `self.params.get(name)`
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }
}

/// Outcome of [`RouteTable::dispatch`]
#[derive(Debug)]
pub enum Dispatch<'a, H> {
    Matched(RouteMatch<'a, H>),
    /// No pattern registered for the method matched the path
    NotFound,
}

impl<'a, H> Dispatch<'a, H> {
    pub fn is_match(&self) -> bool {
        matches!(self, Dispatch::Matched(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Dispatch::NotFound)
    }

    pub fn into_match(self) -> Option<RouteMatch<'a, H>> {
        match self {
            Dispatch::Matched(route_match) => Some(route_match),
            Dispatch::NotFound => None,
        }
    }

    /// Handler of the matched route, if any
    pub fn handler(&self) -> Option<&'a H> {
        match self {
            Dispatch::Matched(route_match) => Some(route_match.handler),
            Dispatch::NotFound => None,
        }
    }
}

/// Method-scoped, registration-ordered route storage
///
/// Patterns are compiled when they are registered, so a malformed pattern is
/// reported by the registration call and [`dispatch`](Self::dispatch) only
/// ever reads. Build the table once, then share it by reference.
///
/// # Examples
///
/// ```
/// use rhtmx_dispatch::RouteTable;
///
/// let mut table = RouteTable::new();
/// table.get("/users/[i:id]", "show_user").unwrap();
/// table.post("/users", "create_user").unwrap();
///
/// let found = table.dispatch("GET", "/users/42/").into_match().unwrap();
/// assert_eq!(*found.handler, "show_user");
/// assert_eq!(found.param("id"), Some("42"));
///
/// assert!(table.dispatch("GET", "/users").is_not_found());
/// ```
#[derive(Debug)]
pub struct RouteTable<H> {
    base_path: String,
    routes: IndexMap<String, IndexMap<String, RouteEntry<H>>>,
    compiled: HashMap<String, Arc<CompiledPattern>>,
    match_types: MatchTypes,
}

impl<H> RouteTable<H> {
    /// Empty table using the built-in placeholder types
    pub fn new() -> Self {
        Self::with_match_types(MatchTypes::default())
    }

    /// Empty table using a custom placeholder registry
    ///
    /// The registry is fixed for the lifetime of the table so every pattern
    /// is compiled against the same types.
    pub fn with_match_types(match_types: MatchTypes) -> Self {
        Self {
            base_path: String::new(),
            routes: IndexMap::new(),
            compiled: HashMap::new(),
            match_types,
        }
    }

    pub fn match_types(&self) -> &MatchTypes {
        &self.match_types
    }

    /// Prefix prepended to every pattern registered from now on
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn set_base_path(&mut self, base_path: impl Into<String>) {
        self.base_path = base_path.into();
    }

    /// Registers `handler` for `method` and `base_path + pattern`
    ///
    /// Registering the same method and full pattern again replaces the
    /// handler; the route keeps its original position.
    pub fn register(&mut self, method: &str, pattern: &str, handler: H) -> Result<()> {
        let method = normalize_method(method);
        let key = format!("{}{}", self.base_path, pattern);
        let compiled = self.compile_cached(&key)?;

        debug!(
            method = %method,
            pattern = %key,
            expression = %compiled.as_str(),
            "registering route"
        );

        let replaced = self
            .routes
            .entry(method)
            .or_default()
            .insert(key, RouteEntry { compiled, handler });

        if replaced.is_some() {
            debug!("replaced handler of an existing route");
        }

        Ok(())
    }

    pub fn get(&mut self, pattern: &str, handler: H) -> Result<()> {
        self.register("GET", pattern, handler)
    }

    pub fn post(&mut self, pattern: &str, handler: H) -> Result<()> {
        self.register("POST", pattern, handler)
    }

    pub fn put(&mut self, pattern: &str, handler: H) -> Result<()> {
        self.register("PUT", pattern, handler)
    }

    pub fn patch(&mut self, pattern: &str, handler: H) -> Result<()> {
        self.register("PATCH", pattern, handler)
    }

    pub fn delete(&mut self, pattern: &str, handler: H) -> Result<()> {
        self.register("DELETE", pattern, handler)
    }

    pub fn options(&mut self, pattern: &str, handler: H) -> Result<()> {
        self.register("OPTIONS", pattern, handler)
    }

    /// Registers routes under `base_path + prefix`
    ///
    /// The previous base path is restored afterwards, also when `routes`
    /// returns an error. Mounts nest.
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_dispatch::RouteTable;
    ///
    /// let mut table = RouteTable::new();
    /// table
    ///     .mount("/api", |api| {
    ///         api.get("/status", "status")?;
    ///         api.mount("/v1", |v1| v1.get("/users", "users"))
    ///     })
    ///     .unwrap();
    ///
    /// assert_eq!(table.base_path(), "");
    /// assert!(table.dispatch("GET", "/api/status").is_match());
    /// assert!(table.dispatch("GET", "/api/v1/users").is_match());
    /// ```
    pub fn mount<F>(&mut self, prefix: &str, routes: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let previous = self.base_path.clone();
        self.base_path.push_str(prefix);

        trace!(base_path = %self.base_path, "mounting routes");
        let result = routes(self);

        self.base_path = previous;
        result
    }

    /// Finds the first route of `method` whose pattern matches `raw_path`
    ///
    /// The path is normalized first (see
    /// [`normalize_request_path`](crate::path::normalize_request_path)).
    /// Only routes registered for the same method are considered.
    pub fn dispatch(&self, method: &str, raw_path: &str) -> Dispatch<'_, H> {
        let method = normalize_method(method);
        let path = normalize_request_path(raw_path);

        let Some(entries) = self.routes.get(&method) else {
            trace!(method = %method, path = %path, "no routes for method");
            return Dispatch::NotFound;
        };

        let found = entries.iter().find_map(|(pattern, entry)| {
            entry
                .compiled
                .captures(&path)
                .map(|params| (pattern.as_str(), &entry.handler, params))
        });

        match found {
            Some((pattern, handler, params)) => {
                debug!(method = %method, path = %path, pattern = %pattern, "route matched");
                Dispatch::Matched(RouteMatch {
                    method,
                    path: path.into_owned(),
                    pattern,
                    handler,
                    params,
                })
            }
            None => {
                debug!(method = %method, path = %path, "no route matched");
                Dispatch::NotFound
            }
        }
    }

    /// Registered entries for `method`, in priority order
    pub fn routes(&self, method: &str) -> impl Iterator<Item = &RouteEntry<H>> {
        self.routes
            .get(&normalize_method(method))
            .into_iter()
            .flat_map(|entries| entries.values())
    }

    /// Entry registered for `method` under the full pattern `pattern`
    pub fn route(&self, method: &str, pattern: &str) -> Option<&RouteEntry<H>> {
        self.routes.get(&normalize_method(method))?.get(pattern)
    }

    /// Methods with at least one route, in first-registration order
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    /// Total number of (method, pattern) entries
    pub fn len(&self) -> usize {
        self.routes.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Compiles `pattern`, reusing an earlier compilation of the same text
    fn compile_cached(&mut self, pattern: &str) -> Result<Arc<CompiledPattern>> {
        if let Some(compiled) = self.compiled.get(pattern) {
            return Ok(Arc::clone(compiled));
        }

        let compiled = Arc::new(compile_with(pattern, &self.match_types)?);
        self.compiled
            .insert(pattern.to_string(), Arc::clone(&compiled));
        Ok(compiled)
    }
}

impl<H: Clone> RouteTable<H> {
    /// Registers the handler for every method in [`STANDARD_METHODS`]
    pub fn any(&mut self, pattern: &str, handler: H) -> Result<()> {
        self.custom(pattern, handler, STANDARD_METHODS)
    }

    /// Registers the handler for each of `methods`
    ///
    /// Method names are uppercased, so non-standard verbs such as `PURGE`
    /// work as well.
    pub fn custom<I, S>(&mut self, pattern: &str, handler: H, methods: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for method in methods {
            self.register(method.as_ref(), pattern, handler.clone())?;
        }
        Ok(())
    }
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self::new()
    }
}
