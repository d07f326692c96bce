//! Handlers and the dispatching router
//!
//! [`RouteTable`] only selects a handler. [`Router`] is the layer above it
//! that knows what a handler is: either a function called with the matched
//! parameters, or a script path handed back to the caller to execute. It
//! also owns the not-found fallback.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::params::Params;
use crate::pattern::MatchTypes;
use crate::table::{Dispatch, RouteMatch, RouteTable};

type DirectFn<R> = dyn Fn(&Params) -> R + Send + Sync;
type FallbackFn<R> = dyn Fn() -> R + Send + Sync;

/// What a route runs when it matches
pub enum Handler<R> {
    /// Called in-process with the matched parameters
    Direct(Arc<DirectFn<R>>),
    /// Returned to the caller, which decides how to run the file
    Script(PathBuf),
}

impl<R> Handler<R> {
    pub fn direct<F>(f: F) -> Self
    where
        F: Fn(&Params) -> R + Send + Sync + 'static,
    {
        Handler::Direct(Arc::new(f))
    }

    pub fn script(path: impl Into<PathBuf>) -> Self {
        Handler::Script(path.into())
    }

    pub fn as_script(&self) -> Option<&Path> {
        match self {
            Handler::Script(path) => Some(path),
            Handler::Direct(_) => None,
        }
    }
}

impl<R> Clone for Handler<R> {
    fn clone(&self) -> Self {
        match self {
            Handler::Direct(f) => Handler::Direct(Arc::clone(f)),
            Handler::Script(path) => Handler::Script(path.clone()),
        }
    }
}

impl<R> fmt::Debug for Handler<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Direct(_) => f.write_str("Handler::Direct(..)"),
            Handler::Script(path) => f.debug_tuple("Handler::Script").field(path).finish(),
        }
    }
}

/// What to do when no route matches
pub enum Fallback<R> {
    Handler(Arc<FallbackFn<R>>),
    /// Fixed message returned as [`Outcome::Message`]
    Message(String),
}

impl<R> Fallback<R> {
    pub fn handler<F>(f: F) -> Self
    where
        F: Fn() -> R + Send + Sync + 'static,
    {
        Fallback::Handler(Arc::new(f))
    }

    pub fn message(message: impl Into<String>) -> Self {
        Fallback::Message(message.into())
    }
}

impl<R> fmt::Debug for Fallback<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fallback::Handler(_) => f.write_str("Fallback::Handler(..)"),
            Fallback::Message(message) => {
                f.debug_tuple("Fallback::Message").field(message).finish()
            }
        }
    }
}

/// Result of [`Router::handle`]
#[derive(Debug, PartialEq)]
pub enum Outcome<R> {
    /// A direct handler (or the fallback handler) ran and returned this
    Handled(R),
    /// A script route matched; running it is up to the caller
    Delegated { script: PathBuf, params: Params },
    /// Nothing matched and the fallback is a message
    Message(String),
    /// Nothing matched and no fallback is configured
    NotFound,
}

/// Route table of [`Handler`]s plus a not-found fallback
///
/// # Examples
///
/// ```
/// use rhtmx_dispatch::{Fallback, Handler, Outcome, Router};
///
/// let mut router = Router::new().with_fallback(Fallback::message("404 Not Found"));
/// router
///     .get("/hello/[:name]", Handler::direct(|params| {
///         format!("Hello, {}!", params.get("name").unwrap_or("stranger"))
///     }))
///     .unwrap();
/// router.get("/report", Handler::script("scripts/report.rs")).unwrap();
///
/// assert_eq!(
///     router.handle("GET", "/hello/ferris"),
///     Outcome::Handled("Hello, ferris!".to_string())
/// );
/// assert!(matches!(router.handle("GET", "/report"), Outcome::Delegated { .. }));
/// assert_eq!(
///     router.handle("POST", "/hello/ferris"),
///     Outcome::Message("404 Not Found".to_string())
/// );
/// ```
pub struct Router<R> {
    table: RouteTable<Handler<R>>,
    fallback: Option<Fallback<R>>,
}

impl<R> Router<R> {
    pub fn new() -> Self {
        Self::with_table(RouteTable::new())
    }

    pub fn with_match_types(match_types: MatchTypes) -> Self {
        Self::with_table(RouteTable::with_match_types(match_types))
    }

    pub fn with_table(table: RouteTable<Handler<R>>) -> Self {
        Self {
            table,
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, fallback: Fallback<R>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn set_fallback(&mut self, fallback: Fallback<R>) {
        self.fallback = Some(fallback);
    }

    pub fn fallback(&self) -> Option<&Fallback<R>> {
        self.fallback.as_ref()
    }

    pub fn table(&self) -> &RouteTable<Handler<R>> {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut RouteTable<Handler<R>> {
        &mut self.table
    }

    pub fn base_path(&self) -> &str {
        self.table.base_path()
    }

    pub fn set_base_path(&mut self, base_path: impl Into<String>) {
        self.table.set_base_path(base_path);
    }

    pub fn route(&mut self, method: &str, pattern: &str, handler: Handler<R>) -> Result<()> {
        self.table.register(method, pattern, handler)
    }

    pub fn get(&mut self, pattern: &str, handler: Handler<R>) -> Result<()> {
        self.table.get(pattern, handler)
    }

    pub fn post(&mut self, pattern: &str, handler: Handler<R>) -> Result<()> {
        self.table.post(pattern, handler)
    }

    pub fn put(&mut self, pattern: &str, handler: Handler<R>) -> Result<()> {
        self.table.put(pattern, handler)
    }

    pub fn patch(&mut self, pattern: &str, handler: Handler<R>) -> Result<()> {
        self.table.patch(pattern, handler)
    }

    pub fn delete(&mut self, pattern: &str, handler: Handler<R>) -> Result<()> {
        self.table.delete(pattern, handler)
    }

    pub fn options(&mut self, pattern: &str, handler: Handler<R>) -> Result<()> {
        self.table.options(pattern, handler)
    }

    pub fn any(&mut self, pattern: &str, handler: Handler<R>) -> Result<()> {
        self.table.any(pattern, handler)
    }

    pub fn custom<I, S>(&mut self, pattern: &str, handler: Handler<R>, methods: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.table.custom(pattern, handler, methods)
    }

    /// Registers routes under an extra prefix, see [`RouteTable::mount`]
    pub fn mount<F>(&mut self, prefix: &str, routes: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let previous = self.table.base_path().to_string();
        self.table.set_base_path(format!("{previous}{prefix}"));

        let result = routes(self);

        self.table.set_base_path(previous);
        result
    }

    /// Dispatches a request and runs whatever it resolves to
    ///
    /// Direct handlers are called here. Script handlers and message
    /// fallbacks are returned for the caller to act on. The router never
    /// writes a response or exits the process.
    pub fn handle(&self, method: &str, raw_path: &str) -> Outcome<R> {
        match self.table.dispatch(method, raw_path) {
            Dispatch::Matched(RouteMatch {
                handler, params, ..
            }) => match handler {
                Handler::Direct(f) => Outcome::Handled((**f)(&params)),
                Handler::Script(script) => Outcome::Delegated {
                    script: script.clone(),
                    params,
                },
            },
            Dispatch::NotFound => match &self.fallback {
                Some(Fallback::Handler(f)) => Outcome::Handled((**f)()),
                Some(Fallback::Message(message)) => Outcome::Message(message.clone()),
                None => {
                    debug!(method, path = raw_path, "unmatched request without fallback");
                    Outcome::NotFound
                }
            },
        }
    }
}

impl<R> Default for Router<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for Router<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("table", &self.table)
            .field("fallback", &self.fallback)
            .finish()
    }
}
