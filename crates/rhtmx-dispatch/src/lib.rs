//! # RHTMX Dispatch
//!
//! An in-process request dispatcher built around a small pattern language:
//! - Literal paths (`/about`)
//! - Typed, named placeholders (`/users/[i:id]`)
//! - Optional placeholders that also drop their separator (`/items/[i:id]?`)
//! - Dot separators for extensions (`/report.[a:format]?`)
//! - Unnamed placeholders that only constrain matching (`/files/[]`)
//!
//! ## Placeholder Types
//!
//! | tag  | matches                        |
//! |------|--------------------------------|
//! | `i`  | digits                         |
//! | `a`  | ASCII letters and digits       |
//! | `h`  | hex digits                     |
//! | `*`  | anything, shortest run         |
//! | `**` | anything, longest run          |
//! | none | anything except `/` and `.`    |
//!
//! Any other tag is copied into the expression verbatim, so `[z:name]` only
//! matches a literal `z`. Register custom tags such as `slug` in
//! [`MatchTypes`] to use them as `[slug:post]`.
//!
//! ## Matching
//!
//! Routes are stored per method in registration order. The first pattern
//! that matches the whole normalized path wins; later registrations never
//! take priority, however specific they are.
//!
//! ## Example
//!
//! ```
//! use rhtmx_dispatch::{Dispatch, RouteTable};
//!
//! let mut table = RouteTable::new();
//! table.get("/users/[i:id]", "users.show").unwrap();
//! table.get("/users/[a:name]", "users.by_name").unwrap();
//!
//! match table.dispatch("GET", "/users/42?tab=posts") {
//!     Dispatch::Matched(found) => {
//!         assert_eq!(*found.handler, "users.show");
//!         assert_eq!(found.param("id"), Some("42"));
//!     }
//!     Dispatch::NotFound => unreachable!(),
//! }
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
mod error;
mod handler;
mod params;
pub mod path;
pub mod pattern;
mod table;

// ============================================================================
// Public API
// ============================================================================

pub use config::Config;
pub use error::{Result, RouterError};
pub use handler::{Fallback, Handler, Outcome, Router};
pub use params::Params;
pub use path::normalize_request_path;
pub use pattern::{compile, compile_with, translate, CompiledPattern, MatchTypes};
pub use table::{
    normalize_method, Dispatch, RouteEntry, RouteMatch, RouteTable, STANDARD_METHODS,
};
