// File: src/config.rs
// Purpose: Route configuration parsing from dispatch.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::RouterError;
use crate::handler::{Fallback, Handler, Router};
use crate::pattern::MatchTypes;

/// Dispatcher configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Extra placeholder types (tag → regex fragment)
    #[serde(default)]
    pub types: BTreeMap<String, String>,

    /// Script routes, registered in file order
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

/// Routing configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RoutingConfig {
    /// Prefix for every configured route (e.g., "/app")
    #[serde(default)]
    pub base_path: String,

    /// Message returned when nothing matches
    #[serde(default)]
    pub not_found: Option<String>,
}

/// One `[[routes]]` entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteConfig {
    #[serde(default = "default_methods")]
    pub methods: Vec<String>,

    pub pattern: String,

    /// Script handed back to the caller when the route matches
    pub script: PathBuf,
}

fn default_methods() -> Vec<String> {
    vec!["GET".to_string()]
}

fn default_config_path() -> &'static str {
    "dispatch.toml"
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./dispatch.toml)
    pub fn load_default() -> Result<Self> {
        Self::load(default_config_path())
    }

    /// Built-in placeholder types extended with `[types]`
    pub fn match_types(&self) -> MatchTypes {
        MatchTypes::default().with_types(self.types.clone())
    }

    /// Builds a router with every configured script route
    ///
    /// Patterns are compiled here, so a bad pattern in the file surfaces as
    /// an error before any request is served.
    pub fn build_router<R>(&self) -> Result<Router<R>, RouterError> {
        let mut router = Router::with_match_types(self.match_types());
        router.set_base_path(self.routing.base_path.clone());

        for route in &self.routes {
            if route.methods.is_empty() {
                return Err(RouterError::Config(format!(
                    "route `{}` has an empty method list",
                    route.pattern
                )));
            }
            router.custom(
                &route.pattern,
                Handler::script(route.script.clone()),
                &route.methods,
            )?;
        }

        if let Some(message) = &self.routing.not_found {
            router.set_fallback(Fallback::message(message.clone()));
        }

        Ok(router)
    }
}
