//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the router.
//! All types derive Serde traits for deserialization from config files.
//! Route keys use the camelCase spelling of the route description format
//! (`pathMatch`, `redirectTo`, `canActivate`, `loadChildren`).

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the navigator.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouterConfig {
    /// Top-level route definitions, in declaration order.
    pub routes: Vec<RouteConfig>,

    /// Lazily loaded feature modules, keyed by the reference used in `loadChildren`.
    pub modules: BTreeMap<String, Vec<RouteConfig>>,

    /// Navigation pipeline settings.
    pub navigation: NavigationConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// How a route path is matched against the remaining URL segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PathMatch {
    /// The path must match a prefix of the remaining segments.
    #[default]
    Prefix,
    /// The path must consume every remaining segment.
    Full,
}

/// A single route entry of the static route tree description.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct RouteConfig {
    /// Path pattern (may be empty for index routes).
    pub path: String,

    /// Match mode. Left unset, `prefix` applies.
    pub path_match: Option<PathMatch>,

    /// Redirect target. A redirect route carries nothing else.
    pub redirect_to: Option<String>,

    /// Guard keys checked before this route activates.
    pub can_activate: Vec<String>,

    /// Guard keys checked before any descendant route activates.
    pub can_activate_child: Vec<String>,

    /// Reference to a lazily loaded module providing the children.
    pub load_children: Option<String>,

    /// Eagerly declared children.
    pub children: Vec<RouteConfig>,

    /// Component rendered by the host shell when this leaf activates.
    pub component: Option<String>,

    /// Static data exposed to guards.
    pub data: BTreeMap<String, String>,
}

impl RouteConfig {
    /// Effective match mode.
    pub fn match_mode(&self) -> PathMatch {
        self.path_match.unwrap_or_default()
    }
}

/// Navigation pipeline configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Maximum redirect hops followed for a single navigation.
    pub max_redirects: usize,

    /// Cancel in-flight navigations when a newer one starts.
    pub cancel_superseded: bool,

    /// Capacity of the navigation event channel.
    pub event_capacity: usize,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            max_redirects: 16,
            cancel_superseded: false,
            event_capacity: 64,
        }
    }
}

/// Timeout configuration for the suspension points of the pipeline.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Per-guard check timeout in milliseconds.
    pub guard_ms: u64,

    /// Module load timeout in milliseconds.
    pub load_ms: u64,
}

impl TimeoutConfig {
    pub fn guard(&self) -> Duration {
        Duration::from_millis(self.guard_ms)
    }

    pub fn load(&self) -> Duration {
        Duration::from_millis(self.load_ms)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            guard_ms: 5_000,
            load_ms: 30_000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the human readable format.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}
