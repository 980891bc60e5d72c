//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! route description (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → RouteNode tree + StaticModuleLoader for [modules]
//! ```
//!
//! # Design Decisions
//! - Config is consumed once at startup; the route tree is never reloaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_str, ConfigError};
pub use schema::NavigationConfig;
pub use schema::ObservabilityConfig;
pub use schema::PathMatch;
pub use schema::RouteConfig;
pub use schema::RouterConfig;
pub use schema::TimeoutConfig;
