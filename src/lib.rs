//! Client-side navigation authorization library.
//!
//! Resolves navigation URLs against a route tree, loads lazy feature
//! modules on first use, and activates a route only when every guard on
//! its path allows it.
//!
//! ```text
//!   navigate(url) ─▶ routing (resolve + redirects) ─▶ guards (evaluate) ─▶ Outcome
//!                          │
//!                          ▼
//!                    loader (module cache, single flight)
//! ```

pub mod config;
pub mod guards;
pub mod loader;
pub mod navigation;
pub mod observability;
pub mod routing;

pub use config::schema::RouterConfig;
pub use guards::{Guard, GuardContext, GuardKey, GuardRegistry};
pub use loader::{LoadError, ModuleLoader};
pub use navigation::{NavigationContext, Navigator, Outcome};
pub use routing::{ActivationChain, ModuleRef, RouteNode};
