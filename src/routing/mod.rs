//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation URL
//!     → url.rs (segments, query, fragment)
//!     → resolver.rs (walk the tree, redirects, lazy subtrees)
//!     → matcher.rs (match path patterns per level)
//!     → Return: ActivationChain or NotFound / RedirectLoop / LoadFailed
//!
//! Tree Construction (at startup):
//!     RouteConfig[]
//!     → node.rs (one outcome per node, compiled patterns)
//!     → Freeze as immutable Arc<RouteNode> tree
//! ```
//!
//! # Design Decisions
//! - Tree is immutable at runtime; lazy children live in the module cache
//! - No regex in hot path (segment matching only)
//! - Deterministic: same input always matches same route
//! - First match wins (declaration order)

pub mod chain;
pub mod matcher;
pub mod node;
pub mod resolver;
pub mod url;

pub use chain::{ActivatedRoute, ActivationChain};
pub use node::{ModuleRef, NodeError, Resolution, RouteNode};
pub use resolver::{ResolveError, RouteResolver};
pub use url::NavigationUrl;
