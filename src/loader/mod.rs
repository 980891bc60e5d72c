//! Lazy module loading subsystem.
//!
//! # Data Flow
//! ```text
//! Resolver reaches a Lazy(ModuleRef) node
//!     → cache.rs (loaded? return children)
//!     → in flight? await the shared load
//!     → otherwise spawn ModuleLoader::load with timeout
//!     → success: children cached forever
//!     → failure: entry removed, next navigation retries
//! ```
//!
//! # Design Decisions
//! - One load per module reference, shared by concurrent navigations
//! - Loads run on their own task, so an abandoned navigation does not abort them
//! - Failures are never memoized

pub mod cache;
pub mod static_loader;

use async_trait::async_trait;
use thiserror::Error;

use crate::routing::node::{ModuleRef, RouteNode};

pub use cache::ModuleCache;
pub use static_loader::StaticModuleLoader;

/// Errors that can occur while loading a module.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The loader does not know the reference.
    #[error("Unknown module '{0}'")]
    UnknownModule(ModuleRef),

    /// The loader reported a failure.
    #[error("Module '{module}' failed to load: {reason}")]
    Failed { module: ModuleRef, reason: String },

    /// The load exceeded the configured timeout.
    #[error("Module '{module}' load timed out after {ms} ms")]
    Timeout { module: ModuleRef, ms: u64 },

    /// The load task panicked or was cancelled.
    #[error("Module '{module}' load aborted: {reason}")]
    Aborted { module: ModuleRef, reason: String },
}

impl LoadError {
    pub fn module(&self) -> &ModuleRef {
        match self {
            LoadError::UnknownModule(module) => module,
            LoadError::Failed { module, .. }
            | LoadError::Timeout { module, .. }
            | LoadError::Aborted { module, .. } => module,
        }
    }
}

/// Resolves a module reference to the routes it declares.
///
/// Implementations do the actual fetch. Memoization is the job of [`ModuleCache`].
#[async_trait]
pub trait ModuleLoader: Send + Sync {
    async fn load(&self, module: &ModuleRef) -> Result<Vec<RouteNode>, LoadError>;
}
