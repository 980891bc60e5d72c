//! Access guard subsystem.
//!
//! # Data Flow
//! ```text
//! ActivationChain (root → leaf)
//!     → evaluator.rs (plan: ancestor canActivateChild, then canActivate)
//!     → GuardRegistry lookup by key
//!     → Guard::can_activate (sync or async, bounded by timeout)
//!     → Allow, or Denial{guard, reason} on first rejection
//! ```
//!
//! # Design Decisions
//! - Guards are registered once and shared read-only across navigations
//! - Guards are trait objects keyed by a stable name, no injection container
//! - Fail closed: errors, panics, timeouts and unknown keys all block

pub mod builtin;
pub mod evaluator;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::navigation::context::NavigationContext;
use crate::routing::chain::{ActivatedRoute, ActivationChain};

pub use builtin::{AllowAll, DenyAll, FnGuard};
pub use evaluator::{BlockReason, Denial, GuardEvaluator};

/// Stable identifier of a registered guard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GuardKey(String);

impl GuardKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GuardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GuardKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for GuardKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&String> for GuardKey {
    fn from(key: &String) -> Self {
        Self(key.clone())
    }
}

/// Error a guard reports when it cannot reach a decision.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct GuardError(String);

impl GuardError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// What a guard sees when asked about a route.
#[derive(Debug, Clone, Copy)]
pub struct GuardContext<'a> {
    /// The route being activated.
    pub route: &'a ActivatedRoute,
    /// The full chain of the navigation.
    pub chain: &'a ActivationChain,
    /// Caller supplied navigation context.
    pub navigation: &'a NavigationContext,
}

/// Access-control check bound to a route.
///
/// Implementations must not mutate shared state while evaluating.
#[async_trait]
pub trait Guard: Send + Sync {
    /// Returns `Ok(true)` to let the navigation proceed.
    async fn can_activate(&self, ctx: &GuardContext<'_>) -> Result<bool, GuardError>;
}

/// Guards available to the navigator, keyed by name.
#[derive(Clone, Default)]
pub struct GuardRegistry {
    guards: HashMap<GuardKey, Arc<dyn Guard>>,
}

impl GuardRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `guard` under `key`, replacing any previous one.
    pub fn register(&mut self, key: impl Into<GuardKey>, guard: impl Guard + 'static) -> &mut Self {
        self.guards.insert(key.into(), Arc::new(guard));
        self
    }

    /// Builder form of [`GuardRegistry::register`].
    pub fn with(mut self, key: impl Into<GuardKey>, guard: impl Guard + 'static) -> Self {
        self.register(key, guard);
        self
    }

    pub fn get(&self, key: &GuardKey) -> Option<Arc<dyn Guard>> {
        self.guards.get(key).cloned()
    }

    pub fn contains(&self, key: &GuardKey) -> bool {
        self.guards.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.guards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }
}

impl fmt::Debug for GuardRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.guards.keys().map(GuardKey::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("GuardRegistry").field("guards", &keys).finish()
    }
}
