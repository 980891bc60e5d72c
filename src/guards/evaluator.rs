//! Guard evaluation along an activation chain.
//!
//! # Responsibilities
//! - Order guard checks root first, ancestors' `canActivateChild` before a
//!   route's own `canActivate`
//! - Run checks strictly one after another
//! - Stop at the first rejection
//!
//! # Design Decisions
//! - Guard errors and panics are reported as `Faulted`, never swallowed
//! - Every check is bounded by the guard timeout

use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use thiserror::Error;
use tokio::time::timeout;

use crate::guards::{GuardContext, GuardKey, GuardRegistry};
use crate::navigation::context::NavigationContext;
use crate::observability::metrics;
use crate::routing::chain::ActivationChain;

/// Why a guard blocked navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockReason {
    /// The guard returned `false`.
    Rejected,
    /// The guard returned an error or panicked.
    Faulted(String),
    /// The guard did not answer within the timeout.
    TimedOut,
    /// No guard is registered under the key.
    Unregistered,
}

impl BlockReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockReason::Rejected => "rejected",
            BlockReason::Faulted(_) => "faulted",
            BlockReason::TimedOut => "timed_out",
            BlockReason::Unregistered => "unregistered",
        }
    }
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockReason::Faulted(message) => write!(f, "guard faulted: {}", message),
            other => f.write_str(other.as_str()),
        }
    }
}

/// The guard that stopped a navigation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Guard '{guard}' blocked navigation: {reason}")]
pub struct Denial {
    pub guard: GuardKey,
    pub reason: BlockReason,
}

/// Runs the guards of an activation chain.
#[derive(Debug, Clone)]
pub struct GuardEvaluator {
    registry: Arc<GuardRegistry>,
    timeout: Duration,
}

impl GuardEvaluator {
    pub fn new(registry: GuardRegistry, guard_timeout: Duration) -> Self {
        Self {
            registry: Arc::new(registry),
            timeout: guard_timeout,
        }
    }

    pub fn registry(&self) -> &GuardRegistry {
        &self.registry
    }

    /// Ordered `(route index, guard key)` checks for `chain`.
    pub fn plan(chain: &ActivationChain) -> Vec<(usize, &GuardKey)> {
        let routes = chain.routes();
        let mut checks = Vec::new();
        for (index, route) in routes.iter().enumerate() {
            for ancestor in &routes[..index] {
                checks.extend(ancestor.node.child_guards().iter().map(|key| (index, key)));
            }
            checks.extend(route.node.guards().iter().map(|key| (index, key)));
        }
        checks
    }

    /// Evaluate every guard of `chain`, stopping at the first denial.
    pub async fn evaluate(
        &self,
        chain: &ActivationChain,
        navigation: &NavigationContext,
    ) -> Result<(), Denial> {
        for (index, key) in Self::plan(chain) {
            let ctx = GuardContext {
                route: &chain.routes()[index],
                chain,
                navigation,
            };

            if let Err(reason) = self.check(key, &ctx).await {
                metrics::record_guard_check(reason.as_str());
                tracing::info!(
                    guard = %key,
                    route = ctx.route.path(),
                    reason = %reason,
                    "Navigation blocked"
                );
                return Err(Denial {
                    guard: key.clone(),
                    reason,
                });
            }
            metrics::record_guard_check("allowed");
            tracing::trace!(guard = %key, route = ctx.route.path(), "Guard passed");
        }
        Ok(())
    }

    async fn check(&self, key: &GuardKey, ctx: &GuardContext<'_>) -> Result<(), BlockReason> {
        let guard = self.registry.get(key).ok_or(BlockReason::Unregistered)?;
        let verdict = AssertUnwindSafe(guard.can_activate(ctx)).catch_unwind();

        match timeout(self.timeout, verdict).await {
            Err(_) => Err(BlockReason::TimedOut),
            Ok(Err(panic)) => Err(BlockReason::Faulted(panic_message(panic))),
            Ok(Ok(Err(e))) => Err(BlockReason::Faulted(e.to_string())),
            Ok(Ok(Ok(false))) => Err(BlockReason::Rejected),
            Ok(Ok(Ok(true))) => Ok(()),
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "guard panicked".to_string()
    }
}
