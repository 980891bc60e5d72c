//! Stock guard implementations.

use async_trait::async_trait;

use crate::guards::{Guard, GuardContext, GuardError};

/// Always permits. Placeholder for guards whose logic lives in the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

#[async_trait]
impl Guard for AllowAll {
    async fn can_activate(&self, _ctx: &GuardContext<'_>) -> Result<bool, GuardError> {
        Ok(true)
    }
}

/// Always rejects.
#[derive(Debug, Clone, Copy, Default)]
pub struct DenyAll;

#[async_trait]
impl Guard for DenyAll {
    async fn can_activate(&self, _ctx: &GuardContext<'_>) -> Result<bool, GuardError> {
        Ok(false)
    }
}

/// Adapts a synchronous predicate into a guard.
pub struct FnGuard<F> {
    check: F,
}

impl<F> FnGuard<F>
where
    F: Fn(&GuardContext<'_>) -> bool + Send + Sync,
{
    pub fn new(check: F) -> Self {
        Self { check }
    }
}

#[async_trait]
impl<F> Guard for FnGuard<F>
where
    F: Fn(&GuardContext<'_>) -> bool + Send + Sync,
{
    async fn can_activate(&self, ctx: &GuardContext<'_>) -> Result<bool, GuardError> {
        Ok((self.check)(ctx))
    }
}
