//! Shared fixtures for integration tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use nav_guard::guards::GuardError;
use nav_guard::{Guard, GuardContext, LoadError, ModuleLoader, ModuleRef, RouteNode};

/// Loader serving modules from a closure, counting calls per module.
pub struct CountingLoader {
    modules: HashMap<String, fn() -> Vec<RouteNode>>,
    calls: Mutex<HashMap<String, u32>>,
    delay: Duration,
    failures_left: AtomicU32,
}

#[allow(dead_code)]
impl CountingLoader {
    pub fn new(delay: Duration) -> Self {
        Self {
            modules: HashMap::new(),
            calls: Mutex::new(HashMap::new()),
            delay,
            failures_left: AtomicU32::new(0),
        }
    }

    pub fn module(mut self, name: &str, routes: fn() -> Vec<RouteNode>) -> Self {
        self.modules.insert(name.to_string(), routes);
        self
    }

    /// Fail the next `count` loads.
    pub fn failing(self, count: u32) -> Self {
        self.failures_left.store(count, Ordering::SeqCst);
        self
    }

    pub fn calls(&self, name: &str) -> u32 {
        self.calls.lock().unwrap().get(name).copied().unwrap_or(0)
    }
}

#[async_trait]
impl ModuleLoader for CountingLoader {
    async fn load(&self, module: &ModuleRef) -> Result<Vec<RouteNode>, LoadError> {
        *self
            .calls
            .lock()
            .unwrap()
            .entry(module.as_str().to_string())
            .or_default() += 1;

        tokio::time::sleep(self.delay).await;

        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(LoadError::Failed {
                module: module.clone(),
                reason: "chunk fetch failed".into(),
            });
        }

        self.modules
            .get(module.as_str())
            .map(|routes| routes())
            .ok_or_else(|| LoadError::UnknownModule(module.clone()))
    }
}

/// Guard with a fixed answer that counts how often it ran.
#[derive(Clone)]
pub struct CountingGuard {
    answer: bool,
    delay: Duration,
    calls: Arc<AtomicU32>,
}

#[allow(dead_code)]
impl CountingGuard {
    pub fn allow() -> Self {
        Self::new(true)
    }

    pub fn deny() -> Self {
        Self::new(false)
    }

    fn new(answer: bool) -> Self {
        Self {
            answer,
            delay: Duration::ZERO,
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Guard for CountingGuard {
    async fn can_activate(&self, _ctx: &GuardContext<'_>) -> Result<bool, GuardError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.answer)
    }
}

/// The tree of the feature-module scenarios.
#[allow(dead_code)]
pub fn feature_tree() -> Vec<RouteNode> {
    vec![
        RouteNode::redirect("", "feature-one"),
        RouteNode::lazy("feature-one", "M1"),
        RouteNode::lazy("feature-two", "M2").guard("app-specific"),
    ]
}

#[allow(dead_code)]
pub fn feature_one_routes() -> Vec<RouteNode> {
    vec![
        RouteNode::redirect("", "inner"),
        RouteNode::leaf("inner").guard("G1").component("FeatureOneComponent"),
    ]
}

#[allow(dead_code)]
pub fn feature_two_routes() -> Vec<RouteNode> {
    vec![RouteNode::leaf("").component("FeatureTwoComponent")]
}
