//! Loaded module cache with single-flight loading.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use tokio::time::timeout;

use crate::loader::{LoadError, ModuleLoader};
use crate::navigation::events::{EventBus, NavigationEvent};
use crate::observability::metrics;
use crate::routing::node::{ModuleRef, RouteNode};

/// Children of a loaded module.
pub type ModuleRoutes = Arc<[Arc<RouteNode>]>;

type LoadResult = Result<ModuleRoutes, LoadError>;
type InFlight = Shared<BoxFuture<'static, LoadResult>>;

enum Slot {
    Loaded(ModuleRoutes),
    Loading(InFlight),
}

struct CacheInner {
    loader: Arc<dyn ModuleLoader>,
    slots: DashMap<ModuleRef, Slot>,
    timeout: Duration,
    events: Option<EventBus>,
}

impl CacheInner {
    fn emit(&self, event: NavigationEvent) {
        if let Some(events) = &self.events {
            events.emit(event);
        }
    }

    fn loaded_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|r| matches!(r.value(), Slot::Loaded(_)))
            .count()
    }
}

/// Process-wide cache of loaded modules.
///
/// Cloning is cheap; clones share the same cache.
#[derive(Clone)]
pub struct ModuleCache {
    inner: Arc<CacheInner>,
}

impl ModuleCache {
    /// Create a cache in front of `loader`, bounding each load by `load_timeout`.
    pub fn new(loader: Arc<dyn ModuleLoader>, load_timeout: Duration) -> Self {
        Self::build(loader, load_timeout, None)
    }

    /// Same as [`ModuleCache::new`], publishing load events on `events`.
    pub fn with_events(
        loader: Arc<dyn ModuleLoader>,
        load_timeout: Duration,
        events: EventBus,
    ) -> Self {
        Self::build(loader, load_timeout, Some(events))
    }

    fn build(loader: Arc<dyn ModuleLoader>, timeout: Duration, events: Option<EventBus>) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                loader,
                slots: DashMap::new(),
                timeout,
                events,
            }),
        }
    }

    /// Return the children of `module`, loading it on first use.
    pub async fn load(&self, module: &ModuleRef) -> LoadResult {
        let in_flight = match self.inner.slots.entry(module.clone()) {
            Entry::Occupied(entry) => match entry.get() {
                Slot::Loaded(routes) => return Ok(routes.clone()),
                Slot::Loading(in_flight) => {
                    tracing::debug!(module = %module, "Joining in-flight module load");
                    in_flight.clone()
                }
            },
            Entry::Vacant(entry) => {
                let in_flight = self.spawn_load(module.clone());
                entry.insert(Slot::Loading(in_flight.clone()));
                in_flight
            }
        };
        in_flight.await
    }

    /// True once `module` has been loaded successfully.
    pub fn is_loaded(&self, module: &ModuleRef) -> bool {
        self.inner
            .slots
            .get(module)
            .map(|r| matches!(r.value(), Slot::Loaded(_)))
            .unwrap_or(false)
    }

    /// Number of successfully loaded modules.
    pub fn loaded_count(&self) -> usize {
        self.inner.loaded_count()
    }

    fn spawn_load(&self, module: ModuleRef) -> InFlight {
        let inner = self.inner.clone();
        let task_module = module.clone();
        let handle = tokio::spawn(async move {
            let module = task_module;
            let started = Instant::now();
            inner.emit(NavigationEvent::ModuleLoadStarted { module: module.clone() });
            tracing::info!(module = %module, "Loading module");

            let result = match timeout(inner.timeout, inner.loader.load(&module)).await {
                Ok(Ok(routes)) => Ok(routes.into_iter().map(Arc::new).collect::<ModuleRoutes>()),
                Ok(Err(e)) => Err(e),
                Err(_) => Err(LoadError::Timeout {
                    module: module.clone(),
                    ms: inner.timeout.as_millis() as u64,
                }),
            };

            match &result {
                Ok(routes) => {
                    inner.slots.insert(module.clone(), Slot::Loaded(routes.clone()));
                    tracing::info!(
                        module = %module,
                        routes = routes.len(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "Module loaded"
                    );
                }
                Err(e) => {
                    inner.slots.remove(&module);
                    tracing::warn!(module = %module, error = %e, "Module load failed");
                }
            }
            metrics::record_module_load(result.is_ok(), started);
            metrics::record_loaded_modules(inner.loaded_count());
            inner.emit(NavigationEvent::ModuleLoadFinished {
                module,
                success: result.is_ok(),
            });
            result
        });

        let inner = self.inner.clone();
        async move {
            match handle.await {
                Ok(result) => result,
                Err(e) => {
                    // The task never reached its own cleanup.
                    inner
                        .slots
                        .remove_if(&module, |_, slot| matches!(slot, Slot::Loading(_)));
                    tracing::error!(module = %module, error = %e, "Module load task aborted");
                    Err(LoadError::Aborted {
                        module,
                        reason: e.to_string(),
                    })
                }
            }
        }
        .boxed()
        .shared()
    }
}
