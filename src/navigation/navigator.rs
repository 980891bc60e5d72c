//! Navigation façade.
//!
//! # Responsibilities
//! - Resolve the URL (loading lazy modules inline)
//! - Evaluate guards along the resolved chain
//! - Translate results into an `Outcome`
//! - Track the currently activated chain
//!
//! # Design Decisions
//! - Only `Activated` changes navigator state; other outcomes leave it untouched
//! - Supersession is opt-in: when enabled, the newest navigation wins and older
//!   pipelines are dropped at their current suspension point
//! - Module loads outlive cancelled navigations and still fill the cache

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use arc_swap::ArcSwapOption;
use tokio::sync::{broadcast, watch};
use tracing::Instrument;

use crate::config::loader::ConfigError;
use crate::config::schema::{NavigationConfig, RouterConfig};
use crate::config::validation::validate_config;
use crate::guards::{GuardEvaluator, GuardRegistry};
use crate::loader::{ModuleCache, ModuleLoader, StaticModuleLoader};
use crate::navigation::context::NavigationContext;
use crate::navigation::events::{EventBus, NavigationEvent};
use crate::navigation::outcome::Outcome;
use crate::observability::metrics;
use crate::routing::chain::ActivationChain;
use crate::routing::node::RouteNode;
use crate::routing::resolver::RouteResolver;

/// Coordinates resolution and guard evaluation for navigation requests.
pub struct Navigator {
    resolver: RouteResolver,
    evaluator: GuardEvaluator,
    events: EventBus,
    config: NavigationConfig,
    sequence: AtomicU64,
    latest: watch::Sender<u64>,
    current: ArcSwapOption<ActivationChain>,
}

impl Navigator {
    /// Create a navigator over `routes`, loading lazy modules with `loader`.
    pub fn new(
        routes: Vec<RouteNode>,
        guards: GuardRegistry,
        loader: Arc<dyn ModuleLoader>,
        config: &RouterConfig,
    ) -> Self {
        let events = EventBus::new(config.navigation.event_capacity);
        let modules = ModuleCache::with_events(loader, config.timeouts.load(), events.clone());
        let (latest, _) = watch::channel(0);

        tracing::info!(
            routes = routes.len(),
            guards = guards.len(),
            max_redirects = config.navigation.max_redirects,
            cancel_superseded = config.navigation.cancel_superseded,
            "Navigator initialized"
        );

        Self {
            resolver: RouteResolver::new(routes, modules, config.navigation.max_redirects),
            evaluator: GuardEvaluator::new(guards, config.timeouts.guard()),
            events,
            config: config.navigation.clone(),
            sequence: AtomicU64::new(0),
            latest,
            current: ArcSwapOption::empty(),
        }
    }

    /// Create a navigator from configuration, serving `[modules]` statically.
    ///
    /// The configuration is validated first, as [`load_config`] does.
    ///
    /// [`load_config`]: crate::config::load_config
    pub fn from_config(config: &RouterConfig, guards: GuardRegistry) -> Result<Self, ConfigError> {
        validate_config(config).map_err(ConfigError::Validation)?;
        let routes = RouteNode::from_configs(&config.routes)?;
        let loader = Arc::new(StaticModuleLoader::new(&config.modules));
        Ok(Self::new(routes, guards, loader, config))
    }

    /// Navigate to `url`.
    pub async fn navigate(&self, url: &str, context: NavigationContext) -> Outcome {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        self.latest.send_replace(seq);

        let started = Instant::now();
        let span = tracing::info_span!("navigation", id = %context.id(), url = %url);

        async {
            self.events.emit(NavigationEvent::Started {
                id: context.id(),
                url: url.to_string(),
            });

            let outcome = if self.config.cancel_superseded {
                let mut latest = self.latest.subscribe();
                tokio::select! {
                    outcome = self.run(url, &context) => outcome,
                    _ = superseded(&mut latest, seq) => Outcome::Cancelled,
                }
            } else {
                self.run(url, &context).await
            };
            let outcome = self.commit(seq, outcome);

            match &outcome {
                Outcome::Activated(chain) => {
                    tracing::info!(resolved = %chain.url(), "Navigation activated")
                }
                Outcome::Cancelled => tracing::debug!("Navigation superseded"),
                other => {
                    tracing::info!(outcome = other.kind().as_str(), "Navigation did not activate")
                }
            }
            metrics::record_navigation(outcome.kind(), started);
            self.events.emit(NavigationEvent::Finished {
                id: context.id(),
                outcome: outcome.kind(),
            });
            outcome
        }
        .instrument(span)
        .await
    }

    async fn run(&self, url: &str, context: &NavigationContext) -> Outcome {
        let chain = match self.resolver.resolve(url).await {
            Ok(chain) => chain,
            Err(e) => return Outcome::from(e),
        };

        self.events.emit(NavigationEvent::RoutesRecognized {
            id: context.id(),
            url: chain.url().to_string(),
            paths: chain.paths().into_iter().map(String::from).collect(),
        });
        self.events.emit(NavigationEvent::GuardsCheckStarted { id: context.id() });

        let verdict = self.evaluator.evaluate(&chain, context).await;
        self.events.emit(NavigationEvent::GuardsCheckFinished {
            id: context.id(),
            allowed: verdict.is_ok(),
        });

        match verdict {
            Ok(()) => Outcome::Activated(chain),
            Err(denial) => Outcome::Blocked {
                guard: denial.guard,
                reason: denial.reason,
            },
        }
    }

    /// Make an activated chain current. With supersession on, any outcome of
    /// a navigation that is no longer the newest becomes `Cancelled`.
    fn commit(&self, seq: u64, outcome: Outcome) -> Outcome {
        // Holding the borrow keeps newer navigations from starting meanwhile.
        let latest = self.latest.borrow();
        if self.config.cancel_superseded && *latest != seq {
            return Outcome::Cancelled;
        }
        if let Outcome::Activated(chain) = &outcome {
            self.current.store(Some(Arc::new(chain.clone())));
        }
        outcome
    }

    /// The last activated chain.
    pub fn current(&self) -> Option<Arc<ActivationChain>> {
        self.current.load_full()
    }

    /// Subscribe to navigation events.
    pub fn subscribe(&self) -> broadcast::Receiver<NavigationEvent> {
        self.events.subscribe()
    }

    pub fn modules(&self) -> &ModuleCache {
        self.resolver.modules()
    }

    pub fn guards(&self) -> &GuardRegistry {
        self.evaluator.registry()
    }
}

/// Resolves once a navigation newer than `seq` has started.
async fn superseded(latest: &mut watch::Receiver<u64>, seq: u64) {
    loop {
        if *latest.borrow_and_update() != seq {
            return;
        }
        if latest.changed().await.is_err() {
            // Sender gone, nothing can supersede us anymore.
            std::future::pending::<()>().await;
        }
    }
}
