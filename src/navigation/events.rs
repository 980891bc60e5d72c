//! Navigation lifecycle events.

use tokio::sync::broadcast;
use uuid::Uuid;

use crate::navigation::outcome::OutcomeKind;
use crate::routing::node::ModuleRef;

/// Something that happened while processing navigations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    Started { id: Uuid, url: String },
    ModuleLoadStarted { module: ModuleRef },
    ModuleLoadFinished { module: ModuleRef, success: bool },
    RoutesRecognized { id: Uuid, url: String, paths: Vec<String> },
    GuardsCheckStarted { id: Uuid },
    GuardsCheckFinished { id: Uuid, allowed: bool },
    Finished { id: Uuid, outcome: OutcomeKind },
}

/// Broadcast channel for [`NavigationEvent`]s.
///
/// Events are dropped when nobody listens; slow listeners lag.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<NavigationEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NavigationEvent> {
        self.tx.subscribe()
    }

    pub fn emit(&self, event: NavigationEvent) {
        let _ = self.tx.send(event);
    }

    /// Get the number of active subscribers.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
