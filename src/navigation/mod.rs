//! Navigation subsystem.
//!
//! # Data Flow
//! ```text
//! navigate(url, context)
//!     → routing::resolver (match, redirects, lazy loads)
//!     → guards::evaluator (root-first, short-circuit)
//!     → Outcome: Activated | Blocked | NotFound | RedirectLoop | LoadFailed | Cancelled
//!     → events.rs (lifecycle events to subscribers)
//! ```
//!
//! # Design Decisions
//! - Every failure is a terminal Outcome value, nothing is fatal
//! - Each navigation owns its chain and context; the module cache and guard
//!   registry are shared

pub mod context;
pub mod events;
pub mod navigator;
pub mod outcome;

pub use context::NavigationContext;
pub use events::{EventBus, NavigationEvent};
pub use navigator::Navigator;
pub use outcome::{Outcome, OutcomeKind};
