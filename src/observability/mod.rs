//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events, `navigation` span per request)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Log output installed by the host (stdout, JSON)
//!     → Metrics recorder installed by the host
//! ```
//!
//! # Design Decisions
//! - Navigation ID flows through every event via the span
//! - Metrics are cheap and no-ops without a recorder

pub mod logging;
pub mod metrics;
