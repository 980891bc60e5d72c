//! Metrics collection.
//!
//! # Responsibilities
//! - Define navigation metrics (outcomes, latency, guard checks, module loads)
//! - Record through the `metrics` facade; the host installs the exporter
//!
//! # Metrics
//! - `nav_navigations_total` (counter): navigations by outcome
//! - `nav_navigation_duration_seconds` (histogram): end-to-end latency
//! - `nav_guard_checks_total` (counter): guard checks by result
//! - `nav_module_loads_total` (counter): module loads by result
//! - `nav_module_load_duration_seconds` (histogram): load latency
//! - `nav_loaded_modules` (gauge): modules currently cached
//!
//! # Design Decisions
//! - No-ops until a recorder is installed
//! - Labels are static strings only

use std::time::Instant;

use crate::navigation::outcome::OutcomeKind;

pub fn record_navigation(outcome: OutcomeKind, started: Instant) {
    ::metrics::counter!("nav_navigations_total", "outcome" => outcome.as_str()).increment(1);
    ::metrics::histogram!("nav_navigation_duration_seconds")
        .record(started.elapsed().as_secs_f64());
}

pub fn record_guard_check(result: &'static str) {
    ::metrics::counter!("nav_guard_checks_total", "result" => result).increment(1);
}

pub fn record_module_load(success: bool, started: Instant) {
    let result = if success { "success" } else { "failure" };
    ::metrics::counter!("nav_module_loads_total", "result" => result).increment(1);
    ::metrics::histogram!("nav_module_load_duration_seconds")
        .record(started.elapsed().as_secs_f64());
}

pub fn record_loaded_modules(count: usize) {
    ::metrics::gauge!("nav_loaded_modules").set(count as f64);
}
