//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Router, Dispatcher, HTTP adapter produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through the HTTP span into every event
//! - Metrics are cheap when no exporter is installed

pub mod logging;
pub mod metrics;
