//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → published through SharedConfig (ArcSwap)
//!
//! Per request:
//!     application kernel loads the current snapshot
//!     → Router built from snapshot.routing
//!     → LinkBuilder reads snapshot.routing
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → atomic swap of Arc<AppConfig>
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Matcher chain is an ordered list so priority survives TOML parsing

use std::sync::Arc;

use arc_swap::ArcSwap;

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use schema::AppConfig;
pub use schema::FallbackConfig;
pub use schema::MatcherConfig;
pub use schema::RouteConfig;
pub use schema::RoutingConfig;

/// Configuration handle shared between the server and the reload task.
pub type SharedConfig = Arc<ArcSwap<AppConfig>>;

/// Wrap a configuration into a shareable, swappable handle.
pub fn shared(config: AppConfig) -> SharedConfig {
    Arc::new(ArcSwap::from_pointee(config))
}
