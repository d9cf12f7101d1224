//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (URI, parameters)
//!     → router.rs (matcher chain, first match wins)
//!     → matcher.rs (controller/action from parameters)
//!     → uri_matcher.rs (URI templates with typed placeholders)
//!         → objects.rs (resolve `(Type)name` segments)
//!     → Request carries controller, action, typed parameters
//!       or NoRouteFound
//!
//! Reverse routing:
//!     route name + arguments
//!     → link_builder.rs
//!     → URI that matches back to the same route
//! ```
//!
//! # Design Decisions
//! - Matcher chain order comes from configuration order
//! - Absence of a match is a normal matcher outcome; only the Router turns it
//!   into `NoRouteFound`
//! - Matcher kinds and placeholder types are looked up in the container, never
//!   by reflection

pub mod error;
pub mod link_builder;
pub mod matcher;
pub mod objects;
pub mod router;
pub mod uri_matcher;

pub use error::RoutingError;
pub use link_builder::{LinkBuilder, LinkValue};
pub use matcher::{DefaultMatcher, Matcher};
pub use objects::ObjectRegistry;
pub use router::Router;
pub use uri_matcher::UriMatcher;
