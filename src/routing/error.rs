//! Routing error types.

use thiserror::Error;

use crate::persistence::PersistenceError;

/// Errors raised while building the matcher chain, matching or building links.
#[derive(Debug, Error)]
pub enum RoutingError {
    /// No matcher resolved the request, or a link target is unknown.
    #[error("no route found for \"{0}\"")]
    NoRouteFound(String),

    #[error("matcher kind \"{0}\" is not registered")]
    UnknownMatcher(String),

    #[error("route \"{route}\" is not configured well, field \"{field}\" is missing or empty")]
    InvalidRoute { route: String, field: &'static str },

    #[error("object type \"{0}\" is not registered")]
    UnknownObjectType(String),

    #[error("could not construct \"{class}\" from \"{value}\": {reason}")]
    ObjectConstruction {
        class: String,
        value: String,
        reason: String,
    },

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl RoutingError {
    pub fn is_no_route_found(&self) -> bool {
        matches!(self, RoutingError::NoRouteFound(_))
    }
}
