//! Matcher capability and the parameter-driven matcher.
//!
//! # Responsibilities
//! - Define the contract every entry of the matcher chain fulfils
//! - Resolve controller/action from explicit `controller`/`action` parameters
//!
//! # Design Decisions
//! - A non-match is `Ok(false)`; errors are reserved for configuration and
//!   lookup failures
//! - `DefaultMatcher` ignores the route table entirely

use std::fmt::Debug;

use crate::mvc::request::Request;
use crate::routing::error::RoutingError;

/// Strategy that resolves a request's controller, action and parameters.
pub trait Matcher: Send + Sync + Debug {
    /// Try to resolve `request`. Returns `Ok(true)` when it matched.
    fn matches(&self, request: &mut Request) -> Result<bool, RoutingError>;

    /// Register one route entry with this matcher.
    fn add_route_configuration(&mut self, uris: Vec<String>, controller: String, action: String);
}

/// Matches when the request carries a `controller` parameter.
#[derive(Debug, Clone, Default)]
pub struct DefaultMatcher;

impl DefaultMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl Matcher for DefaultMatcher {
    fn matches(&self, request: &mut Request) -> Result<bool, RoutingError> {
        let controller = request.parameter("controller").map(str::to_string);
        let action = request.parameter("action").map(str::to_string);

        let matched = match controller {
            Some(controller) => {
                request.set_controller_name(controller);
                true
            }
            None => false,
        };

        if let Some(action) = action {
            request.set_controller_action_name(&action);
        }

        Ok(matched)
    }

    fn add_route_configuration(&mut self, _uris: Vec<String>, _controller: String, _action: String) {}
}
