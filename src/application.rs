//! Application kernel.
//!
//! # Data Flow
//! ```text
//! Request
//!     → current config snapshot
//!     → Router (matcher chain from snapshot.routing)
//!         NoRouteFound → controller.no_route_found fallback
//!     → Dispatcher (controller loop)
//!     → Response
//! ```
//!
//! # Design Decisions
//! - A fresh Router per request so a reloaded config applies to the next
//!   request without locking
//! - Only `NoRouteFound` is recovered; every other failure reaches the caller

use std::sync::Arc;

use thiserror::Error;

use crate::config::{AppConfig, SharedConfig};
use crate::container::Container;
use crate::mvc::{DispatchError, Dispatcher, Request, Response};
use crate::observability::metrics;
use crate::routing::{LinkBuilder, Router, RoutingError};

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Routing(#[from] RoutingError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Routes and dispatches requests against a shared container and config.
#[derive(Debug, Clone)]
pub struct Application {
    container: Arc<Container>,
    config: SharedConfig,
    dispatcher: Dispatcher,
}

impl Application {
    pub fn new(container: Arc<Container>, config: SharedConfig) -> Self {
        let dispatcher = Dispatcher::new(container.clone());
        Self {
            container,
            config,
            dispatcher,
        }
    }

    pub fn container(&self) -> &Arc<Container> {
        &self.container
    }

    /// Current configuration snapshot.
    pub fn config(&self) -> Arc<AppConfig> {
        self.config.load_full()
    }

    pub fn shared_config(&self) -> &SharedConfig {
        &self.config
    }

    /// Link builder over the current snapshot.
    pub fn links(&self) -> LinkBuilder {
        LinkBuilder::new(self.config())
    }

    /// Resolve controller and action onto `request`, applying the
    /// no-route fallback. Returns whether a configured route matched.
    pub fn route(&self, request: &mut Request) -> Result<bool, ApplicationError> {
        let config = self.config();
        let mut router = Router::new(config.routing.matchers.clone(), self.container.clone());

        match router.match_request(request) {
            Ok(()) => Ok(true),
            Err(RoutingError::NoRouteFound(uri)) => {
                let fallback = &config.controller.no_route_found;
                tracing::info!(
                    uri = %uri,
                    controller = %fallback.controller,
                    action = %fallback.action,
                    "No route found, using fallback"
                );
                metrics::record_no_route();
                request
                    .set_controller_name(fallback.controller.clone())
                    .set_controller_action_name(&fallback.action);
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Route and dispatch one request.
    pub fn handle(&self, mut request: Request) -> Result<Response, ApplicationError> {
        self.route(&mut request)?;

        let mut response = Response::new();
        self.dispatcher.dispatch(&mut request, &mut response)?;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{shared, RouteConfig};
    use crate::mvc::{ActionContext, ActionController, ActionResult, Actions};

    struct Echo;

    impl Actions for Echo {
        fn call_action(&mut self, action: &str, ctx: &mut ActionContext<'_>) -> Option<ActionResult> {
            Some(Ok(format!("{action}:{}", ctx.request.request_uri()).into()))
        }
    }

    fn application() -> Application {
        let mut config = AppConfig::default();
        config.controller.no_route_found.controller = "echo".into();
        config.controller.no_route_found.action = "Missing".into();
        config
            .routing
            .add_uri_route(RouteConfig::new("home", &["/"], "echo", "home"));

        let mut container = Container::new();
        container.register_controller("echo", || ActionController::new(Echo));
        Application::new(Arc::new(container), shared(config))
    }

    #[test]
    fn test_matched_route_is_dispatched() {
        let response = application().handle(Request::with_uri("/")).unwrap();
        assert_eq!(response.content(), "home:/");
    }

    #[test]
    fn test_no_route_uses_fallback() {
        let app = application();
        let mut request = Request::with_uri("/nowhere");
        assert!(!app.route(&mut request).unwrap());
        assert_eq!(request.controller_name(), "echo");

        let response = app.handle(Request::with_uri("/nowhere")).unwrap();
        assert_eq!(response.content(), "missing:/nowhere");
    }

    #[test]
    fn test_reloaded_config_applies_to_next_request() {
        let app = application();
        let mut next = AppConfig::clone(&app.config());
        next.routing
            .add_uri_route(RouteConfig::new("late", &["/late"], "echo", "late"));
        app.shared_config().store(Arc::new(next));

        let response = app.handle(Request::with_uri("/late")).unwrap();
        assert_eq!(response.content(), "late:/late");
    }

    #[test]
    fn test_unknown_controller_propagates() {
        let mut config = AppConfig::default();
        config
            .routing
            .add_uri_route(RouteConfig::new("ghost", &["/ghost"], "ghost", "index"));
        let app = Application::new(Arc::new(Container::new()), shared(config));

        let err = app.handle(Request::with_uri("/ghost")).unwrap_err();
        assert!(matches!(err, ApplicationError::Dispatch(DispatchError::UnknownController(_))));
    }
}
