//! Controller dispatch loop.
//!
//! # States
//! - Pending: request not yet dispatched, a controller will be invoked
//! - Dispatched: a controller handled the request (terminal)
//!
//! # State Transitions
//! ```text
//! Pending → Dispatched: controller returns Completed after marking the request
//! Pending → Pending:    controller returns Forward (request re-targeted)
//! Pending → stop:       controller returns Redirect (response already set)
//! Pending → error:      iteration limit reached (forward cycle)
//! ```
//!
//! # Design Decisions
//! - Forward targets are fully specified on the request; the Router is not
//!   consulted again
//! - Every extra iteration counts against the limit, so a controller that
//!   never marks the request dispatched cannot spin forever

use std::sync::Arc;

use crate::container::Container;
use crate::mvc::controller::Outcome;
use crate::mvc::error::DispatchError;
use crate::mvc::request::Request;
use crate::mvc::response::Response;
use crate::observability::metrics;

/// Maximum number of dispatch iterations before giving up.
pub const DISPATCH_ITERATION_LIMIT: usize = 50;

/// Invokes controllers until a request is handled.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    container: Arc<Container>,
}

impl Dispatcher {
    pub fn new(container: Arc<Container>) -> Self {
        Self { container }
    }

    /// Dispatch `request`, writing into `response`.
    pub fn dispatch(&self, request: &mut Request, response: &mut Response) -> Result<(), DispatchError> {
        let mut iterations = 0;

        while !request.is_dispatched() {
            let mut controller = self.container.create_controller(request.controller_name())?;

            tracing::debug!(
                controller = %request.controller_name(),
                action = %request.controller_action_name(),
                iteration = iterations,
                "Invoking controller"
            );

            match controller.handle_request(request, response)? {
                Outcome::Completed => {}
                Outcome::Redirect(redirect) => {
                    tracing::debug!(
                        status_code = redirect.status_code,
                        location = %redirect.location,
                        "Request redirected"
                    );
                    break;
                }
                Outcome::Forward(forward) => {
                    tracing::debug!(
                        action = %forward.action,
                        controller = ?forward.controller,
                        "Request forwarded"
                    );
                    metrics::record_forward();
                    request.forward(&forward);
                }
            }

            if !request.is_dispatched() {
                iterations += 1;
                if iterations >= DISPATCH_ITERATION_LIMIT {
                    return Err(DispatchError::TooManyForwards(DISPATCH_ITERATION_LIMIT));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mvc::controller::{Controller, Forward, Redirect};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Forwards to itself `forwards` times, then completes.
    struct Countdown {
        calls: Arc<AtomicUsize>,
        forwards: usize,
    }

    impl Controller for Countdown {
        fn handle_request(&mut self, request: &mut Request, response: &mut Response) -> Result<Outcome, DispatchError> {
            request.set_dispatched(true);
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.forwards {
                return Ok(Outcome::Forward(Forward::to("again")));
            }
            response.append_content("done");
            Ok(Outcome::Completed)
        }
    }

    struct Redirector;

    impl Controller for Redirector {
        fn handle_request(&mut self, request: &mut Request, response: &mut Response) -> Result<Outcome, DispatchError> {
            request.set_dispatched(false);
            response.set_status_code(302).add_header("Location", "/login");
            Ok(Outcome::Redirect(Redirect {
                status_code: 302,
                location: "/login".into(),
            }))
        }
    }

    fn dispatch_countdown(forwards: usize) -> (Result<(), DispatchError>, usize, Request) {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut container = Container::new();
        let counter = calls.clone();
        container.register_controller("countdown", move || Countdown {
            calls: counter.clone(),
            forwards,
        });

        let mut request = Request::with_uri("/");
        request.set_controller_name("countdown");
        let mut response = Response::new();
        let result = Dispatcher::new(Arc::new(container)).dispatch(&mut request, &mut response);
        (result, calls.load(Ordering::SeqCst), request)
    }

    #[test]
    fn test_single_iteration() {
        let (result, calls, request) = dispatch_countdown(0);
        assert!(result.is_ok());
        assert_eq!(calls, 1);
        assert!(request.is_dispatched());
    }

    #[test]
    fn test_forwards_below_limit() {
        let (result, calls, request) = dispatch_countdown(DISPATCH_ITERATION_LIMIT - 1);
        assert!(result.is_ok());
        assert_eq!(calls, DISPATCH_ITERATION_LIMIT);
        assert_eq!(request.controller_action_name(), "again");
    }

    #[test]
    fn test_forward_cycle_is_fatal() {
        let (result, calls, _) = dispatch_countdown(DISPATCH_ITERATION_LIMIT);
        assert!(matches!(result, Err(DispatchError::TooManyForwards(DISPATCH_ITERATION_LIMIT))));
        assert_eq!(calls, DISPATCH_ITERATION_LIMIT);
    }

    #[test]
    fn test_redirect_stops_dispatch() {
        let mut container = Container::new();
        container.register_controller("redirector", || Redirector);

        let mut request = Request::with_uri("/private");
        request.set_controller_name("redirector");
        let mut response = Response::new();
        Dispatcher::new(Arc::new(container))
            .dispatch(&mut request, &mut response)
            .unwrap();

        assert!(!request.is_dispatched());
        assert_eq!(response.header("Location"), "/login");
    }

    #[test]
    fn test_unknown_controller() {
        let mut request = Request::with_uri("/");
        request.set_controller_name("nobody");
        let mut response = Response::new();
        let err = Dispatcher::new(Arc::new(Container::new()))
            .dispatch(&mut request, &mut response)
            .unwrap_err();
        assert!(matches!(err, DispatchError::UnknownController(name) if name == "nobody"));
    }
}
