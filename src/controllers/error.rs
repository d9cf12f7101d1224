//! Fallback controller for unmatched requests.

use crate::mvc::{ActionContext, ActionResult, Actions};

/// Handles `noroutefound` with a 404.
#[derive(Debug, Default)]
pub struct ErrorController;

impl Actions for ErrorController {
    fn call_action(&mut self, action: &str, ctx: &mut ActionContext<'_>) -> Option<ActionResult> {
        match action {
            "noroutefound" => {
                ctx.response
                    .set_status_code(404)
                    .add_header("Content-Type", "text/plain; charset=utf-8");
                Some(Ok(format!("No route found for \"{}\"", ctx.request.request_uri()).into()))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mvc::{ActionController, Controller, Request, Response};

    #[test]
    fn test_no_route_found_is_404() {
        let mut request = Request::with_uri("/missing");
        request.set_controller_name("signature.error").set_controller_action_name("noRouteFound");
        let mut response = Response::new();

        ActionController::new(ErrorController)
            .handle_request(&mut request, &mut response)
            .unwrap();

        assert_eq!(response.status_code(), 404);
        assert_eq!(response.content(), "No route found for \"/missing\"");
    }
}
