//! Matcher chain.
//!
//! # Responsibilities
//! - Build the ordered matcher chain from the routing configuration
//! - Validate every route before it reaches a matcher
//! - Try matchers in order, first match wins
//!
//! # Design Decisions
//! - The chain is built lazily on first use and cached for the Router's
//!   lifetime (one Router per request)
//! - No match from any matcher is an explicit `NoRouteFound`, the caller
//!   decides on a fallback

use std::sync::Arc;

use crate::config::MatcherConfig;
use crate::container::Container;
use crate::mvc::request::Request;
use crate::routing::error::RoutingError;
use crate::routing::matcher::Matcher;

/// Resolves a request through the configured matcher chain.
#[derive(Debug)]
pub struct Router {
    container: Arc<Container>,
    config: Vec<MatcherConfig>,
    matchers: Option<Vec<Box<dyn Matcher>>>,
}

impl Router {
    pub fn new(config: Vec<MatcherConfig>, container: Arc<Container>) -> Self {
        Self {
            container,
            config,
            matchers: None,
        }
    }

    /// Resolve controller, action and parameters onto `request`.
    pub fn match_request(&mut self, request: &mut Request) -> Result<(), RoutingError> {
        for matcher in self.matchers()? {
            if matcher.matches(request)? {
                return Ok(());
            }
        }

        tracing::debug!(uri = %request.request_uri(), "No matcher resolved request");
        Err(RoutingError::NoRouteFound(request.request_uri().to_string()))
    }

    fn matchers(&mut self) -> Result<&[Box<dyn Matcher>], RoutingError> {
        if self.matchers.is_none() {
            let chain = self.build_chain()?;
            self.matchers = Some(chain);
        }
        Ok(self.matchers.as_deref().unwrap_or_default())
    }

    fn build_chain(&self) -> Result<Vec<Box<dyn Matcher>>, RoutingError> {
        let mut chain = Vec::with_capacity(self.config.len());

        for matcher_config in &self.config {
            let mut matcher = self.container.create_matcher(&matcher_config.kind)?;

            for route in &matcher_config.routes {
                if let Some(field) = route.missing_field() {
                    return Err(RoutingError::InvalidRoute {
                        route: route.name.clone(),
                        field,
                    });
                }
                matcher.add_route_configuration(
                    route.uris.clone(),
                    route.controller.clone(),
                    route.action.clone(),
                );
            }

            tracing::trace!(
                kind = %matcher_config.kind,
                routes = matcher_config.routes.len(),
                "Matcher registered"
            );
            chain.push(matcher);
        }

        Ok(chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RouteConfig, RoutingConfig};

    fn router(config: Vec<MatcherConfig>) -> Router {
        Router::new(config, Arc::new(Container::new()))
    }

    fn uri_matcher(routes: Vec<RouteConfig>) -> MatcherConfig {
        MatcherConfig {
            kind: "uri".into(),
            routes,
        }
    }

    #[test]
    fn test_default_chain_matches_about_config() {
        let mut router = router(RoutingConfig::default().matchers);
        let mut request = Request::with_uri("/about/config/");
        router.match_request(&mut request).unwrap();
        assert_eq!(request.controller_name(), "signature.about_config");
        assert_eq!(request.controller_action_name(), "index");
    }

    #[test]
    fn test_first_matcher_wins() {
        let mut router = router(RoutingConfig::default().matchers);
        let mut request = Request::with_uri("/about/config");
        request.set_parameter("controller", "explicit");
        router.match_request(&mut request).unwrap();
        assert_eq!(request.controller_name(), "explicit");
    }

    #[test]
    fn test_no_route_found() {
        let mut router = router(vec![uri_matcher(vec![RouteConfig::new("home", &["/"], "home", "index")])]);
        let err = router.match_request(&mut Request::with_uri("/missing")).unwrap_err();
        assert!(err.is_no_route_found());
        assert!(matches!(err, RoutingError::NoRouteFound(ref uri) if uri == "/missing"));
    }

    #[test]
    fn test_invalid_route_is_reported() {
        let mut route = RouteConfig::new("broken", &["/broken"], "broken", "index");
        route.controller.clear();
        let mut router = router(vec![uri_matcher(vec![route])]);

        let err = router.match_request(&mut Request::with_uri("/broken")).unwrap_err();
        assert!(matches!(
            err,
            RoutingError::InvalidRoute { ref route, field: "controller" } if route == "broken"
        ));
    }

    #[test]
    fn test_unknown_matcher_kind() {
        let mut router = router(vec![MatcherConfig {
            kind: "regex".into(),
            routes: Vec::new(),
        }]);
        let err = router.match_request(&mut Request::with_uri("/")).unwrap_err();
        assert!(matches!(err, RoutingError::UnknownMatcher(ref kind) if kind == "regex"));
    }

    #[test]
    fn test_chain_is_reused() {
        let mut router = router(vec![uri_matcher(vec![RouteConfig::new("a", &["/a"], "a", "index")])]);
        router.match_request(&mut Request::with_uri("/a")).unwrap();
        assert!(router.matchers.is_some());
        router.match_request(&mut Request::with_uri("/a")).unwrap();
        assert_eq!(router.matchers.as_ref().map(Vec::len), Some(1));
    }
}
