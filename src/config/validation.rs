//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check every route carries uris, controller and action
//! - Detect duplicate route names (link building needs unique names)
//! - Validate the listener address and the no-route fallback
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Matcher kinds are not checked here; the container knows them and the
//!   Router rejects unknown kinds when it builds its chain

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AppConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("route \"{route}\" of matcher \"{matcher}\" is missing field \"{field}\"")]
    IncompleteRoute {
        matcher: String,
        route: String,
        field: &'static str,
    },

    #[error("route name \"{0}\" is defined more than once")]
    DuplicateRoute(String),

    #[error("matcher at position {0} has an empty kind")]
    EmptyMatcherKind(usize),

    #[error("invalid bind address \"{0}\"")]
    InvalidBindAddress(String),

    #[error("no_route_found fallback is missing field \"{0}\"")]
    IncompleteFallback(&'static str),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let fallback = &config.controller.no_route_found;
    if fallback.controller.is_empty() {
        errors.push(ValidationError::IncompleteFallback("controller"));
    }
    if fallback.action.is_empty() {
        errors.push(ValidationError::IncompleteFallback("action"));
    }

    let mut seen = HashSet::new();
    for (position, matcher) in config.routing.matchers.iter().enumerate() {
        if matcher.kind.is_empty() {
            errors.push(ValidationError::EmptyMatcherKind(position));
        }

        for route in &matcher.routes {
            if let Some(field) = route.missing_field() {
                errors.push(ValidationError::IncompleteRoute {
                    matcher: matcher.kind.clone(),
                    route: route.name.clone(),
                    field,
                });
            }
            if !seen.insert(route.name.as_str()) {
                errors.push(ValidationError::DuplicateRoute(route.name.clone()));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::RouteConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&AppConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = AppConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.controller.no_route_found.action.clear();
        config
            .routing
            .add_uri_route(RouteConfig::new("about:config", &["/dup"], "c", "a"))
            .add_uri_route(RouteConfig::new("broken", &["/broken"], "", "a"));

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::InvalidBindAddress("not-an-address".into())));
        assert!(errors.contains(&ValidationError::IncompleteFallback("action")));
        assert!(errors.contains(&ValidationError::DuplicateRoute("about:config".into())));
        assert!(errors.contains(&ValidationError::IncompleteRoute {
            matcher: "uri".into(),
            route: "broken".into(),
            field: "controller",
        }));
    }
}
