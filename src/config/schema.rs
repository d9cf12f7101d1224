//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the framework.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Matcher kind resolving requests from `controller`/`action` parameters.
pub const DEFAULT_MATCHER: &str = "default";

/// Matcher kind resolving requests from URI templates.
pub const URI_MATCHER: &str = "uri";

/// Root configuration of an application.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address, body limit).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Controller fallbacks.
    pub controller: ControllerConfig,

    /// Matcher chain and route table.
    pub routing: RoutingConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_body_bytes: 1024 * 1024,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Controller related settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ControllerConfig {
    /// Target used when no matcher resolves a request.
    pub no_route_found: FallbackConfig,
}

/// A controller/action pair substituted by the application kernel.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FallbackConfig {
    pub controller: String,
    pub action: String,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            controller: "signature.error".to_string(),
            action: "noRouteFound".to_string(),
        }
    }
}

/// Routing configuration: the ordered matcher chain.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Matchers in priority order. The first one reporting a match wins.
    pub matchers: Vec<MatcherConfig>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            matchers: vec![
                MatcherConfig {
                    kind: DEFAULT_MATCHER.to_string(),
                    routes: Vec::new(),
                },
                MatcherConfig {
                    kind: URI_MATCHER.to_string(),
                    routes: vec![RouteConfig {
                        name: "about:config".to_string(),
                        uris: vec!["/about/config".to_string(), "/about/config/".to_string()],
                        controller: "signature.about_config".to_string(),
                        action: "index".to_string(),
                    }],
                },
            ],
        }
    }
}

impl RoutingConfig {
    /// Find a route by name among the routes of all `uri` matchers.
    pub fn uri_route(&self, name: &str) -> Option<&RouteConfig> {
        self.matchers
            .iter()
            .filter(|m| m.kind == URI_MATCHER)
            .flat_map(|m| m.routes.iter())
            .find(|r| r.name == name)
    }

    /// Append a route to the first `uri` matcher, creating one if needed.
    pub fn add_uri_route(&mut self, route: RouteConfig) -> &mut Self {
        match self.matchers.iter_mut().find(|m| m.kind == URI_MATCHER) {
            Some(matcher) => matcher.routes.push(route),
            None => self.matchers.push(MatcherConfig {
                kind: URI_MATCHER.to_string(),
                routes: vec![route],
            }),
        }
        self
    }
}

/// One entry of the matcher chain.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatcherConfig {
    /// Registered matcher kind (e.g., "default", "uri").
    pub kind: String,

    /// Routes registered on this matcher, in priority order.
    #[serde(default)]
    pub routes: Vec<RouteConfig>,
}

/// A named route: candidate URI templates mapped to a controller action.
///
/// Fields default to empty so that incomplete routes surface as
/// validation errors instead of parse errors.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RouteConfig {
    /// Route identifier, used for link building.
    pub name: String,

    /// URI templates. The first one is used for link building.
    pub uris: Vec<String>,

    /// Identifier of the controller registered in the container.
    pub controller: String,

    /// Action invoked on the controller.
    pub action: String,
}

impl RouteConfig {
    pub fn new(
        name: impl Into<String>,
        uris: &[&str],
        controller: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            uris: uris.iter().map(|u| u.to_string()).collect(),
            controller: controller.into(),
            action: action.into(),
        }
    }

    /// Name of the first required field that is missing or empty.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.uris.is_empty() {
            Some("uris")
        } else if self.controller.is_empty() {
            Some("controller")
        } else if self.action.is_empty() {
            Some("action")
        } else {
            None
        }
    }
}
