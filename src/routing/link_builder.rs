//! Reverse routing.
//!
//! # Data Flow
//! ```text
//! route name + arguments
//!     → first URI template of the named `uri` route
//!     → placeholder segments replaced by matching arguments
//!     → remaining arguments appended as a query string
//! ```
//!
//! # Design Decisions
//! - An argument matches a segment by its full token (`$id`) or by the
//!   placeholder name alone (`id`)
//! - Only the first matching segment is replaced
//! - Substituted values are percent-encoded so the link matches back

use std::sync::Arc;

use url::form_urlencoded;

use crate::config::AppConfig;
use crate::routing::error::RoutingError;

/// A link argument: a path or query value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkValue {
    Scalar(String),
    /// Joined with `,` in a path segment, `key[0]=...` in a query string.
    List(Vec<String>),
    /// Query-string only, `key[sub]=...`.
    Map(Vec<(String, LinkValue)>),
}

impl From<&str> for LinkValue {
    fn from(value: &str) -> Self {
        LinkValue::Scalar(value.to_string())
    }
}

impl From<String> for LinkValue {
    fn from(value: String) -> Self {
        LinkValue::Scalar(value)
    }
}

impl From<i64> for LinkValue {
    fn from(value: i64) -> Self {
        LinkValue::Scalar(value.to_string())
    }
}

impl From<Vec<String>> for LinkValue {
    fn from(values: Vec<String>) -> Self {
        LinkValue::List(values)
    }
}

impl From<Vec<&str>> for LinkValue {
    fn from(values: Vec<&str>) -> Self {
        LinkValue::List(values.into_iter().map(str::to_string).collect())
    }
}

/// Builds URIs for named routes.
#[derive(Debug, Clone)]
pub struct LinkBuilder {
    config: Arc<AppConfig>,
}

impl LinkBuilder {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }

    /// Link to a route without arguments.
    pub fn path(&self, route: &str) -> Result<String, RoutingError> {
        self.build(route, Vec::<(String, LinkValue)>::new())
    }

    /// Link to `route`, substituting `arguments` into its first template.
    ///
    /// Substituted path values are percent-encoded here, so pass them raw.
    /// Arguments that address no placeholder go to the query string.
    pub fn build<I, K, V>(&self, route: &str, arguments: I) -> Result<String, RoutingError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<LinkValue>,
    {
        let route_config = self
            .config
            .routing
            .uri_route(route)
            .ok_or_else(|| RoutingError::NoRouteFound(route.to_string()))?;

        let template = route_config
            .uris
            .first()
            .ok_or_else(|| RoutingError::InvalidRoute {
                route: route.to_string(),
                field: "uris",
            })?;

        let mut segments: Vec<String> = template.split('/').map(str::to_string).collect();
        let mut substituted = vec![false; segments.len()];
        let mut remaining = Vec::new();

        for (key, value) in arguments {
            let key = key.into();
            let value = value.into();

            let slot = segments
                .iter()
                .enumerate()
                .position(|(i, segment)| !substituted[i] && token_matches(segment, &key));

            match (slot, path_value(&value)) {
                (Some(index), Some(encoded)) => {
                    segments[index] = encoded;
                    substituted[index] = true;
                }
                _ => remaining.push((key, value)),
            }
        }

        let mut uri = segments.join("/");
        if !remaining.is_empty() {
            let mut query = form_urlencoded::Serializer::new(String::new());
            for (key, value) in &remaining {
                append_query(&mut query, key, value);
            }
            uri.push('?');
            uri.push_str(&query.finish());
        }

        Ok(uri)
    }
}

/// Whether an argument key addresses a placeholder segment.
///
/// Literal segments are never substituted.
fn token_matches(segment: &str, key: &str) -> bool {
    match placeholder_name(segment) {
        Some(name) => !key.is_empty() && (segment == key || name == key),
        None => false,
    }
}

fn placeholder_name(segment: &str) -> Option<&str> {
    if let Some(rest) = segment.strip_prefix('(') {
        return rest.split_once(')').map(|(_, name)| name);
    }
    segment
        .strip_prefix(|c: char| matches!(c, '$' | '#' | '@'))
        .filter(|name| !name.is_empty())
}

fn path_value(value: &LinkValue) -> Option<String> {
    match value {
        LinkValue::Scalar(s) => Some(urlencoding::encode(s).into_owned()),
        LinkValue::List(items) => Some(urlencoding::encode(&items.join(",")).into_owned()),
        LinkValue::Map(_) => None,
    }
}

fn append_query(query: &mut form_urlencoded::Serializer<'_, String>, key: &str, value: &LinkValue) {
    match value {
        LinkValue::Scalar(s) => {
            query.append_pair(key, s);
        }
        LinkValue::List(items) => {
            for (i, item) in items.iter().enumerate() {
                query.append_pair(&format!("{key}[{i}]"), item);
            }
        }
        LinkValue::Map(entries) => {
            for (sub, nested) in entries {
                append_query(query, &format!("{key}[{sub}]"), nested);
            }
        }
    }
}
