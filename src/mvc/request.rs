//! Request value object.
//!
//! # Responsibilities
//! - Carry the raw URI, method and parameters of one incoming request
//! - Carry the controller, action and typed action parameters a matcher resolved
//! - Track whether a controller has handled the request (`dispatched`)
//!
//! # Design Decisions
//! - Plain mutable record, setters return `&mut Self` for chaining
//! - Raw parameters are coerced to strings at the boundary
//! - Action names are stored lower-cased
//! - A forward is applied here so every caller resets the same state

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use axum::http::Method;

use crate::mvc::controller::Forward;

/// Action executed when nothing else was resolved.
pub const DEFAULT_ACTION: &str = "index";

/// A domain object bound by a `(Type)name` placeholder.
#[derive(Clone)]
pub struct ObjectValue {
    class: String,
    instance: Arc<dyn Any + Send + Sync>,
}

impl ObjectValue {
    pub fn new<T: Any + Send + Sync>(class: impl Into<String>, instance: T) -> Self {
        Self {
            class: class.into(),
            instance: Arc::new(instance),
        }
    }

    /// Registered type name the object was resolved through.
    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.instance.downcast_ref::<T>()
    }
}

impl fmt::Debug for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectValue").field("class", &self.class).finish_non_exhaustive()
    }
}

impl PartialEq for ObjectValue {
    fn eq(&self, other: &Self) -> bool {
        self.class == other.class && Arc::ptr_eq(&self.instance, &other.instance)
    }
}

/// A typed value extracted from a URI segment.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    String(String),
    Integer(i64),
    List(Vec<String>),
    Object(ObjectValue),
}

impl ParameterValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParameterValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            ParameterValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ParameterValue::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_object<T: Any>(&self) -> Option<&T> {
        match self {
            ParameterValue::Object(o) => o.downcast_ref::<T>(),
            _ => None,
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::String(s) => f.write_str(s),
            ParameterValue::Integer(i) => write!(f, "{i}"),
            ParameterValue::List(l) => write!(f, "[{}]", l.join(", ")),
            ParameterValue::Object(o) => write!(f, "({})", o.class()),
        }
    }
}

/// Ordered name → value bindings produced by a matcher.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionParameters {
    entries: Vec<(String, ParameterValue)>,
}

impl ActionParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name`, replacing a previous binding of the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, value: ParameterValue) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ParameterValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParameterValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }
}

/// The request flowing through routing and dispatch.
#[derive(Debug, Clone)]
pub struct Request {
    request_uri: String,
    method: Method,
    parameters: Vec<(String, String)>,
    controller_name: String,
    controller_action_name: String,
    controller_action_parameters: ActionParameters,
    dispatched: bool,
}

impl Default for Request {
    fn default() -> Self {
        Self {
            request_uri: String::new(),
            method: Method::GET,
            parameters: Vec::new(),
            controller_name: String::new(),
            controller_action_name: DEFAULT_ACTION.to_string(),
            controller_action_parameters: ActionParameters::new(),
            dispatched: false,
        }
    }
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a GET request for `uri`.
    pub fn with_uri(uri: impl Into<String>) -> Self {
        let mut request = Self::default();
        request.set_request_uri(uri);
        request
    }

    pub fn request_uri(&self) -> &str {
        &self.request_uri
    }

    pub fn set_request_uri(&mut self, uri: impl Into<String>) -> &mut Self {
        self.request_uri = uri.into();
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn set_method(&mut self, method: Method) -> &mut Self {
        self.method = method;
        self
    }

    pub fn is_get(&self) -> bool {
        self.method == Method::GET
    }

    pub fn is_post(&self) -> bool {
        self.method == Method::POST
    }

    pub fn is_put(&self) -> bool {
        self.method == Method::PUT
    }

    pub fn is_delete(&self) -> bool {
        self.method == Method::DELETE
    }

    pub fn is_head(&self) -> bool {
        self.method == Method::HEAD
    }

    pub fn is_options(&self) -> bool {
        self.method == Method::OPTIONS
    }

    /// Value of a raw parameter, `None` if absent.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameter(name).is_some()
    }

    pub fn parameters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.parameters.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Set a parameter, overwriting an existing one of the same name.
    pub fn set_parameter(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self.parameters.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.parameters.push((name, value)),
        }
        self
    }

    /// Set several parameters; every value is stored as a string.
    pub fn set_parameters<I, K, V>(&mut self, parameters: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        for (name, value) in parameters {
            self.set_parameter(name, value.to_string());
        }
        self
    }

    pub fn controller_name(&self) -> &str {
        &self.controller_name
    }

    pub fn set_controller_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.controller_name = name.into();
        self
    }

    pub fn controller_action_name(&self) -> &str {
        &self.controller_action_name
    }

    pub fn set_controller_action_name(&mut self, name: &str) -> &mut Self {
        self.controller_action_name = name.to_lowercase();
        self
    }

    pub fn controller_action_parameters(&self) -> &ActionParameters {
        &self.controller_action_parameters
    }

    pub fn set_controller_action_parameters(&mut self, parameters: ActionParameters) -> &mut Self {
        self.controller_action_parameters = parameters;
        self
    }

    pub fn is_dispatched(&self) -> bool {
        self.dispatched
    }

    pub fn set_dispatched(&mut self, dispatched: bool) -> &mut Self {
        self.dispatched = dispatched;
        self
    }

    /// Hand the request to another action, optionally on another controller.
    pub fn forward(&mut self, forward: &Forward) -> &mut Self {
        self.set_dispatched(false);
        self.set_controller_action_name(&forward.action);
        if let Some(controller) = &forward.controller {
            self.set_controller_name(controller.clone());
        }
        if let Some(parameters) = &forward.parameters {
            self.set_parameters(parameters.iter().map(|(n, v)| (n.clone(), v.clone())));
        }
        self
    }
}
