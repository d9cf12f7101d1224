//! Object container.
//!
//! # Responsibilities
//! - Map controller identifiers to controller factories
//! - Map matcher kinds to matcher factories
//! - Own the object registry used by `(Type)name` placeholders
//!
//! # Design Decisions
//! - Built once at startup, then shared read-only behind an `Arc`
//! - Capability checks are trait bounds on registration; lookups can only
//!   fail because a name is unknown
//! - The built-in `default` and `uri` matchers are always registered

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::config::schema::{DEFAULT_MATCHER, URI_MATCHER};
use crate::mvc::controller::Controller;
use crate::mvc::error::DispatchError;
use crate::routing::error::RoutingError;
use crate::routing::matcher::{DefaultMatcher, Matcher};
use crate::routing::objects::ObjectRegistry;
use crate::routing::uri_matcher::UriMatcher;

type ControllerFactory = Arc<dyn Fn() -> Box<dyn Controller> + Send + Sync>;
type MatcherFactory = Arc<dyn Fn(&Arc<Container>) -> Box<dyn Matcher> + Send + Sync>;

/// Registry of everything the Router and Dispatcher create by name.
pub struct Container {
    controllers: HashMap<String, ControllerFactory>,
    matchers: HashMap<String, MatcherFactory>,
    objects: ObjectRegistry,
}

impl Container {
    /// Create a container with the built-in matchers registered.
    pub fn new() -> Self {
        let mut container = Self {
            controllers: HashMap::new(),
            matchers: HashMap::new(),
            objects: ObjectRegistry::new(),
        };
        container
            .register_matcher(DEFAULT_MATCHER, |_| DefaultMatcher::new())
            .register_matcher(URI_MATCHER, |container| UriMatcher::new(container.clone()));
        container
    }

    /// Register a controller factory; a fresh controller is built per dispatch iteration.
    pub fn register_controller<C, F>(&mut self, name: &str, factory: F) -> &mut Self
    where
        C: Controller + 'static,
        F: Fn() -> C + Send + Sync + 'static,
    {
        let factory: ControllerFactory = Arc::new(move || Box::new(factory()) as Box<dyn Controller>);
        self.controllers.insert(name.to_string(), factory);
        self
    }

    /// Register a matcher kind usable in the routing configuration.
    pub fn register_matcher<M, F>(&mut self, kind: &str, factory: F) -> &mut Self
    where
        M: Matcher + 'static,
        F: Fn(&Arc<Container>) -> M + Send + Sync + 'static,
    {
        let factory: MatcherFactory =
            Arc::new(move |container: &Arc<Container>| Box::new(factory(container)) as Box<dyn Matcher>);
        self.matchers.insert(kind.to_string(), factory);
        self
    }

    pub fn objects(&self) -> &ObjectRegistry {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut ObjectRegistry {
        &mut self.objects
    }

    pub fn has_controller(&self, name: &str) -> bool {
        self.controllers.contains_key(name)
    }

    pub fn has_matcher(&self, kind: &str) -> bool {
        self.matchers.contains_key(kind)
    }

    /// Registered controller identifiers, sorted.
    pub fn controller_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.controllers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Build the controller registered as `name`.
    pub fn create_controller(&self, name: &str) -> Result<Box<dyn Controller>, DispatchError> {
        self.controllers
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| DispatchError::UnknownController(name.to_string()))
    }

    /// Build a matcher of the given kind.
    pub fn create_matcher(self: &Arc<Self>, kind: &str) -> Result<Box<dyn Matcher>, RoutingError> {
        self.matchers
            .get(kind)
            .map(|factory| factory(self))
            .ok_or_else(|| RoutingError::UnknownMatcher(kind.to_string()))
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut matchers: Vec<_> = self.matchers.keys().collect();
        matchers.sort();
        f.debug_struct("Container")
            .field("controllers", &self.controller_names())
            .field("matchers", &matchers)
            .field("objects", &self.objects)
            .finish()
    }
}
