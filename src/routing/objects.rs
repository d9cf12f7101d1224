//! Object placeholder resolution.
//!
//! # Responsibilities
//! - Map type names used in `(Type)name` placeholders to factories
//! - Look records up by primary key through a `RecordProvider`
//! - Construct plain value types from the URI segment
//!
//! # Design Decisions
//! - Registration happens at startup; lookups are read-only
//! - An unknown record key binds the empty (default) record
//! - Unknown type names are errors, not non-matches

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::mvc::request::ObjectValue;
use crate::persistence::{Record, RecordProvider};
use crate::routing::error::RoutingError;

type ObjectFactory = Arc<dyn Fn(&str) -> Result<ObjectValue, RoutingError> + Send + Sync>;

/// Type name → factory table for object placeholders.
#[derive(Clone, Default)]
pub struct ObjectRegistry {
    factories: HashMap<String, ObjectFactory>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type constructed from the raw segment.
    pub fn register<T, E, F>(&mut self, class: &str, construct: F) -> &mut Self
    where
        T: Any + Send + Sync,
        E: fmt::Display,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    {
        let name = class.to_string();
        let factory: ObjectFactory = Arc::new(move |segment: &str| {
            construct(segment)
                .map(|instance| ObjectValue::new(name.clone(), instance))
                .map_err(|e| RoutingError::ObjectConstruction {
                    class: name.clone(),
                    value: segment.to_string(),
                    reason: e.to_string(),
                })
        });
        self.factories.insert(class.to_string(), factory);
        self
    }

    /// Register a record type looked up by primary key.
    pub fn register_record<T: Record>(
        &mut self,
        class: &str,
        provider: Arc<dyn RecordProvider<T>>,
    ) -> &mut Self {
        let name = class.to_string();
        let factory: ObjectFactory = Arc::new(move |primary_key: &str| {
            let record = match provider.find(primary_key)? {
                Some(record) => record,
                None => {
                    tracing::debug!(class = %name, primary_key, "Record not found, binding empty record");
                    T::default()
                }
            };
            Ok(ObjectValue::new(name.clone(), record))
        });
        self.factories.insert(class.to_string(), factory);
        self
    }

    pub fn contains(&self, class: &str) -> bool {
        self.factories.contains_key(class)
    }

    /// Resolve `segment` into an instance of `class`.
    pub fn resolve(&self, class: &str, segment: &str) -> Result<ObjectValue, RoutingError> {
        let factory = self
            .factories
            .get(class)
            .ok_or_else(|| RoutingError::UnknownObjectType(class.to_string()))?;
        factory(segment)
    }
}

impl fmt::Debug for ObjectRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.factories.keys().collect();
        names.sort();
        f.debug_struct("ObjectRegistry").field("types", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryProvider;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Account {
        name: String,
    }

    impl Record for Account {}

    #[derive(Debug, PartialEq)]
    struct Port(u16);

    fn registry() -> ObjectRegistry {
        let accounts = Arc::new(MemoryProvider::new());
        accounts.insert("7", Account { name: "seven".into() });

        let mut registry = ObjectRegistry::new();
        registry
            .register_record::<Account>("Account", accounts)
            .register("Port", |s: &str| s.parse::<u16>().map(Port));
        registry
    }

    #[test]
    fn test_record_found_by_key() {
        let value = registry().resolve("Account", "7").unwrap();
        assert_eq!(value.class(), "Account");
        assert_eq!(value.downcast_ref::<Account>().unwrap().name, "seven");
    }

    #[test]
    fn test_missing_record_binds_empty_instance() {
        let value = registry().resolve("Account", "8").unwrap();
        assert_eq!(value.downcast_ref::<Account>(), Some(&Account::default()));
    }

    #[test]
    fn test_constructed_value() {
        let registry = registry();
        assert_eq!(registry.resolve("Port", "8080").unwrap().downcast_ref::<Port>(), Some(&Port(8080)));

        let err = registry.resolve("Port", "http").unwrap_err();
        assert!(matches!(err, RoutingError::ObjectConstruction { ref class, .. } if class == "Port"));
    }

    #[test]
    fn test_unknown_type() {
        let err = registry().resolve("Nope", "1").unwrap_err();
        assert!(matches!(err, RoutingError::UnknownObjectType(ref name) if name == "Nope"));
        assert!(!registry().contains("Nope"));
    }
}
