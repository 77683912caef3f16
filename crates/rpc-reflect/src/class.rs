//! Class reflector
//!
//! Aggregates the method reflectors of one class under its name and
//! namespace. Methods keep their enumeration order; lookups by name go
//! through an index map.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ReflectResult, ReflectionError};
use crate::function::ReflectionFunction;
use crate::namespace::normalize_namespace;

/// Reflected class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawClass")]
pub struct ReflectionClass {
    name: String,
    namespace: Option<String>,
    /// Method name to position in `methods`, rebuilt on load
    #[serde(skip)]
    method_indices: FxHashMap<String, usize>,
    /// Methods in enumeration order
    methods: Vec<ReflectionFunction>,
}

impl ReflectionClass {
    /// Create a class from already reflected methods.
    ///
    /// If two methods share a name the first one wins.
    pub fn new(name: impl Into<String>, methods: Vec<ReflectionFunction>) -> Self {
        let mut method_indices = FxHashMap::default();
        let mut unique = Vec::with_capacity(methods.len());
        for method in methods {
            if method_indices.contains_key(method.name()) {
                continue;
            }
            method_indices.insert(method.name().to_string(), unique.len());
            unique.push(method);
        }

        Self {
            name: name.into(),
            namespace: None,
            method_indices,
            methods: unique,
        }
    }

    /// Class name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace, if any
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Set or clear the namespace of the class and all of its methods
    pub fn set_namespace(&mut self, namespace: Option<&str>) -> ReflectResult<()> {
        let namespace = normalize_namespace(namespace)?;
        for method in &mut self.methods {
            method.set_namespace(namespace.as_deref())?;
        }
        self.namespace = namespace;
        Ok(())
    }

    /// Methods in enumeration order
    pub fn methods(&self) -> &[ReflectionFunction] {
        &self.methods
    }

    /// Look up a method by name
    pub fn method(&self, name: &str) -> Option<&ReflectionFunction> {
        self.method_indices
            .get(name)
            .and_then(|&i| self.methods.get(i))
    }

    /// Check if a method was reflected
    pub fn has_method(&self, name: &str) -> bool {
        self.method_indices.contains_key(name)
    }

    /// Method names in enumeration order
    pub fn method_names(&self) -> Vec<&str> {
        self.methods.iter().map(ReflectionFunction::name).collect()
    }

    /// Pass the same invoke arguments to every method
    pub fn set_invoke_arguments(&mut self, arguments: Vec<Value>) {
        for method in &mut self.methods {
            method.set_invoke_arguments(arguments.clone());
        }
    }

    /// Number of reflected methods
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Check if no method was reflected
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

/// Serialized form of a class; the name index is derived, never loaded
#[derive(Deserialize)]
struct RawClass {
    name: String,
    #[serde(default)]
    namespace: Option<String>,
    #[serde(default)]
    methods: Vec<ReflectionFunction>,
}

impl TryFrom<RawClass> for ReflectionClass {
    type Error = ReflectionError;

    fn try_from(raw: RawClass) -> Result<Self, Self::Error> {
        let mut class = ReflectionClass::new(raw.name, raw.methods);
        class.namespace = normalize_namespace(raw.namespace.as_deref())?;
        Ok(class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MismatchPolicy;
    use crate::provider::CallableShape;
    use serde_json::json;

    fn method(name: &str) -> ReflectionFunction {
        ReflectionFunction::method(
            "Calculator",
            &CallableShape::new(name, Vec::new()),
            None,
            MismatchPolicy::Tolerate,
        )
        .unwrap()
    }

    #[test]
    fn test_lookup_and_order() {
        let class = ReflectionClass::new("Calculator", vec![method("add"), method("sub")]);
        assert_eq!(class.name(), "Calculator");
        assert_eq!(class.method_names(), vec!["add", "sub"]);
        assert_eq!(class.method("sub").map(|m| m.name()), Some("sub"));
        assert!(class.has_method("add"));
        assert!(class.method("mul").is_none());
        assert_eq!(class.len(), 2);
    }

    #[test]
    fn test_duplicate_names_keep_first() {
        let mut first = method("add");
        first.set_description("first");
        let class = ReflectionClass::new("Calculator", vec![first, method("add")]);
        assert_eq!(class.len(), 1);
        assert_eq!(class.method("add").unwrap().description(), "first");
    }

    #[test]
    fn test_namespace_propagates() {
        let mut class = ReflectionClass::new("Calculator", vec![method("add")]);
        class.set_namespace(Some("math")).unwrap();
        assert_eq!(class.namespace(), Some("math"));
        assert_eq!(class.method("add").unwrap().qualified_name(), "math.add");

        assert!(class.set_namespace(Some("m a t h")).is_err());
        assert_eq!(class.namespace(), Some("math"));
    }

    #[test]
    fn test_invoke_arguments_propagate() {
        let mut class = ReflectionClass::new("Calculator", vec![method("add"), method("sub")]);
        class.set_invoke_arguments(vec![json!(1)]);
        assert!(class
            .methods()
            .iter()
            .all(|m| m.invoke_arguments() == [json!(1)]));
    }

    #[test]
    fn test_empty_class() {
        let class = ReflectionClass::new("Marker", Vec::new());
        assert!(class.is_empty());
    }

    #[test]
    fn test_loaded_index_is_rebuilt() {
        let class: ReflectionClass = serde_json::from_value(json!({
            "name": "C",
            "method_indices": {"add": 5},
            "methods": []
        }))
        .unwrap();
        assert!(!class.has_method("add"));
        assert!(class.method("add").is_none());
        assert!(class.is_empty());
    }

    #[test]
    fn test_serialized_class_loads_back() {
        let mut class = ReflectionClass::new("Calculator", vec![method("add"), method("sub")]);
        class.set_namespace(Some("math")).unwrap();

        let exported = serde_json::to_value(&class).unwrap();
        assert!(exported.get("method_indices").is_none());

        let loaded: ReflectionClass = serde_json::from_value(exported).unwrap();
        assert_eq!(loaded, class);
        assert_eq!(loaded.method("sub").map(|m| m.name()), Some("sub"));
    }

    #[test]
    fn test_loaded_namespace_is_validated() {
        let loaded = serde_json::from_value::<ReflectionClass>(json!({
            "name": "C",
            "namespace": "not valid!",
            "methods": []
        }));
        assert!(loaded.is_err());
    }
}
