//! In-memory signature registry
//!
//! [`SignatureRegistry`] implements both provider traits from a table of
//! shapes and documentation. It can be filled programmatically or loaded
//! from a JSON manifest:
//!
//! ```json
//! {
//!   "functions": [
//!     {
//!       "name": "lookup",
//!       "parameters": [{ "name": "key" }, { "name": "fallback", "optional": true, "default": null }],
//!       "doc": {
//!         "summary": "Find a value",
//!         "params": [{ "type": "int|string", "description": "key" }],
//!         "returns": { "type": "mixed" }
//!       }
//!     }
//!   ],
//!   "classes": [
//!     {
//!       "name": "Store",
//!       "parent": "BaseStore",
//!       "methods": [{ "name": "get", "parameters": [{ "name": "key" }], "visibility": "public" }]
//!     }
//!   ]
//! }
//! ```

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::error::{ReflectResult, ReflectionError};
use crate::provider::{
    AnnotationProvider, CallableDoc, CallableShape, ClassShape, IntrospectionProvider,
    MethodShape, ParameterHandle, TypeAnnotation, Visibility,
};

/// Shapes and documentation held in memory
#[derive(Debug, Clone, Default)]
pub struct SignatureRegistry {
    functions: FxHashMap<String, CallableShape>,
    function_docs: FxHashMap<String, CallableDoc>,
    classes: FxHashMap<String, ClassShape>,
    method_docs: FxHashMap<(String, String), CallableDoc>,
}

impl SignatureRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a free function, replacing any previous one with the same name
    pub fn add_function(&mut self, shape: CallableShape, doc: Option<CallableDoc>) {
        match doc {
            Some(doc) => {
                self.function_docs.insert(shape.name.clone(), doc);
            }
            None => {
                self.function_docs.remove(&shape.name);
            }
        }
        self.functions.insert(shape.name.clone(), shape);
    }

    /// Register a class shape
    pub fn add_class(&mut self, shape: ClassShape) {
        self.classes.insert(shape.name.clone(), shape);
    }

    /// Attach documentation to a method of a class
    pub fn add_method_doc(&mut self, class: &str, method: &str, doc: CallableDoc) {
        self.method_docs
            .insert((class.to_string(), method.to_string()), doc);
    }

    /// Number of registered functions
    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    /// Number of registered classes
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Load a registry from a JSON manifest file
    pub fn from_file(path: &Path) -> ReflectResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ReflectionError::Provider(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }

    /// Load a registry from a JSON manifest string
    pub fn from_json(content: &str) -> ReflectResult<Self> {
        let manifest: Manifest = serde_json::from_str(content)
            .map_err(|e| ReflectionError::Provider(format!("invalid manifest: {}", e)))?;

        let mut registry = Self::new();
        for function in manifest.functions {
            let shape = CallableShape::new(function.name, function.parameters);
            registry.add_function(shape, function.doc.map(CallableDoc::from));
        }
        for class in manifest.classes {
            let mut shape = ClassShape::new(class.name);
            shape.parent = class.parent;
            shape.interfaces = class.interfaces;
            for method in class.methods {
                if let Some(doc) = method.doc {
                    registry.add_method_doc(&shape.name, &method.name, doc.into());
                }
                shape.methods.push(MethodShape {
                    callable: CallableShape::new(method.name, method.parameters),
                    visibility: method.visibility,
                    is_static: method.is_static,
                });
            }
            registry.add_class(shape);
        }
        Ok(registry)
    }
}

impl IntrospectionProvider for SignatureRegistry {
    fn function(&self, name: &str) -> Option<CallableShape> {
        self.functions.get(name).cloned()
    }

    fn class(&self, name: &str) -> Option<ClassShape> {
        self.classes.get(name).cloned()
    }
}

impl AnnotationProvider for SignatureRegistry {
    fn function_doc(&self, name: &str) -> ReflectResult<Option<CallableDoc>> {
        Ok(self.function_docs.get(name).cloned())
    }

    fn method_doc(&self, class: &str, method: &str) -> ReflectResult<Option<CallableDoc>> {
        Ok(self
            .method_docs
            .get(&(class.to_string(), method.to_string()))
            .cloned())
    }
}

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    functions: Vec<ManifestFunction>,
    #[serde(default)]
    classes: Vec<ManifestClass>,
}

/// Free functions have no visibility or static flag
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestFunction {
    name: String,
    #[serde(default)]
    parameters: Vec<ParameterHandle>,
    #[serde(default)]
    doc: Option<ManifestDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestMethod {
    name: String,
    #[serde(default)]
    parameters: Vec<ParameterHandle>,
    #[serde(default)]
    visibility: Visibility,
    #[serde(default)]
    is_static: bool,
    #[serde(default)]
    doc: Option<ManifestDoc>,
}

#[derive(Debug, Deserialize)]
struct ManifestClass {
    name: String,
    #[serde(default)]
    parent: Option<String>,
    #[serde(default)]
    interfaces: Vec<String>,
    #[serde(default)]
    methods: Vec<ManifestMethod>,
}

#[derive(Debug, Deserialize)]
struct ManifestDoc {
    #[serde(default)]
    summary: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    params: Vec<ManifestType>,
    #[serde(default)]
    returns: Option<ManifestType>,
}

/// A `|`-separated union with one description
#[derive(Debug, Deserialize)]
struct ManifestType {
    #[serde(rename = "type")]
    types: String,
    #[serde(default)]
    description: String,
}

impl From<ManifestDoc> for CallableDoc {
    fn from(doc: ManifestDoc) -> Self {
        CallableDoc {
            short_description: doc.summary,
            long_description: doc.description,
            params: doc
                .params
                .iter()
                .map(|p| TypeAnnotation::union(&p.types, &p.description))
                .collect(),
            returns: doc
                .returns
                .map(|r| TypeAnnotation::union(&r.types, &r.description))
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MANIFEST: &str = r#"{
        "functions": [
            {
                "name": "lookup",
                "parameters": [
                    { "name": "key" },
                    { "name": "fallback", "optional": true, "default": null, "allows_null": true }
                ],
                "doc": {
                    "summary": "Find a value",
                    "params": [{ "type": "int|string", "description": "key" }],
                    "returns": { "type": "mixed" }
                }
            }
        ],
        "classes": [
            {
                "name": "Store",
                "parent": "BaseStore",
                "methods": [
                    {
                        "name": "get",
                        "parameters": [{ "name": "key", "type": "string" }],
                        "doc": { "summary": "Read a key" }
                    },
                    { "name": "flush", "visibility": "private" }
                ]
            }
        ]
    }"#;

    #[test]
    fn test_load_manifest() {
        let registry = SignatureRegistry::from_json(MANIFEST).unwrap();
        assert_eq!(registry.function_count(), 1);
        assert_eq!(registry.class_count(), 1);

        let lookup = registry.function("lookup").unwrap();
        assert_eq!(lookup.parameters.len(), 2);
        assert!(lookup.parameters[1].is_optional());
        assert_eq!(lookup.parameters[1].default_value(), Some(&json!(null)));

        let doc = registry.function_doc("lookup").unwrap().unwrap();
        assert_eq!(doc.short_description, "Find a value");
        assert_eq!(doc.params[0].len(), 2);
        assert_eq!(doc.returns, vec![TypeAnnotation::new("mixed", "")]);
    }

    #[test]
    fn test_load_manifest_classes() {
        let registry = SignatureRegistry::from_json(MANIFEST).unwrap();
        let store = registry.class("Store").unwrap();
        assert_eq!(store.parent.as_deref(), Some("BaseStore"));
        assert_eq!(store.methods.len(), 2);
        assert_eq!(store.method("flush").unwrap().visibility, Visibility::Private);
        assert_eq!(
            store.method("get").unwrap().callable.parameters[0].declared_type(),
            Some("string")
        );

        let doc = registry.method_doc("Store", "get").unwrap().unwrap();
        assert_eq!(doc.short_description, "Read a key");
        assert!(registry.method_doc("Store", "flush").unwrap().is_none());
    }

    #[test]
    fn test_unknown_entries() {
        let registry = SignatureRegistry::new();
        assert!(registry.function("missing").is_none());
        assert!(registry.class("Missing").is_none());
        assert!(registry.function_doc("missing").unwrap().is_none());
    }

    #[test]
    fn test_invalid_manifest() {
        let err = SignatureRegistry::from_json("{ \"functions\": 3 }").unwrap_err();
        assert!(matches!(err, ReflectionError::Provider(_)));
    }

    #[test]
    fn test_function_entries_reject_method_fields() {
        let err = SignatureRegistry::from_json(
            r#"{ "functions": [{ "name": "f", "visibility": "private" }] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ReflectionError::Provider(_)));

        let err = SignatureRegistry::from_json(r#"{ "functions": [{ "name": "f", "is_static": true }] }"#)
            .unwrap_err();
        assert!(matches!(err, ReflectionError::Provider(_)));
    }

    #[test]
    fn test_method_entries_keep_method_fields() {
        let registry = SignatureRegistry::from_json(
            r#"{ "classes": [{ "name": "C", "methods": [{ "name": "make", "is_static": true }] }] }"#,
        )
        .unwrap();
        assert!(registry.class("C").unwrap().method("make").unwrap().is_static);

        let err = SignatureRegistry::from_json(
            r#"{ "classes": [{ "name": "C", "methods": [{ "name": "m", "static": true }] }] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ReflectionError::Provider(_)));
    }

    #[test]
    fn test_invalid_parameter_in_manifest() {
        let err = SignatureRegistry::from_json(
            r#"{ "functions": [{ "name": "f", "parameters": [{ "name": "a", "default": 1 }] }] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ReflectionError::Provider(_)));
    }

    #[test]
    fn test_replace_function_clears_doc() {
        let mut registry = SignatureRegistry::new();
        registry.add_function(
            CallableShape::new("f", Vec::new()),
            Some(CallableDoc::summary("old")),
        );
        registry.add_function(CallableShape::new("f", Vec::new()), None);
        assert!(registry.function_doc("f").unwrap().is_none());
    }
}
