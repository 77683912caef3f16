//! Function and method reflectors
//!
//! A [`ReflectionFunction`] wraps one callable: its name, optional namespace,
//! documentation text, and the non-empty list of prototypes produced by
//! [`crate::expand::build_prototypes`]. Methods are functions with a
//! declaring class.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::MismatchPolicy;
use crate::error::ReflectResult;
use crate::expand::build_prototypes;
use crate::namespace::normalize_namespace;
use crate::provider::{CallableDoc, CallableShape};
use crate::prototype::Prototype;

/// Reflected function or method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReflectionFunction {
    name: String,
    namespace: Option<String>,
    class: Option<String>,
    description: String,
    doc_comment: String,
    prototypes: Vec<Prototype>,
    invoke_arguments: Vec<Value>,
}

impl ReflectionFunction {
    /// Reflect a free function from its shape and documentation
    pub fn new(
        shape: &CallableShape,
        doc: Option<&CallableDoc>,
        policy: MismatchPolicy,
    ) -> ReflectResult<Self> {
        Self::build(shape, None, doc, policy)
    }

    /// Reflect a method declared on `class`
    pub fn method(
        class: &str,
        shape: &CallableShape,
        doc: Option<&CallableDoc>,
        policy: MismatchPolicy,
    ) -> ReflectResult<Self> {
        Self::build(shape, Some(class), doc, policy)
    }

    fn build(
        shape: &CallableShape,
        class: Option<&str>,
        doc: Option<&CallableDoc>,
        policy: MismatchPolicy,
    ) -> ReflectResult<Self> {
        let prototypes = build_prototypes(&shape.name, &shape.parameters, doc, policy)?;
        debug!(
            name = %shape.name,
            class = class.unwrap_or_default(),
            prototypes = prototypes.len(),
            "reflected callable"
        );

        let (doc_comment, description) = match doc {
            Some(doc) => {
                let description = [&doc.long_description, &doc.short_description]
                    .into_iter()
                    .map(|text| text.trim())
                    .find(|text| !text.is_empty())
                    .unwrap_or(shape.name.as_str())
                    .to_string();
                (doc.short_description.trim().to_string(), description)
            }
            None => (String::new(), shape.name.clone()),
        };

        Ok(Self {
            name: shape.name.clone(),
            namespace: None,
            class: class.map(str::to_string),
            description,
            doc_comment,
            prototypes,
            invoke_arguments: Vec::new(),
        })
    }

    /// Callable name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace-qualified name (`namespace.name`), as a dispatcher would register it
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}.{}", ns, self.name),
            None => self.name.clone(),
        }
    }

    /// Namespace, if any
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Set or clear (with `None` or `""`) the namespace
    pub fn set_namespace(&mut self, namespace: Option<&str>) -> ReflectResult<()> {
        self.namespace = normalize_namespace(namespace)?;
        Ok(())
    }

    /// Declaring class for methods
    pub fn declaring_class(&self) -> Option<&str> {
        self.class.as_deref()
    }

    /// True for methods
    pub fn is_method(&self) -> bool {
        self.class.is_some()
    }

    /// Help text: long description, short description or the name
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Replace the help text
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Documentation summary; empty when undocumented
    pub fn doc_comment(&self) -> &str {
        &self.doc_comment
    }

    /// All prototypes, in dispatch preference order. Never empty.
    pub fn prototypes(&self) -> &[Prototype] {
        &self.prototypes
    }

    /// `[return, param...]` per prototype
    pub fn signatures(&self) -> Vec<Vec<&str>> {
        self.prototypes.iter().map(Prototype::signature).collect()
    }

    /// Extra arguments the dispatcher passes on invocation
    pub fn invoke_arguments(&self) -> &[Value] {
        &self.invoke_arguments
    }

    /// Replace the invoke arguments
    pub fn set_invoke_arguments(&mut self, arguments: Vec<Value>) {
        self.invoke_arguments = arguments;
    }
}
