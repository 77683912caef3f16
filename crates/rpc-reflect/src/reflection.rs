//! Reflection entry points
//!
//! [`Reflection`] ties the two upstream providers and a
//! [`ReflectionConfig`] together and builds reflectors on demand. Each call
//! produces an independent object graph; nothing is cached between calls.

use rustc_hash::FxHashSet;
use serde_json::Value;
use tracing::{debug, trace};

use crate::class::ReflectionClass;
use crate::config::ReflectionConfig;
use crate::error::{ReflectResult, ReflectionError};
use crate::function::ReflectionFunction;
use crate::namespace::normalize_namespace;
use crate::provider::{
    AnnotationProvider, CallableDoc, ClassShape, IntrospectionProvider, MethodShape, Visibility,
};

/// Per-call options for [`Reflection::reflect_class_with`]
#[derive(Debug, Clone, Default)]
pub struct ClassOptions<'a> {
    /// Method names to exclude, in addition to the configured denylist
    pub denylist: &'a [&'a str],
    /// Namespace override; falls back to the configured namespace
    pub namespace: Option<&'a str>,
    /// Invoke arguments given to every method
    pub invoke_arguments: Vec<Value>,
}

/// Per-call options for [`Reflection::reflect_function_with`]
#[derive(Debug, Clone, Default)]
pub struct FunctionOptions<'a> {
    /// Namespace override; falls back to the configured namespace
    pub namespace: Option<&'a str>,
    /// Invoke arguments
    pub invoke_arguments: Vec<Value>,
}

/// Builds function and class reflectors from injected providers
pub struct Reflection<'p> {
    introspection: &'p dyn IntrospectionProvider,
    annotations: &'p dyn AnnotationProvider,
    config: ReflectionConfig,
}

impl<'p> Reflection<'p> {
    /// Create a reflector with the default configuration
    pub fn new(
        introspection: &'p dyn IntrospectionProvider,
        annotations: &'p dyn AnnotationProvider,
    ) -> Self {
        Self {
            introspection,
            annotations,
            config: ReflectionConfig::default(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: ReflectionConfig) -> ReflectResult<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Active configuration
    pub fn config(&self) -> &ReflectionConfig {
        &self.config
    }

    /// Reflect a free function
    pub fn reflect_function(&self, name: &str) -> ReflectResult<ReflectionFunction> {
        self.reflect_function_with(name, FunctionOptions::default())
    }

    /// Reflect a free function with per-call options
    pub fn reflect_function_with(
        &self,
        name: &str,
        options: FunctionOptions<'_>,
    ) -> ReflectResult<ReflectionFunction> {
        let shape = self
            .introspection
            .function(name)
            .ok_or_else(|| ReflectionError::UnknownFunction {
                name: name.to_string(),
            })?;
        let doc = self.annotations.function_doc(name)?;

        let mut function =
            ReflectionFunction::new(&shape, doc.as_ref(), self.config.mismatch_policy)?;
        function.set_namespace(self.namespace_for(options.namespace)?.as_deref())?;
        function.set_invoke_arguments(options.invoke_arguments);
        Ok(function)
    }

    /// Reflect the public methods of a class, skipping `denylist`
    pub fn reflect_class(&self, name: &str, denylist: &[&str]) -> ReflectResult<ReflectionClass> {
        self.reflect_class_with(
            name,
            ClassOptions {
                denylist,
                ..ClassOptions::default()
            },
        )
    }

    /// Reflect the public methods of a class with per-call options
    pub fn reflect_class_with(
        &self,
        name: &str,
        options: ClassOptions<'_>,
    ) -> ReflectResult<ReflectionClass> {
        let shape = self.resolve_class(name)?;
        let namespace = self.namespace_for(options.namespace)?;

        let mut methods = Vec::new();
        for (declaring, method) in self.enumerate_methods(&shape)? {
            let denied = options.denylist.iter().any(|name| *name == method.name());
            if denied || self.config.is_denied(method.name()) {
                trace!(class = %shape.name, method = method.name(), "skipping denied method");
                continue;
            }

            let doc = self.method_doc(&declaring, method.name())?;
            methods.push(ReflectionFunction::method(
                &declaring,
                &method.callable,
                doc.as_ref(),
                self.config.mismatch_policy,
            )?);
        }

        let mut class = ReflectionClass::new(shape.name.clone(), methods);
        class.set_namespace(namespace.as_deref())?;
        class.set_invoke_arguments(options.invoke_arguments);
        debug!(class = %shape.name, methods = class.len(), "reflected class");
        Ok(class)
    }

    fn namespace_for(&self, requested: Option<&str>) -> ReflectResult<Option<String>> {
        match requested {
            Some(ns) => normalize_namespace(Some(ns)),
            None => normalize_namespace(self.config.namespace.as_deref()),
        }
    }

    fn resolve_class(&self, name: &str) -> ReflectResult<ClassShape> {
        self.introspection
            .class(name)
            .ok_or_else(|| ReflectionError::UnknownClass {
                name: name.to_string(),
            })
    }

    /// Public methods of `shape`, then inherited public methods not overridden,
    /// each paired with the name of the class that declares it.
    fn enumerate_methods(&self, shape: &ClassShape) -> ReflectResult<Vec<(String, MethodShape)>> {
        let mut seen_methods = FxHashSet::default();
        let mut seen_classes = FxHashSet::default();
        let mut out = Vec::new();

        let mut current = Some(shape.clone());
        while let Some(class) = current.take() {
            if !seen_classes.insert(class.name.clone()) {
                break;
            }
            for method in class.methods {
                if !seen_methods.insert(method.name().to_string()) {
                    continue;
                }
                if method.visibility == Visibility::Public {
                    out.push((class.name.clone(), method));
                }
            }
            if !self.config.include_inherited {
                break;
            }
            current = match class.parent {
                Some(parent) => Some(self.resolve_class(&parent)?),
                None => None,
            };
        }

        Ok(out)
    }

    /// Documentation of `class::method`, inherited from ancestors and
    /// interfaces when the method itself is undocumented.
    fn method_doc(&self, class: &str, method: &str) -> ReflectResult<Option<CallableDoc>> {
        if let Some(doc) = self.annotations.method_doc(class, method)? {
            return Ok(Some(doc));
        }
        if !self.config.inherit_docs {
            return Ok(None);
        }

        // Parent chain first, then interfaces of every class on it.
        let mut chain = Vec::new();
        let mut seen = FxHashSet::default();
        let mut current = self.introspection.class(class);
        while let Some(shape) = current {
            if !seen.insert(shape.name.clone()) {
                break;
            }
            current = shape
                .parent
                .as_deref()
                .and_then(|p| self.introspection.class(p));
            chain.push(shape);
        }

        for ancestor in chain.iter().skip(1) {
            if ancestor.method(method).is_some() {
                if let Some(doc) = self.annotations.method_doc(&ancestor.name, method)? {
                    trace!(class, method, from = %ancestor.name, "inherited documentation");
                    return Ok(Some(doc));
                }
            }
        }

        let mut pending: Vec<String> = chain
            .iter()
            .flat_map(|c| c.interfaces.iter().cloned())
            .collect();
        pending.reverse();
        while let Some(interface) = pending.pop() {
            if !seen.insert(interface.clone()) {
                continue;
            }
            if let Some(doc) = self.annotations.method_doc(&interface, method)? {
                trace!(class, method, from = %interface, "inherited documentation");
                return Ok(Some(doc));
            }
            if let Some(shape) = self.introspection.class(&interface) {
                pending.extend(shape.interfaces.into_iter().rev());
            }
        }

        Ok(None)
    }
}
