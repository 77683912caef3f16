//! Upstream provider interfaces
//!
//! Reflection never discovers callables on its own. A native-introspection
//! provider reports the static shape of classes and functions, and an
//! annotation provider reports the documented type alternatives for each
//! parameter slot and the return value. Both are queried, never constructed,
//! by the core.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ReflectResult, ReflectionError};
use crate::types::UNION_SEPARATOR;

/// Native facts about one formal parameter.
///
/// This is the only capability a parameter descriptor is built from. It is
/// checked by [`ParameterHandle::validate`] before any descriptor exists.
///
/// Deserialized handles are validated the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawParameterHandle")]
pub struct ParameterHandle {
    name: String,
    optional: bool,
    variadic: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<Value>,
    allows_null: bool,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    declared_type: Option<String>,
}

impl ParameterHandle {
    /// Create a required, non-nullable, untyped parameter
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: false,
            variadic: false,
            default: None,
            allows_null: false,
            declared_type: None,
        }
    }

    /// Mark the parameter as optional without a default value
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Give the parameter a default value (implies optional)
    pub fn with_default(mut self, value: Value) -> Self {
        self.optional = true;
        self.default = Some(value);
        self
    }

    /// Mark the parameter as variadic
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    /// Allow null to be passed
    pub fn nullable(mut self) -> Self {
        self.allows_null = true;
        self
    }

    /// Attach a native type hint
    pub fn typed(mut self, type_name: impl Into<String>) -> Self {
        self.declared_type = Some(type_name.into());
        self
    }

    /// Parameter name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True if the parameter has a default value or is variadic
    pub fn is_optional(&self) -> bool {
        self.optional || self.variadic
    }

    /// True if the parameter collects the remaining arguments
    pub fn is_variadic(&self) -> bool {
        self.variadic
    }

    /// Default value, if any
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Whether null is accepted
    pub fn allows_null(&self) -> bool {
        self.allows_null
    }

    /// Native type hint, if the host declared one
    pub fn declared_type(&self) -> Option<&str> {
        self.declared_type.as_deref()
    }

    /// Check that the handle describes a usable parameter
    pub fn validate(&self) -> ReflectResult<()> {
        let invalid = |reason: &str| ReflectionError::InvalidParameter {
            name: self.name.clone(),
            reason: reason.to_string(),
        };

        let mut chars = self.name.chars();
        match chars.next() {
            None => return Err(invalid("name is empty")),
            Some(c) if !(c.is_alphabetic() || c == '_') => {
                return Err(invalid("name must start with a letter or underscore"));
            }
            _ => {}
        }
        if !chars.all(|c| c.is_alphanumeric() || c == '_') {
            return Err(invalid("name is not an identifier"));
        }
        if self.default.is_some() && !self.optional {
            return Err(invalid("default value on a required parameter"));
        }
        if self.default.is_some() && self.variadic {
            return Err(invalid("variadic parameter cannot have a default value"));
        }
        if let Some(ty) = &self.declared_type {
            if ty.trim().is_empty() {
                return Err(invalid("declared type is empty"));
            }
        }
        Ok(())
    }
}

/// Wire form of a [`ParameterHandle`], checked before conversion
#[derive(Deserialize)]
struct RawParameterHandle {
    name: String,
    #[serde(default)]
    optional: bool,
    #[serde(default)]
    variadic: bool,
    #[serde(default, deserialize_with = "deserialize_present")]
    default: Option<Value>,
    #[serde(default)]
    allows_null: bool,
    #[serde(default, rename = "type")]
    declared_type: Option<String>,
}

impl TryFrom<RawParameterHandle> for ParameterHandle {
    type Error = ReflectionError;

    fn try_from(raw: RawParameterHandle) -> Result<Self, Self::Error> {
        let handle = ParameterHandle {
            name: raw.name,
            optional: raw.optional,
            variadic: raw.variadic,
            default: raw.default,
            allows_null: raw.allows_null,
            declared_type: raw.declared_type,
        };
        handle.validate()?;
        Ok(handle)
    }
}

/// Keep an explicit `null` default as `Some(Value::Null)` instead of "no default".
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Static shape of a function or method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallableShape {
    /// Callable name
    pub name: String,
    /// Formal parameters in declaration order
    #[serde(default)]
    pub parameters: Vec<ParameterHandle>,
}

impl CallableShape {
    /// Create a shape with the given parameters
    pub fn new(name: impl Into<String>, parameters: Vec<ParameterHandle>) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }
}

/// Method visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Callable from anywhere
    #[default]
    Public,
    /// Callable from the class and subclasses
    Protected,
    /// Callable from the class only
    Private,
}

/// Static shape of a method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodShape {
    /// Name and parameters
    #[serde(flatten)]
    pub callable: CallableShape,
    /// Declared visibility
    #[serde(default)]
    pub visibility: Visibility,
    /// Whether the method is static
    #[serde(default)]
    pub is_static: bool,
}

impl MethodShape {
    /// Create a public instance method
    pub fn public(name: impl Into<String>, parameters: Vec<ParameterHandle>) -> Self {
        Self {
            callable: CallableShape::new(name, parameters),
            visibility: Visibility::Public,
            is_static: false,
        }
    }

    /// Change the visibility
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Method name
    pub fn name(&self) -> &str {
        &self.callable.name
    }
}

/// Static shape of a class
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassShape {
    /// Class name
    pub name: String,
    /// Parent class name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Implemented interfaces
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<String>,
    /// Declared methods in declaration order
    #[serde(default)]
    pub methods: Vec<MethodShape>,
}

impl ClassShape {
    /// Create a class with no parent, interfaces or methods
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Look up a declared method by name
    pub fn method(&self, name: &str) -> Option<&MethodShape> {
        self.methods.iter().find(|m| m.name() == name)
    }
}

/// One documented type alternative
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeAnnotation {
    /// Type tag
    #[serde(rename = "type")]
    pub type_name: String,
    /// Free-text description
    #[serde(default)]
    pub description: String,
}

impl TypeAnnotation {
    /// Create a single annotation
    pub fn new(type_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            description: description.into(),
        }
    }

    /// Split a `|`-separated union into alternatives sharing one description.
    ///
    /// Empty members are kept so validation can reject them later.
    pub fn union(types: &str, description: &str) -> Vec<TypeAnnotation> {
        types
            .split(UNION_SEPARATOR)
            .map(|t| TypeAnnotation::new(t.trim(), description))
            .collect()
    }
}

/// Structured documentation for one callable
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CallableDoc {
    /// One-line summary
    #[serde(default)]
    pub short_description: String,
    /// Longer free text
    #[serde(default)]
    pub long_description: String,
    /// Alternatives per parameter slot, in documentation order
    #[serde(default)]
    pub params: Vec<Vec<TypeAnnotation>>,
    /// Alternatives for the return value
    #[serde(default)]
    pub returns: Vec<TypeAnnotation>,
}

impl CallableDoc {
    /// Create documentation with only a summary line
    pub fn summary(text: impl Into<String>) -> Self {
        Self {
            short_description: text.into(),
            ..Self::default()
        }
    }

    /// Append a parameter slot
    pub fn param(mut self, alternatives: Vec<TypeAnnotation>) -> Self {
        self.params.push(alternatives);
        self
    }

    /// Set the return alternatives
    pub fn returns(mut self, alternatives: Vec<TypeAnnotation>) -> Self {
        self.returns = alternatives;
        self
    }
}

/// Supplies the declared shape of classes and functions
pub trait IntrospectionProvider {
    /// Shape of a free function, or `None` if it does not exist
    fn function(&self, name: &str) -> Option<CallableShape>;

    /// Shape of a class, or `None` if it cannot be resolved
    fn class(&self, name: &str) -> Option<ClassShape>;
}

/// Supplies parsed documentation for callables
pub trait AnnotationProvider {
    /// Documentation of a free function
    fn function_doc(&self, name: &str) -> ReflectResult<Option<CallableDoc>>;

    /// Documentation of a method declared on `class`
    fn method_doc(&self, class: &str, method: &str) -> ReflectResult<Option<CallableDoc>>;
}
