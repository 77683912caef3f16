//! Parameter descriptors
//!
//! A descriptor combines the native facts of one formal parameter with the
//! type and description chosen for one prototype. Optionality, default and
//! nullability are passed through from the [`ParameterHandle`] unchanged.
//!
//! The setters exist for the finishing phase right after construction
//! (prototype expansion assigns the position); after that a descriptor is
//! treated as a value.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ReflectResult;
use crate::provider::ParameterHandle;
use crate::types::MIXED;

/// One formal parameter of a prototype
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReflectionParameter {
    handle: ParameterHandle,
    #[serde(rename = "type")]
    type_name: String,
    description: String,
    position: Option<usize>,
}

impl ReflectionParameter {
    /// Build a descriptor from a native handle.
    ///
    /// `type_name` defaults to `mixed` and `description` to the empty string.
    pub fn new(
        handle: ParameterHandle,
        type_name: Option<&str>,
        description: Option<&str>,
    ) -> ReflectResult<Self> {
        handle.validate()?;
        Ok(Self {
            handle,
            type_name: type_name.unwrap_or(MIXED).to_string(),
            description: description.unwrap_or_default().to_string(),
            position: None,
        })
    }

    /// Parameter name
    pub fn name(&self) -> &str {
        self.handle.name()
    }

    /// Type tag
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Replace the type tag
    pub fn set_type(&mut self, type_name: impl Into<String>) {
        self.type_name = type_name.into();
    }

    /// Description text
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Replace the description
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Zero-based position, `None` until placed in a prototype
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Assign the position
    pub fn set_position(&mut self, position: usize) {
        self.position = Some(position);
    }

    /// Whether null is accepted
    pub fn allows_null(&self) -> bool {
        self.handle.allows_null()
    }

    /// Whether the argument may be omitted
    pub fn is_optional(&self) -> bool {
        self.handle.is_optional()
    }

    /// Whether the parameter is variadic
    pub fn is_variadic(&self) -> bool {
        self.handle.is_variadic()
    }

    /// Default value when optional
    pub fn default_value(&self) -> Option<&Value> {
        self.handle.default_value()
    }

    /// The native handle this descriptor was built from
    pub fn handle(&self) -> &ParameterHandle {
        &self.handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReflectionError;
    use serde_json::json;

    fn param() -> ReflectionParameter {
        ReflectionParameter::new(ParameterHandle::new("type").nullable(), None, None).unwrap()
    }

    #[test]
    fn test_constructor() {
        let p = param();
        assert_eq!(p.name(), "type");
        assert_eq!(p.type_name(), "mixed");
        assert_eq!(p.description(), "");
        assert_eq!(p.position(), None);
    }

    #[test]
    fn test_constructor_rejects_bad_handle() {
        let err = ReflectionParameter::new(ParameterHandle::new(""), None, None).unwrap_err();
        assert!(matches!(err, ReflectionError::InvalidParameter { .. }));
    }

    #[test]
    fn test_pass_through_facts() {
        let p = param();
        assert!(p.allows_null());
        assert!(!p.is_optional());

        let q = ReflectionParameter::new(
            ParameterHandle::new("limit").with_default(json!(10)),
            Some("int"),
            Some("page size"),
        )
        .unwrap();
        assert!(q.is_optional());
        assert!(!q.allows_null());
        assert_eq!(q.default_value(), Some(&json!(10)));
        assert_eq!(q.type_name(), "int");
        assert_eq!(q.description(), "page size");
    }

    #[test]
    fn test_get_set_type() {
        let mut p = param();
        p.set_type("string");
        assert_eq!(p.type_name(), "string");
        assert_eq!(p.description(), "");
        assert_eq!(p.position(), None);
    }

    #[test]
    fn test_get_set_description() {
        let mut p = param();
        p.set_description("parameter description");
        assert_eq!(p.description(), "parameter description");
        assert_eq!(p.type_name(), "mixed");
        assert_eq!(p.position(), None);
    }

    #[test]
    fn test_set_position() {
        let mut p = param();
        p.set_position(3);
        assert_eq!(p.position(), Some(3));
        assert_eq!(p.type_name(), "mixed");
        assert_eq!(p.description(), "");
        assert_eq!(p.name(), "type");
    }

    #[test]
    fn test_deserialize_rejects_bad_handle() {
        let loaded = serde_json::from_value::<ReflectionParameter>(json!({
            "handle": {"name": "not a name", "default": 3},
            "type": "int",
            "description": "",
            "position": 0
        }));
        assert!(loaded.is_err());

        let loaded = serde_json::from_value::<ReflectionParameter>(json!({
            "handle": {"name": "count", "default": 3},
            "type": "int",
            "description": "",
            "position": 0
        }));
        assert!(loaded.is_err());
    }

    #[test]
    fn test_serialized_parameter_loads_back() {
        let mut p = ReflectionParameter::new(
            ParameterHandle::new("count").with_default(json!(3)),
            Some("int"),
            Some("how many"),
        )
        .unwrap();
        p.set_position(1);

        let loaded: ReflectionParameter =
            serde_json::from_value(serde_json::to_value(&p).unwrap()).unwrap();
        assert_eq!(loaded, p);
        assert!(loaded.is_optional());
    }
}
