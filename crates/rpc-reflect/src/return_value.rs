//! Return value descriptor

use serde::{Deserialize, Serialize};

/// Return type and description of one prototype
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReflectionReturnValue {
    #[serde(rename = "type")]
    type_name: String,
    description: String,
}

impl ReflectionReturnValue {
    /// Create a return descriptor
    pub fn new(type_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            description: description.into(),
        }
    }

    /// Type tag
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Narrow the type tag
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setters_are_isolated() {
        let mut r = ReflectionReturnValue::new("void", "No return");
        r.set_type("bool");
        assert_eq!(r.type_name(), "bool");
        assert_eq!(r.description(), "No return");

        r.set_description("success flag");
        assert_eq!(r.type_name(), "bool");
        assert_eq!(r.description(), "success flag");
    }
}
