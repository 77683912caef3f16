//! Prototypes
//!
//! A prototype is one fully-typed call signature. It stores whatever it is
//! given; keeping arity and typing consistent with the source callable is
//! the job of the expansion in [`crate::expand`].

use serde::{Deserialize, Serialize};

use crate::parameter::ReflectionParameter;
use crate::return_value::ReflectionReturnValue;

/// One concrete signature: a return value plus ordered parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prototype {
    return_value: ReflectionReturnValue,
    parameters: Vec<ReflectionParameter>,
}

impl Prototype {
    /// Create a prototype. An empty parameter list is a valid zero-arity signature.
    pub fn new(return_value: ReflectionReturnValue, parameters: Vec<ReflectionParameter>) -> Self {
        Self {
            return_value,
            parameters,
        }
    }

    /// Return type tag
    pub fn return_type(&self) -> &str {
        self.return_value.type_name()
    }

    /// Full return descriptor
    pub fn return_value(&self) -> &ReflectionReturnValue {
        &self.return_value
    }

    /// Parameters in declaration order
    pub fn parameters(&self) -> &[ReflectionParameter] {
        &self.parameters
    }

    /// Number of parameters
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// Number of arguments that must be supplied
    pub fn required_arity(&self) -> usize {
        self.parameters.iter().filter(|p| !p.is_optional()).count()
    }

    /// `[return, param...]` type tags, as reported by `system.methodSignature`
    pub fn signature(&self) -> Vec<&str> {
        std::iter::once(self.return_type())
            .chain(self.parameters.iter().map(|p| p.type_name()))
            .collect()
    }
}
