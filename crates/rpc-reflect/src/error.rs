//! Reflection errors
//!
//! Every failure the core can report is an invalid-argument condition: the
//! inputs were malformed and no partial object graph is returned.

use thiserror::Error;

/// Result type for reflection operations
pub type ReflectResult<T> = Result<T, ReflectionError>;

/// Errors that can occur while reflecting callables and classes
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReflectionError {
    /// Class identity could not be resolved by the introspection provider
    #[error("Invalid argument: unknown class '{name}'")]
    UnknownClass {
        /// Class name that was not found
        name: String,
    },

    /// Callable identity could not be resolved by the introspection provider
    #[error("Invalid argument: unknown function '{name}'")]
    UnknownFunction {
        /// Function name that was not found
        name: String,
    },

    /// A native parameter handle lacks the expected capability
    #[error("Invalid argument: invalid parameter handle '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name as reported by the handle
        name: String,
        /// Why the handle was rejected
        reason: String,
    },

    /// Documentation yielded a type tag that cannot be used
    #[error("Invalid argument: invalid type annotation on '{callable}': {reason}")]
    InvalidAnnotation {
        /// Callable the annotation belongs to
        callable: String,
        /// Why the annotation was rejected
        reason: String,
    },

    /// Namespace does not match the allowed character set
    #[error("Invalid argument: invalid namespace '{namespace}'")]
    InvalidNamespace {
        /// Rejected namespace
        namespace: String,
    },

    /// Annotated parameter groups disagree with the native arity (strict policy only)
    #[error(
        "Invalid argument: '{callable}' declares {parameters} parameter(s) but documents {annotated}"
    )]
    AnnotationMismatch {
        /// Callable name
        callable: String,
        /// Native parameter count
        parameters: usize,
        /// Documented parameter group count
        annotated: usize,
    },

    /// An upstream provider failed to answer a query
    #[error("Invalid argument: provider error: {0}")]
    Provider(String),

    /// Configuration could not be loaded or failed validation
    #[error("Invalid argument: configuration error: {0}")]
    Config(String),
}

impl ReflectionError {
    /// Every reflection failure is an invalid-argument failure.
    pub fn is_invalid_argument(&self) -> bool {
        true
    }
}

impl From<String> for ReflectionError {
    fn from(s: String) -> Self {
        ReflectionError::Provider(s)
    }
}

impl From<&str> for ReflectionError {
    fn from(s: &str) -> Self {
        ReflectionError::Provider(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ReflectionError::UnknownClass {
            name: "Missing".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid argument: unknown class 'Missing'");

        let err = ReflectionError::AnnotationMismatch {
            callable: "add".to_string(),
            parameters: 2,
            annotated: 3,
        };
        assert_eq!(
            err.to_string(),
            "Invalid argument: 'add' declares 2 parameter(s) but documents 3"
        );
    }

    #[test]
    fn test_provider_conversion() {
        let err: ReflectionError = "backend offline".into();
        assert_eq!(err, ReflectionError::Provider("backend offline".to_string()));
        assert!(err.is_invalid_argument());
    }
}
