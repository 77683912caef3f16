//! Type tags
//!
//! Type tags are open-ended strings (`int`, `string`, a class name, ...).
//! Only the fallbacks used by prototype expansion are named here.

use crate::error::{ReflectResult, ReflectionError};

/// Parameter type used when nothing narrows a slot
pub const MIXED: &str = "mixed";

/// Return type used when no return value is documented
pub const VOID: &str = "void";

/// Separator between alternatives in a union annotation (`int|string`)
pub const UNION_SEPARATOR: char = '|';

/// Validate a single type tag, returning it trimmed.
///
/// A tag must be non-empty, contain no whitespace and not be an unsplit union.
pub fn normalize_type_tag(callable: &str, tag: &str) -> ReflectResult<String> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        return Err(ReflectionError::InvalidAnnotation {
            callable: callable.to_string(),
            reason: "empty type tag".to_string(),
        });
    }
    if trimmed.contains(UNION_SEPARATOR) {
        return Err(ReflectionError::InvalidAnnotation {
            callable: callable.to_string(),
            reason: format!("'{}' is a union; split it into alternatives", trimmed),
        });
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(ReflectionError::InvalidAnnotation {
            callable: callable.to_string(),
            reason: format!("'{}' contains whitespace", trimmed),
        });
    }
    Ok(trimmed.to_string())
}
