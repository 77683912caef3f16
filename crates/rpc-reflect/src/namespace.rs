//! Namespace validation

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ReflectResult, ReflectionError};

static NAMESPACE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z0-9_.]+$").expect("namespace pattern is valid"));

/// Check that a namespace only uses letters, digits, `_` and `.`
pub fn validate_namespace(namespace: &str) -> ReflectResult<()> {
    if NAMESPACE_PATTERN.is_match(namespace) {
        Ok(())
    } else {
        Err(ReflectionError::InvalidNamespace {
            namespace: namespace.to_string(),
        })
    }
}

/// Normalize an optional namespace: empty clears it, anything else must validate.
pub fn normalize_namespace(namespace: Option<&str>) -> ReflectResult<Option<String>> {
    match namespace {
        None | Some("") => Ok(None),
        Some(ns) => {
            validate_namespace(ns)?;
            Ok(Some(ns.to_string()))
        }
    }
}
