//! Reflection configuration, loaded from `[reflection]`-style TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ReflectResult, ReflectionError};
use crate::namespace::validate_namespace;

/// How to treat documentation whose parameter groups disagree with the native arity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MismatchPolicy {
    /// Pad missing groups with `mixed` and drop surplus ones
    #[default]
    Tolerate,
    /// Fail with `AnnotationMismatch`
    Strict,
}

/// Options shared by every reflection performed through one [`crate::Reflection`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReflectionConfig {
    /// Parameter/annotation count mismatch handling
    pub mismatch_policy: MismatchPolicy,
    /// Method names always excluded from class reflection
    pub denylist: Vec<String>,
    /// Namespace applied to reflected classes and functions
    pub namespace: Option<String>,
    /// Fall back to parent/interface documentation for undocumented methods
    pub inherit_docs: bool,
    /// Reflect public methods inherited from parent classes
    pub include_inherited: bool,
}

impl Default for ReflectionConfig {
    fn default() -> Self {
        Self {
            mismatch_policy: MismatchPolicy::Tolerate,
            denylist: Vec::new(),
            namespace: None,
            inherit_docs: true,
            include_inherited: true,
        }
    }
}

impl ReflectionConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> ReflectResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ReflectionError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> ReflectResult<Self> {
        let config: ReflectionConfig =
            toml::from_str(content).map_err(|e| ReflectionError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate field values
    pub fn validate(&self) -> ReflectResult<()> {
        if let Some(namespace) = &self.namespace {
            validate_namespace(namespace)?;
        }
        if self.denylist.iter().any(|name| name.trim().is_empty()) {
            return Err(ReflectionError::Config(
                "denylist entries cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Set the mismatch policy
    pub fn with_mismatch_policy(mut self, policy: MismatchPolicy) -> Self {
        self.mismatch_policy = policy;
        self
    }

    /// Add a name to the global denylist
    pub fn deny(mut self, method: impl Into<String>) -> Self {
        self.denylist.push(method.into());
        self
    }

    /// Check if a method name is on the global denylist
    pub fn is_denied(&self, method: &str) -> bool {
        self.denylist.iter().any(|name| name == method)
    }
}
