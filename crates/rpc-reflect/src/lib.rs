//! RPC Signature Reflection
//!
//! Extracts callable signatures from injected introspection and annotation
//! providers and expands documented type alternatives into the discrete
//! prototypes an RPC dispatcher chooses between at call time.
//!
//! ## Object graph
//!
//! - [`ReflectionClass`]: public methods of a class, keyed by name
//! - [`ReflectionFunction`]: one function or method and its prototypes
//! - [`Prototype`]: a return value plus ordered parameters
//! - [`ReflectionParameter`] / [`ReflectionReturnValue`]: descriptors
//!
//! ## Usage
//!
//! ```rust,ignore
//! let registry = SignatureRegistry::from_file(Path::new("signatures.json"))?;
//! let reflection = Reflection::new(&registry, &registry);
//!
//! let class = reflection.reflect_class("Calculator", &["__construct"])?;
//! for method in class.methods() {
//!     for signature in method.signatures() {
//!         println!("{} {:?}", method.name(), signature);
//!     }
//! }
//! ```

#![warn(missing_docs)]

pub mod class;
pub mod config;
pub mod error;
pub mod expand;
pub mod function;
pub mod namespace;
pub mod parameter;
pub mod prototype;
pub mod provider;
pub mod reflection;
pub mod registry;
pub mod return_value;
pub mod types;

pub use class::ReflectionClass;
pub use config::{MismatchPolicy, ReflectionConfig};
pub use error::{ReflectResult, ReflectionError};
pub use expand::build_prototypes;
pub use function::ReflectionFunction;
pub use parameter::ReflectionParameter;
pub use prototype::Prototype;
pub use provider::{
    AnnotationProvider, CallableDoc, CallableShape, ClassShape, IntrospectionProvider,
    MethodShape, ParameterHandle, TypeAnnotation, Visibility,
};
pub use reflection::{ClassOptions, FunctionOptions, Reflection};
pub use registry::SignatureRegistry;
pub use return_value::ReflectionReturnValue;
