//! Prototype expansion
//!
//! Turns a callable's native parameter list plus its documented type
//! alternatives into the full cartesian set of prototypes.
//!
//! ## Ordering
//!
//! Return alternatives are the outermost loop, in documentation order. For
//! each return type the parameter combinations are enumerated odometer
//! style: the rightmost slot varies fastest. Dispatchers may prefer earlier
//! prototypes, so this order is part of the contract.
//!
//! ## Fallbacks
//!
//! A slot without alternatives contributes exactly one `mixed` type; an
//! undocumented return contributes one `void`. Under
//! [`MismatchPolicy::Tolerate`] missing parameter groups are padded with
//! `mixed` and surplus groups are dropped.

use tracing::{debug, trace, warn};

use crate::config::MismatchPolicy;
use crate::error::{ReflectResult, ReflectionError};
use crate::parameter::ReflectionParameter;
use crate::provider::{CallableDoc, ParameterHandle, TypeAnnotation};
use crate::prototype::Prototype;
use crate::return_value::ReflectionReturnValue;
use crate::types::{normalize_type_tag, MIXED, VOID};

/// Build every prototype of a callable.
///
/// The result is never empty.
pub fn build_prototypes(
    callable: &str,
    handles: &[ParameterHandle],
    doc: Option<&CallableDoc>,
    policy: MismatchPolicy,
) -> ReflectResult<Vec<Prototype>> {
    for handle in handles {
        handle.validate()?;
    }

    let empty = CallableDoc::default();
    let doc = doc.unwrap_or(&empty);

    let returns = resolve_alternatives(callable, &doc.returns, VOID)?;
    let groups = align_groups(callable, handles.len(), &doc.params, policy)?;

    let mut slots = Vec::with_capacity(handles.len());
    for (handle, group) in handles.iter().zip(groups) {
        let mut alternatives = resolve_alternatives(callable, group, MIXED)?;
        if let Some(declared) = handle.declared_type() {
            // A native type hint is authoritative; keep the documented text.
            let description = alternatives.swap_remove(0).description;
            alternatives = vec![TypeAnnotation::new(
                normalize_type_tag(callable, declared)?,
                description,
            )];
        }
        slots.push(alternatives);
    }

    let lens: Vec<usize> = slots.iter().map(Vec::len).collect();
    let total = lens
        .iter()
        .try_fold(returns.len(), |acc, &len| acc.checked_mul(len))
        .ok_or_else(|| ReflectionError::InvalidAnnotation {
            callable: callable.to_string(),
            reason: "prototype count overflows".to_string(),
        })?;
    debug!(callable, prototypes = total, "expanding prototypes");

    let mut prototypes = Vec::with_capacity(total);
    for ret in &returns {
        for combination in Odometer::new(&lens) {
            let mut parameters = Vec::with_capacity(handles.len());
            for (position, (handle, choice)) in handles.iter().zip(&combination).enumerate() {
                let chosen = &slots[position][*choice];
                let mut param = ReflectionParameter::new(
                    handle.clone(),
                    Some(chosen.type_name.as_str()),
                    Some(chosen.description.as_str()),
                )?;
                param.set_position(position);
                parameters.push(param);
            }
            let prototype = Prototype::new(
                ReflectionReturnValue::new(ret.type_name.clone(), ret.description.clone()),
                parameters,
            );
            trace!(callable, signature = ?prototype.signature(), "built prototype");
            prototypes.push(prototype);
        }
    }

    Ok(prototypes)
}

/// Normalize one slot's alternatives, falling back to a single default type.
fn resolve_alternatives(
    callable: &str,
    annotated: &[TypeAnnotation],
    fallback: &str,
) -> ReflectResult<Vec<TypeAnnotation>> {
    if annotated.is_empty() {
        return Ok(vec![TypeAnnotation::new(fallback, "")]);
    }

    annotated
        .iter()
        .map(|annotation| {
            let type_name = normalize_type_tag(callable, &annotation.type_name)?;
            Ok(TypeAnnotation::new(type_name, annotation.description.clone()))
        })
        .collect()
}

/// Line documented parameter groups up with the native parameter slots.
fn align_groups<'a>(
    callable: &str,
    arity: usize,
    annotated: &'a [Vec<TypeAnnotation>],
    policy: MismatchPolicy,
) -> ReflectResult<Vec<&'a [TypeAnnotation]>> {
    let documented = annotated.len();
    if documented != 0 && documented != arity {
        match policy {
            MismatchPolicy::Strict => {
                return Err(ReflectionError::AnnotationMismatch {
                    callable: callable.to_string(),
                    parameters: arity,
                    annotated: documented,
                });
            }
            MismatchPolicy::Tolerate if documented < arity => {
                warn!(callable, arity, documented, "padding undocumented parameters with mixed");
            }
            MismatchPolicy::Tolerate => {
                warn!(callable, arity, documented, "ignoring documentation for missing parameters");
            }
        }
    }

    Ok((0..arity)
        .map(|i| annotated.get(i).map(Vec::as_slice).unwrap_or(&[]))
        .collect())
}

/// Mixed-radix counter over slot choices, rightmost digit fastest.
///
/// With no slots it yields a single empty combination.
struct Odometer<'a> {
    lens: &'a [usize],
    current: Option<Vec<usize>>,
}

impl<'a> Odometer<'a> {
    fn new(lens: &'a [usize]) -> Self {
        let current = if lens.iter().any(|&n| n == 0) {
            None
        } else {
            Some(vec![0; lens.len()])
        };
        Self { lens, current }
    }
}

impl Iterator for Odometer<'_> {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let out = self.current.take()?;

        let mut next = out.clone();
        for digit in (0..next.len()).rev() {
            next[digit] += 1;
            if next[digit] < self.lens[digit] {
                self.current = Some(next);
                return Some(out);
            }
            next[digit] = 0;
        }
        // Wrapped past the leftmost digit: exhausted.
        Some(out)
    }
}
