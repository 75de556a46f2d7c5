//! Argument reordering for fuzzy call-through
//!
//! A caller coded against a target shape may pass arguments in a different
//! order than the wrapped method declares. When every declared parameter type
//! is distinct, the runtime type of each argument identifies its position.
//!
//! ## Rules
//!
//! 1. Argument count must equal the declared parameter count.
//! 2. If every argument's runtime type already equals its parameter's
//!    declared type, the arguments pass through untouched.
//! 3. Otherwise declared parameter types must be pairwise distinct.
//! 4. Each parameter, in declared order, takes the first unused argument
//!    whose runtime type is exactly its declared type. A parameter that
//!    accepts null (a non-value type, or a nullable one such as
//!    `Option<i32>`) with no such argument takes an unused `Null` argument.
//!    Anything left unfilled is an error.

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::error::{ShimError, ShimResult};
use crate::reflect::MethodInfo;
use crate::{TypeKey, Value, ValueType};

/// Reorder `args` into the declared parameter order of `method`.
///
/// `type_key` identifies the wrapped type and is only used for error
/// reporting.
pub fn reorder_arguments(
    type_key: TypeKey,
    method: &MethodInfo,
    args: Vec<Value>,
) -> ShimResult<Vec<Value>> {
    if args.len() != method.arity() {
        return Err(ShimError::ParameterCountMismatch {
            type_name: type_key.name(),
            method: method.name.clone(),
            expected: method.arity(),
            got: args.len(),
        });
    }

    let declared = method.parameter_types();
    if already_in_order(&args, &declared) {
        return Ok(args);
    }

    let mut seen = FxHashSet::default();
    if !declared.iter().all(|ty| seen.insert(*ty)) {
        return Err(ShimError::UnresolveableParameterOrderMismatch {
            type_name: type_key.name(),
            method: method.name.clone(),
            parameter_types: declared,
        });
    }

    let mut remaining: Vec<Option<Value>> = args.into_iter().map(Some).collect();
    let mut ordered = Vec::with_capacity(remaining.len());
    for (param, ty) in method.parameters.iter().zip(&declared) {
        let position = take_position(&remaining, |v| v.runtime_type() == Some(*ty))
            .or_else(|| {
                param
                    .accepts_null()
                    .then(|| take_position(&remaining, Value::is_null))
                    .flatten()
            })
            .ok_or_else(|| ShimError::NoArgumentForParameter {
                type_name: type_key.name(),
                method: method.name.clone(),
                parameter: param.name.clone(),
                expected: *ty,
            })?;
        ordered.extend(remaining[position].take());
    }

    trace!(
        type_name = type_key.name(),
        method = %method.name,
        "reordered call-through arguments by declared parameter type"
    );
    Ok(ordered)
}

/// A null argument has no runtime type and so never matches in place; in
/// particular it never matches a value-type parameter.
fn already_in_order(args: &[Value], declared: &[ValueType]) -> bool {
    args.iter()
        .zip(declared)
        .all(|(arg, ty)| arg.runtime_type() == Some(*ty))
}

fn take_position(remaining: &[Option<Value>], pred: impl Fn(&Value) -> bool) -> Option<usize> {
    remaining
        .iter()
        .position(|slot| slot.as_ref().is_some_and(&pred))
}
