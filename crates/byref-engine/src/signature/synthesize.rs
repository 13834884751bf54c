//! Signature synthesis from callable metadata

use byref_sdk::{Callable, DefaultValue, TypeConstraint};
use rustc_hash::FxHashSet;

use super::{Literal, ParameterDescriptor, SignatureDescriptor};
use crate::error::{PassthroughError, PassthroughResult};

/// Introspect `target` and build its signature descriptor.
///
/// Fails with [`PassthroughError::Introspection`] when the target exposes no
/// parameter metadata, declares an invalid or duplicate parameter name, or
/// has a default that cannot be re-declared as a literal.
pub fn synthesize(target: &dyn Callable) -> PassthroughResult<SignatureDescriptor> {
    let introspection_error = |reason: String| PassthroughError::Introspection {
        callable: target.name(),
        reason,
    };

    let params = target
        .parameters()
        .ok_or_else(|| introspection_error("no parameter metadata available".to_string()))?;

    let mut seen = FxHashSet::default();
    let mut parameters = Vec::with_capacity(params.len());

    for param in params {
        if !is_identifier(&param.name) {
            return Err(introspection_error(format!(
                "invalid parameter name {:?}",
                param.name
            )));
        }
        if !seen.insert(param.name.as_str()) {
            return Err(introspection_error(format!(
                "duplicate parameter ${}",
                param.name
            )));
        }

        if let TypeConstraint::Named(class) = &param.type_constraint {
            if !is_class_name(class) {
                return Err(introspection_error(format!(
                    "invalid class name {:?} for ${}",
                    class, param.name
                )));
            }
        }

        let default = match &param.default {
            None => None,
            Some(DefaultValue::Literal(value)) => {
                Some(Literal::from_value(value).ok_or_else(|| {
                    introspection_error(format!(
                        "default of ${} ({}) has no literal form",
                        param.name,
                        value.type_name()
                    ))
                })?)
            }
            Some(DefaultValue::Expression(expr)) => {
                return Err(introspection_error(format!(
                    "default of ${} is the expression `{}`",
                    param.name, expr
                )));
            }
        };

        parameters.push(ParameterDescriptor {
            name: param.name.clone(),
            type_constraint: param.type_constraint.clone(),
            by_reference: param.by_reference,
            default,
        });
    }

    Ok(SignatureDescriptor::new(
        parameters,
        target.returns_by_reference(),
    ))
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_alphabetic() => {
            chars.all(|c| c == '_' || c.is_alphanumeric())
        }
        _ => false,
    }
}

/// `Foo`, `Ns\Foo`: backslash-separated identifiers, no leading separator
fn is_class_name(name: &str) -> bool {
    name.split('\\').all(is_identifier)
}
