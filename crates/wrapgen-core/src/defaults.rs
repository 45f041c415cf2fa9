//! Default-argument resolution.

use crate::casters::entries_for;
use crate::error::{Result, WrapError};
use wrapgen_config::CasterTable;
use wrapgen_ir::{ClassDecl, ParamDecl};

fn is_numeric_literal(expr: &str) -> bool {
    expr.parse::<i64>().is_ok() || expr.parse::<f64>().is_ok()
}

/// Rewrite a default-argument expression into a form valid at binding
/// scope.
///
/// Numeric literals and null-pointer sentinels pass through. Brace-init
/// expressions are type-qualified unless the parameter is an array. Bare
/// identifiers naming a public data member of the enclosing class are
/// rewritten to their fully qualified form.
pub(crate) fn resolve_default(
    parent: Option<&ClassDecl>,
    param: &ParamDecl,
    expr: &str,
    cpp_type: &str,
) -> String {
    if is_numeric_literal(expr) || expr == "NULL" || expr == "nullptr" {
        return expr.to_string();
    }

    if expr.starts_with('{') && expr.ends_with('}') {
        if param.array {
            return expr.to_string();
        }
        return format!("{cpp_type}{expr}");
    }

    if let Some(parent) = parent {
        let is_public_member = parent
            .properties
            .iter()
            .any(|p| p.access == wrapgen_ir::Access::Public && p.name == expr);
        if is_public_member {
            if parent.namespace.is_empty() {
                return format!("{}::{expr}", parent.name);
            }
            return format!("{}::{}::{expr}", parent.namespace, parent.name);
        }
    }

    expr.to_string()
}

/// Wrap the expression in an explicit cast when a registered converter
/// requires one for default arguments.
///
/// Fails with [`WrapError::AmbiguousCaster`] when more than one distinct
/// converter claims the type, unless suppressed per-parameter.
pub(crate) fn apply_default_cast(
    table: &CasterTable,
    param_name: &str,
    disable: bool,
    expr: String,
    cpp_type: &str,
) -> Result<String> {
    if disable {
        return Ok(expr);
    }

    let mut found: Option<&str> = None;
    for entry in entries_for(table, cpp_type) {
        if !entry.default_arg_cast {
            continue;
        }
        let Some(typename) = entry.typename.as_deref() else {
            continue;
        };
        if let Some(prev) = found {
            if prev != typename {
                return Err(WrapError::AmbiguousCaster {
                    param: param_name.to_string(),
                    cpp_type: cpp_type.to_string(),
                });
            }
        }
        found = Some(typename);
    }

    match found {
        Some(typename) => Ok(format!("({typename}){expr}")),
        None => Ok(expr),
    }
}
