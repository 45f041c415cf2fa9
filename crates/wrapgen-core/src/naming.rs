//! Exposed-name derivation.

use crate::error::{Result, WrapError};
use wrapgen_config::Reporter;

/// Python reserved words; an exposed name colliding with one gets a
/// trailing underscore.
const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class", "continue",
    "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if", "import",
    "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while",
    "with", "yield",
];

/// ASCII identifier validity, matching what pybind11 accepts for names.
pub(crate) fn is_python_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_python_keyword(name: &str) -> bool {
    PYTHON_KEYWORDS.contains(&name)
}

/// Replace the characters that make a qualified C++ name unusable as an
/// identifier (`:<>=`) with underscores.
pub(crate) fn qualname_identifier(qualname: &str) -> String {
    qualname
        .chars()
        .map(|c| match c {
            ':' | '<' | '>' | '=' => '_',
            c => c,
        })
        .collect()
}

/// Derive the exposed Python name for a native declaration.
///
/// Precedence: explicit rename (verbatim) > prefix stripping > keyword
/// escaping. A name that is not a valid identifier and not an operator
/// fails, unless `report_only` is set, in which case it is passed through
/// and recorded for later reporting.
pub(crate) fn resolve_name(
    name: &str,
    rename: Option<&str>,
    strip_prefixes: &[String],
    is_operator: bool,
    report_only: bool,
    reporter: &mut Reporter,
) -> Result<String> {
    if let Some(rename) = rename {
        return Ok(rename.to_string());
    }

    let mut name = name.to_string();
    for prefix in strip_prefixes {
        if let Some(stripped) = name.strip_prefix(prefix.as_str()) {
            if is_python_identifier(stripped) {
                name = stripped.to_string();
                break;
            }
        }
    }

    if is_python_keyword(&name) {
        return Ok(format!("{name}_"));
    }
    if !is_python_identifier(&name) && !is_operator {
        if !report_only {
            return Err(WrapError::InvalidIdentifier(name));
        }
        reporter.add_invalid_name(&name);
    }

    Ok(name)
}
