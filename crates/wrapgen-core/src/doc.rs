//! Documentation formatting.
//!
//! Raw comment text becomes a sequence of individually quoted, escaped
//! string literals, one per line, ready to paste into generated source.

use crate::context::Documentation;

/// Strip comment decoration from a raw structured comment: `/** */` and
/// `///` / `//!` markers, leading `*` continuation rails, and the common
/// indentation that remains.
pub(crate) fn normalize_comment(raw: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    for line in raw.lines() {
        let mut s = line.trim_start();
        if let Some(rest) = s.strip_prefix("/**") {
            s = rest.trim_start();
        } else if let Some(rest) = s.strip_prefix("/*") {
            s = rest.trim_start();
        } else if let Some(rest) = s.strip_prefix("///").or_else(|| s.strip_prefix("//!")) {
            s = rest.strip_prefix(' ').unwrap_or(rest);
        } else if let Some(rest) = s.strip_prefix('*') {
            s = rest.strip_prefix(' ').unwrap_or(rest);
        }
        let s = s.strip_suffix("*/").unwrap_or(s).trim_end();
        lines.push(s.to_string());
    }
    while lines.first().is_some_and(|l| l.is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

/// Assemble documentation text for a declaration.
///
/// Precedence: explicit override text > normalized structured comment >
/// empty. An append-suffix is concatenated after the primary text, each
/// of its lines re-indented with `append_prefix`.
pub(crate) fn process_doc(
    raw: Option<&str>,
    doc_override: Option<&str>,
    doc_append: Option<&str>,
    append_prefix: &str,
) -> Documentation {
    let mut doc = match doc_override {
        Some(text) => text.to_string(),
        None => raw.map(normalize_comment).unwrap_or_default(),
    };

    if let Some(append) = doc_append {
        doc.push_str(&format!("\n{append_prefix}"));
        doc.push_str(&append.replace('\n', &format!("\n{append_prefix}")));
    }

    quote_doc(&doc)
}

/// Escape and quote documentation text into per-line string literals.
/// Returns absent (not an empty sequence) for empty text.
pub(crate) fn quote_doc(doc: &str) -> Documentation {
    if doc.is_empty() {
        return None;
    }
    let escaped = doc.replace('\\', "\\\\").replace('"', "\\\"");
    let quoted = escaped
        .split_inclusive('\n')
        .map(|line| format!("\"{}\"", line.replace('\n', "\\n")))
        .collect();
    Some(quoted)
}
