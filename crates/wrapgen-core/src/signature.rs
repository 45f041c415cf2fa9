//! Overload-disambiguation signatures.

use wrapgen_ir::FunctionDecl;

/// Compute the signature used to tell overloads of the same name apart.
///
/// Joins each parameter's enum-or-raw type with its reference/pointer
/// arity markers, collapses the `" >"` spelling of nested template
/// closers, and appends a const marker for const methods. Stable across
/// runs; used as the lookup key for per-overload overrides.
pub fn overload_signature(decl: &FunctionDecl) -> String {
    let params: Vec<String> = decl
        .params
        .iter()
        .map(|p| {
            let base = p.enum_type.as_deref().unwrap_or(&p.raw_type);
            let mut s = String::from(base);
            s.push_str(&"&".repeat(p.references as usize));
            s.push_str(&"*".repeat(p.pointers as usize));
            s
        })
        .collect();

    let mut sig = params.join(", ").replace(" >", ">");
    if decl.is_const {
        if sig.is_empty() {
            sig.push_str("[const]");
        } else {
            sig.push_str(" [const]");
        }
    }
    sig
}
