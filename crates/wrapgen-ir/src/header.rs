//! Header-level declaration set.

use crate::decl::{ClassDecl, EnumDecl, FunctionDecl, PropertyDecl};

/// Everything the front end found in one header file.
///
/// Declarations appear in source order; the core preserves that order in
/// its output sequences.
#[derive(Debug, Clone, Default)]
pub struct HeaderDecl {
    /// Header path relative to the project root
    pub rel_fname: String,
    pub classes: Vec<ClassDecl>,
    pub functions: Vec<FunctionDecl>,
    pub enums: Vec<EnumDecl>,
    /// Global variables
    pub variables: Vec<PropertyDecl>,
    /// Raw types named by header-scope `using` declarations
    pub using_types: Vec<String>,
}

impl HeaderDecl {
    pub fn new(rel_fname: impl Into<String>) -> Self {
        Self {
            rel_fname: rel_fname.into(),
            ..Default::default()
        }
    }
}
