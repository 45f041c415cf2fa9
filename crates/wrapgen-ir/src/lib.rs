//! Declaration IR for the wrapgen binding generator.
//!
//! These records describe the native declarations found in one C++ header,
//! as produced by an external parsing front end. Type, qualifier, access,
//! and scope information arrives already resolved; the core never re-derives
//! it from source text.

mod decl;
mod header;

pub use decl::*;
pub use header::*;
