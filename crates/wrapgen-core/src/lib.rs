//! Transformation core of the wrapgen binding generator.
//!
//! This crate turns the declaration IR of one C++ header into a
//! renderable context model for pybind11-style Python bindings:
//!
//! ```text
//! Declaration IR + overrides → Processor → HeaderContext → (renderer)
//! ```
//!
//! The header parser that produces the IR, the template renderer that
//! consumes the [`HeaderContext`], and configuration loading are external
//! collaborators. Everything here is synchronous and scoped to one
//! processing run.

mod casters;
mod classes;
mod context;
mod defaults;
mod doc;
mod enums;
mod error;
mod functions;
mod naming;
mod params;
mod processor;
mod signature;

pub use casters::{decompose_type, TypeCasterRegistry};
pub use context::*;
pub use error::{Result, WrapError};
pub use processor::Processor;
pub use signature::overload_signature;
