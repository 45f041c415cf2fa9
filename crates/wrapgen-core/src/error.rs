//! Error types for the wrapgen core.

use miette::Diagnostic;
use thiserror::Error;

/// Result type for wrapgen-core operations.
pub type Result<T> = std::result::Result<T, WrapError>;

/// Errors raised while transforming declarations.
#[derive(Debug, Error, Diagnostic)]
pub enum WrapError {
    /// An exposed name is not a valid Python identifier and is not an
    /// allowed operator exception.
    #[error("name {0:?} is not a valid Python identifier")]
    #[diagnostic(help("rename the declaration in the wrapping configuration"))]
    InvalidIdentifier(String),

    /// Override configuration is inconsistent with the declaration it
    /// targets. Always a hard failure, in both modes.
    #[error("{0}")]
    #[diagnostic(help("fix the wrapping configuration for this declaration"))]
    Config(String),

    /// More than one registered converter claims the destination type of a
    /// default-argument cast.
    #[error("multiple type casters found for {param} ({cpp_type})")]
    #[diagnostic(help("set disable_default_cast on the parameter"))]
    AmbiguousCaster { param: String, cpp_type: String },

    /// A member transform failed; carries the owning declaration's
    /// qualified name for diagnosability.
    #[error("{scope}: {source}")]
    Member {
        scope: String,
        #[source]
        source: Box<WrapError>,
    },
}

impl WrapError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        WrapError::Config(msg.into())
    }

    pub(crate) fn member(scope: impl Into<String>, source: WrapError) -> Self {
        WrapError::Member {
            scope: scope.into(),
            source: Box::new(source),
        }
    }
}
