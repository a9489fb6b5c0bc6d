//! Types for working with errors produced by tusq.

/// A specialized `Result` type for tusq.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents all the ways settings construction can fail within tusq.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A parameter's value does not have the type its setter expects.
    #[error("parameter \"{parameter}\" expects {expected}, got {actual}")]
    ParameterType {
        parameter: String,
        expected: String,
        actual: String,
    },

    /// A parameter's value is outside the accepted set.
    #[error("parameter \"{parameter}\" expects {expected}, got \"{value}\"")]
    ParameterValue {
        parameter: String,
        expected: String,
        value: String,
    },

    /// A required parameter is absent from the mapping.
    #[error("missing required parameter \"{0}\"")]
    MissingParameter(String),

    /// A parameter name is not recognized.
    #[error("unknown parameter \"{0}\"")]
    UnknownParameter(String),
}
