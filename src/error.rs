//! Error types for ncslice

use crate::types::DType;
use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by the storage engine, carrying its own diagnostic text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct EngineError {
    pub message: String,
}

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    /// A start or count vector matches neither the rank nor the non-degenerate rank
    #[error(
        "argument '{arg}' has length {len}, but must have a length equal to the number of dimensions ({ndims}) or the number of non-degenerate dimensions ({non_degenerate})"
    )]
    BadRequestLength {
        arg: &'static str,
        len: usize,
        ndims: usize,
        non_degenerate: usize,
    },

    /// A start below 1 or a count below -1 (host convention)
    #[error("invalid {arg} value {value} for storage axis {axis}")]
    InvalidIndex {
        arg: &'static str,
        axis: usize,
        value: i64,
    },

    /// Scalar variables only accept start [0] and count [1]
    #[error("scalar variable requires start [0] and count [1], got start {start:?} count {count:?}")]
    ScalarRequest { start: Vec<i64>, count: Vec<i64> },

    /// Resolved slice exceeds the variable's shape
    #[error("slice out of range on axis {axis}: start {start} + count {count} exceeds length {len}")]
    OutOfRange {
        axis: usize,
        start: usize,
        count: usize,
        len: usize,
    },

    /// Hierarchical names must not start with a slash
    #[error("variable name must not start with '/': {0:?}")]
    MalformedPath(String),

    /// A group segment of a hierarchical name does not exist
    #[error("group {name:?} not found while resolving {path:?}")]
    GroupNotFound { name: String, path: String },

    /// Raised by the by-name entry points only; plain lookups return `None`
    #[error("variable not found: {0:?}")]
    VariableNotFound(String),

    /// No variable was named and the group does not hold exactly one data variable
    #[error("no variable specified and the group does not hold exactly one data variable")]
    AmbiguousVariable,

    #[error("text slices with {0} dimensions are not supported (1 to 4)")]
    UnsupportedTextRank(usize),

    #[error("slice holds {expected} strings but {actual} were supplied")]
    StringCountMismatch { expected: usize, actual: usize },

    #[error("slice holds {expected} values but {actual} were supplied")]
    DataLengthMismatch { expected: usize, actual: usize },

    #[error("{operation} does not support {dtype:?} variables")]
    TypeMismatch {
        operation: &'static str,
        dtype: DType,
    },

    /// Sentinel replacement on write is only defined for float destinations
    #[error("no fill value for host sentinels in {0:?} variables")]
    NoFillValue(DType),

    #[error("storage engine error: {0}")]
    Engine(#[from] EngineError),

    /// A per-string text transfer failed; strings before `index` were written
    #[error("text transfer failed at string {index}: {source}")]
    TextTransfer {
        index: usize,
        #[source]
        source: EngineError,
    },

    #[error("failed to allocate a buffer of {elements} elements")]
    Allocation { elements: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_error_keeps_diagnostic() {
        let err: Error = EngineError::new("NetCDF: Start+count exceeds dimension bound").into();
        assert!(err.to_string().contains("Start+count exceeds"));
    }

    #[test]
    fn text_transfer_exposes_source() {
        use std::error::Error as _;

        let err = Error::TextTransfer {
            index: 3,
            source: EngineError::new("disk full"),
        };
        assert!(err.to_string().contains("string 3"));
        assert_eq!(err.source().unwrap().to_string(), "disk full");
    }
}
