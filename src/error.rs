//! Error handling for the flowvis engine.
//!
//! This module defines the crate-wide error type and a `Result` alias.
//! All failures surfaced to command observers are values of [`FlowVisError`];
//! none of them are fatal to the worker thread.

use crate::types::DataType;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for flowvis operations.
#[derive(Error, Debug)]
pub enum FlowVisError {
    /// A named connector does not exist on the given algorithm.
    #[error("algorithm '{algorithm}' has no connector named '{connector}'")]
    ConnectorNotFound {
        algorithm: String,
        connector: String,
    },

    /// A connection endpoint has the wrong direction (source must be an
    /// output, target an input).
    #[error("connector '{connector}' has the wrong direction for this connection")]
    DirectionMismatch { connector: String },

    /// Source and target connectors declare incompatible data types.
    #[error("cannot connect '{from}' ({actual:?}) to '{to}' ({expected:?}): incompatible types")]
    TypeMismatch {
        from: String,
        to: String,
        expected: DataType,
        actual: DataType,
    },

    /// The target input connector is already fed by another connection.
    /// Multiple writers to one input are rejected at connect time.
    #[error("input connector '{connector}' on '{algorithm}' is already connected")]
    InputAlreadyConnected {
        algorithm: String,
        connector: String,
    },

    /// A value of the wrong type was published to a connector.
    #[error("connector '{connector}' accepts {expected:?}, got {actual:?}")]
    InvalidValue {
        connector: String,
        expected: DataType,
        actual: DataType,
    },

    /// No registered reader can handle the file.
    #[error("no reader can handle file {path:?}")]
    UnsupportedFormat { path: PathBuf },

    /// A reader failed while loading a file.
    #[error("failed to read {path:?}: {message}")]
    Reader { path: PathBuf, message: String },

    /// IO errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An algorithm's `process()` failed.
    #[error("algorithm '{algorithm}' failed: {message}")]
    Node { algorithm: String, message: String },

    /// The command queue has been stopped; the command will never execute.
    #[error("command queue is stopped")]
    QueueStopped,

    /// Errors related to configuration loading.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for flowvis operations.
pub type Result<T> = std::result::Result<T, FlowVisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connector_not_found_display() {
        let err = FlowVisError::ConnectorNotFound {
            algorithm: "Mesh Renderer".to_string(),
            connector: "Bar".to_string(),
        };
        assert!(err.to_string().contains("Mesh Renderer"));
        assert!(err.to_string().contains("Bar"));
    }

    #[test]
    fn test_type_mismatch_display() {
        let err = FlowVisError::TypeMismatch {
            from: "mesh".to_string(),
            to: "lines".to_string(),
            expected: DataType::Lines,
            actual: DataType::TriangleMesh,
        };
        assert!(err.to_string().contains("incompatible"));
    }
}
