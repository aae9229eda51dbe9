//! Error types for the Bolt graph client

use crate::driver::DriverError;
use thiserror::Error;

/// Message carried by every operation that only existed on the legacy REST
/// endpoint and has no Bolt equivalent.
pub const NOT_VALID_FOR_BOLT: &str =
    "This operation is not valid when connected over Bolt; use a Cypher query instead.";

/// Errors that can occur when using the graph client
#[derive(Error, Debug)]
pub enum GraphClientError {
    /// Operation is not available over the Bolt transport
    #[error("{}", NOT_VALID_FOR_BOLT)]
    NotValidForBolt,

    /// Connection URI scheme cannot be used for the requested setup
    #[error("Unsupported URI scheme '{scheme}': {reason}")]
    UnsupportedScheme { scheme: String, reason: String },

    /// Connection URI could not be parsed
    #[error("Invalid URI '{uri}': {reason}")]
    InvalidUri { uri: String, reason: String },

    /// Alternate host entry could not be parsed
    #[error("Invalid address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    /// A query was issued before `connect`
    #[error("The graph client is not connected to the server. Call connect() first.")]
    NotConnected,

    /// `connect` was called without a driver to connect through
    #[error("No driver available; create the client from a driver or use connect_with()")]
    DriverUnavailable,

    /// Parameter name used twice in the same query
    #[error("A parameter with the key '{0}' is already defined in the query")]
    DuplicateParameter(String),

    /// Parameter value cannot be represented as a driver value
    #[error("Invalid parameter '{key}': {reason}")]
    InvalidParameter { key: String, reason: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Record could not be mapped into the requested type
    #[error("Cannot map column '{column}': {message}")]
    Mapping { column: String, message: String },

    /// Error reported by the underlying driver
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GraphClientResult<T> = Result<T, GraphClientError>;
