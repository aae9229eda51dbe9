//! Driver seam
//!
//! The Bolt wire protocol, connection pooling and transactions live in an
//! external driver. The client only talks to it through the traits below,
//! so any driver (or a test double) can be plugged in.

pub mod value;

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::routing::{AddressResolver, ConnectionUri};

pub use value::{DriverNode, DriverRelationship, DriverValue};

/// Stands in for secrets in debug and diagnostic output
pub const REDACTED: &str = "********";

/// Errors reported by a driver implementation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DriverError {
    /// No server could be reached
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Server rejected the statement
    #[error("{code}: {message}")]
    Client { code: String, message: String },

    /// Server answered with something the client did not expect
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

pub type DriverResult<T> = Result<T, DriverError>;

/// Session access mode, used by routing drivers to pick a reader or writer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessMode {
    Read,
    #[default]
    Write,
}

/// Credentials handed to the driver
#[derive(Clone, PartialEq, Eq, Default)]
pub enum AuthToken {
    #[default]
    None,
    Basic {
        user: String,
        password: String,
        realm: Option<String>,
    },
}

impl AuthToken {
    /// Basic user/password authentication
    pub fn basic(user: impl Into<String>, password: impl Into<String>) -> Self {
        AuthToken::Basic {
            user: user.into(),
            password: password.into(),
            realm: None,
        }
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthToken::None => f.write_str("None"),
            AuthToken::Basic { user, realm, .. } => f
                .debug_struct("Basic")
                .field("user", user)
                .field("password", &REDACTED)
                .field("realm", realm)
                .finish(),
        }
    }
}

/// Everything a factory needs to build a driver
#[derive(Debug, Clone)]
pub struct DriverSettings {
    pub uri: ConnectionUri,
    pub auth: AuthToken,
    pub encrypted: bool,
    /// Present only when alternate routing hosts were configured
    pub resolver: Option<Arc<AddressResolver>>,
}

/// Per-session options
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionConfig {
    pub access_mode: AccessMode,
    pub bookmarks: Vec<String>,
    pub database: Option<String>,
}

/// A parameterized statement ready to be sent
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub text: String,
    pub parameters: HashMap<String, DriverValue>,
}

impl Statement {
    /// Statement without parameters
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parameters: HashMap::new(),
        }
    }

    /// Statement with parameters
    pub fn with_parameters(text: impl Into<String>, parameters: HashMap<String, DriverValue>) -> Self {
        Self {
            text: text.into(),
            parameters,
        }
    }
}

/// One result row
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DriverRecord {
    keys: Vec<String>,
    values: Vec<DriverValue>,
}

impl DriverRecord {
    /// Build a record from column/value pairs, preserving column order
    pub fn new<K: Into<String>>(fields: impl IntoIterator<Item = (K, DriverValue)>) -> Self {
        let mut record = Self::default();
        for (key, value) in fields {
            record.keys.push(key.into());
            record.values.push(value);
        }
        record
    }

    /// Column names
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Column values, same order as `keys`
    pub fn values(&self) -> &[DriverValue] {
        &self.values
    }

    /// Get a value by column name
    pub fn get(&self, key: &str) -> Option<&DriverValue> {
        self.keys.iter().position(|k| k == key).map(|i| &self.values[i])
    }

    /// Get a value by column index
    pub fn get_index(&self, index: usize) -> Option<&DriverValue> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// A driver session: runs statements and tracks bookmarks
#[async_trait]
pub trait Session: Send + Sync {
    /// Run a statement and collect all of its records
    async fn run(&self, statement: Statement) -> DriverResult<Vec<DriverRecord>>;

    /// Bookmark of the last committed statement, if any
    fn last_bookmark(&self) -> Option<String> {
        None
    }

    /// Release the session
    async fn close(&self) -> DriverResult<()> {
        Ok(())
    }
}

/// The external Bolt driver
#[async_trait]
pub trait Driver: Send + Sync {
    /// URI the driver was created with
    fn uri(&self) -> &str;

    /// Open a session
    fn session(&self, config: SessionConfig) -> DriverResult<Box<dyn Session>>;

    /// Shut the driver down
    async fn close(&self) -> DriverResult<()> {
        Ok(())
    }
}

/// Builds drivers for clients created from URIs rather than driver instances
pub trait DriverFactory: Send + Sync {
    fn create(&self, settings: &DriverSettings) -> DriverResult<Arc<dyn Driver>>;
}
