//! boltgraph: fluent Cypher client over a Bolt driver
//!
//! The wire protocol, pooling and transactions belong to an external driver.
//! This crate sits in front of it and provides:
//!
//! - **Connection setup**: URI scheme validation and an address resolver
//!   for `bolt+routing://` deployments reached through a list of hosts
//! - **Query building**: a clause-by-clause Cypher builder that keeps every
//!   value in named parameters
//! - **Parameter serialization**: any `serde::Serialize` value becomes a
//!   flat driver parameter map (dates, offsets and UUIDs as strings)
//! - **Result mapping**: driver records into `serde::Deserialize` types
//!
//! The driver is reached through the [`Driver`] / [`Session`] traits.
//!
//! ## Example Usage
//!
//! ```rust
//! use boltgraph::BoltGraphClient;
//!
//! let client = BoltGraphClient::with_hosts(
//!     "bolt+routing://cluster.example.com",
//!     ["core1.example.com", "core2.example.com:7688"],
//! ).unwrap();
//!
//! let resolved = client.address_resolver().unwrap().resolve(None);
//! assert_eq!(resolved.len(), 2);
//!
//! let query = client
//!     .cypher()
//!     .match_("(p:Person)")
//!     .where_eq("p.name", "Ada").unwrap()
//!     .return_("p")
//!     .query();
//! assert_eq!(query.text(), "MATCH (p:Person)\nWHERE p.name = $p0\nRETURN p");
//! ```

#![warn(clippy::all)]

pub mod client;
pub mod config;
pub mod cypher;
pub mod driver;
pub mod error;
pub mod mapping;
pub mod routing;

// Re-export main types for convenience
pub use client::{
    BoltGraphClient, DeleteMode, IndexFor, NodeReference, RelationshipReference, ServerVersion,
    SERVER_COMPONENTS_QUERY,
};

pub use config::ClientConfig;

pub use cypher::{CypherFluentQuery, CypherQuery, PropertyCase};

pub use driver::{
    AccessMode, AuthToken, Driver, DriverError, DriverFactory, DriverNode, DriverRecord, DriverRelationship,
    DriverResult, DriverSettings, DriverValue, Session, SessionConfig, Statement,
};

pub use error::{GraphClientError, GraphClientResult, NOT_VALID_FOR_BOLT};

pub use routing::{AddressResolver, BoltScheme, ConnectionUri, ServerAddress, DEFAULT_BOLT_PORT};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
