//! Connection routing
//!
//! URI scheme classification and the address resolver handed to routing
//! drivers when a cluster is reached through a list of alternate hosts.

pub mod resolver;
pub mod uri;

pub use resolver::AddressResolver;
pub use uri::{BoltScheme, ConnectionUri, ServerAddress, DEFAULT_BOLT_PORT};

/// Routing URI used when only a list of hosts is supplied
pub const VIRTUAL_ROUTING_URI: &str = "bolt+routing://virtual.neo4j.uri";
