//! Cypher query construction
//!
//! - `builder`: fluent clause-by-clause API
//! - `query`: the immutable statement handed to the driver
//! - `params`: caller values to driver parameters

pub mod builder;
pub mod params;
pub mod query;

pub use builder::CypherFluentQuery;
pub use params::PropertyCase;
pub use query::CypherQuery;
