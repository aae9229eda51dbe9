//! Immutable Cypher statement produced by the fluent builder

use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use std::collections::HashMap;

use crate::client::BoltGraphClient;
use crate::cypher::params::{to_driver_value, PropertyCase};
use crate::driver::{AccessMode, DriverValue, SessionConfig, Statement};
use crate::error::GraphClientResult;

/// A built Cypher query: text, parameters and session options
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CypherQuery {
    pub(crate) text: String,
    pub(crate) parameters: IndexMap<String, JsonValue>,
    pub(crate) access_mode: AccessMode,
    pub(crate) database: Option<String>,
    pub(crate) bookmarks: Vec<String>,
}

impl CypherQuery {
    /// Query from raw text with no parameters
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parameters in the order they were added, still in serialized form
    pub fn parameters(&self) -> &IndexMap<String, JsonValue> {
        &self.parameters
    }

    pub fn access_mode(&self) -> AccessMode {
        self.access_mode
    }

    pub fn is_write(&self) -> bool {
        self.access_mode == AccessMode::Write
    }

    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    pub fn bookmarks(&self) -> &[String] {
        &self.bookmarks
    }

    /// Flatten the parameters into the map handed to the driver, using the
    /// client's property casing.
    pub fn to_driver_parameters(&self, client: &BoltGraphClient) -> GraphClientResult<HashMap<String, DriverValue>> {
        self.driver_parameters_with(client.property_case())
    }

    pub(crate) fn driver_parameters_with(&self, case: PropertyCase) -> GraphClientResult<HashMap<String, DriverValue>> {
        let mut params = HashMap::with_capacity(self.parameters.len());
        for (key, value) in &self.parameters {
            params.insert(key.clone(), to_driver_value(key, value, case)?);
        }
        Ok(params)
    }

    pub(crate) fn to_statement(&self, case: PropertyCase) -> GraphClientResult<Statement> {
        Ok(Statement::with_parameters(
            self.text.clone(),
            self.driver_parameters_with(case)?,
        ))
    }

    pub(crate) fn session_config(&self, database: Option<String>) -> SessionConfig {
        SessionConfig {
            access_mode: self.access_mode,
            bookmarks: self.bookmarks.clone(),
            database,
        }
    }
}
