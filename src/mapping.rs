//! Mapping driver records into caller types

use serde::de::DeserializeOwned;
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::cypher::params::{apply_incoming_case, PropertyCase};
use crate::driver::DriverRecord;
use crate::error::{GraphClientError, GraphClientResult};

/// Map one record into `T`.
///
/// A single-column record maps its only value (nodes and relationships by
/// their properties). Records with several columns map as an object keyed by
/// column name, which suits projections like `RETURN n.name AS name, n.age AS age`.
pub fn map_record<T: DeserializeOwned>(record: &DriverRecord, case: PropertyCase) -> GraphClientResult<T> {
    let (column, json) = match (record.keys(), record.values()) {
        ([key], [value]) => (key.clone(), value.to_json()),
        (keys, values) => {
            let mut object = JsonMap::with_capacity(keys.len());
            for (key, value) in keys.iter().zip(values) {
                object.insert(key.clone(), value.to_json());
            }
            (keys.join(", "), JsonValue::Object(object))
        }
    };

    serde_json::from_value(apply_incoming_case(json, case)).map_err(|e| GraphClientError::Mapping {
        column,
        message: e.to_string(),
    })
}

/// Map every record, stopping at the first failure
pub fn map_records<T: DeserializeOwned>(records: &[DriverRecord], case: PropertyCase) -> GraphClientResult<Vec<T>> {
    records.iter().map(|record| map_record(record, case)).collect()
}
