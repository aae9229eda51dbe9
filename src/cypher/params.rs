//! Parameter serialization
//!
//! Caller values go through `serde_json` first, so anything `Serialize`
//! works as a parameter and dates, offsets and UUIDs come out as the same
//! strings the JSON serializer writes for them. The JSON tree is then
//! flattened into driver-native values.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

use crate::driver::DriverValue;
use crate::error::{GraphClientError, GraphClientResult};

/// How map keys are cased when crossing the driver boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyCase {
    /// Keys are sent and read exactly as serde produces them
    #[default]
    AsIs,
    /// `snake_case` keys are sent as `camelCase` and read back as `snake_case`
    CamelCase,
}

impl PropertyCase {
    /// Key as it should appear in the database
    pub fn outgoing_key(&self, key: &str) -> String {
        match self {
            PropertyCase::AsIs => key.to_string(),
            PropertyCase::CamelCase => snake_to_camel(key),
        }
    }

    /// Key as caller types expect it
    pub fn incoming_key(&self, key: &str) -> String {
        match self {
            PropertyCase::AsIs => key.to_string(),
            PropertyCase::CamelCase => camel_to_snake(key),
        }
    }
}

fn snake_to_camel(key: &str) -> String {
    let trimmed = key.trim_start_matches('_');
    let mut out = String::with_capacity(key.len());
    out.push_str(&key[..key.len() - trimmed.len()]);

    let mut upper_next = false;
    for (i, c) in trimmed.chars().enumerate() {
        if c == '_' {
            upper_next = true;
        } else if i == 0 {
            out.extend(c.to_lowercase());
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

fn camel_to_snake(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Serialize a caller value into the intermediate JSON form
pub fn serialize_param<T: Serialize + ?Sized>(value: &T) -> GraphClientResult<JsonValue> {
    Ok(serde_json::to_value(value)?)
}

/// Flatten a serialized parameter into a driver value
pub fn to_driver_value(key: &str, value: &JsonValue, case: PropertyCase) -> GraphClientResult<DriverValue> {
    let converted = match value {
        JsonValue::Null => DriverValue::Null,
        JsonValue::Bool(b) => DriverValue::Boolean(*b),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                DriverValue::Integer(i)
            } else if n.is_u64() {
                return Err(GraphClientError::InvalidParameter {
                    key: key.to_string(),
                    reason: format!("integer {} does not fit in a signed 64-bit value", n),
                });
            } else {
                let f = n.as_f64().ok_or_else(|| GraphClientError::InvalidParameter {
                    key: key.to_string(),
                    reason: format!("number {} is not representable", n),
                })?;
                DriverValue::Float(f)
            }
        }
        JsonValue::String(s) => DriverValue::String(s.clone()),
        JsonValue::Array(items) => DriverValue::List(
            items
                .iter()
                .map(|item| to_driver_value(key, item, case))
                .collect::<GraphClientResult<Vec<_>>>()?,
        ),
        JsonValue::Object(fields) => {
            let mut map = HashMap::with_capacity(fields.len());
            for (field, field_value) in fields {
                map.insert(case.outgoing_key(field), to_driver_value(key, field_value, case)?);
            }
            DriverValue::Map(map)
        }
    };
    Ok(converted)
}

/// Rename object keys of a JSON tree read from the driver
pub fn apply_incoming_case(value: JsonValue, case: PropertyCase) -> JsonValue {
    if case == PropertyCase::AsIs {
        return value;
    }
    match value {
        JsonValue::Object(fields) => JsonValue::Object(
            fields
                .into_iter()
                .map(|(k, v)| (case.incoming_key(&k), apply_incoming_case(v, case)))
                .collect(),
        ),
        JsonValue::Array(items) => {
            JsonValue::Array(items.into_iter().map(|v| apply_incoming_case(v, case)).collect())
        }
        other => other,
    }
}
