//! Driver-native value types
//!
//! These are the values the Bolt driver accepts as statement parameters and
//! hands back inside result records.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat};
use serde_json::{Map as JsonMap, Number, Value as JsonValue};
use std::collections::HashMap;
use std::fmt;

/// A node as returned by the driver
#[derive(Debug, Clone, PartialEq)]
pub struct DriverNode {
    pub id: i64,
    pub labels: Vec<String>,
    pub properties: HashMap<String, DriverValue>,
}

/// A relationship as returned by the driver
#[derive(Debug, Clone, PartialEq)]
pub struct DriverRelationship {
    pub id: i64,
    pub start_id: i64,
    pub end_id: i64,
    pub rel_type: String,
    pub properties: HashMap<String, DriverValue>,
}

/// Value understood by the driver
///
/// Parameters only ever use the scalar, list and map variants; nodes and
/// relationships appear in results.
#[derive(Debug, Clone, PartialEq)]
pub enum DriverValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    List(Vec<DriverValue>),
    Map(HashMap<String, DriverValue>),
    Node(DriverNode),
    Relationship(DriverRelationship),
}

impl DriverValue {
    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, DriverValue::Null)
    }

    /// Get string value if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DriverValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get integer value if this is an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            DriverValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get list value if this is a list
    pub fn as_list(&self) -> Option<&[DriverValue]> {
        match self {
            DriverValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get map value if this is a map
    pub fn as_map(&self) -> Option<&HashMap<String, DriverValue>> {
        match self {
            DriverValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Get type name as string
    pub fn type_name(&self) -> &'static str {
        match self {
            DriverValue::Null => "Null",
            DriverValue::Boolean(_) => "Boolean",
            DriverValue::Integer(_) => "Integer",
            DriverValue::Float(_) => "Float",
            DriverValue::String(_) => "String",
            DriverValue::Bytes(_) => "Bytes",
            DriverValue::List(_) => "List",
            DriverValue::Map(_) => "Map",
            DriverValue::Node(_) => "Node",
            DriverValue::Relationship(_) => "Relationship",
        }
    }

    /// Convert to JSON for deserialization into caller types.
    ///
    /// Nodes and relationships collapse to their property maps. Non-finite
    /// floats become `null`.
    pub fn to_json(&self) -> JsonValue {
        match self {
            DriverValue::Null => JsonValue::Null,
            DriverValue::Boolean(b) => JsonValue::Bool(*b),
            DriverValue::Integer(i) => JsonValue::Number((*i).into()),
            DriverValue::Float(f) => Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            DriverValue::String(s) => JsonValue::String(s.clone()),
            DriverValue::Bytes(bytes) => {
                JsonValue::Array(bytes.iter().map(|b| JsonValue::Number((*b).into())).collect())
            }
            DriverValue::List(items) => JsonValue::Array(items.iter().map(|v| v.to_json()).collect()),
            DriverValue::Map(map) => properties_to_json(map),
            DriverValue::Node(node) => properties_to_json(&node.properties),
            DriverValue::Relationship(rel) => properties_to_json(&rel.properties),
        }
    }
}

fn properties_to_json(map: &HashMap<String, DriverValue>) -> JsonValue {
    let mut object = JsonMap::new();
    for (k, v) in map {
        object.insert(k.clone(), v.to_json());
    }
    JsonValue::Object(object)
}

impl fmt::Display for DriverValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverValue::Null => write!(f, "null"),
            DriverValue::Boolean(b) => write!(f, "{}", b),
            DriverValue::Integer(i) => write!(f, "{}", i),
            DriverValue::Float(fl) => write!(f, "{}", fl),
            DriverValue::String(s) => write!(f, "\"{}\"", s),
            DriverValue::Bytes(bytes) => write!(f, "<{} bytes>", bytes.len()),
            DriverValue::List(items) => {
                write!(f, "[")?;
                for (i, val) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", val)?;
                }
                write!(f, "]")
            }
            DriverValue::Map(map) => {
                let mut keys: Vec<&String> = map.keys().collect();
                keys.sort();
                write!(f, "{{")?;
                for (i, key) in keys.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, map[*key])?;
                }
                write!(f, "}}")
            }
            DriverValue::Node(node) => write!(f, "({}:{})", node.id, node.labels.join(":")),
            DriverValue::Relationship(rel) => {
                write!(f, "({})-[{}:{}]->({})", rel.start_id, rel.id, rel.rel_type, rel.end_id)
            }
        }
    }
}

impl From<bool> for DriverValue {
    fn from(b: bool) -> Self {
        DriverValue::Boolean(b)
    }
}

impl From<i64> for DriverValue {
    fn from(i: i64) -> Self {
        DriverValue::Integer(i)
    }
}

impl From<f64> for DriverValue {
    fn from(f: f64) -> Self {
        DriverValue::Float(f)
    }
}

impl From<String> for DriverValue {
    fn from(s: String) -> Self {
        DriverValue::String(s)
    }
}

impl From<&str> for DriverValue {
    fn from(s: &str) -> Self {
        DriverValue::String(s.to_string())
    }
}

impl<T: Into<DriverValue>> From<Vec<T>> for DriverValue {
    fn from(items: Vec<T>) -> Self {
        DriverValue::List(items.into_iter().map(Into::into).collect())
    }
}

// Temporal values and UUIDs are sent as the same strings the parameter
// serializer produces for them.

impl From<NaiveDateTime> for DriverValue {
    fn from(dt: NaiveDateTime) -> Self {
        DriverValue::String(dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
    }
}

impl From<NaiveDate> for DriverValue {
    fn from(date: NaiveDate) -> Self {
        DriverValue::String(date.format("%Y-%m-%d").to_string())
    }
}

impl From<DateTime<FixedOffset>> for DriverValue {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        DriverValue::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, false))
    }
}

impl From<uuid::Uuid> for DriverValue {
    fn from(id: uuid::Uuid) -> Self {
        DriverValue::String(id.to_string())
    }
}

impl From<HashMap<String, DriverValue>> for DriverValue {
    fn from(map: HashMap<String, DriverValue>) -> Self {
        DriverValue::Map(map)
    }
}
