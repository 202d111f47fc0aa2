
//! Centralized row and node access for Neo4j query results.
//!
//! Derive-generated code and the default conversion strategies only touch
//! the `neo4rs::Row` / `neo4rs::BoltNode` APIs through this module.

use std::collections::HashMap;
use neo4rs::{BoltType as Value, Row as Record};
use crate::error::ConvertError;

/// Read a value from a [`Row`](neo4rs::Row) by column name.
///
/// Returns `None` if the column does not exist in the row.
pub fn get_value(record: &Record, key: &str) -> Option<Value> {
    record.get(key).ok()
}

/// Check whether a column exists in the row.
pub fn has_key(record: &Record, key: &str) -> bool {
    get_value(record, key).is_some()
}

/// All columns of a row, keyed by column name.
pub fn columns(record: &Record) -> Result<HashMap<String, Value>, ConvertError> {
    record
        .to::<HashMap<String, Value>>()
        .map_err(|e| ConvertError::Mapping(format!("row -> column map: {e}")))
}

/// The only value of a one-column row.
///
/// Fails with [`ConvertError::NotSingleColumn`] for any other column count.
pub fn single_column(columns: HashMap<String, Value>) -> Result<Value, ConvertError> {
    let count = columns.len();
    match (count, columns.into_values().next()) {
        (1, Some(value)) => Ok(value),
        _ => Err(ConvertError::NotSingleColumn { columns: count }),
    }
}

/// Read a property from a [`BoltNode`](neo4rs::BoltNode) by key.
///
/// Returns `None` if the property does not exist on the node.
pub fn node_prop(node: &neo4rs::BoltNode, key: &str) -> Option<Value> {
    node.get::<Value>(key).ok()
}
