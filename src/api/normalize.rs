//! The backend is inconsistent about envelopes: list endpoints answer with a bare
//! array, `{data: [...]}` or `{<collection>: [...]}`, and single-entity endpoints
//! with the entity itself or `{data: {...}}`. Everything past this module sees
//! plain entities.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::project::Project;
use crate::error::{Error, Result};

/// The items of a list response, or nothing when no known envelope matches.
pub fn extract_list(response: Value, collection: &str) -> Vec<Value> {
    match response {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            if let Some(Value::Array(items)) = map.remove("data") {
                return items;
            }
            match map.remove(collection) {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            }
        }
        _ => Vec::new(),
    }
}

/// The entity of a single-entity response: `{data: {...}}`, or an object with an `id`.
pub fn extract_entity(response: Value, entity: &'static str) -> Result<Value> {
    match response {
        Value::Object(mut map) => {
            if matches!(map.get("data"), Some(Value::Object(_))) {
                if let Some(inner) = map.remove("data") {
                    return Ok(inner);
                }
            }
            if map.contains_key("id") {
                return Ok(Value::Object(map));
            }
            Err(Error::InvalidResponseShape { entity })
        }
        _ => Err(Error::InvalidResponseShape { entity }),
    }
}

/// Decode list items, skipping any that do not fit the entity type.
pub fn decode_list<T: DeserializeOwned>(response: Value, collection: &str) -> Vec<T> {
    extract_list(response, collection)
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(entity) => Some(entity),
            Err(e) => {
                log::warn!("Skipping malformed {} entry: {}", collection, e);
                None
            }
        })
        .collect()
}

pub fn decode_entity<T: DeserializeOwned>(response: Value, entity: &'static str) -> Result<T> {
    let value = extract_entity(response, entity)?;
    Ok(serde_json::from_value(value)?)
}

/// Canonical projects from a list response. Titles are resolved during decoding.
pub fn projects(response: Value) -> Vec<Project> {
    decode_list(response, "projects")
}

pub fn project(response: Value) -> Result<Project> {
    decode_entity(response, "project")
}
