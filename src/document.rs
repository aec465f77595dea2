use crate::error::SchemaError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Reads and deserializes a JSON file.
pub fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, SchemaError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|source| SchemaError::Io {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| SchemaError::Json {
        path: display,
        source,
    })
}

/// Reads a JSON Schema file. The root must be an object.
pub fn load_schema(path: impl AsRef<Path>) -> Result<Value, SchemaError> {
    let path = path.as_ref();
    let schema: Value = load_json(path)?;
    if !schema.is_object() {
        return Err(SchemaError::NotAnObject(path.display().to_string()));
    }
    Ok(schema)
}
