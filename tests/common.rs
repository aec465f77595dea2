//! Common test fixtures: schemas, payloads and instruction lists.
use edgemap::prelude::*;
use serde_json::{Value, json};

/// A destination schema for a temperature reading with a nested location object.
///
/// `id` is read-only and `location` is defined through a `$ref`.
#[allow(dead_code)]
pub fn create_reading_schema() -> Value {
    json!({
        "type": "object",
        "definitions": {
            "location": {
                "type": "object",
                "title": "Location",
                "properties": {
                    "site": { "type": "string" },
                    "floor": { "type": "integer" }
                }
            }
        },
        "properties": {
            "id": { "type": "string", "readOnly": true, "title": "Identifier" },
            "value": { "type": "number", "description": "Measured value" },
            "unit": { "type": "string" },
            "tags": { "type": "array", "items": { "type": "string" } },
            "location": { "$ref": "#/definitions/location" },
            "online": { "type": "boolean" }
        }
    })
}

/// A source schema as published by a protocol adapter.
#[allow(dead_code)]
pub fn create_adapter_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "sensor": { "type": "string" },
            "reading": { "type": "integer" },
            "labels": { "type": "array", "items": { "type": "string" } },
            "site": {
                "type": "object",
                "properties": { "name": { "type": "string" } }
            }
        }
    })
}

/// A payload matching `create_adapter_schema`.
#[allow(dead_code)]
pub fn create_adapter_payload() -> Value {
    json!({
        "sensor": "t-100",
        "reading": 21,
        "labels": ["hall", "north"],
        "site": { "name": "plant-a" }
    })
}

/// Instructions mapping the adapter payload onto the reading schema.
#[allow(dead_code)]
pub fn create_instructions() -> Vec<Instruction> {
    vec![
        Instruction::new("$.sensor", "$.id"),
        Instruction::new("$.reading", "$.value"),
        Instruction::new("$.labels", "$.tags"),
        Instruction::new("$.site.name", "$.location.site"),
    ]
}

/// A configuration schema using the MQTT string formats.
#[allow(dead_code)]
pub fn create_bridge_schema() -> Value {
    json!({
        "type": "object",
        "definitions": {
            "subscription": {
                "type": "object",
                "properties": {
                    "filter": { "type": "string", "format": "mqtt-topic-filter" },
                    "destination": { "type": "string", "format": "mqtt-topic" }
                }
            }
        },
        "properties": {
            "id": { "type": "string", "format": "identifier" },
            "tag": { "type": "string", "format": "mqtt-tag" },
            "subscriptions": {
                "type": "array",
                "items": { "$ref": "#/definitions/subscription" }
            }
        }
    })
}
