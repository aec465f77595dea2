use super::property::PropertyType;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::debug;

/// A payload observed on a topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicSample {
    pub topic: String,
    pub payload: Value,
}

impl TopicSample {
    pub fn new(topic: impl Into<String>, payload: Value) -> Self {
        Self {
            topic: topic.into(),
            payload,
        }
    }

    /// The payload as a JSON document. A string payload holding a JSON object or array
    /// is decoded first, any other value is used as is.
    pub fn document(&self) -> Value {
        if let Value::String(text) = &self.payload {
            if let Ok(decoded @ (Value::Object(_) | Value::Array(_))) =
                serde_json::from_str::<Value>(text)
            {
                return decoded;
            }
        }
        self.payload.clone()
    }
}

/// Infers a minimal JSON Schema for each distinct topic in `samples`.
///
/// Topics keep their first-seen order. Several samples for one topic are merged: the
/// union of their keys is kept and the first inferred type of a key wins.
pub fn payload_to_schema(samples: Option<&[TopicSample]>) -> Map<String, Value> {
    let mut schemas = Map::new();
    for sample in samples.unwrap_or_default() {
        let mut inferred = infer(&sample.document());
        if let Some(node) = inferred.as_object_mut() {
            node.insert("title".to_string(), Value::String(sample.topic.clone()));
        }

        match schemas.get_mut(&sample.topic) {
            Some(existing) => merge(existing, inferred),
            None => {
                schemas.insert(sample.topic.clone(), inferred);
            }
        }
    }
    debug!(topics = schemas.len(), "Inferred schemas from samples");
    schemas
}

/// Infers the schema of a single JSON value.
pub fn infer(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "type": PropertyType::Null }),
        Value::Bool(_) => json!({ "type": PropertyType::Boolean, "examples": [value] }),
        Value::Number(number) => {
            let kind = if number.is_i64() || number.is_u64() {
                PropertyType::Integer
            } else {
                PropertyType::Number
            };
            json!({ "type": kind, "examples": [value] })
        }
        Value::String(_) => json!({ "type": PropertyType::String, "examples": [value] }),
        Value::Array(items) => match items.first() {
            Some(first) => json!({ "type": PropertyType::Array, "items": infer(first) }),
            None => json!({ "type": PropertyType::Array }),
        },
        Value::Object(fields) => {
            let properties: Map<String, Value> = fields
                .iter()
                .map(|(key, field)| (key.clone(), infer(field)))
                .collect();
            json!({
                "type": PropertyType::Object,
                "properties": properties,
                "required": fields.keys().collect::<Vec<_>>(),
            })
        }
    }
}

fn merge(existing: &mut Value, incoming: Value) {
    let (Some(target), Value::Object(mut source)) = (existing.as_object_mut(), incoming) else {
        return;
    };

    if let (Some(Value::Object(properties)), Some(Value::Object(new_properties))) =
        (target.get_mut("properties"), source.remove("properties"))
    {
        for (key, property) in new_properties {
            properties.entry(key).or_insert(property);
        }
    }

    let required = target
        .get("required")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .chain(source.get("required").and_then(Value::as_array).into_iter().flatten())
        .cloned()
        .unique_by(|key| key.as_str().map(str::to_string))
        .collect::<Vec<_>>();
    if !required.is_empty() {
        target.insert("required".to_string(), Value::Array(required));
    }
}
