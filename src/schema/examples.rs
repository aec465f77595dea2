use serde_json::{Map, Value, json};

/// Returns a copy of `schema` where every property present in `sample` carries
/// `examples: [<sample value>]`.
///
/// Nested sample objects annotate their own property and are matched against its
/// nested `properties` by key. Keys missing from the schema are ignored and the input
/// schema is left untouched.
pub fn reducer_schema_examples(schema: &Value, sample: &Value) -> Value {
    let (Some(node), Some(fields)) = (schema.as_object(), sample.as_object()) else {
        return schema.clone();
    };
    let Some(properties) = node.get("properties").and_then(Value::as_object) else {
        return schema.clone();
    };

    let annotated: Map<String, Value> = properties
        .iter()
        .map(|(key, property)| {
            let property = match fields.get(key) {
                Some(value) => annotate(property, value),
                None => property.clone(),
            };
            (key.clone(), property)
        })
        .collect();

    let mut node = node.clone();
    node.insert("properties".to_string(), Value::Object(annotated));
    Value::Object(node)
}

fn annotate(property: &Value, value: &Value) -> Value {
    let mut property = if value.is_object() && property.get("properties").is_some() {
        reducer_schema_examples(property, value)
    } else {
        property.clone()
    };
    if let Some(node) = property.as_object_mut() {
        node.insert("examples".to_string(), json!([value]));
    }
    property
}
