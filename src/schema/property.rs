use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// JSON Schema primitive type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    String,
    Number,
    Integer,
    Boolean,
    Null,
    Array,
    Object,
}

impl PropertyType {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "string" => Some(PropertyType::String),
            "number" => Some(PropertyType::Number),
            "integer" => Some(PropertyType::Integer),
            "boolean" => Some(PropertyType::Boolean),
            "null" => Some(PropertyType::Null),
            "array" => Some(PropertyType::Array),
            "object" => Some(PropertyType::Object),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::String => "string",
            PropertyType::Number => "number",
            PropertyType::Integer => "integer",
            PropertyType::Boolean => "boolean",
            PropertyType::Null => "null",
            PropertyType::Array => "array",
            PropertyType::Object => "object",
        }
    }

    /// Reads the type declared by a schema node.
    ///
    /// A list of types yields its first non-null entry. Without `type`, a node with
    /// `properties` is an object and a node with `items` is an array.
    pub fn of_schema(node: &Value) -> Option<Self> {
        match node.get("type") {
            Some(Value::String(name)) => Self::parse(name),
            Some(Value::Array(names)) => {
                let parsed: Vec<Self> = names
                    .iter()
                    .filter_map(Value::as_str)
                    .filter_map(Self::parse)
                    .collect();
                parsed
                    .iter()
                    .copied()
                    .find(|t| *t != PropertyType::Null)
                    .or_else(|| parsed.first().copied())
            }
            _ if node.get("properties").is_some() => Some(PropertyType::Object),
            _ if node.get("items").is_some() => Some(PropertyType::Array),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One property discovered while walking a JSON Schema.
///
/// `path` holds the ancestor keys from the root to the parent; it never contains `key`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatProperty {
    pub key: String,
    #[serde(default)]
    pub path: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub property_type: Option<PropertyType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub array_type: Option<PropertyType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<Value>>,
}

impl FlatProperty {
    /// The dotted address of this property from the schema root.
    pub fn full_path(&self) -> String {
        self.path.iter().chain(std::iter::once(&self.key)).join(".")
    }

    pub fn is_top_level(&self) -> bool {
        self.path.is_empty()
    }
}
