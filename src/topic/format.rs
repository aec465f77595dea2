use crate::error::TopicError;
use crate::schema::DefinitionResolver;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use super::validator::{validate_tag, validate_topic, validate_topic_filter};

pub const FORMAT_MQTT_TOPIC: &str = "mqtt-topic";
pub const FORMAT_MQTT_TAG: &str = "mqtt-tag";
pub const FORMAT_MQTT_TOPIC_FILTER: &str = "mqtt-topic-filter";

/// The format names whose generic error messages the localizer rewrites.
pub const LOCALIZED_FORMATS: [&str; 3] =
    [FORMAT_MQTT_TOPIC, FORMAT_MQTT_TAG, FORMAT_MQTT_TOPIC_FILTER];

const FORMAT_KEYWORD: &str = "format";

/// Defines the contract for checking a string against a named schema `format`.
pub trait FormatValidator: Send + Sync {
    fn format(&self) -> &str;
    fn validate(&self, value: &str) -> Result<(), TopicError>;
}

/// Defines the built-in validators, their registration, and their lookup by name.
macro_rules! define_format_validators {
    ( $( ($struct_name:ident, $format:literal, $check:expr) ),* $(,)? ) => {
        $(
            struct $struct_name;
            impl FormatValidator for $struct_name {
                fn format(&self) -> &str { $format }
                fn validate(&self, value: &str) -> Result<(), TopicError> {
                    let check: fn(&str) -> Result<(), TopicError> = $check;
                    check(value)
                }
            }
        )*

        fn register_default_validators(registry: &mut AHashMap<String, Box<dyn FormatValidator>>) {
            $( registry.insert($format.to_string(), Box::new($struct_name)); )*
        }

        fn create_validator_by_name(name: &str) -> Option<Box<dyn FormatValidator>> {
            match name {
                $( $format => Some(Box::new($struct_name)), )*
                _ => None,
            }
        }
    };
}

define_format_validators! {
    (TopicFormat, "mqtt-topic", validate_topic),
    (TagFormat, "mqtt-tag", validate_tag),
    (TopicFilterFormat, "mqtt-topic-filter", validate_topic_filter),
    // Permissive formats
    (BooleanFormat, "boolean", |_| Ok(())),
    (InterpolationFormat, "interpolation", |_| Ok(())),
    (IdentifierFormat, "identifier", |_| Ok(())),
}

/// A single structured error from a JSON Schema validation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub keyword: String,
    #[serde(default)]
    pub instance_path: String,
    #[serde(default)]
    pub schema_path: String,
    #[serde(default)]
    pub params: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub schema: Value,
    #[serde(default)]
    pub data: Value,
}

/// Lookup table of format validators, keyed by the schema's `format` value.
pub struct FormatRegistry {
    validators: AHashMap<String, Box<dyn FormatValidator>>,
}

pub struct FormatRegistryBuilder {
    validators: AHashMap<String, Box<dyn FormatValidator>>,
}

impl FormatRegistryBuilder {
    pub fn new() -> Self {
        let mut validators: AHashMap<String, Box<dyn FormatValidator>> = AHashMap::new();
        register_default_validators(&mut validators);
        Self { validators }
    }

    /// Makes `alias` behave like the built-in format `builtin`. Unknown built-ins are ignored.
    pub fn with_alias(mut self, alias: &str, builtin: &str) -> Self {
        if let Some(validator) = create_validator_by_name(builtin) {
            self.validators.insert(alias.to_string(), validator);
        }
        self
    }

    pub fn with_validator(mut self, validator: Box<dyn FormatValidator>) -> Self {
        self.validators
            .insert(validator.format().to_string(), validator);
        self
    }

    pub fn build(self) -> FormatRegistry {
        FormatRegistry {
            validators: self.validators,
        }
    }
}

impl Default for FormatRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        FormatRegistryBuilder::new().build()
    }
}

impl FormatRegistry {
    pub fn builder() -> FormatRegistryBuilder {
        FormatRegistryBuilder::new()
    }

    pub fn contains(&self, format: &str) -> bool {
        self.validators.contains_key(format)
    }

    /// Runs the validator registered for `format`. Returns `None` for unknown formats.
    pub fn validate(&self, format: &str, value: &str) -> Option<Result<(), TopicError>> {
        self.validators.get(format).map(|v| v.validate(value))
    }

    /// Replaces generic format messages with the message of the matching MQTT validator.
    ///
    /// Errors with another keyword, another format or a valid value are returned unchanged.
    pub fn localize(&self, mut errors: Vec<ValidationError>) -> Vec<ValidationError> {
        self.localize_in_place(&mut errors);
        errors
    }

    /// In-place variant of [`FormatRegistry::localize`]; the caller owns `errors` for the call.
    pub fn localize_in_place(&self, errors: &mut [ValidationError]) {
        for error in errors.iter_mut() {
            if let Some(message) = self.localized_message(error) {
                error.message = Some(message);
            }
        }
    }

    fn localized_message(&self, error: &ValidationError) -> Option<String> {
        if error.keyword != FORMAT_KEYWORD {
            return None;
        }
        let format = error.schema.as_str()?;
        if !LOCALIZED_FORMATS.contains(&format) {
            return None;
        }
        let value = error.data.as_str()?;
        match self.validate(format, value)? {
            Ok(()) => None,
            Err(violation) => Some(violation.to_string()),
        }
    }

    /// Checks every string in `document` that its schema node declares a registered `format` for.
    ///
    /// Produces the generic `must match format` errors a schema validator would report,
    /// ready to be passed through [`FormatRegistry::localize`].
    pub fn check(&self, schema: &Value, document: &Value) -> Vec<ValidationError> {
        let mut check = Check {
            registry: self,
            resolver: DefinitionResolver::new(schema),
            errors: Vec::new(),
        };
        check.node(schema, document, "", "#", 0);
        check.errors
    }
}

/// Recursion state of [`FormatRegistry::check`].
struct Check<'a> {
    registry: &'a FormatRegistry,
    resolver: DefinitionResolver<'a>,
    errors: Vec<ValidationError>,
}

impl<'a> Check<'a> {
    fn node(
        &mut self,
        schema: &'a Value,
        document: &Value,
        instance_path: &str,
        schema_path: &str,
        depth: usize,
    ) {
        if depth > MAX_CHECK_DEPTH {
            debug!(instance_path, "Format check stopped at maximum depth");
            return;
        }

        let (schema, schema_path) = match schema.get("$ref").and_then(Value::as_str) {
            Some(pointer) => match self.resolver.resolve(pointer) {
                Some(definition) => (definition, pointer.to_string()),
                None => {
                    debug!(pointer, "Skipping format check for unresolved reference");
                    return;
                }
            },
            None => (schema, schema_path.to_string()),
        };

        if let (Some(format), Some(value)) = (
            schema.get(FORMAT_KEYWORD).and_then(Value::as_str),
            document.as_str(),
        ) {
            if let Some(Err(_)) = self.registry.validate(format, value) {
                self.errors.push(ValidationError {
                    keyword: FORMAT_KEYWORD.to_string(),
                    instance_path: instance_path.to_string(),
                    schema_path: format!("{}/{}", schema_path, FORMAT_KEYWORD),
                    params: json!({ "format": format }),
                    message: Some(format!("must match format \"{}\"", format)),
                    schema: Value::String(format.to_string()),
                    data: document.clone(),
                });
            }
        }

        match document {
            Value::Object(fields) => {
                let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
                    return;
                };
                for (key, property_schema) in properties {
                    if let Some(field) = fields.get(key) {
                        self.node(
                            property_schema,
                            field,
                            &format!("{}/{}", instance_path, key),
                            &format!("{}/properties/{}", schema_path, key),
                            depth + 1,
                        );
                    }
                }
            }
            Value::Array(items) => {
                let Some(item_schema) = schema.get("items").filter(|s| s.is_object()) else {
                    return;
                };
                for (index, item) in items.iter().enumerate() {
                    self.node(
                        item_schema,
                        item,
                        &format!("{}/{}", instance_path, index),
                        &format!("{}/items", schema_path),
                        depth + 1,
                    );
                }
            }
            _ => {}
        }
    }
}

const MAX_CHECK_DEPTH: usize = 64;
