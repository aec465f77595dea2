//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the edgemap crate.
//!
//! # Example
//!
//! ```rust
//! use edgemap::prelude::*;
//!
//! assert!(validate_topic("factory/line-1").is_ok());
//! assert_eq!(to_json_path("a.b"), "$.a.b");
//! ```

// Topic grammar
pub use crate::topic::{
    FormatRegistry, FormatValidator, ValidationError, validate_tag, validate_topic,
    validate_topic_filter,
};

// Schema flattening
pub use crate::schema::{
    FlatProperty, Flattener, PropertyType, TopicSample, filter_supported_properties,
    get_property_list_from, is_read_only, mappable_targets, payload_to_schema,
    reducer_schema_examples,
};

// Mapping
pub use crate::mapping::{
    DataReference, DataReferenceKind, Instruction, InstructionIssue, InstructionList, JsonPath,
    Transformer, Upsert, filter_read_only_instructions, from_json_path, to_json_path,
    validate_instructions,
};

// Error types
pub use crate::error::{JsonPathError, MappingError, SchemaError, TopicError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
