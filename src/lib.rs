//! # edgemap - Topic Validation and Schema Mapping Core
//!
//! **edgemap** holds the logic behind the configuration forms of an MQTT edge gateway:
//! it validates topic names, tags and topic filters, flattens JSON Schemas into
//! addressable property lists, and manages the source→destination instructions that
//! map one payload shape onto another.
//!
//! Everything here is pure and synchronous. Invalid input is reported as data
//! (a [`TopicError`](error::TopicError), a `null` typed property, an empty list), never
//! as a panic.
//!
//! ## Core Workflow
//!
//! 1.  **Validate Topics**: Check user input with [`topic::validate_topic`],
//!     [`topic::validate_tag`] or [`topic::validate_topic_filter`], or through a
//!     [`topic::FormatRegistry`] keyed by JSON Schema `format` names.
//! 2.  **Flatten Schemas**: Turn source and destination schemas into [`schema::FlatProperty`]
//!     lists with [`schema::get_property_list_from`].
//! 3.  **Edit Instructions**: Keep one [`mapping::Instruction`] per destination in an
//!     [`mapping::InstructionList`] and drop those aimed at read-only properties.
//! 4.  **Preview**: Run the instructions over a sample payload with a [`mapping::Transformer`].
//!
//! ## Quick Start
//!
//! ```rust
//! use edgemap::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     // 1. Validate a subscription filter
//!     assert!(validate_topic_filter("factory/+/temperature").is_ok());
//!     assert_eq!(
//!         validate_topic_filter("$share//factory"),
//!         Err(TopicError::EmptySharedName)
//!     );
//!
//!     // 2. Flatten the destination schema
//!     let target = json!({
//!         "properties": {
//!             "id": { "type": "string", "readOnly": true },
//!             "celsius": { "type": "number" }
//!         }
//!     });
//!     let properties = get_property_list_from(&target);
//!
//!     // 3. Build the instruction list, the read-only `id` is filtered out
//!     let mut instructions = InstructionList::new();
//!     instructions.upsert(Instruction::new("$.sensor", "$.id"));
//!     instructions.upsert(Instruction::new("$.value", "$.celsius"));
//!     let writable = filter_read_only_instructions(Some(instructions.as_slice()), &properties);
//!     assert_eq!(writable.len(), 1);
//!
//!     // 4. Preview the mapping on a sample payload
//!     let transformer = Transformer::new(&writable)?;
//!     let output = transformer.apply(&json!({ "sensor": "t-1", "value": 21.5 }))?;
//!     assert_eq!(output, json!({ "celsius": 21.5 }));
//!     Ok(())
//! }
//! ```

pub mod document;
pub mod error;
pub mod mapping;
pub mod prelude;
pub mod schema;
pub mod topic;
