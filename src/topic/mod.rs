//! MQTT topic, tag and topic filter grammar.
//!
//! The validators are pure and total: every input yields either `Ok(())` or one
//! [`TopicError`](crate::error::TopicError) naming the first rule it breaks.
//! [`FormatRegistry`] exposes them to JSON Schema `format` checks and rewrites
//! generic format errors into the validators' own messages.

pub mod format;
pub mod validator;

pub use format::*;
pub use validator::*;
