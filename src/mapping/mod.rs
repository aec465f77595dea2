//! Mapping instructions between a source payload and a destination schema.

pub mod filter;
pub mod instruction;
pub mod path;
pub mod transform;

pub use filter::*;
pub use instruction::*;
pub use path::*;
pub use transform::*;
