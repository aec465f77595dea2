use super::instruction::Instruction;
use super::path::JsonPath;
use crate::error::MappingError;
use serde_json::{Map, Value};
use tracing::debug;

struct CompiledInstruction {
    source: JsonPath,
    destination: JsonPath,
    destination_text: String,
}

/// Applies a list of instructions to source payloads.
///
/// Paths are parsed once in [`Transformer::new`]; [`Transformer::apply`] can then be run
/// repeatedly against different payloads.
pub struct Transformer {
    instructions: Vec<CompiledInstruction>,
}

impl Transformer {
    pub fn new(instructions: &[Instruction]) -> Result<Self, MappingError> {
        let instructions = instructions
            .iter()
            .map(|instruction| -> Result<CompiledInstruction, MappingError> {
                let invalid = |source| MappingError::InvalidPath {
                    destination: instruction.destination.clone(),
                    source,
                };
                Ok(CompiledInstruction {
                    source: JsonPath::parse(&instruction.source).map_err(invalid)?,
                    destination: JsonPath::parse(&instruction.destination).map_err(invalid)?,
                    destination_text: instruction.destination.clone(),
                })
            })
            .collect::<Result<Vec<_>, MappingError>>()?;
        Ok(Self { instructions })
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Builds the destination payload. Instructions whose source is absent are skipped.
    pub fn apply(&self, source: &Value) -> Result<Value, MappingError> {
        let mut output = Value::Object(Map::new());
        for instruction in &self.instructions {
            let Some(value) = instruction.source.get(source) else {
                debug!(
                    source = %instruction.source,
                    "Source value missing, instruction skipped"
                );
                continue;
            };
            instruction
                .destination
                .set(&mut output, value.clone())
                .map_err(|message| MappingError::Conflict {
                    destination: instruction.destination_text.clone(),
                    message,
                })?;
        }
        Ok(output)
    }
}
