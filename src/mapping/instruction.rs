use super::path::from_json_path;
use serde::{Deserialize, Serialize};

/// Kind of data a mapping source is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataReferenceKind {
    Tag,
    TopicFilter,
}

/// Identifies the tag or topic filter a source path is read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataReference {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: DataReferenceKind,
}

/// A single mapping directive: copy the value at `source` into `destination`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instruction {
    pub source: String,
    pub destination: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_ref: Option<DataReference>,
}

impl Instruction {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            source_ref: None,
        }
    }

    pub fn with_source_ref(mut self, source_ref: DataReference) -> Self {
        self.source_ref = Some(source_ref);
        self
    }

    /// The destination without its JSONPath root, comparable to `FlatProperty::full_path`.
    pub fn destination_path(&self) -> String {
        from_json_path(&self.destination)
    }

    pub fn source_path(&self) -> String {
        from_json_path(&self.source)
    }
}

/// What an [`InstructionList::upsert`] did to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Replaced,
    Removed,
    Unchanged,
}

/// An ordered instruction list holding at most one instruction per destination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Instruction>", into = "Vec<Instruction>")]
pub struct InstructionList {
    instructions: Vec<Instruction>,
}

impl InstructionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the instruction writing to `destination`, with or without the `$.` root.
    pub fn position(&self, destination: &str) -> Option<usize> {
        let wanted = from_json_path(destination);
        self.instructions
            .iter()
            .position(|i| i.destination_path() == wanted)
    }

    pub fn get(&self, destination: &str) -> Option<&Instruction> {
        self.position(destination).map(|index| &self.instructions[index])
    }

    /// Inserts `instruction`, replacing any instruction for the same destination in place.
    /// An empty `source` removes the destination's instruction instead.
    pub fn upsert(&mut self, instruction: Instruction) -> Upsert {
        let existing = self.position(&instruction.destination);
        match (existing, instruction.source.is_empty()) {
            (Some(index), true) => {
                self.instructions.remove(index);
                Upsert::Removed
            }
            (None, true) => Upsert::Unchanged,
            (Some(index), false) => {
                self.instructions[index] = instruction;
                Upsert::Replaced
            }
            (None, false) => {
                self.instructions.push(instruction);
                Upsert::Inserted
            }
        }
    }

    pub fn remove(&mut self, destination: &str) -> Option<Instruction> {
        self.position(destination)
            .map(|index| self.instructions.remove(index))
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    pub fn as_slice(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn into_vec(self) -> Vec<Instruction> {
        self.instructions
    }
}

/// Builds a list through [`InstructionList::upsert`], so later duplicates win.
impl From<Vec<Instruction>> for InstructionList {
    fn from(instructions: Vec<Instruction>) -> Self {
        instructions.into_iter().collect()
    }
}

impl From<InstructionList> for Vec<Instruction> {
    fn from(list: InstructionList) -> Self {
        list.instructions
    }
}

impl FromIterator<Instruction> for InstructionList {
    fn from_iter<T: IntoIterator<Item = Instruction>>(iter: T) -> Self {
        let mut list = InstructionList::new();
        for instruction in iter {
            list.upsert(instruction);
        }
        list
    }
}

impl<'a> IntoIterator for &'a InstructionList {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.instructions.iter()
    }
}
