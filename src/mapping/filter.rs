use super::instruction::Instruction;
use crate::schema::{FlatProperty, PropertyType, is_read_only};
use ahash::{AHashMap, AHashSet};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Drops the instructions whose destination is a read-only property.
///
/// Destinations are compared by their dotted path (`$.a.b` matches `path: [a], key: b`).
pub fn filter_read_only_instructions(
    instructions: Option<&[Instruction]>,
    properties: &[FlatProperty],
) -> Vec<Instruction> {
    let Some(instructions) = instructions.filter(|i| !i.is_empty()) else {
        return Vec::new();
    };

    let read_only: AHashSet<String> = properties
        .iter()
        .filter(|p| is_read_only(p))
        .map(FlatProperty::full_path)
        .collect();

    instructions
        .iter()
        .filter(|instruction| {
            let keep = !read_only.contains(&instruction.destination_path());
            if !keep {
                debug!(
                    destination = instruction.destination.as_str(),
                    "Dropping instruction targeting a read-only property"
                );
            }
            keep
        })
        .cloned()
        .collect()
}

/// A problem found by [`validate_instructions`].
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum InstructionIssue {
    #[error("Source '{source_path}' does not exist in the source schema")]
    UnknownSource { source_path: String },

    #[error("Destination '{destination}' does not exist in the destination schema")]
    UnknownDestination { destination: String },

    #[error("Destination '{destination}' is read-only")]
    ReadOnlyDestination { destination: String },

    #[error(
        "Source '{source_path}' of type {source_type} cannot be written to '{destination}' of type {destination_type}"
    )]
    TypeMismatch {
        source_path: String,
        source_type: PropertyType,
        destination: String,
        destination_type: PropertyType,
    },
}

/// Checks every instruction against the flattened source and destination schemas.
pub fn validate_instructions(
    instructions: &[Instruction],
    source_properties: &[FlatProperty],
    destination_properties: &[FlatProperty],
) -> Vec<InstructionIssue> {
    let sources = index_by_path(source_properties);
    let destinations = index_by_path(destination_properties);
    let mut issues = Vec::new();

    for instruction in instructions {
        let source_path = instruction.source_path();
        let destination = instruction.destination_path();

        let source = sources.get(source_path.as_str());
        if source.is_none() {
            issues.push(InstructionIssue::UnknownSource {
                source_path: source_path.clone(),
            });
        }

        let Some(target) = destinations.get(destination.as_str()) else {
            issues.push(InstructionIssue::UnknownDestination { destination });
            continue;
        };
        if is_read_only(target) {
            issues.push(InstructionIssue::ReadOnlyDestination {
                destination: destination.clone(),
            });
        }

        if let (Some(source_type), Some(destination_type)) = (
            source.and_then(|s| s.property_type),
            target.property_type,
        ) {
            if !compatible(source_type, destination_type) {
                issues.push(InstructionIssue::TypeMismatch {
                    source_path,
                    source_type,
                    destination,
                    destination_type,
                });
            }
        }
    }
    issues
}

fn index_by_path(properties: &[FlatProperty]) -> AHashMap<String, &FlatProperty> {
    properties.iter().map(|p| (p.full_path(), p)).collect()
}

fn compatible(source: PropertyType, destination: PropertyType) -> bool {
    source == destination
        || matches!(
            (source, destination),
            (PropertyType::Integer, PropertyType::Number)
        )
}
