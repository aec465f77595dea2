//! JSON Schema flattening and sample-driven schema helpers.

pub mod examples;
pub mod flatten;
pub mod inference;
pub mod property;
pub mod refs;

pub use examples::*;
pub use flatten::*;
pub use inference::*;
pub use property::*;
pub use refs::*;

/// True for the property kinds a mapping can target directly.
///
/// Objects are containers and untyped properties cannot be checked, so both are excluded.
pub fn filter_supported_properties(property: &FlatProperty) -> bool {
    matches!(
        property.property_type,
        Some(
            PropertyType::String
                | PropertyType::Number
                | PropertyType::Integer
                | PropertyType::Boolean
                | PropertyType::Null
                | PropertyType::Array
        )
    )
}

pub fn is_read_only(property: &FlatProperty) -> bool {
    property.read_only.unwrap_or(false)
}

/// The top-level, supported properties of a flattened schema.
pub fn mappable_targets(properties: &[FlatProperty]) -> Vec<&FlatProperty> {
    properties
        .iter()
        .filter(|p| p.is_top_level() && filter_supported_properties(p))
        .collect()
}
