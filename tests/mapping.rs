//! Tests for instructions, the JSONPath codec, read-only filtering and transformation.
mod common;
use common::*;
use edgemap::mapping::PathSegment;
use edgemap::prelude::*;
use serde_json::json;

#[test]
fn test_json_path_codec() {
    assert_eq!(to_json_path(""), "$");
    assert_eq!(to_json_path("123"), "$.123");
    assert_eq!(to_json_path("a.b"), "$.a.b");
    assert_eq!(to_json_path("$.a"), "$.a");
    assert_eq!(to_json_path("$"), "$");

    assert_eq!(from_json_path(""), "");
    assert_eq!(from_json_path("$"), "");
    assert_eq!(from_json_path("$.123"), "123");
    assert_eq!(from_json_path("$.a.b"), "a.b");
    assert_eq!(from_json_path("a.b"), "a.b");
}

#[test]
fn test_json_path_parse() {
    let path = JsonPath::parse("$.a['b.c'][2].d").expect("valid path");
    assert_eq!(
        path.segments(),
        &[
            PathSegment::Key("a".to_string()),
            PathSegment::Key("b.c".to_string()),
            PathSegment::Index(2),
            PathSegment::Key("d".to_string()),
        ]
    );
    assert_eq!(path.to_string(), "$.a['b.c'][2].d");

    let bare = JsonPath::parse("site.name").expect("valid path");
    assert_eq!(bare.to_dotted(), "site.name");
    assert!(JsonPath::parse("$").expect("root").is_root());
    assert!(JsonPath::parse("").expect("root").is_root());
}

#[test]
fn test_json_path_parse_errors() {
    assert!(matches!(
        JsonPath::parse("$.a..b"),
        Err(JsonPathError::EmptySegment { position: 3, .. })
    ));
    assert!(matches!(
        JsonPath::parse("$.a[x]"),
        Err(JsonPathError::UnexpectedCharacter { found: 'x', .. })
    ));
    assert!(matches!(
        JsonPath::parse("$.a['b"),
        Err(JsonPathError::UnterminatedBracket(_))
    ));
    assert!(matches!(
        JsonPath::parse("$x"),
        Err(JsonPathError::UnexpectedCharacter { found: 'x', position: 1, .. })
    ));
}

#[test]
fn test_json_path_get_and_set() {
    let payload = create_adapter_payload();
    let labels = JsonPath::parse("$.labels[1]").expect("valid path");
    assert_eq!(labels.get(&payload), Some(&json!("north")));
    assert_eq!(JsonPath::parse("$.missing").expect("valid").get(&payload), None);

    let mut target = json!(null);
    for (path, value) in [("$.a.list[0]", 7), ("$.a.list[1]", 8), ("$.a.list[0]", 9)] {
        JsonPath::parse(path)
            .expect("valid path")
            .set(&mut target, json!(value))
            .expect("writable");
    }
    assert_eq!(target, json!({ "a": { "list": [9, 8] } }));

    let gap = JsonPath::parse("$.a.list[3]").expect("valid").set(&mut target, json!(1));
    assert!(gap.is_err());
    assert_eq!(target, json!({ "a": { "list": [9, 8] } }));

    let mut scalar = json!({ "a": 1 });
    let result = JsonPath::parse("$.a.b").expect("valid").set(&mut scalar, json!(2));
    assert!(result.is_err());
}

#[test]
fn test_instruction_upsert_replaces_in_place() {
    let mut list: InstructionList = create_instructions().into();
    assert_eq!(list.len(), 4);

    let outcome = list.upsert(Instruction::new("$.labels[0]", "$.tags"));
    assert_eq!(outcome, Upsert::Replaced);
    assert_eq!(list.len(), 4);
    assert_eq!(list.position("$.tags"), Some(2));
    assert_eq!(list.get("tags").map(|i| i.source.as_str()), Some("$.labels[0]"));
}

#[test]
fn test_instruction_upsert_empty_source_removes() {
    let mut list: InstructionList = create_instructions().into();

    assert_eq!(list.upsert(Instruction::new("", "$.value")), Upsert::Removed);
    assert_eq!(list.len(), 3);
    assert!(list.get("$.value").is_none());

    assert_eq!(list.upsert(Instruction::new("", "$.value")), Upsert::Unchanged);
    assert_eq!(list.len(), 3);

    assert_eq!(
        list.upsert(Instruction::new("$.reading", "$.online")),
        Upsert::Inserted
    );
    assert_eq!(list.len(), 4);
}

#[test]
fn test_instruction_list_deduplicates_on_build() {
    let list: InstructionList = vec![
        Instruction::new("$.a", "$.x"),
        Instruction::new("$.b", "x"),
    ]
    .into();
    assert_eq!(list.len(), 1);
    assert_eq!(list.as_slice()[0].source, "$.b");
}

#[test]
fn test_instruction_serialization() {
    let instruction = Instruction::new("$.temperature", "$.value").with_source_ref(DataReference {
        id: "plc/temperature".to_string(),
        kind: DataReferenceKind::TopicFilter,
    });
    let value = serde_json::to_value(&instruction).expect("serializable");
    assert_eq!(
        value,
        json!({
            "source": "$.temperature",
            "destination": "$.value",
            "sourceRef": { "id": "plc/temperature", "type": "TOPIC_FILTER" }
        })
    );

    let list: InstructionList = serde_json::from_value(json!([
        { "source": "$.a", "destination": "$.x" },
        { "source": "$.b", "destination": "$.x" }
    ]))
    .expect("deserializable");
    assert_eq!(list.len(), 1);
}

#[test]
fn test_filter_read_only_instructions() {
    let properties = vec![
        FlatProperty {
            key: "id".to_string(),
            read_only: Some(true),
            ..FlatProperty::default()
        },
        FlatProperty {
            key: "name".to_string(),
            ..FlatProperty::default()
        },
    ];
    let instructions = vec![
        Instruction::new("$.a", "$.id"),
        Instruction::new("$.b", "$.name"),
    ];

    let kept = filter_read_only_instructions(Some(instructions.as_slice()), &properties);
    assert_eq!(kept, vec![Instruction::new("$.b", "$.name")]);
}

#[test]
fn test_filter_read_only_nested_paths() {
    let properties = get_property_list_from(&json!({
        "properties": {
            "meta": {
                "type": "object",
                "properties": { "created": { "type": "string", "readOnly": true } }
            }
        }
    }));
    let instructions = vec![
        Instruction::new("$.a", "$.meta.created"),
        Instruction::new("$.b", "$.meta"),
    ];
    let kept = filter_read_only_instructions(Some(instructions.as_slice()), &properties);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].destination, "$.meta");
}

#[test]
fn test_filter_read_only_empty_input() {
    let properties = get_property_list_from(&create_reading_schema());
    assert!(filter_read_only_instructions(None, &properties).is_empty());
    assert!(filter_read_only_instructions(Some(&[][..]), &properties).is_empty());
}

#[test]
fn test_validate_instructions() {
    let sources = get_property_list_from(&create_adapter_schema());
    let destinations = get_property_list_from(&create_reading_schema());
    let mut instructions = create_instructions();
    instructions.push(Instruction::new("$.sensor", "$.online"));
    instructions.push(Instruction::new("$.nothing", "$.nowhere"));

    let issues = validate_instructions(&instructions, &sources, &destinations);
    assert_eq!(
        issues,
        vec![
            InstructionIssue::ReadOnlyDestination {
                destination: "id".to_string()
            },
            InstructionIssue::TypeMismatch {
                source_path: "sensor".to_string(),
                source_type: PropertyType::String,
                destination: "online".to_string(),
                destination_type: PropertyType::Boolean,
            },
            InstructionIssue::UnknownSource {
                source_path: "nothing".to_string()
            },
            InstructionIssue::UnknownDestination {
                destination: "nowhere".to_string()
            },
        ]
    );
    assert!(issues[0].to_string().contains("read-only"));
}

#[test]
fn test_transformer_applies_instructions() {
    let destinations = get_property_list_from(&create_reading_schema());
    let instructions =
        filter_read_only_instructions(Some(create_instructions().as_slice()), &destinations);
    let transformer = Transformer::new(&instructions).expect("valid instructions");
    assert_eq!(transformer.len(), 3);

    let output = transformer
        .apply(&create_adapter_payload())
        .expect("mapping succeeds");
    assert_eq!(
        output,
        json!({
            "value": 21,
            "tags": ["hall", "north"],
            "location": { "site": "plant-a" }
        })
    );
}

#[test]
fn test_transformer_skips_missing_sources() {
    let transformer =
        Transformer::new(&[Instruction::new("$.absent", "$.x")]).expect("valid instructions");
    assert_eq!(transformer.apply(&json!({})).expect("mapping"), json!({}));
}

#[test]
fn test_transformer_errors() {
    let invalid = Transformer::new(&[Instruction::new("$.a[", "$.x")]);
    assert!(matches!(invalid, Err(MappingError::InvalidPath { .. })));

    let conflicting = Transformer::new(&[
        Instruction::new("$.a", "$.x"),
        Instruction::new("$.b", "$.x.y"),
    ])
    .expect("valid instructions");
    let result = conflicting.apply(&json!({ "a": 1, "b": 2 }));
    assert!(matches!(result, Err(MappingError::Conflict { .. })));
}

#[test]
fn test_transformer_rejects_out_of_range_index() {
    for destination in ["$.out[18446744073709551615]", "$.out[4000000000]", "$.out[1]"] {
        let transformer = Transformer::new(&[Instruction::new("$.a", destination)])
            .expect("valid instructions");
        let result = transformer.apply(&json!({ "a": 1 }));
        assert!(
            matches!(result, Err(MappingError::Conflict { .. })),
            "destination {}",
            destination
        );
    }

    let appending = Transformer::new(&[
        Instruction::new("$.a", "$.out[0]"),
        Instruction::new("$.b", "$.out[1]"),
    ])
    .expect("valid instructions");
    let output = appending
        .apply(&json!({ "a": 1, "b": 2 }))
        .expect("mapping succeeds");
    assert_eq!(output, json!({ "out": [1, 2] }));
}
