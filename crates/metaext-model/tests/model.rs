//! Tests for metaext-model types.

use std::collections::BTreeMap;

use metaext_model::{
    CellValue, DefinitionKind, ErrorItem, FieldRule, HostTypeNode, Literal, PrimitiveType, Row,
    SampleTypeDef, Settings, Table,
};

#[test]
fn parses_field_rule_with_annotations_and_extra_keys() {
    let yaml = r#"
type: string
allowed: [stool, saliva]
default: stool
required: true
is_phi: false
field_desc: where the sample came from
empty: false
"#;
    let rule: FieldRule = serde_yaml::from_str(yaml).expect("parse rule");
    assert_eq!(rule.field_type, Some(PrimitiveType::String));
    assert_eq!(
        rule.allowed,
        Some(vec![Literal::text("stool"), Literal::text("saliva")])
    );
    assert_eq!(rule.default, Some(Literal::text("stool")));
    assert!(rule.is_required());
    assert_eq!(rule.is_phi, Some(false));
    assert_eq!(rule.extra.get("empty"), Some(&serde_json::Value::Bool(false)));
}

#[test]
fn parses_literal_kinds() {
    let rule: FieldRule =
        serde_yaml::from_str("allowed: [0, 1.5, true, text]").expect("parse rule");
    assert_eq!(
        rule.allowed,
        Some(vec![
            Literal::Integer(0),
            Literal::Float(1.5),
            Literal::Bool(true),
            Literal::text("text"),
        ])
    );
}

#[test]
fn boolean_is_a_synonym_for_bool() {
    let rule: FieldRule = serde_yaml::from_str("type: boolean").expect("parse rule");
    assert_eq!(rule.field_type, Some(PrimitiveType::Bool));
}

#[test]
fn sample_type_shapes() {
    let alias: SampleTypeDef = serde_yaml::from_str("alias: stool").expect("alias");
    assert_eq!(alias, SampleTypeDef::Alias("stool".to_string()));
    assert_eq!(alias.kind(), DefinitionKind::Alias);

    let derived: SampleTypeDef = serde_yaml::from_str("base_type: stool").expect("base");
    assert_eq!(derived.kind(), DefinitionKind::BaseType);

    let derived_with_fields: SampleTypeDef = serde_yaml::from_str(
        "base_type: stool\nmetadata_fields:\n  body_site:\n    type: string\n",
    )
    .expect("base with fields");
    assert_eq!(derived_with_fields.kind(), DefinitionKind::MetadataFields);
    assert_eq!(derived_with_fields.base_type(), Some("stool"));

    let direct: SampleTypeDef =
        serde_yaml::from_str("metadata_fields:\n  body_site:\n    type: string\n")
            .expect("direct");
    assert_eq!(direct.kind(), DefinitionKind::MetadataFields);
}

#[test]
fn rejects_invalid_sample_type_shapes() {
    let err = serde_yaml::from_str::<SampleTypeDef>(
        "alias: stool\nmetadata_fields:\n  a:\n    type: string\n",
    )
    .unwrap_err();
    assert!(err.to_string().contains("both alias and metadata_fields"));

    let err = serde_yaml::from_str::<SampleTypeDef>("alias: stool\nbase_type: stool\n").unwrap_err();
    assert!(err.to_string().contains("both alias and base_type"));

    let err = serde_yaml::from_str::<SampleTypeDef>("{}").unwrap_err();
    assert!(err.to_string().contains("needs one of"));
}

#[test]
fn host_node_round_trips_through_json() {
    let mut node = HostTypeNode {
        default: Some(Literal::text("not applicable")),
        ..HostTypeNode::default()
    };
    node.metadata_fields.insert(
        "country".to_string(),
        FieldRule::typed(PrimitiveType::String).with_default("USA"),
    );
    node.sample_type_specific_metadata.insert(
        "fe".to_string(),
        SampleTypeDef::Alias("stool".to_string()),
    );
    let json = serde_json::to_string(&node).expect("serialize");
    assert!(!json.contains("host_type_specific_metadata"));
    let round: HostTypeNode = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(round, node);
}

#[test]
fn branch_items_render_on_one_line() {
    let mut branches = BTreeMap::new();
    branches.insert(
        0,
        vec![ErrorItem::message("v1"), ErrorItem::message("v2")],
    );
    branches.insert(1, vec![ErrorItem::message("v3")]);
    let item = ErrorItem::Branches(branches);
    assert_eq!(item.to_string(), "branch 0: v1, v2; branch 1: v3");
}

#[test]
fn host_default_overrides_global_default() {
    let globals = Settings::new()
        .with_default("not provided")
        .with_leave_requireds_blank(true);
    let host = globals.for_host(Some(&Literal::text("not applicable")));
    assert_eq!(host.default, Some(Literal::text("not applicable")));
    assert!(host.leave_requireds_blank);
    assert_eq!(globals.for_host(None), globals);
}

#[test]
fn table_reads_absent_columns_as_missing() {
    let table = Table::from_text_rows(
        vec!["sample_name".to_string(), "country".to_string()],
        vec![vec!["s1".to_string(), "  ".to_string()]],
    );
    let row: &Row = &table.rows[0];
    assert_eq!(row.text("sample_name"), Some("s1"));
    assert_eq!(row.get("country"), &CellValue::Missing);
    assert_eq!(row.get("not_a_column"), &CellValue::Missing);
    assert!(CellValue::text(" ").is_absent_or_empty());
    assert!(!CellValue::LeaveBlank.is_absent_or_empty());
}

#[test]
fn float_literals_render_without_trailing_zeros() {
    assert_eq!(Literal::Float(2.0).to_cell_text(), "2");
    assert_eq!(Literal::Float(100.0).to_cell_text(), "100");
    assert_eq!(Literal::Float(0.25).to_cell_text(), "0.25");
}
