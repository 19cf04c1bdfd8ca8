//! Composition and flattening against the fixture documents.

use std::path::PathBuf;

use metaext_model::{Literal, PrimitiveType};
use metaext_standards::{
    SchemaDocument, SchemaRegistry, compose, flatten, load_schema_document, parse_schema_document,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn standards() -> SchemaDocument {
    load_schema_document(&fixture("standards.yml")).expect("load standards")
}

fn study() -> SchemaDocument {
    load_schema_document(&fixture("study.yml")).expect("load study")
}

fn study_layer(doc: &SchemaDocument) -> metaext_model::HostMap {
    doc.study_specific_metadata
        .as_ref()
        .map(|layer| layer.host_type_specific_metadata.clone())
        .unwrap_or_default()
}

#[test]
fn child_hosts_inherit_ancestor_fields() {
    let flat = flatten(&standards().host_type_specific_metadata);
    let human = flat.get("human").expect("human host");

    let country = &human.metadata_fields["country"];
    assert_eq!(country.allowed, Some(vec![Literal::text("USA")]));
    assert_eq!(country.default, Some(Literal::text("USA")));
    assert_eq!(country.required, Some(true));

    let description = &human.metadata_fields["description"];
    assert_eq!(description.default, Some(Literal::text("human sample")));

    assert!(human.metadata_fields.contains_key("sample_name"));
    assert!(human.metadata_fields.contains_key("host_life_stage"));
}

#[test]
fn flattened_hosts_are_one_level_and_idempotent() {
    let flat = flatten(&standards().host_type_specific_metadata);
    assert_eq!(
        flat.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["base", "control", "host_associated", "human"]
    );
    assert!(flat.values().all(|host| !host.has_children()));
    assert_eq!(flatten(&flat), flat);
}

#[test]
fn host_default_is_inherited_and_overridable() {
    let flat = flatten(&standards().host_type_specific_metadata);
    assert_eq!(flat["base"].default, None);
    assert_eq!(
        flat["control"].default,
        Some(Literal::text("not applicable"))
    );
    let description = &flat["control"].metadata_fields["description"];
    assert_eq!(description.field_type, Some(PrimitiveType::String));
    assert_eq!(description.default, Some(Literal::text("control sample")));
}

#[test]
fn study_layer_applies_at_every_depth() {
    let standards = standards();
    let study = study();
    let nested = compose(&study_layer(&study), &standards.host_type_specific_metadata);
    let flat = flatten(&nested);

    for host in ["base", "control", "host_associated", "human"] {
        let project = &flat[host].metadata_fields["project_name"];
        assert_eq!(project.default, Some(Literal::text("Gut Survey")));
    }

    let life_stage = &flat["human"].metadata_fields["host_life_stage"];
    assert!(life_stage.allowed.is_none());
    assert!(life_stage.field_type.is_none());
    assert_eq!(life_stage.anyof.as_ref().map(Vec::len), Some(2));

    let host_associated = &flat["host_associated"].metadata_fields["host_life_stage"];
    assert!(host_associated.anyof.is_none());
}

#[test]
fn study_hosts_absent_from_standards_are_dropped() {
    let standards = standards();
    let study = study();
    let nested = compose(&study_layer(&study), &standards.host_type_specific_metadata);
    let flat = flatten(&nested);
    assert!(!flat.contains_key("mouse"));
}

#[test]
fn compose_and_flatten_leave_inputs_untouched() {
    let standards = standards();
    let study = study();
    let standards_before = standards.clone();
    let study_before = study.clone();

    let layer = study_layer(&study);
    let nested = compose(&layer, &standards.host_type_specific_metadata);
    let nested_before = nested.clone();
    let _ = flatten(&nested);

    assert_eq!(standards, standards_before);
    assert_eq!(study, study_before);
    assert_eq!(nested, nested_before);
}

#[test]
fn registry_prefers_study_settings() {
    let registry = SchemaRegistry::build(&standards(), Some(&study()));
    assert!(registry.settings().leave_requireds_blank);
    assert_eq!(
        registry.settings().default,
        Some(Literal::text("not provided"))
    );
    assert!(
        registry
            .transformers()
            .pre_transformers
            .contains_key("host_life_stage")
    );

    let standards_only = SchemaRegistry::build(&standards(), None);
    assert!(!standards_only.settings().leave_requireds_blank);
    assert!(standards_only.transformers().is_empty());
}

#[test]
fn registry_from_paths_matches_build() {
    let from_paths =
        SchemaRegistry::from_paths(&fixture("standards.yml"), Some(&fixture("study.yml")))
            .expect("registry from paths");
    let built = SchemaRegistry::build(&standards(), Some(&study()));
    assert_eq!(from_paths.hosts(), built.hosts());
}

#[test]
fn invalid_sample_type_records_fail_to_load() {
    let text = r#"
host_type_specific_metadata:
  human:
    sample_type_specific_metadata:
      fe:
        alias: stool
        base_type: stool
"#;
    let err = parse_schema_document(text).unwrap_err();
    assert!(err.to_string().contains("both alias and base_type"));
}

#[test]
fn missing_document_reports_path() {
    let err = load_schema_document(&fixture("missing.yml")).unwrap_err();
    assert!(err.to_string().contains("missing.yml"));
}
