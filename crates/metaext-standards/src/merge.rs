//! Field-rule and host-type merging.
//!
//! Both operations return fresh structures; neither argument is modified.

use metaext_model::{DefinitionKind, FieldMap, HostTypeNode, SampleTypeDef};

/// Combines two field-rule maps; rules in `add` override rules in `base`.
///
/// Introducing `allowed` drops any `anyof` from the base rule, and introducing
/// `anyof` drops the base rule's `allowed` and `type`. Every other key set in
/// `add` overwrites the base key; keys only in the base survive.
pub fn merge_fields(base: &FieldMap, add: &FieldMap) -> FieldMap {
    let mut merged = base.clone();
    for (name, add_rule) in add {
        let working = merged.entry(name.clone()).or_default();
        if add_rule.allowed.is_some() {
            working.anyof = None;
        }
        if add_rule.anyof.is_some() {
            working.allowed = None;
            working.field_type = None;
        }
        working.overlay(add_rule);
    }
    merged
}

/// Combines a base host node with an added node.
///
/// The base's child hosts are kept as they are and the added node's child
/// hosts are ignored; the composer handles the tree.
pub fn combine_host(base: &HostTypeNode, add: &HostTypeNode) -> HostTypeNode {
    let mut merged = base.clone();
    if let Some(default) = &add.default {
        merged.default = Some(default.clone());
    }
    merged.metadata_fields = merge_fields(&base.metadata_fields, &add.metadata_fields);

    for (name, add_def) in &add.sample_type_specific_metadata {
        let combined = match base.sample_type_specific_metadata.get(name) {
            Some(base_def)
                if base_def.kind() == DefinitionKind::MetadataFields
                    && add_def.kind() == DefinitionKind::MetadataFields =>
            {
                combine_sample_types(base_def, add_def)
            }
            _ => add_def.clone(),
        };
        merged
            .sample_type_specific_metadata
            .insert(name.clone(), combined);
    }
    merged
}

/// Both records define metadata fields: keep the added base type, if any, and
/// merge the fields.
fn combine_sample_types(base: &SampleTypeDef, add: &SampleTypeDef) -> SampleTypeDef {
    let base_type = add
        .base_type()
        .or_else(|| base.base_type())
        .map(str::to_string);
    let empty = FieldMap::new();
    let fields = merge_fields(
        base.metadata_fields().unwrap_or(&empty),
        add.metadata_fields().unwrap_or(&empty),
    );
    SampleTypeDef::from_parts(base_type, Some(fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use metaext_model::{FieldRule, Literal, PrimitiveType};

    fn fields(entries: Vec<(&str, FieldRule)>) -> FieldMap {
        entries
            .into_iter()
            .map(|(name, rule)| (name.to_string(), rule))
            .collect()
    }

    #[test]
    fn anyof_displaces_allowed_and_type() {
        let base = fields(vec![(
            "f",
            FieldRule::typed(PrimitiveType::String)
                .with_allowed(["a", "b"])
                .with_default("a"),
        )]);
        let add = fields(vec![(
            "f",
            FieldRule::any_of(vec![
                FieldRule::typed(PrimitiveType::String).with_allowed(["x"]),
                FieldRule::typed(PrimitiveType::Integer),
            ]),
        )]);

        let merged = merge_fields(&base, &add);
        let rule = &merged["f"];
        assert!(rule.allowed.is_none());
        assert!(rule.field_type.is_none());
        assert_eq!(rule.anyof.as_ref().map(Vec::len), Some(2));
        assert_eq!(rule.default, Some(Literal::text("a")));
    }

    #[test]
    fn allowed_displaces_anyof() {
        let base = fields(vec![(
            "f",
            FieldRule::any_of(vec![FieldRule::typed(PrimitiveType::Integer)]).with_required(true),
        )]);
        let add = fields(vec![(
            "f",
            FieldRule::typed(PrimitiveType::String).with_allowed(["x"]),
        )]);

        let merged = merge_fields(&base, &add);
        let rule = &merged["f"];
        assert!(rule.anyof.is_none());
        assert_eq!(rule.field_type, Some(PrimitiveType::String));
        assert_eq!(rule.required, Some(true));
    }

    #[test]
    fn combine_host_adds_base_type_to_existing_sample_type() {
        let mut base = HostTypeNode::default();
        base.sample_type_specific_metadata.insert(
            "dung".to_string(),
            SampleTypeDef::Direct(fields(vec![(
                "body_site",
                FieldRule::typed(PrimitiveType::String),
            )])),
        );
        let mut add = HostTypeNode::default();
        add.sample_type_specific_metadata.insert(
            "dung".to_string(),
            SampleTypeDef::Derived {
                base_type: "stool".to_string(),
                metadata_fields: Some(fields(vec![(
                    "body_site",
                    FieldRule::new().with_default("UBERON:feces"),
                )])),
            },
        );

        let merged = combine_host(&base, &add);
        let dung = &merged.sample_type_specific_metadata["dung"];
        assert_eq!(dung.base_type(), Some("stool"));
        let body_site = &dung.metadata_fields().expect("fields")["body_site"];
        assert_eq!(body_site.field_type, Some(PrimitiveType::String));
        assert_eq!(body_site.default, Some(Literal::text("UBERON:feces")));
    }

    #[test]
    fn combine_host_replaces_when_kinds_differ() {
        let mut base = HostTypeNode::default();
        base.sample_type_specific_metadata.insert(
            "fe".to_string(),
            SampleTypeDef::Direct(fields(vec![(
                "body_site",
                FieldRule::typed(PrimitiveType::String),
            )])),
        );
        let mut add = HostTypeNode::default();
        add.sample_type_specific_metadata
            .insert("fe".to_string(), SampleTypeDef::Alias("stool".to_string()));

        let merged = combine_host(&base, &add);
        assert_eq!(
            merged.sample_type_specific_metadata["fe"],
            SampleTypeDef::Alias("stool".to_string())
        );
    }
}
