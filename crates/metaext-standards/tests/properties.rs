//! Property tests for merging and flattening.

use std::collections::BTreeMap;

use proptest::collection::{btree_map, vec};
use proptest::option;
use proptest::prelude::*;

use metaext_model::{FieldMap, FieldRule, HostMap, HostTypeNode, Literal, PrimitiveType, SampleTypeDef};
use metaext_standards::{compose, flatten, merge_fields};

fn primitive() -> impl Strategy<Value = PrimitiveType> {
    prop_oneof![
        Just(PrimitiveType::String),
        Just(PrimitiveType::Integer),
        Just(PrimitiveType::Float),
        Just(PrimitiveType::Number),
        Just(PrimitiveType::Bool),
        Just(PrimitiveType::Datetime),
    ]
}

fn literal() -> impl Strategy<Value = Literal> {
    prop_oneof![
        any::<bool>().prop_map(Literal::Bool),
        any::<i64>().prop_map(Literal::Integer),
        "[a-z]{1,6}".prop_map(Literal::Text),
    ]
}

fn typed_rule() -> impl Strategy<Value = FieldRule> {
    (
        primitive(),
        option::of(vec(literal(), 1..3)),
        option::of(literal()),
        option::of(any::<bool>()),
        option::of("[a-z]{1,4}"),
    )
        .prop_map(|(field_type, allowed, default, required, units)| FieldRule {
            field_type: Some(field_type),
            allowed,
            default,
            required,
            units,
            ..FieldRule::default()
        })
}

fn anyof_rule() -> impl Strategy<Value = FieldRule> {
    (
        vec(typed_rule(), 1..3),
        option::of(literal()),
        option::of(any::<bool>()),
    )
        .prop_map(|(branches, default, required)| FieldRule {
            anyof: Some(branches),
            default,
            required,
            ..FieldRule::default()
        })
}

fn partial_rule() -> impl Strategy<Value = FieldRule> {
    (
        option::of(literal()),
        option::of(any::<bool>()),
        option::of("[a-z ]{1,8}"),
        option::of("[a-z_]{1,8}"),
    )
        .prop_map(|(default, required, field_desc, check_with)| FieldRule {
            default,
            required,
            field_desc,
            check_with,
            ..FieldRule::default()
        })
}

fn rule() -> impl Strategy<Value = FieldRule> {
    prop_oneof![typed_rule(), anyof_rule(), partial_rule()]
}

fn field_map() -> impl Strategy<Value = FieldMap> {
    btree_map("[a-e]", rule(), 0..5)
}

fn sample_types() -> impl Strategy<Value = BTreeMap<String, SampleTypeDef>> {
    btree_map(
        "st[a-c]",
        prop_oneof![
            field_map().prop_map(SampleTypeDef::Direct),
            "st[a-c]".prop_map(SampleTypeDef::Alias),
        ],
        0..3,
    )
}

fn leaf_node() -> impl Strategy<Value = HostTypeNode> {
    (option::of(literal()), field_map(), sample_types()).prop_map(
        |(default, metadata_fields, sample_type_specific_metadata)| HostTypeNode {
            default,
            metadata_fields,
            sample_type_specific_metadata,
            host_type_specific_metadata: HostMap::new(),
        },
    )
}

/// Two-level trees whose child names are unique across the whole tree.
fn host_tree() -> impl Strategy<Value = HostMap> {
    btree_map(
        "p[a-c]",
        (leaf_node(), btree_map("c[a-c]", leaf_node(), 0..3)),
        1..4,
    )
    .prop_map(|parents| {
        parents
            .into_iter()
            .map(|(name, (mut node, children))| {
                node.host_type_specific_metadata = children
                    .into_iter()
                    .map(|(child, child_node)| (format!("{name}_{child}"), child_node))
                    .collect();
                (name, node)
            })
            .collect()
    })
}

/// Flat study overrides keyed by names from `host_tree`, plus one it never uses.
fn study_layer() -> impl Strategy<Value = HostMap> {
    btree_map("p[a-c](_c[a-c])?|zz", leaf_node(), 0..4)
}

proptest! {
    #[test]
    fn merged_rules_never_carry_allowed_and_anyof(base in field_map(), add in field_map()) {
        let merged = merge_fields(&base, &add);
        for rule in merged.values() {
            prop_assert!(!(rule.allowed.is_some() && rule.anyof.is_some()));
        }
    }

    #[test]
    fn introduced_anyof_removes_top_level_type(base in field_map(), add in field_map()) {
        let merged = merge_fields(&base, &add);
        for (name, add_rule) in &add {
            if add_rule.anyof.is_some() {
                prop_assert!(merged[name].field_type.is_none());
            }
        }
    }

    #[test]
    fn unmentioned_base_keys_survive(base in field_map(), add in field_map()) {
        let merged = merge_fields(&base, &add);
        for (name, base_rule) in &base {
            let Some(add_rule) = add.get(name) else {
                prop_assert_eq!(&merged[name], base_rule);
                continue;
            };
            let mentioned = add_rule.keys();
            for key in base_rule.keys() {
                if mentioned.contains(&key) {
                    continue;
                }
                let displaced = (key == "anyof" && add_rule.allowed.is_some())
                    || ((key == "allowed" || key == "type") && add_rule.anyof.is_some());
                if !displaced {
                    prop_assert!(merged[name].keys().contains(&key), "key {} lost", key);
                }
            }
        }
    }

    #[test]
    fn empty_maps_are_merge_identities(fields in field_map()) {
        prop_assert_eq!(merge_fields(&fields, &FieldMap::new()), fields.clone());
        prop_assert_eq!(merge_fields(&FieldMap::new(), &fields), fields);
    }

    #[test]
    fn flatten_is_idempotent(tree in host_tree()) {
        let flat = flatten(&tree);
        prop_assert!(flat.values().all(|host| !host.has_children()));
        prop_assert_eq!(flatten(&flat), flat);
    }

    #[test]
    fn children_inherit_every_parent_field(tree in host_tree()) {
        let flat = flatten(&tree);
        for (parent, node) in &tree {
            for child in node.host_type_specific_metadata.keys() {
                for field in flat[parent].metadata_fields.keys() {
                    prop_assert!(flat[child].metadata_fields.contains_key(field));
                }
            }
        }
    }

    #[test]
    fn flatten_does_not_mutate_its_argument(tree in host_tree()) {
        let before = tree.clone();
        let _ = flatten(&tree);
        prop_assert_eq!(tree, before);
    }

    #[test]
    fn flattening_a_composed_tree_is_idempotent(study in study_layer(), tree in host_tree()) {
        let (study_before, tree_before) = (study.clone(), tree.clone());
        let flat = flatten(&compose(&study, &tree));
        prop_assert!(flat.values().all(|host| !host.has_children()));
        prop_assert!(!flat.contains_key("zz"));
        prop_assert_eq!(flatten(&flat), flat);
        prop_assert_eq!(study, study_before);
        prop_assert_eq!(tree, tree_before);
    }
}
