//! Effective schema for one (host, sample type) pair.

use metaext_model::columns::{QIITA_SAMPLE_TYPE, SAMPLE_TYPE};
use metaext_model::{FieldMap, FieldRule, HostTypeNode, PrimitiveType, SampleTypeDef};

use crate::error::SchemaError;
use crate::merge::merge_fields;

/// Resolves aliases and base types for `sample_type` under a flattened host,
/// then layers the sample-type fields over the host fields.
///
/// The result always carries a `sample_type` field (and `qiita_sample_type`
/// unless the schema already defines one) whose only allowed value is the
/// alias-resolved sample-type name.
pub fn effective_schema(
    host_name: &str,
    host: &HostTypeNode,
    sample_type: &str,
) -> Result<FieldMap, SchemaError> {
    let record = host
        .sample_type_specific_metadata
        .get(sample_type)
        .ok_or_else(|| SchemaError::UnknownSampleType {
            host: host_name.to_string(),
            sample_type: sample_type.to_string(),
        })?;

    let (metadata_name, resolved) = match record {
        SampleTypeDef::Alias(target) => {
            let target_record = host.sample_type_specific_metadata.get(target).ok_or_else(|| {
                SchemaError::MissingAliasTarget {
                    host: host_name.to_string(),
                    sample_type: sample_type.to_string(),
                    target: target.clone(),
                }
            })?;
            if target_record.metadata_fields().is_none() {
                return Err(SchemaError::AliasChain {
                    host: host_name.to_string(),
                    sample_type: sample_type.to_string(),
                    target: target.clone(),
                });
            }
            (target.as_str(), target_record)
        }
        _ => (sample_type, record),
    };

    let sample_fields = resolve_base_type(host_name, host, metadata_name, resolved)?;
    let mut fields = merge_fields(&host.metadata_fields, &sample_fields);

    let rule = sample_type_rule(metadata_name);
    fields.insert(SAMPLE_TYPE.to_string(), rule.clone());
    fields.entry(QIITA_SAMPLE_TYPE.to_string()).or_insert(rule);
    Ok(fields)
}

/// The synthetic rule pinning a sample-type column to one value.
pub fn sample_type_rule(name: &str) -> FieldRule {
    FieldRule::typed(PrimitiveType::String)
        .with_allowed([name])
        .with_default(name)
}

fn resolve_base_type(
    host_name: &str,
    host: &HostTypeNode,
    sample_type: &str,
    record: &SampleTypeDef,
) -> Result<FieldMap, SchemaError> {
    match record {
        SampleTypeDef::Direct(fields) => Ok(fields.clone()),
        SampleTypeDef::Derived {
            base_type,
            metadata_fields,
        } => {
            let base = host
                .sample_type_specific_metadata
                .get(base_type)
                .ok_or_else(|| SchemaError::MissingBaseType {
                    host: host_name.to_string(),
                    sample_type: sample_type.to_string(),
                    base_type: base_type.clone(),
                })?;
            let SampleTypeDef::Direct(base_fields) = base else {
                return Err(SchemaError::InvalidBaseType {
                    host: host_name.to_string(),
                    sample_type: sample_type.to_string(),
                    base_type: base_type.clone(),
                });
            };
            let empty = FieldMap::new();
            Ok(merge_fields(
                base_fields,
                metadata_fields.as_ref().unwrap_or(&empty),
            ))
        }
        SampleTypeDef::Alias(target) => Err(SchemaError::AliasChain {
            host: host_name.to_string(),
            sample_type: sample_type.to_string(),
            target: target.clone(),
        }),
    }
}
