use anyhow::Result;

use metaext_cli::pipeline::{
    ExtendRequest, effective_schema_json, list_hosts, load_registry, run_extend,
};
use metaext_cli::types::ExtendResult;
use metaext_validate::ValidationContext;

use crate::cli::{ExtendArgs, SchemaArgs, ShowSchemaArgs};
use crate::summary::print_hosts;

pub fn run_extend_command(args: &ExtendArgs) -> Result<ExtendResult> {
    let request = ExtendRequest {
        metadata: args.metadata.clone(),
        standards: args.schema.standards.clone(),
        study: args.schema.study.clone(),
        output_dir: args.output_dir.clone(),
        name: args.name.clone(),
        dry_run: args.dry_run,
        write_empty_fails: args.write_empty_fails,
    };
    run_extend(&request, &ValidationContext::at_local_now())
}

pub fn run_hosts(args: &SchemaArgs) -> Result<()> {
    let registry = load_registry(&args.standards, args.study.as_deref())?;
    print_hosts(&list_hosts(&registry));
    Ok(())
}

pub fn run_schema(args: &ShowSchemaArgs) -> Result<()> {
    let registry = load_registry(&args.schema.standards, args.schema.study.as_deref())?;
    let json = effective_schema_json(&registry, &args.host, &args.sample_type)?;
    println!("{json}");
    Ok(())
}
