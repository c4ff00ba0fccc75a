//! `formkit demo` command - The name/age form rendered through the global
//! registry

use console::style;
use miette::{IntoDiagnostic, Result};
use serde_json::json;
use std::path::PathBuf;

use crate::cli::helpers::load_values;
use crate::cli::GlobalOpts;
use crate::core::form::Form;
use crate::core::registry::InputRegistry;
use crate::inputs::{demo_fields, demo_schema, register_demo_inputs};
use crate::schema::SchemaResolver;

#[derive(clap::Args, Debug)]
pub struct DemoArgs {
    /// Field values (YAML or JSON mapping with `name` and `age`)
    #[arg(long)]
    pub values: Option<PathBuf>,
}

pub fn run(args: DemoArgs, global: &GlobalOpts) -> Result<()> {
    register_demo_inputs();
    let registry = InputRegistry::instance().read().clone();

    let values = match args.values.as_deref() {
        Some(path) => load_values(path)?,
        None => json!({}),
    };
    let form = Form::with_defaults(values).with_resolver(SchemaResolver::new(&demo_schema())?);

    let submitted = form.handle_submit(|values| values);

    for field in demo_fields() {
        println!("{}", field.render(&registry, &form)?);
    }

    match submitted {
        Ok(values) => {
            if !global.quiet {
                println!("\n{} submitted", style("✓").green());
            }
            println!("{}", serde_json::to_string_pretty(&values).into_diagnostic()?);
        }
        Err(_) if !global.quiet => {
            println!("\n{} submit blocked by validation", style("✗").red());
        }
        Err(_) => {}
    }
    Ok(())
}
