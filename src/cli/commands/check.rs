//! `formkit check` command - Composition-time validation of a form

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::load_form;
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct CheckArgs {
    /// Form definition (YAML or JSON)
    pub form: PathBuf,
}

pub fn run(args: CheckArgs, global: &GlobalOpts) -> Result<()> {
    let (definition, registry) = load_form(&args.form)?;

    registry.ensure_registered(&definition.tags())?;
    // Compiles the schema, if any
    definition.build_form(None)?;

    if !global.quiet {
        println!(
            "{} {}: {} field(s), all inputs registered",
            style("✓").green(),
            args.form.display(),
            definition.fields.len()
        );
    }
    Ok(())
}
