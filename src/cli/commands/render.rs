//! `formkit render` command - Render every field of a form

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::{load_form, load_values, print_errors};
use crate::cli::GlobalOpts;
use crate::core::error::FormError;
use crate::core::form::FormState;
use crate::core::issue::FieldErrors;

#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Form definition (YAML or JSON)
    pub form: PathBuf,

    /// Initial field values (YAML or JSON mapping)
    #[arg(long)]
    pub values: Option<PathBuf>,

    /// Validate before rendering so fields show their errors
    #[arg(long)]
    pub validate: bool,
}

pub fn run(args: RenderArgs, global: &GlobalOpts) -> Result<()> {
    let (definition, registry) = load_form(&args.form)?;
    registry.ensure_registered(&definition.tags())?;

    let values = args.values.as_deref().map(load_values).transpose()?;
    let form = definition.build_form(values)?;
    let valid = !args.validate || form.validate();

    if let Some(title) = &definition.title {
        if !global.quiet {
            println!("{}\n", style(title).bold().underlined());
        }
    }

    for field in definition.form_fields() {
        println!("{}", field.render(&registry, &form)?);
    }

    if valid {
        return Ok(());
    }

    // Errors not shown under any rendered field (root or unbound paths)
    let fields = form.fields();
    let unshown: FieldErrors = form
        .errors()
        .iter()
        .filter(|(path, _)| !fields.contains(path))
        .map(|(path, issue)| (path.clone(), issue.clone()))
        .collect();
    print_errors(&unshown);

    Err(FormError::Invalid {
        errors: form.errors(),
    }
    .into())
}
