//! `formkit fill` command - Interactive form entry

use console::style;
use dialoguer::theme::ColorfulTheme;
use miette::Result;
use std::path::PathBuf;

use crate::cli::helpers::{format_values, load_form, load_values, print_errors};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::error::FormError;
use crate::core::Config;

#[derive(clap::Args, Debug)]
pub struct FillArgs {
    /// Form definition (YAML or JSON)
    pub form: PathBuf,

    /// Initial field values (YAML or JSON mapping)
    #[arg(long)]
    pub values: Option<PathBuf>,

    /// Output format for the submitted values
    #[arg(long, short = 'o', value_enum)]
    pub output: Option<OutputFormat>,

    /// Give up after this many rejected submits
    #[arg(long, default_value_t = 3)]
    pub attempts: u32,
}

pub fn run(args: FillArgs, global: &GlobalOpts, config: &Config) -> Result<()> {
    let (definition, registry) = load_form(&args.form)?;
    registry.ensure_registered(&definition.tags())?;

    let values = args.values.as_deref().map(load_values).transpose()?;
    let form = definition.build_form(values)?;
    let fields = definition.form_fields();
    let theme = ColorfulTheme::default();

    if let Some(title) = &definition.title {
        if !global.quiet {
            println!("{}\n", style(title).bold());
        }
    }

    for field in &fields {
        field.prompt(&registry, &form, &theme)?;
    }

    let mut attempt = 1;
    let submitted = loop {
        match form.handle_submit(|values| values) {
            Ok(values) => break values,
            Err(FormError::Invalid { errors }) => {
                print_errors(&errors);
                let retry: Vec<_> = fields.iter().filter(|f| errors.contains(f.name().as_str())).collect();
                if retry.is_empty() || attempt >= args.attempts {
                    return Err(FormError::Invalid { errors }.into());
                }
                attempt += 1;
                for field in retry {
                    field.prompt(&registry, &form, &theme)?;
                }
            }
            Err(other) => return Err(other.into()),
        }
    };

    let format = args
        .output
        .or_else(|| config.output.as_deref().and_then(OutputFormat::from_config))
        .unwrap_or(OutputFormat::Json);
    println!("{}", format_values(&submitted, format)?);
    Ok(())
}
