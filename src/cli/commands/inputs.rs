//! `formkit inputs` command - List registered input tags

use miette::Result;
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::load_form;
use crate::core::registry::InputRegistry;
use crate::inputs::BUILTIN_TAGS;

#[derive(clap::Args, Debug)]
pub struct InputsArgs {
    /// Also list the template inputs declared by this form
    #[arg(long)]
    pub form: Option<PathBuf>,
}

pub fn run(args: InputsArgs) -> Result<()> {
    let registry = match &args.form {
        Some(path) => load_form(path)?.1,
        None => InputRegistry::with_builtins(),
    };

    let mut builder = Builder::default();
    builder.push_record(["TAG", "SOURCE"]);
    for tag in registry.tags() {
        let source = if BUILTIN_TAGS.contains(&tag.as_str()) {
            "builtin"
        } else {
            "template"
        };
        builder.push_record([tag.as_str(), source]);
    }

    println!("{}", builder.build().with(Style::markdown()));
    Ok(())
}
