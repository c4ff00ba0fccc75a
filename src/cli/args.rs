//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};

use crate::cli::commands::{
    check::CheckArgs, completions::CompletionsArgs, demo::DemoArgs, fill::FillArgs,
    inputs::InputsArgs, render::RenderArgs,
};

#[derive(Parser)]
#[command(name = "formkit")]
#[command(author, version, about = "Typed form inputs for the terminal")]
#[command(long_about = "Register input renderers by tag, resolve form fields against them, and render or fill forms described in YAML with JSON Schema validation.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output (debug logging for formkit)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List registered input tags
    Inputs(InputsArgs),

    /// Check that every field of a form has a registered input
    Check(CheckArgs),

    /// Render every field of a form
    Render(RenderArgs),

    /// Fill a form interactively and print the submitted values
    Fill(FillArgs),

    /// Render the built-in name/age demo form
    Demo(DemoArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Format for submitted values
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
}

impl OutputFormat {
    /// Parse the `output` config value; unknown names fall back to None
    pub fn from_config(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "yaml" | "yml" => Some(OutputFormat::Yaml),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_output_format_from_config() {
        assert_eq!(OutputFormat::from_config("YAML"), Some(OutputFormat::Yaml));
        assert_eq!(OutputFormat::from_config("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_config("toml"), None);
    }
}
