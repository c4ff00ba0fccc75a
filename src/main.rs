use clap::Parser;
use formkit::cli::{logging, Cli, Commands};
use formkit::core::Config;
use miette::Result;

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) for proper Unix piping.
    // Without this, piping to `head` causes a panic on broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    let config = Config::load();
    if let Some(color) = config.color {
        console::set_colors_enabled(color);
        console::set_colors_enabled_stderr(color);
    }
    logging::init(&global, &config);

    match cli.command {
        Commands::Inputs(args) => formkit::cli::commands::inputs::run(args),
        Commands::Check(args) => formkit::cli::commands::check::run(args, &global),
        Commands::Render(args) => formkit::cli::commands::render::run(args, &global),
        Commands::Fill(args) => formkit::cli::commands::fill::run(args, &global, &config),
        Commands::Demo(args) => formkit::cli::commands::demo::run(args, &global),
        Commands::Completions(args) => formkit::cli::commands::completions::run(args),
    }
}
