//! tracing subscriber setup for the binary

use tracing_subscriber::EnvFilter;

use crate::cli::GlobalOpts;
use crate::core::Config;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "FORMKIT_LOG";

/// Filter directive: `--verbose`, then `--quiet`, then FORMKIT_LOG, then config
pub fn filter_directive(global: &GlobalOpts, config: &Config, env: Option<String>) -> String {
    if global.verbose {
        "formkit=debug".to_string()
    } else if global.quiet {
        "error".to_string()
    } else {
        env.filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| config.log_filter())
    }
}

/// Install the global subscriber; logs go to stderr so stdout stays pipeable
pub fn init(global: &GlobalOpts, config: &Config) {
    let directive = filter_directive(global, config, std::env::var(LOG_ENV).ok());
    let env_filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
