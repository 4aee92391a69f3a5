use anyhow::Result;
use planr::commands::Cli;
use planr::libs::messages::macros::is_debug_mode;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // In debug mode the message macros route through tracing; give them a
    // subscriber so the output is visible.
    if is_debug_mode() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
            .init();
    }

    Cli::menu()
}
