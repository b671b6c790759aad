use color_print::ceprintln;
use egtree::{
    cli::execute_command, commands::create_cli_commands, commands::params::PARAMETER_VERBOSE,
    error_utils::create_user_friendly_error,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Main entry point for the program
#[tokio::main]
async fn main() {
    let matches = create_cli_commands();

    // RUST_LOG takes precedence over --verbose
    let default_level = if matches.get_flag(PARAMETER_VERBOSE) {
        "debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Intialize the logging subsystem; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = execute_command(&matches).await {
        let code = e.exit_code();
        debug!("Command failed ({}): {:?}", code.message(), e);
        ceprintln!("<r>ERROR:</r> {}", create_user_friendly_error(&e));
        ::std::process::exit(code.code());
    }
}
