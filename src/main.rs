use clap::Parser;
use docvault::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "DOCVAULT_LOG";

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Save {
            ref name,
            ref input,
        } => docvault::cli::commands::save::execute(&cli, name, input.as_deref()),
        Commands::Load { ref name, pretty } => {
            docvault::cli::commands::load::execute(&cli, name, pretty)
        }
        Commands::Verify { ref name } => docvault::cli::commands::verify::execute(&cli, name),
        Commands::Sign { ref input } => docvault::cli::commands::sign::execute(input.as_deref()),
        Commands::Check { ref input } => docvault::cli::commands::check::execute(input.as_deref()),
        Commands::Version => docvault::cli::commands::version::execute(),
        Commands::Completions { shell } => docvault::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        docvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Log to stderr; `DOCVAULT_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "docvault=debug" } else { "docvault=warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
