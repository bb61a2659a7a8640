use clap::Parser;
use sounder::cli::{Cli, Commands};
use sounder::output;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            if cli.verbose {
                EnvFilter::new("sounder=debug")
            } else {
                EnvFilter::new("sounder=warn")
            }
        }))
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Commands::Scan(cmd) => cmd.execute(cli.verbose, cli.quiet).await,
        Commands::History(cmd) => cmd.execute(cli.quiet),
    };

    if let Err(e) = result {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}
