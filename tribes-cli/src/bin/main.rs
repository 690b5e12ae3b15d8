use clap::Parser;
use std::fmt::Debug;
use tracing_subscriber::EnvFilter;
use tribes_cli::{Command, Runner};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Base URL of the web application (defaults to the saved one)
    #[arg(short, long)]
    endpoint: Option<String>,
    /// Debug print
    #[arg(short, long)]
    debug: bool,
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter = if args.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    Ok(Runner::new(args.endpoint, args.debug, matches!(args.command, Command::Login(_)))
        .await?
        .run(args.command)
        .await?)
}
