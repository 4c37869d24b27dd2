//! logtail: live log tailing client for the grader dashboard API.
//! Lists available logs, prints one log, or follows one log live.

use std::sync::Arc;

use clap::Parser;
use logtail_http::LogSource;

mod cli;
mod client;
mod cmd_cat;
mod cmd_ls;
mod cmd_tail;
mod display;

fn init_logging() {
    let filter = std::env::var("LOGTAIL_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "warn".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    init_logging();

    let source: Arc<dyn LogSource> = Arc::new(client::build_source(&args)?);
    tracing::debug!("using {}", args.url);

    match args.command.unwrap_or(cli::Command::Ls) {
        cli::Command::Ls => cmd_ls::cmd_ls(source.as_ref()).await?,
        cli::Command::Cat(opts) => cmd_cat::cmd_cat(source.as_ref(), &opts.target).await?,
        cli::Command::Tail(opts) => cmd_tail::cmd_tail(source, &opts).await?,
    }

    Ok(())
}
