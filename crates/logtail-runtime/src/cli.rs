//! CLI definition using clap derive.

use clap::{Parser, Subcommand};
use logtail_core::period::DEFAULT_PERIOD_MS;

pub const DEFAULT_URL: &str = "http://127.0.0.1:8080";

#[derive(Debug, Parser)]
#[command(name = "logtail", about = "Live log tailing for the grader dashboard")]
pub struct Cli {
    /// Dashboard base URL
    #[arg(long, short = 'u', global = true, env = "LOGTAIL_URL", default_value = DEFAULT_URL)]
    pub url: String,

    /// HTTP basic auth user
    #[arg(long, global = true, env = "LOGTAIL_USER")]
    pub user: Option<String>,

    /// HTTP basic auth password
    #[arg(long, global = true, env = "LOGTAIL_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Per-request timeout in milliseconds (default: none)
    #[arg(long, global = true, env = "LOGTAIL_TIMEOUT_MS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List available logs
    Ls,
    /// Print the current content of one log
    Cat(CatOpts),
    /// Follow a log live; type a name on stdin to switch
    Tail(TailOpts),
}

#[derive(Debug, clap::Args)]
pub struct CatOpts {
    /// Log name
    pub target: String,
}

#[derive(Debug, clap::Args)]
pub struct TailOpts {
    /// Log name to start with (idle when omitted)
    pub target: Option<String>,

    /// Refresh period in milliseconds
    #[arg(long, short = 'p', default_value_t = DEFAULT_PERIOD_MS, value_parser = clap::value_parser!(u64).range(1..))]
    pub period: u64,

    /// Color output: auto, always, never
    #[arg(long, default_value = "auto")]
    pub color: String,

    /// Emit one JSON state object per change instead of redrawing
    #[arg(long)]
    pub json: bool,

    /// Ignore stdin instead of reading target switches from it
    #[arg(long)]
    pub no_stdin: bool,
}
