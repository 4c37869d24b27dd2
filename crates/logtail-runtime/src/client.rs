//! Builds the HTTP log source from global CLI options.

use std::time::Duration;

use logtail_http::HttpLogSource;

use crate::cli::Cli;

pub(crate) fn build_source(cli: &Cli) -> anyhow::Result<HttpLogSource> {
    let mut source = HttpLogSource::new(&cli.url)?;
    if let Some(ref user) = cli.user {
        source = source.with_basic_auth(user.clone(), cli.password.clone());
    } else if cli.password.is_some() {
        tracing::warn!("--password given without --user; ignoring");
    }
    if let Some(ms) = cli.timeout_ms {
        source = source.with_timeout(Duration::from_millis(ms));
    }
    Ok(source)
}
