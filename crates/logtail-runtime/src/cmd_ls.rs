//! `logtail ls` — list available logs.

use logtail_http::LogSource;

use crate::display::format_targets;

/// Entry point for `logtail ls`.
pub async fn cmd_ls(source: &dyn LogSource) -> anyhow::Result<()> {
    let targets = source
        .list_targets()
        .await
        .map_err(|e| anyhow::anyhow!("cannot list logs: {e}"))?;
    tracing::debug!("{} logs available", targets.len());
    println!("{}", format_targets(&targets));
    Ok(())
}
