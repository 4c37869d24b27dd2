//! `logtail cat` — one read of a log, printed as-is.

use std::io::Write;

use logtail_core::Target;
use logtail_http::LogSource;

/// Entry point for `logtail cat`.
pub async fn cmd_cat(source: &dyn LogSource, target: &str) -> anyhow::Result<()> {
    let target = Target::parse(target)?;
    let body = source
        .fetch(&target)
        .await
        .map_err(|e| anyhow::anyhow!("cannot read {target}: {e}"))?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(body.as_bytes())?;
    if !body.is_empty() && !body.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}
