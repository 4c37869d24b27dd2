//! `logtail tail` — live view of one log, retargetable from stdin.

use std::io::Write;
use std::sync::Arc;

use logtail_core::{ControllerState, Period};
use logtail_http::LogSource;
use logtail_poller::TailController;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};

use crate::cli::TailOpts;
use crate::display::{render_frame, resolve_color};

/// How each published state is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Screen { use_color: bool },
    Json,
}

/// Entry point for `logtail tail`.
pub async fn cmd_tail(source: Arc<dyn LogSource>, opts: &TailOpts) -> anyhow::Result<()> {
    let period = Period::from_millis(opts.period)?;
    let format = if opts.json {
        OutputFormat::Json
    } else {
        OutputFormat::Screen {
            use_color: resolve_color(&opts.color),
        }
    };

    let mut controller = TailController::new(source, period);
    controller.set_target(opts.target.as_deref())?;

    let input = if opts.no_stdin {
        None
    } else {
        Some(BufReader::new(tokio::io::stdin()))
    };

    let mut stdout = std::io::stdout();
    tokio::select! {
        result = tail_loop(controller, input, &mut stdout, format) => result?,
        _ = tokio::signal::ctrl_c() => {
            tracing::debug!("received ctrl-c, stopping tail");
        }
    }
    Ok(())
}

/// Write every published state until the input reaches EOF.
///
/// Each input line retargets the controller; an empty line goes idle.
/// Without input the loop runs until the caller drops it.
pub(crate) async fn tail_loop<R, W>(
    mut controller: TailController,
    input: Option<R>,
    out: &mut W,
    format: OutputFormat,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut updates = controller.subscribe();
    let mut lines = input.map(AsyncBufReadExt::lines);

    let initial = updates.borrow_and_update().clone();
    emit(out, &initial, format)?;

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                emit(out, &state, format)?;
            }
            line = next_line(&mut lines) => {
                match line? {
                    Some(line) => {
                        let target = line.trim();
                        tracing::debug!("switching to {target:?}");
                        if let Err(e) = controller.set_target(Some(target)) {
                            tracing::warn!("cannot switch to {target:?}: {e}");
                        }
                    }
                    None => break,
                }
            }
        }
    }

    controller.dispose();
    Ok(())
}

async fn next_line<R>(lines: &mut Option<Lines<R>>) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    match lines {
        Some(lines) => lines.next_line().await,
        None => std::future::pending().await,
    }
}

fn emit<W: Write>(out: &mut W, state: &ControllerState, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string(state)?)?;
        }
        OutputFormat::Screen { use_color } => {
            // Clear screen + cursor home
            write!(out, "\x1b[2J\x1b[H")?;
            writeln!(out, "{}", render_frame(state, use_color))?;
        }
    }
    out.flush()?;
    Ok(())
}
