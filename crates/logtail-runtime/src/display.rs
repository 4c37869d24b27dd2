//! Display helpers for CLI output: color resolution, tail frames, target lists.

use chrono::{DateTime, Local, Utc};
use logtail_core::ControllerState;

const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Resolve `--color` against whether stdout is a terminal.
pub fn resolve_color(color: &str) -> bool {
    use std::io::IsTerminal;
    match color {
        "always" => true,
        "never" => false,
        _ => std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal(),
    }
}

fn format_clock(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%H:%M:%S").to_string()
}

/// Header line: target, busy marker, and last refresh time.
pub fn format_header(state: &ControllerState, use_color: bool) -> String {
    let name = state
        .target
        .as_ref()
        .map_or_else(|| "(idle)".to_string(), ToString::to_string);

    let mut parts = Vec::new();
    if use_color {
        parts.push(format!("{BOLD}{name}{RESET}"));
    } else {
        parts.push(name);
    }
    if state.loading {
        parts.push("[loading]".to_string());
    }
    if let Some(ts) = state.updated_at {
        parts.push(format!("updated {}", format_clock(ts)));
    }
    parts.join("  ")
}

/// One full redraw of the tail view.
pub fn render_frame(state: &ControllerState, use_color: bool) -> String {
    let mut out = format_header(state, use_color);
    out.push('\n');

    if state.show_error {
        let message = state.last_error.as_deref().unwrap_or("unknown error");
        if use_color {
            out.push_str(&format!("{RED}error: {message}{RESET}\n"));
        } else {
            out.push_str(&format!("error: {message}\n"));
        }
    }

    out.push('\n');
    match state.last_content.as_deref() {
        Some(content) if !content.is_empty() => {
            out.push_str(content);
            if !content.ends_with('\n') {
                out.push('\n');
            }
        }
        Some(_) => out.push_str("(empty)\n"),
        None if state.target.is_some() => out.push_str("(waiting for first read)\n"),
        None => out.push_str("(no log selected)\n"),
    }

    let hint = "logtail tail \u{2014} type a log name to switch, empty line to idle, Ctrl-D to quit";
    if use_color {
        out.push_str(&format!("\n{DIM}{hint}{RESET}"));
    } else {
        out.push_str(&format!("\n{hint}"));
    }
    out
}

/// Target list for `logtail ls`.
pub fn format_targets(targets: &[String]) -> String {
    if targets.is_empty() {
        return "(no logs available)".to_string();
    }
    targets.join("\n")
}
