//! Shared output layer for pretty/text/JSON parity across CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its output
//! accordingly: pretty output for humans, compact text for pipes and scripts,
//! or stable JSON.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. `--format` / hidden `--json` flag
//! 2. `FORMAT` env var → `"pretty"` | `"text"` | `"json"`
//! 3. Default: [`OutputMode::Pretty`] if stdout is a TTY; [`OutputMode::Text`] if piped.

use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, IsTerminal, Write};

/// Shared width for human pretty separators.
pub const PRETTY_RULE_WIDTH: usize = 72;

/// Write a horizontal separator used by pretty human output.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = PRETTY_RULE_WIDTH)
}

/// Render a left-aligned key/value line in human output.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<12} {}", format!("{key}:"), value.as_ref())
}

/// The three output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-optimized output (tables, sections, visual framing).
    Pretty,
    /// Token-efficient plain text for pipes and scripts.
    Text,
    /// Machine-readable JSON (one object per result).
    Json,
}

impl OutputMode {
    /// Returns `true` if JSON output was requested.
    pub fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Core resolution logic, separated from I/O for testability.
///
/// `format_flag` — explicit `--format` value if provided.
/// `json_flag` — hidden `--json` alias.
/// `format_env` — the value of `FORMAT` if set.
/// `is_tty` — true if stdout is a TTY.
fn resolve_output_mode_inner(
    format_flag: Option<OutputMode>,
    json_flag: bool,
    format_env: Option<&str>,
    is_tty: bool,
) -> OutputMode {
    if let Some(mode) = format_flag {
        return mode;
    }

    if json_flag {
        return OutputMode::Json;
    }

    if let Some(val) = format_env {
        match val.to_lowercase().as_str() {
            "json" => return OutputMode::Json,
            "text" => return OutputMode::Text,
            "pretty" => return OutputMode::Pretty,
            _ => {} // unknown value — fall through to TTY detection
        }
    }

    // Default: pretty if TTY, text if piped.
    if is_tty {
        OutputMode::Pretty
    } else {
        OutputMode::Text
    }
}

/// Resolve the output mode from CLI flags, environment, and TTY defaults.
pub fn resolve_output_mode(format_flag: Option<OutputMode>, json_flag: bool) -> OutputMode {
    let env_val = std::env::var("FORMAT").ok();
    let is_tty = io::stdout().is_terminal();
    resolve_output_mode_inner(format_flag, json_flag, env_val.as_deref(), is_tty)
}

/// Trait implemented by any CLI result type that can be rendered in all modes.
///
/// JSON rendering comes from the `Serialize` bound; implementors provide the
/// two human-facing renderings.
pub trait Renderable: Serialize {
    /// Render for human consumption: labels, alignment, framing.
    fn render_pretty(&self, w: &mut dyn Write) -> io::Result<()>;

    /// Render as compact plain text, one record per line.
    fn render_text(&self, w: &mut dyn Write) -> io::Result<()>;
}

/// Render one result to stdout in the requested mode.
pub fn render_item<T: Renderable>(item: &T, mode: OutputMode) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    match mode {
        OutputMode::Json => {
            let json = serde_json::to_string(item)?;
            writeln!(stdout, "{json}")?;
        }
        OutputMode::Pretty => item.render_pretty(&mut stdout)?,
        OutputMode::Text => item.render_text(&mut stdout)?,
    }
    Ok(())
}

/// Report a command failure: human message on stderr, plus a stable JSON
/// object on stdout when JSON was requested.
pub fn render_failure(mode: OutputMode, err: &anyhow::Error) -> io::Result<()> {
    if mode.is_json() {
        let body = serde_json::json!({ "error": format!("{err:#}") });
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{body}")?;
    }
    let mut stderr = io::stderr().lock();
    writeln!(stderr, "error: {err:#}")
}

#[cfg(test)]
mod tests {
    use super::{OutputMode, resolve_output_mode_inner};

    #[test]
    fn explicit_format_flag_wins() {
        let mode = resolve_output_mode_inner(Some(OutputMode::Json), false, Some("pretty"), true);
        assert_eq!(mode, OutputMode::Json);
    }

    #[test]
    fn json_flag_beats_env_and_tty() {
        let mode = resolve_output_mode_inner(None, true, Some("pretty"), true);
        assert_eq!(mode, OutputMode::Json);
    }

    #[test]
    fn env_var_beats_tty_detection() {
        let mode = resolve_output_mode_inner(None, false, Some("text"), true);
        assert_eq!(mode, OutputMode::Text);
        let mode = resolve_output_mode_inner(None, false, Some("JSON"), true);
        assert_eq!(mode, OutputMode::Json);
    }

    #[test]
    fn unknown_env_value_falls_through_to_tty() {
        let mode = resolve_output_mode_inner(None, false, Some("yaml"), true);
        assert_eq!(mode, OutputMode::Pretty);
        let mode = resolve_output_mode_inner(None, false, Some("yaml"), false);
        assert_eq!(mode, OutputMode::Text);
    }

    #[test]
    fn default_is_pretty_on_tty_text_when_piped() {
        assert_eq!(
            resolve_output_mode_inner(None, false, None, true),
            OutputMode::Pretty
        );
        assert_eq!(
            resolve_output_mode_inner(None, false, None, false),
            OutputMode::Text
        );
    }
}
