use std::io::IsTerminal;

use console::style;
use serde::Serialize;

use crate::error::{Result, ScoutError};

/// How command output is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Styled text for people
    #[default]
    Human,
    /// One pretty-printed JSON document
    Json,
    /// One JSON object per line
    Jsonl,
    /// Tab-separated rows without a header
    Plain,
    /// Tab-separated rows with a header
    Tsv,
}

impl OutputFormat {
    #[must_use]
    pub const fn is_machine_readable(self) -> bool {
        matches!(self, Self::Json | Self::Jsonl | Self::Tsv)
    }
}

/// Style human output only on a terminal, outside robot mode, without `NO_COLOR`.
#[must_use]
pub fn use_rich_output(format: OutputFormat, robot: bool) -> bool {
    rich_output_allowed(
        format,
        robot,
        std::env::var_os("NO_COLOR").is_some(),
        std::io::stdout().is_terminal(),
    )
}

const fn rich_output_allowed(
    format: OutputFormat,
    robot: bool,
    no_color: bool,
    stdout_is_terminal: bool,
) -> bool {
    matches!(format, OutputFormat::Human) && !robot && !no_color && stdout_is_terminal
}

/// Something that can render itself in every [`OutputFormat`].
pub trait Formattable {
    fn format(&self, fmt: OutputFormat) -> String;
}

pub fn emit_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value)
        .map_err(|err| ScoutError::Serialization(format!("serialize output: {err}")))?;
    println!("{payload}");
    Ok(())
}

/// Key/value block for human output.
pub struct HumanLayout {
    lines: Vec<String>,
    key_width: usize,
    styled: bool,
}

impl HumanLayout {
    #[must_use]
    pub const fn new(styled: bool) -> Self {
        Self {
            lines: Vec::new(),
            key_width: 14,
            styled,
        }
    }

    pub fn title(&mut self, text: &str) -> &mut Self {
        let line = if self.styled {
            style(text).bold().force_styling(true).to_string()
        } else {
            text.to_string()
        };
        self.lines.push(line);
        self.lines.push(String::new());
        self
    }

    pub fn kv(&mut self, key: &str, value: &str) -> &mut Self {
        let padded = format!("{key:width$}", width = self.key_width);
        let key = if self.styled {
            style(padded).dim().force_styling(true).to_string()
        } else {
            padded
        };
        self.lines.push(format!("{key} {value}"));
        self
    }

    pub fn bullet(&mut self, text: &str) -> &mut Self {
        self.lines.push(format!("- {text}"));
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    #[must_use]
    pub fn build(self) -> String {
        self.lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_layout_has_no_ansi() {
        let mut layout = HumanLayout::new(false);
        layout.title("CryptoBot").kv("Karma", "42").blank().bullet("trading");
        let out = layout.build();
        assert!(!out.contains("\x1b["));
        assert!(out.starts_with("CryptoBot\n\n"));
        assert!(out.contains("Karma          42"));
        assert!(out.ends_with("- trading"));
    }

    #[test]
    fn styled_layout_is_styled_even_when_piped() {
        let mut layout = HumanLayout::new(true);
        layout.title("CryptoBot").kv("Karma", "42");
        assert!(layout.build().contains("\x1b["));
    }

    #[test]
    fn rich_output_needs_human_format_on_a_terminal() {
        assert!(rich_output_allowed(OutputFormat::Human, false, false, true));
        assert!(!rich_output_allowed(OutputFormat::Human, true, false, true));
        assert!(!rich_output_allowed(OutputFormat::Human, false, true, true));
        assert!(!rich_output_allowed(OutputFormat::Human, false, false, false));
        for format in [
            OutputFormat::Json,
            OutputFormat::Jsonl,
            OutputFormat::Plain,
            OutputFormat::Tsv,
        ] {
            assert!(!rich_output_allowed(format, false, false, true), "{format:?}");
        }
    }

    #[test]
    fn machine_readable_formats() {
        assert!(OutputFormat::Json.is_machine_readable());
        assert!(OutputFormat::Jsonl.is_machine_readable());
        assert!(OutputFormat::Tsv.is_machine_readable());
        assert!(!OutputFormat::Plain.is_machine_readable());
        assert!(!OutputFormat::Human.is_machine_readable());
    }
}
