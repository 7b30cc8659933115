//! Terminal rendering for `greenayu` commands
//!
//! Every command prints through [`Output`] so `--no-color` and `--json`
//! behave the same everywhere. Plain mode swaps the glyphs for bracketed
//! tags that are easy to grep in scripts.

use greenayu_core::{FeatureError, FeatureErrorKind};
use owo_colors::{OwoColorize, Style};
use serde::Serialize;

/// Column width used by [`Output::table_row`].
const COLUMN: usize = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Ok,
    Info,
    Warn,
    Fail,
    Skip,
}

impl Mark {
    fn glyph(self) -> &'static str {
        match self {
            Mark::Ok => "✓",
            Mark::Info => "•",
            Mark::Warn => "⚠",
            Mark::Fail => "✗",
            Mark::Skip => "○",
        }
    }

    fn tag(self) -> &'static str {
        match self {
            Mark::Ok => "[OK]",
            Mark::Info => "[INFO]",
            Mark::Warn => "[WARN]",
            Mark::Fail => "[ERROR]",
            Mark::Skip => "[SKIPPED]",
        }
    }

    fn style(self) -> Style {
        match self {
            Mark::Ok => Style::new().green().bold(),
            Mark::Info => Style::new().blue(),
            Mark::Warn => Style::new().yellow().bold(),
            Mark::Fail => Style::new().red().bold(),
            Mark::Skip => Style::new().yellow(),
        }
    }
}

/// Output style for one invocation.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    pub fn new() -> Self {
        Self { colored: true }
    }

    pub fn no_color() -> Self {
        Self { colored: false }
    }

    fn render(&self, mark: Mark, message: &str) -> String {
        if self.colored {
            format!("  {} {}", mark.glyph().style(mark.style()), message)
        } else {
            format!("  {} {}", mark.tag(), message)
        }
    }

    pub fn banner(&self) {
        let version = format!("v{}", env!("CARGO_PKG_VERSION"));
        if self.colored {
            println!("\n   {} {}", "🌿 GreenAyu".bright_green().bold(), version.dimmed());
            println!("   {}\n", "Medicinal plant diagnostics".bright_white());
        } else {
            println!("\n   GreenAyu {}\n   Medicinal plant diagnostics\n", version);
        }
    }

    pub fn success(&self, message: &str) {
        println!("{}", self.render(Mark::Ok, message));
    }

    pub fn info(&self, message: &str) {
        println!("{}", self.render(Mark::Info, message));
    }

    pub fn warning(&self, message: &str) {
        println!("{}", self.render(Mark::Warn, message));
    }

    /// Goes to stderr so `--json` output on stdout stays parseable.
    pub fn error(&self, message: &str) {
        eprintln!("{}", self.render(Mark::Fail, message));
    }

    /// A file or directory written by `init`.
    pub fn created(&self, what: &str, path: &str) {
        let message = if self.colored {
            format!("{} {}", what.dimmed(), path.bright_white())
        } else {
            format!("{} {}", what, path)
        };
        println!("{}", self.render(Mark::Ok, &message));
    }

    pub fn skipped(&self, path: &str, reason: &str) {
        println!("{}", self.render(Mark::Skip, &format!("{} ({})", path, reason)));
    }

    /// Remedy matching the kind of a failed submission.
    pub fn feature_hint(&self, err: &FeatureError) {
        match err.kind() {
            FeatureErrorKind::NetworkUnreachable => {
                self.hint("Check [backend] base_url in greenayu.toml or set GREENAYU_BASE_URL")
            }
            FeatureErrorKind::MalformedResponse => {
                self.hint("The backend answered with an unexpected shape; check its version")
            }
            _ => {}
        }
    }

    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  == {} ==", title);
        }
    }

    /// One labelled field of a report.
    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {}: {}", key, value);
        }
    }

    /// Confidence as a ten-cell bar; green from 70%, amber from 40%.
    pub fn meter(&self, key: &str, percent: u32) {
        let bar = meter_bar(percent);
        if self.colored {
            let style = match percent {
                70.. => Style::new().green(),
                40..=69 => Style::new().yellow(),
                _ => Style::new().red(),
            };
            println!(
                "    {}: {} {}",
                key.dimmed(),
                bar.style(style),
                format!("{}%", percent).bright_white()
            );
        } else {
            println!("    {}: {} {}%", key, bar, percent);
        }
    }

    pub fn hint(&self, message: &str) {
        if self.colored {
            println!("\n  {}", message.dimmed().italic());
        } else {
            println!("\n  [TIP] {}", message);
        }
    }

    /// A command the user can paste.
    pub fn command(&self, cmd: &str) {
        let line = format!("$ {}", cmd);
        if self.colored {
            println!("     {}", line.bright_cyan());
        } else {
            println!("     {}", line);
        }
    }

    pub fn complete(&self, message: &str) {
        if self.colored {
            println!("\n  {} {}", "🌱", message.bright_green().bold());
        } else {
            println!("\n  [DONE] {}", message);
        }
    }

    pub fn table_header(&self, columns: &[&str]) {
        let header = pad_columns(columns);
        let rule_width = columns.len() * (COLUMN + 1);
        if self.colored {
            println!("    {}", header.bright_white().bold());
            println!("    {}", "─".repeat(rule_width).dimmed());
        } else {
            println!("    {}", header);
            println!("    {}", "-".repeat(rule_width));
        }
    }

    pub fn table_row(&self, values: &[&str]) {
        println!("    {}", pad_columns(values));
    }

    /// Pretty JSON on stdout.
    pub fn json<T: Serialize>(&self, value: &T) -> serde_json::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}

fn meter_bar(percent: u32) -> String {
    let filled = (percent.min(100) as usize + 5) / 10;
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
}

fn pad_columns(values: &[&str]) -> String {
    values
        .iter()
        .map(|v| format!("{:<width$}", v, width = COLUMN))
        .collect::<Vec<_>>()
        .join(" ")
}
