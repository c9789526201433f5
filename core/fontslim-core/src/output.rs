//! Report rendering (made by FontLab https://www.fontlab.com/)

use std::io::Write;
use std::path::Path;

use anyhow::Result;

use crate::asset::Flavor;
use crate::band::{SizeClass, TargetBand};
use crate::run::{ProcessedFont, RunReport};

const RULE_WIDTH: usize = 50;
const MISSING_PREVIEW: usize = 10;

const SIZE_HINTS: [&str; 3] = [
    "Remove rarely used kanji from chars.txt",
    "Narrow JIS level-1 kanji down to the medical and rehabilitation vocabulary",
    "Cut back on symbols and special characters",
];

/// Whether status lines get ANSI colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub color: bool,
}

impl Style {
    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn colored() -> Self {
        Self { color: true }
    }
}

#[derive(Copy, Clone)]
enum AnsiColor {
    Green,
    Yellow,
    Red,
}

fn apply_color(text: &str, style: Style, code: AnsiColor) -> String {
    if !style.color {
        return text.to_string();
    }

    let code_str = match code {
        AnsiColor::Green => "32",
        AnsiColor::Yellow => "33",
        AnsiColor::Red => "31",
    };

    format!("\u{1b}[{}m{}\u{1b}[0m", code_str, text)
}

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Bytes as MB with two decimals.
pub fn format_mb(bytes: u64) -> String {
    format!("{:.2} MB", bytes as f64 / 1024.0 / 1024.0)
}

/// Bytes as KB with two decimals.
pub fn format_kb(bytes: u64) -> String {
    format!("{:.2} KB", bytes as f64 / 1024.0)
}

/// Percentage saved by subsetting; `None` for an empty input.
pub fn reduction_percent(input_bytes: u64, output_bytes: u64) -> Option<f64> {
    if input_bytes == 0 {
        return None;
    }
    Some((1.0 - output_bytes as f64 / input_bytes as f64) * 100.0)
}

pub fn write_banner(
    mut w: impl Write,
    chars_file: &Path,
    char_count: usize,
    flavor: Flavor,
) -> Result<()> {
    writeln!(w, "{}", rule())?;
    writeln!(w, "Noto Sans JP font subsetting")?;
    writeln!(w, "{}", rule())?;
    writeln!(w, "Character list: {}", chars_file.display())?;
    writeln!(w, "Characters: {char_count}")?;
    writeln!(w, "Output format: {}", flavor.label())?;
    Ok(())
}

pub fn write_skip(mut w: impl Write, input: &Path) -> Result<()> {
    writeln!(w, "Skipped: {} not found", input.display())?;
    Ok(())
}

pub fn write_font_header(
    mut w: impl Write,
    name: &str,
    input_bytes: u64,
    command: &str,
) -> Result<()> {
    writeln!(w)?;
    writeln!(w, "Processing: {name}")?;
    writeln!(w, "  Input size: {}", format_mb(input_bytes))?;
    writeln!(w, "  Running: {command}")?;
    Ok(())
}

pub fn write_processed(
    mut w: impl Write,
    font: &ProcessedFont,
    band: &TargetBand,
    style: Style,
) -> Result<()> {
    if let Some(source) = &font.source {
        writeln!(
            w,
            "  Source glyphs: {}, characters missing from source: {}",
            source.glyph_count,
            source.missing.len()
        )?;
        if !source.missing.is_empty() {
            let preview: String = source.missing.iter().take(MISSING_PREVIEW).collect();
            let more = if source.missing.len() > MISSING_PREVIEW {
                "…"
            } else {
                ""
            };
            writeln!(w, "    {preview}{more}")?;
        }
    }

    writeln!(w, "  Output size: {}", format_kb(font.output_bytes))?;
    if let Some(pct) = font.reduction_percent {
        writeln!(w, "  Reduction: {pct:.1}%")?;
    }

    let line = match font.class {
        SizeClass::AboveMaximum => apply_color(
            &format!("  ⚠️  Warning: exceeds target size ({}KB)", band.max_kb),
            style,
            AnsiColor::Yellow,
        ),
        SizeClass::BelowMinimum => apply_color(
            &format!(
                "  ⚠️  Note: below target size ({}KB); the character list may be missing glyphs",
                band.min_kb
            ),
            style,
            AnsiColor::Yellow,
        ),
        SizeClass::WithinRange => apply_color(
            &format!("  ✅ Within target range ({}-{}KB)", band.min_kb, band.max_kb),
            style,
            AnsiColor::Green,
        ),
    };
    writeln!(w, "{line}")?;
    Ok(())
}

/// The tool's diagnostics travel with the returned error, not this line.
pub fn write_failure(mut w: impl Write, name: &str, style: Style) -> Result<()> {
    let line = format!("  Failed: subsetting {name} failed");
    writeln!(w, "{}", apply_color(&line, style, AnsiColor::Red))?;
    Ok(())
}

pub fn write_summary(mut w: impl Write, success: bool, style: Style) -> Result<()> {
    writeln!(w)?;
    writeln!(w, "{}", rule())?;
    if success {
        let line = "✅ Done! All fonts are within the target size";
        writeln!(w, "{}", apply_color(line, style, AnsiColor::Green))?;
    } else {
        let line = "⚠️  Completed with warnings";
        writeln!(w, "{}", apply_color(line, style, AnsiColor::Yellow))?;
        writeln!(w)?;
        writeln!(w, "Size reduction hints:")?;
        for (i, hint) in SIZE_HINTS.iter().enumerate() {
            writeln!(w, "  {}. {hint}", i + 1)?;
        }
    }
    writeln!(w, "{}", rule())?;
    Ok(())
}

/// Write the run report as prettified JSON.
pub fn write_json_pretty(report: &RunReport, mut w: impl Write) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    w.write_all(json.as_bytes())?;
    w.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processed(class: SizeClass) -> ProcessedFont {
        ProcessedFont {
            input_bytes: 4 * 1024 * 1024,
            output_bytes: 600 * 1024,
            reduction_percent: reduction_percent(4 * 1024 * 1024, 600 * 1024),
            class,
            source: None,
        }
    }

    fn render(font: &ProcessedFont, style: Style) -> String {
        let mut buf = Vec::new();
        write_processed(&mut buf, font, &TargetBand::default(), style).expect("write");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn sizes_use_binary_units() {
        assert_eq!(format_mb(5 * 1024 * 1024 + 512 * 1024), "5.50 MB");
        assert_eq!(format_kb(600 * 1024), "600.00 KB");
    }

    #[test]
    fn reduction_handles_empty_input() {
        assert_eq!(reduction_percent(0, 10), None);
        assert_eq!(reduction_percent(1000, 250), Some(75.0));
    }

    #[test]
    fn within_range_line() {
        let text = render(&processed(SizeClass::WithinRange), Style::plain());
        assert!(text.contains("Output size: 600.00 KB"));
        assert!(text.contains("Reduction: 85.4%"));
        assert!(text.contains("Within target range (500-700KB)"));
    }

    #[test]
    fn warnings_are_colored_when_asked() {
        let text = render(&processed(SizeClass::AboveMaximum), Style::colored());
        assert!(text.contains("\u{1b}[33m"));
        assert!(text.contains("exceeds target size (700KB)"));

        let plain = render(&processed(SizeClass::BelowMinimum), Style::plain());
        assert!(!plain.contains('\u{1b}'));
        assert!(plain.contains("below target size (500KB)"));
    }

    #[test]
    fn failure_line_names_the_font_only() {
        let mut buf = Vec::new();
        write_failure(&mut buf, "NotoSansJP-Bold.ttf", Style::plain()).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        assert_eq!(text, "  Failed: subsetting NotoSansJP-Bold.ttf failed\n");
    }

    #[test]
    fn summary_prints_hints_only_on_warning() {
        let mut ok = Vec::new();
        write_summary(&mut ok, true, Style::plain()).expect("write");
        let ok = String::from_utf8(ok).expect("utf8");
        assert!(ok.contains("All fonts are within the target size"));
        assert!(!ok.contains("hints"));

        let mut warn = Vec::new();
        write_summary(&mut warn, false, Style::plain()).expect("write");
        let warn = String::from_utf8(warn).expect("utf8");
        assert!(warn.contains("Completed with warnings"));
        assert!(warn.contains("  3. Cut back on symbols"));
    }
}
