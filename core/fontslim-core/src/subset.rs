//! Subsetting through fontTools (made by FontLab https://www.fontlab.com/)

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{anyhow, Context, Result};
use read_fonts::types::Tag;
use tracing::debug;

use crate::asset::Flavor;
use crate::tags::{tag4, tag_to_flag};

/// Tables that never survive subsetting. Layout tables go because the PDF
/// renderer does no shaping.
const DROPPED_TABLES: [&str; 11] = [
    "DSIG", "GPOS", "GDEF", "GSUB", "MATH", "COLR", "CPAL", "SVG", "MVAR", "STAT", "BASE",
];

/// Name IDs kept: copyright, family, subfamily, full name, PostScript name.
const KEPT_NAME_IDS: &str = "0,1,2,4,6";

/// One font to subset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsetRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub chars_file: PathBuf,
    pub flavor: Flavor,
}

/// The drop list as tags, for checking against a source font.
pub fn dropped_tables() -> Vec<Tag> {
    DROPPED_TABLES
        .iter()
        .filter_map(|raw| tag4(raw).ok())
        .collect()
}

impl SubsetRequest {
    /// Arguments for `fontTools.subset`, in order.
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            self.input.clone().into_os_string(),
            prefixed("--text-file=", &self.chars_file),
            prefixed("--output-file=", &self.output),
            "--layout-features=".into(),
            format!("--name-IDs={KEPT_NAME_IDS}").into(),
        ];

        let drop_list: Vec<String> = dropped_tables().into_iter().map(tag_to_flag).collect();
        args.extend([
            OsString::from("--no-hinting"),
            "--desubroutinize".into(),
            format!("--drop-tables+={}", drop_list.join(",")).into(),
            "--notdef-outline".into(),
            "--recommended-glyphs".into(),
            "--ignore-missing-glyphs".into(),
            "--no-prune-unicode-ranges".into(),
        ]);

        if let Some(flavor) = self.flavor.flag_value() {
            args.push(format!("--flavor={flavor}").into());
        }

        args
    }
}

fn prefixed(flag: &str, path: &Path) -> OsString {
    let mut arg = OsString::from(flag);
    arg.push(path.as_os_str());
    arg
}

/// Something that can turn a [`SubsetRequest`] into an output file.
pub trait Subsetter {
    /// Short command echo for progress output.
    fn describe(&self, request: &SubsetRequest) -> String;

    /// Run synchronously. On failure the error carries the tool's diagnostics.
    fn subset(&self, request: &SubsetRequest) -> Result<()>;
}

/// Runs `<python> -m fontTools.subset`.
#[derive(Debug, Clone)]
pub struct FontToolsSubsetter {
    python: PathBuf,
}

impl Default for FontToolsSubsetter {
    fn default() -> Self {
        Self::new("python3")
    }
}

impl FontToolsSubsetter {
    pub fn new(python: impl Into<PathBuf>) -> Self {
        Self {
            python: python.into(),
        }
    }

    fn command_words(&self, request: &SubsetRequest) -> Vec<OsString> {
        let mut words: Vec<OsString> = vec![
            self.python.clone().into_os_string(),
            "-m".into(),
            "fontTools.subset".into(),
        ];
        words.extend(request.args());
        words
    }
}

impl Subsetter for FontToolsSubsetter {
    fn describe(&self, request: &SubsetRequest) -> String {
        let head: Vec<String> = self
            .command_words(request)
            .iter()
            .take(4)
            .map(|w| w.to_string_lossy().into_owned())
            .collect();
        format!("{}...", head.join(" "))
    }

    fn subset(&self, request: &SubsetRequest) -> Result<()> {
        let words = self.command_words(request);
        debug!(
            command = %words
                .iter()
                .map(|w| w.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" "),
            "running subsetter"
        );

        let output = Command::new(&words[0])
            .args(&words[1..])
            .output()
            .with_context(|| format!("launching {}", self.python.display()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let diagnostics = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            return Err(anyhow!(
                "fontTools.subset exited with {}: {}",
                output.status,
                diagnostics
            ));
        }

        Ok(())
    }
}
