//! Font assets and output flavors (made by FontLab https://www.fontlab.com/)

use std::fmt;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

/// Container format requested from the subsetter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flavor {
    /// zlib-compressed WOFF; the PDF renderer downstream cannot read WOFF2.
    #[default]
    Woff,
    Woff2,
    /// Plain sfnt output, no `--flavor` flag.
    Ttf,
}

impl Flavor {
    /// Value for fontTools' `--flavor=`; `None` means the flag is omitted.
    pub fn flag_value(self) -> Option<&'static str> {
        match self {
            Flavor::Woff => Some("woff"),
            Flavor::Woff2 => Some("woff2"),
            Flavor::Ttf => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Flavor::Woff => "woff",
            Flavor::Woff2 => "woff2",
            Flavor::Ttf => "ttf",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Flavor::Woff => "WOFF (zlib)",
            Flavor::Woff2 => "WOFF2 (brotli)",
            Flavor::Ttf => "TrueType",
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// One typeface weight: source file name in the originals directory and
/// output file name in the fonts directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontAsset {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl FontAsset {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }

    /// Parse an `INPUT=OUTPUT` pair.
    pub fn parse_pair(raw: &str) -> Result<Self> {
        let (input, output) = raw
            .split_once('=')
            .ok_or_else(|| anyhow!("font pair must look like INPUT=OUTPUT: {raw}"))?;
        let (input, output) = (input.trim(), output.trim());
        if input.is_empty() || output.is_empty() {
            return Err(anyhow!("font pair has an empty side: {raw}"));
        }
        Ok(Self::new(input, output))
    }

    /// Regular and Bold Noto Sans JP, outputs named after the flavor.
    pub fn noto_sans_jp(flavor: Flavor) -> Vec<Self> {
        ["NotoSansJP-Regular", "NotoSansJP-Bold"]
            .into_iter()
            .map(|stem| {
                Self::new(
                    format!("{stem}.ttf"),
                    format!("{stem}.{}", flavor.extension()),
                )
            })
            .collect()
    }

    /// Display name used in progress lines.
    pub fn name(&self) -> String {
        self.input.display().to_string()
    }
}
