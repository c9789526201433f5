//! Source-font diagnostics (made by FontLab https://www.fontlab.com/)

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use read_fonts::types::Tag;
use read_fonts::{FontRef, TableProvider};
use serde::{Deserialize, Serialize};
use skrifa::{FontRef as SkrifaFontRef, MetadataProvider};

use crate::charset::CharSet;
use crate::subset::dropped_tables;
use crate::tags::{tag4, tag_to_flag};

/// What the source font looks like before subsetting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    pub glyph_count: u16,
    /// Requested characters the source cmap cannot map. fontTools drops
    /// these silently under `--ignore-missing-glyphs`.
    pub missing: Vec<char>,
    #[serde(
        serialize_with = "serialize_tags",
        deserialize_with = "deserialize_tags"
    )]
    pub droppable_tables: Vec<Tag>,
}

/// Read a source font and compare it against the character list.
pub fn inspect_source(path: &Path, chars: &CharSet) -> Result<SourceInfo> {
    let data = fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
    inspect_bytes(&data, chars).with_context(|| format!("parsing font {}", path.display()))
}

pub fn inspect_bytes(data: &[u8], chars: &CharSet) -> Result<SourceInfo> {
    let font = FontRef::new(data)?;
    let sfont = SkrifaFontRef::new(data)?;

    let glyph_count = font.maxp()?.num_glyphs();

    let charmap = sfont.charmap();
    let missing = chars
        .chars()
        .iter()
        .copied()
        .filter(|ch| !ch.is_control())
        .filter(|ch| charmap.map(*ch).is_none())
        .collect();

    let droppable_tables = dropped_tables()
        .into_iter()
        .filter(|tag| font.table_data(*tag).is_some())
        .collect();

    Ok(SourceInfo {
        glyph_count,
        missing,
        droppable_tables,
    })
}

fn serialize_tags<S>(tags: &[Tag], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let as_strings: Vec<String> = tags.iter().copied().map(tag_to_flag).collect();
    as_strings.serialize(serializer)
}

fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<Tag>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Vec<String> = Vec::<String>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|s| tag4(&s).map_err(serde::de::Error::custom))
        .collect()
}
