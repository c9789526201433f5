//! Character-list generation (made by FontLab https://www.fontlab.com/)
//!
//! Rebuilds `chars.txt` from fixed Unicode blocks, JIS X 0208 level-1 kanji
//! and a rehabilitation vocabulary. Groups are listed in priority order and
//! the first occurrence of a character wins.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use encoding_rs::EUC_JP;
use tracing::debug;

use crate::charset::CharSet;

const FULLWIDTH_SYMBOLS: &str =
    "。、・「」『』【】（）〈〉《》〔〕！？…―～　％＆＊＋－／＝＠０１２３４５６７８９：；＜＞";

const REHAB_VOCABULARY: &str = "
膝、腰、肩、股、腕、脚、筋、骨、頸、頚、胸、腹、臀、踵、趾、肘、腱、靭、椎、髄
屈、伸、旋、挙、転、倒、仰、臥、俯、坐、端、蹲、踞、匍、匐
歩、階、段、差、棒、杖、輪、椅、器
吸、呼、腹、胸、式
疼、痛、麻、痺、拘、縮、萎、浮、腫、攣、痙
筋、力、持、久、協、調、均、衡
療、法、士、患、担、当、禁、忌、注、休、憩、止、継、続、反、復
";

/// EUC-JP rows holding the level-1 kanji.
const JIS_LEVEL1_ROWS: std::ops::RangeInclusive<u8> = 16..=47;
const JIS_CELLS: std::ops::RangeInclusive<u8> = 1..=94;

/// A named slice of the generated list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharGroup {
    pub name: &'static str,
    pub chars: Vec<char>,
}

/// The generation recipe, highest priority first.
pub fn default_groups() -> Vec<CharGroup> {
    vec![
        CharGroup {
            name: "ascii",
            chars: char_range(0x20, 0x7E),
        },
        CharGroup {
            name: "hiragana",
            chars: char_range(0x3040, 0x309F),
        },
        CharGroup {
            name: "katakana",
            chars: char_range(0x30A0, 0x30FF),
        },
        CharGroup {
            name: "halfwidth-katakana",
            chars: char_range(0xFF65, 0xFF9F),
        },
        CharGroup {
            name: "symbols",
            chars: FULLWIDTH_SYMBOLS.chars().collect(),
        },
        CharGroup {
            name: "jis-level1",
            chars: jis_level1_kanji(),
        },
        CharGroup {
            name: "rehab-vocabulary",
            chars: vocabulary_chars(REHAB_VOCABULARY),
        },
    ]
}

/// Build the complete character list.
pub fn generate() -> CharSet {
    let groups = default_groups();
    for group in &groups {
        debug!(group = group.name, chars = group.chars.len(), "character group");
    }
    CharSet::from_chars(groups.into_iter().flat_map(|g| g.chars))
}

/// Write a character list as one UTF-8 line without a trailing newline.
pub fn write_chars_file(path: &Path, set: &CharSet) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    fs::write(path, set.to_text())
        .with_context(|| format!("writing character list {}", path.display()))
}

/// Level-1 kanji in JIS order, decoded cell by cell from EUC-JP.
pub fn jis_level1_kanji() -> Vec<char> {
    let mut kanji = Vec::new();
    for row in JIS_LEVEL1_ROWS {
        for cell in JIS_CELLS {
            let bytes = [0xA0 + row, 0xA0 + cell];
            let Some(decoded) = EUC_JP.decode_without_bom_handling_and_without_replacement(&bytes)
            else {
                continue;
            };
            kanji.extend(decoded.chars().filter(|ch| *ch != char::REPLACEMENT_CHARACTER));
        }
    }
    kanji
}

fn char_range(start: u32, end: u32) -> Vec<char> {
    (start..=end).filter_map(char::from_u32).collect()
}

fn vocabulary_chars(raw: &str) -> Vec<char> {
    raw.chars()
        .filter(|ch| !matches!(ch, '、' | '\n' | '\r' | ' ' | '\t' | '\u{3000}'))
        .collect()
}
