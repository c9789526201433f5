//! Character lists for subsetting (made by FontLab https://www.fontlab.com/)

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Distinct characters of a character-list file, in first-seen order.
///
/// Line breaks are layout in the list file, not content, so `\n` and `\r`
/// never count as members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharSet {
    chars: Vec<char>,
    members: HashSet<char>,
}

impl CharSet {
    pub fn from_text(text: &str) -> Self {
        Self::from_chars(text.chars())
    }

    pub fn from_chars<I>(chars: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        let mut members = HashSet::new();
        let chars = chars
            .into_iter()
            .filter(|ch| !matches!(ch, '\n' | '\r'))
            .filter(|ch| members.insert(*ch))
            .collect();
        Self { chars, members }
    }

    /// Read a UTF-8 character list from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading character list {}", path.display()))?;
        Ok(Self::from_text(&text))
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    pub fn contains(&self, ch: char) -> bool {
        self.members.contains(&ch)
    }

    /// The list as a single line, ready to be written back out.
    pub fn to_text(&self) -> String {
        self.chars.iter().collect()
    }
}
