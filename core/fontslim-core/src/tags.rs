/// The secret language of font tags, spelled out for the subsetter
///
/// fontTools wants table names on its command line; fonts keep them as
/// 4-byte tags. These helpers walk between the two so the drop list can be
/// checked against a real font and handed to the tool as text.
///
/// Made with curiosity at FontLab https://www.fontlab.com/
use anyhow::{anyhow, Result};
use read_fonts::types::Tag;

/// Encode 1-4 printable ASCII characters as a space-padded tag.
pub fn tag4(raw: &str) -> Result<Tag> {
    if raw.is_empty() || raw.len() > 4 {
        return Err(anyhow!("tag must be 1-4 printable ASCII chars"));
    }

    let mut buf = [b' '; 4];
    for (i, byte) in raw.as_bytes().iter().enumerate() {
        if !(0x20..=0x7E).contains(byte) {
            return Err(anyhow!("tag byte out of range: {raw}"));
        }
        buf[i] = *byte;
    }

    Ok(Tag::new(&buf))
}

/// Render a tag as its four characters, padding included.
pub fn tag_to_string(tag: Tag) -> String {
    String::from_utf8_lossy(&tag.to_be_bytes()).to_string()
}

/// Render a tag the way fontTools spells it on the command line (`SVG `
/// becomes `SVG`).
pub fn tag_to_flag(tag: Tag) -> String {
    tag_to_string(tag).trim_end().to_string()
}
