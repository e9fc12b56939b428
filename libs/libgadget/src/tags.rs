//! Tag lists: ordered, self-terminating (key, value) configuration.
//!
//! Every construction and attribute call takes a `&[Tag]`. Consumers walk
//! the list with [`TagIter`], which honors the control tags (`Done`,
//! `Ignore`, `Skip`, `More`) and yields only data tags. Tags a consumer does
//! not understand, including [`Tag::Unknown`], are ignored.

use libraster::Pen;

/// Base of the client-visible key namespace.
pub const TAG_USER: u32 = 0x8000_0000;

/// Raw control keys.
pub const TAG_DONE: u32 = 0;
pub const TAG_IGNORE: u32 = 1;
pub const TAG_MORE: u32 = 2;
pub const TAG_SKIP: u32 = 3;

const GA_BASE: u32 = TAG_USER + 0x3_0000;
const GT_BASE: u32 = TAG_USER + 0x8_0000;

/// Raw keys for the data tags, disjoint ranges per family.
pub mod keys {
    use super::{GA_BASE, GT_BASE};

    pub const GA_DISABLED: u32 = GA_BASE + 0x0E;
    pub const GA_IMMEDIATE: u32 = GA_BASE + 0x15;
    pub const GA_TAB_CYCLE: u32 = GA_BASE + 0x24;
    pub const GA_BORDER: u32 = GA_BASE + 0x25;
    pub const GA_RECESSED: u32 = GA_BASE + 0x26;

    pub const GT_UNDERSCORE: u32 = GT_BASE + 64;
    pub const GT_ALIGN: u32 = GT_BASE + 65;
    pub const GT_TEXT_PEN: u32 = GT_BASE + 66;
    pub const GTCB_CHECKED: u32 = GT_BASE + 4;
    pub const GTCB_SCALED: u32 = GT_BASE + 68;
    pub const GTLV_LABELS: u32 = GT_BASE + 6;
    pub const GTLV_SELECTED: u32 = GT_BASE + 54;
    pub const GTMX_LABELS: u32 = GT_BASE + 9;
    pub const GTMX_ACTIVE: u32 = GT_BASE + 10;
    pub const GTMX_SPACING: u32 = GT_BASE + 61;
    pub const GTMX_SCALED: u32 = GT_BASE + 69;
    pub const GTTX_TEXT: u32 = GT_BASE + 11;
    pub const GTST_STRING: u32 = GT_BASE + 45;
    pub const GTST_MAX_CHARS: u32 = GT_BASE + 46;
    pub const GTIN_NUMBER: u32 = GT_BASE + 47;
}

/// Horizontal placement of a button label.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    Left,
    #[default]
    Center,
    Right,
}

/// One tag-list entry.
#[derive(Clone, Copy, Debug)]
pub enum Tag<'a> {
    /// Terminator; traversal stops here even if entries follow.
    Done,
    /// Entry is skipped.
    Ignore,
    /// Continue with another list; the rest of this one is abandoned.
    More(&'a [Tag<'a>]),
    /// Skip this entry and the next `n`.
    Skip(usize),

    Disabled(bool),
    /// Notify on the initial click as well as on release.
    Immediate(bool),
    TabCycle(bool),
    /// Draw (or suppress) the kind's border.
    Border(bool),
    /// Draw the bevel inverted.
    Recessed(bool),
    /// Marker byte in the label that flags the following character for
    /// underlining.
    Underscore(u8),
    Align(Align),
    /// Pen for the content text of a text gadget.
    TextPen(Pen),

    /// Initial or new text-entry contents.
    String(&'a str),
    /// Maximum text-entry length in characters.
    MaxChars(usize),
    /// Numeric value, formatted as decimal into the text buffer.
    Number(i32),

    /// Option labels for radio groups and list views; copied.
    Labels(&'a [&'a str]),
    /// Committed radio selection.
    Active(u16),
    /// Radio boxes take the gadget's declared size instead of the glyph size.
    Scaled(bool),
    /// Vertical pixels between radio options.
    Spacing(i32),

    Checked(bool),
    /// Contents of a plain text gadget.
    Text(&'a str),
    /// List-view selection.
    Selected(Option<u16>),

    /// A key this toolkit does not implement. Always ignored.
    Unknown { key: u32, value: u32 },
}

impl<'a> Tag<'a> {
    /// Decode an integer-valued raw tag. Pointer-valued keys cannot be
    /// expressed as raw values and come back as `Unknown`, as do keys
    /// outside the known namespace.
    pub fn from_raw(key: u32, value: u32) -> Tag<'static> {
        let flag = value != 0;
        match key {
            TAG_DONE => Tag::Done,
            TAG_IGNORE => Tag::Ignore,
            TAG_SKIP => Tag::Skip(value as usize),
            keys::GA_DISABLED => Tag::Disabled(flag),
            keys::GA_IMMEDIATE => Tag::Immediate(flag),
            keys::GA_TAB_CYCLE => Tag::TabCycle(flag),
            keys::GA_BORDER => Tag::Border(flag),
            keys::GA_RECESSED => Tag::Recessed(flag),
            keys::GT_UNDERSCORE => Tag::Underscore(value as u8),
            keys::GT_ALIGN => Tag::Align(match value {
                0 => Align::Left,
                2 => Align::Right,
                _ => Align::Center,
            }),
            keys::GT_TEXT_PEN => Tag::TextPen(value as Pen),
            keys::GTST_MAX_CHARS => Tag::MaxChars(value as usize),
            keys::GTIN_NUMBER => Tag::Number(value as i32),
            keys::GTMX_ACTIVE => Tag::Active(value as u16),
            keys::GTMX_SCALED | keys::GTCB_SCALED => Tag::Scaled(flag),
            keys::GTMX_SPACING => Tag::Spacing(value as i32),
            keys::GTCB_CHECKED => Tag::Checked(flag),
            keys::GTLV_SELECTED => Tag::Selected(if value == u32::MAX {
                None
            } else {
                Some(value as u16)
            }),
            _ => Tag::Unknown { key, value },
        }
    }

    /// Raw key of this tag.
    pub fn key(&self) -> u32 {
        match self {
            Tag::Done => TAG_DONE,
            Tag::Ignore => TAG_IGNORE,
            Tag::More(_) => TAG_MORE,
            Tag::Skip(_) => TAG_SKIP,
            Tag::Disabled(_) => keys::GA_DISABLED,
            Tag::Immediate(_) => keys::GA_IMMEDIATE,
            Tag::TabCycle(_) => keys::GA_TAB_CYCLE,
            Tag::Border(_) => keys::GA_BORDER,
            Tag::Recessed(_) => keys::GA_RECESSED,
            Tag::Underscore(_) => keys::GT_UNDERSCORE,
            Tag::Align(_) => keys::GT_ALIGN,
            Tag::TextPen(_) => keys::GT_TEXT_PEN,
            Tag::String(_) => keys::GTST_STRING,
            Tag::MaxChars(_) => keys::GTST_MAX_CHARS,
            Tag::Number(_) => keys::GTIN_NUMBER,
            Tag::Labels(_) => keys::GTMX_LABELS,
            Tag::Active(_) => keys::GTMX_ACTIVE,
            Tag::Scaled(_) => keys::GTMX_SCALED,
            Tag::Spacing(_) => keys::GTMX_SPACING,
            Tag::Checked(_) => keys::GTCB_CHECKED,
            Tag::Text(_) => keys::GTTX_TEXT,
            Tag::Selected(_) => keys::GTLV_SELECTED,
            Tag::Unknown { key, .. } => *key,
        }
    }
}

/// Walks a tag list, yielding data tags only.
pub struct TagIter<'l, 'a> {
    list: &'l [Tag<'a>],
    pos: usize,
}

impl<'l, 'a> TagIter<'l, 'a> {
    pub fn new(list: &'l [Tag<'a>]) -> Self {
        Self { list, pos: 0 }
    }
}

impl<'l, 'a: 'l> Iterator for TagIter<'l, 'a> {
    type Item = &'l Tag<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let tag = self.list.get(self.pos)?;
            self.pos += 1;
            match tag {
                Tag::Done => {
                    self.pos = self.list.len();
                    return None;
                }
                Tag::Ignore => {}
                Tag::Skip(n) => self.pos = self.pos.saturating_add(*n),
                Tag::More(next) => {
                    self.list = *next;
                    self.pos = 0;
                }
                data => return Some(data),
            }
        }
    }
}

/// Convenience: iterate the data tags of `list`.
pub fn iter<'l, 'a>(list: &'l [Tag<'a>]) -> TagIter<'l, 'a> {
    TagIter::new(list)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys_of(list: &[Tag]) -> Vec<u32> {
        iter(list).map(|t| t.key()).collect()
    }

    #[test]
    fn traversal_stops_at_terminator() {
        let list = [Tag::Disabled(true), Tag::Done, Tag::Checked(true)];
        assert_eq!(keys_of(&list), [keys::GA_DISABLED]);
    }

    #[test]
    fn ignore_and_skip_are_honored() {
        let list = [
            Tag::Ignore,
            Tag::Skip(1),
            Tag::Checked(true),
            Tag::Border(false),
        ];
        assert_eq!(keys_of(&list), [keys::GA_BORDER]);
    }

    #[test]
    fn more_continues_with_nested_list() {
        let tail = [Tag::Active(2)];
        let list = [Tag::Disabled(false), Tag::More(&tail), Tag::Checked(true)];
        assert_eq!(keys_of(&list), [keys::GA_DISABLED, keys::GTMX_ACTIVE]);
    }

    #[test]
    fn raw_tags_decode_or_fall_back_to_unknown() {
        assert!(matches!(Tag::from_raw(keys::GA_DISABLED, 1), Tag::Disabled(true)));
        assert!(matches!(Tag::from_raw(keys::GTIN_NUMBER, (-5i32) as u32), Tag::Number(-5)));
        assert!(matches!(
            Tag::from_raw(TAG_USER + 0x7777, 9),
            Tag::Unknown { key, value: 9 } if key == TAG_USER + 0x7777
        ));
        assert!(matches!(Tag::from_raw(keys::GTLV_SELECTED, u32::MAX), Tag::Selected(None)));
    }

    #[test]
    fn unknown_tags_round_trip_their_key() {
        let tag = Tag::Unknown { key: 0x8123_4567, value: 0 };
        assert_eq!(tag.key(), 0x8123_4567);
    }
}
