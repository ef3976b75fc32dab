use super::{Address, Result, Word};
use crate::error;

const OFFSET_BITS: u32 = 32;
const OFFSET_MASK: Word = (1 << OFFSET_BITS) - 1;

/// Largest capacity a segment may be configured with. Keeps any in-range
/// displacement from reaching a neighbouring tag.
pub const MAX_SEGMENT_LEN: usize = 1 << (OFFSET_BITS - 1);

/// ## Memory segments
///
/// A data address is a word carrying a segment tag in its upper half
/// and an element offset in its lower half. Walking off either end of a
/// segment leaves the offset outside `[0, len)`, so one segment can never
/// be reached through an address formed from another.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    Text = 1,
    Data = 2,
    Stack = 3,
}

impl Segment {
    pub fn encode(self, offset: Address) -> Word {
        debug_assert!(offset <= MAX_SEGMENT_LEN);
        ((self as Word) << OFFSET_BITS) | offset as Word
    }

    /// Splits a word into segment and offset. The offset is not checked
    /// against any segment length here.
    pub fn decode(word: Word) -> Result<(Segment, Address)> {
        let segment = match word >> OFFSET_BITS {
            1 => Segment::Text,
            2 => Segment::Data,
            3 => Segment::Stack,
            _ => return Err(error!(OutOfBounds, word; "unmapped segment")),
        };
        Ok((segment, (word & OFFSET_MASK) as Address))
    }

    /// Decodes `word` and requires it to name `self`.
    pub fn offset_of(self, word: Word) -> Result<Address> {
        match Segment::decode(word)? {
            (segment, offset) if segment == self => Ok(offset),
            (segment, _) => Err(error!(OutOfBounds, word, segment)),
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Segment::Text => write!(f, "TEXT"),
            Segment::Data => write!(f, "DATA"),
            Segment::Stack => write!(f, "STACK"),
        }
    }
}
