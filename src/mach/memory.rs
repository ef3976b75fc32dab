use super::{Address, Config, Result, Segment, Stack, Word};
use crate::error;
use std::convert::TryFrom;

/// ## Machine memory
///
/// TEXT, DATA and STACK as separate zero-filled word arrays. Every read
/// and write goes through a decoded address and is bounds-checked
/// against the one segment that address names.

#[derive(Debug)]
pub struct Memory {
    text: Vec<Word>,
    data: Vec<Word>,
    stack: Stack,
}

impl Memory {
    pub fn new(config: &Config) -> Memory {
        Memory {
            text: vec![0; config.text],
            data: vec![0; config.data],
            stack: Stack::new(config.stack),
        }
    }

    pub fn text(&self) -> &[Word] {
        &self.text
    }

    pub fn data(&self) -> &[Word] {
        &self.data
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn stack_mut(&mut self) -> &mut Stack {
        &mut self.stack
    }

    /// Copies `words` into a segment starting at `offset`.
    pub fn write_image(&mut self, segment: Segment, offset: Address, words: &[Word]) -> Result<()> {
        let cells = match segment {
            Segment::Text => &mut self.text,
            Segment::Data => &mut self.data,
            Segment::Stack => return Err(error!(ReadOnly; "stack has no image")),
        };
        let end = offset + words.len();
        if end > cells.len() {
            return Err(error!(OutOfMemory, end as Word, segment));
        }
        cells[offset..end].copy_from_slice(words);
        Ok(())
    }

    /// Reads the TEXT word at `pc` and advances `pc` past it.
    pub fn fetch(&self, pc: &mut Address) -> Result<Word> {
        match self.text.get(*pc) {
            Some(word) => {
                *pc += 1;
                Ok(*word)
            }
            None => Err(error!(OutOfBounds, *pc as Word, Segment::Text)),
        }
    }

    /// Validates a code address for a jump, call or return.
    pub fn jump_target(&self, word: Word) -> Result<Address> {
        match Address::try_from(word) {
            Ok(target) if target < self.text.len() => Ok(target),
            _ => Err(error!(OutOfBounds, word, Segment::Text)),
        }
    }

    /// Validates an encoded STACK address used as a frame base. The
    /// stack origin is one past the last cell and is a valid base.
    pub fn frame_base(&self, word: Word) -> Result<Address> {
        let offset = Segment::Stack.offset_of(word)?;
        if offset > self.stack.origin() {
            return Err(error!(OutOfBounds, word, Segment::Stack));
        }
        Ok(offset)
    }

    pub fn load(&self, word: Word) -> Result<Word> {
        let (segment, offset) = Segment::decode(word)?;
        let cell = match segment {
            Segment::Text => self.text.get(offset),
            Segment::Data => self.data.get(offset),
            Segment::Stack => self.stack.get(offset),
        };
        match cell {
            Some(val) => Ok(*val),
            None => Err(error!(OutOfBounds, word, segment)),
        }
    }

    pub fn store(&mut self, word: Word, val: Word) -> Result<()> {
        let (segment, offset) = Segment::decode(word)?;
        let cell = match segment {
            Segment::Text => return Err(error!(ReadOnly, word, segment)),
            Segment::Data => self.data.get_mut(offset),
            Segment::Stack => self.stack.get_mut(offset),
        };
        match cell {
            Some(cell) => {
                *cell = val;
                Ok(())
            }
            None => Err(error!(OutOfBounds, word, segment)),
        }
    }
}
