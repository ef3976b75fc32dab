use super::{Address, Opcode, Word};
use std::convert::TryFrom;

/// ## Disassembler
///
/// Renders TEXT one instruction per line. Words that are not opcodes
/// are shown as `.word` so a listing never stops early.

#[derive(Debug, Clone, Copy)]
pub struct Listing<'a> {
    text: &'a [Word],
}

impl<'a> Listing<'a> {
    pub fn new(text: &'a [Word]) -> Listing<'a> {
        Listing { text }
    }

    /// The instruction at `addr` and the address of the one after it.
    pub fn line(&self, addr: Address) -> Option<(String, Address)> {
        let word = *self.text.get(addr)?;
        let opcode = match Opcode::try_from(word) {
            Ok(opcode) => opcode,
            Err(_) => return Some((format!(".word {}", word), addr + 1)),
        };
        if !opcode.has_operand() {
            return Some((opcode.to_string(), addr + 1));
        }
        match self.text.get(addr + 1) {
            Some(operand) => Some((format!("{} {}", opcode, operand), addr + 2)),
            None => Some((format!("{} ?", opcode), addr + 1)),
        }
    }

    /// Up to `count` lines starting at `addr`.
    pub fn lines(&self, addr: Address, count: usize) -> Vec<(Address, String)> {
        let mut out = Vec::new();
        let mut addr = addr;
        while out.len() < count {
            match self.line(addr) {
                Some((s, next)) => {
                    out.push((addr, s));
                    addr = next;
                }
                None => break,
            }
        }
        out
    }
}

impl<'a> std::fmt::Display for Listing<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (addr, s) in self.lines(0, usize::MAX) {
            writeln!(f, "{:04}  {}", addr, s)?;
        }
        Ok(())
    }
}
