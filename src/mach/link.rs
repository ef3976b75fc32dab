use super::{Address, Error, Opcode, Program, Word};
use crate::error;
use std::collections::{BTreeMap, HashMap};

/// ## Code emitter and linker
///
/// Instructions are appended in order. Branch operands may name a
/// label that is defined later; `link` patches every such operand with
/// the label's TEXT address.

#[derive(Debug, Default, Clone)]
pub struct Link {
    text: Vec<Word>,
    symbols: HashMap<String, Address>,
    unlinked: BTreeMap<Address, String>,
    errors: Vec<Error>,
    entry: Option<String>,
}

impl Link {
    pub fn new() -> Link {
        Link::default()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Emits an instruction that takes no operand.
    pub fn push(&mut self, opcode: Opcode) -> &mut Link {
        debug_assert!(!opcode.has_operand());
        self.text.push(opcode.into());
        self
    }

    /// Emits an instruction with a literal operand.
    pub fn push_with(&mut self, opcode: Opcode, operand: Word) -> &mut Link {
        debug_assert!(opcode.has_operand());
        self.text.push(opcode.into());
        self.text.push(operand);
        self
    }

    /// Emits a branch whose target is the label `symbol`.
    pub fn push_symbol(&mut self, opcode: Opcode, symbol: &str) -> &mut Link {
        debug_assert!(opcode.is_branch());
        self.text.push(opcode.into());
        self.unlinked.insert(self.text.len(), symbol.to_string());
        self.text.push(0);
        self
    }

    /// Appends raw words, e.g. an already encoded fragment.
    pub fn append(&mut self, words: &[Word]) -> &mut Link {
        self.text.extend_from_slice(words);
        self
    }

    /// Defines `symbol` at the current address.
    pub fn label(&mut self, symbol: &str) -> &mut Link {
        let addr = self.text.len();
        if self.symbols.insert(symbol.to_string(), addr).is_some() {
            self.errors
                .push(error!(DuplicateLabel, addr as Word; "label defined twice"));
        }
        self
    }

    /// Execution starts at `symbol` instead of address 0.
    pub fn entry(&mut self, symbol: &str) -> &mut Link {
        self.entry = Some(symbol.to_string());
        self
    }

    pub fn address_of(&self, symbol: &str) -> Option<Address> {
        self.symbols.get(symbol).copied()
    }

    pub fn link(&mut self) -> Result<Program, Vec<Error>> {
        let mut errors = std::mem::take(&mut self.errors);
        for (op_addr, symbol) in std::mem::take(&mut self.unlinked) {
            match self.symbols.get(&symbol) {
                Some(dest) => self.text[op_addr] = *dest as Word,
                None => errors.push(error!(UndefinedLabel, op_addr as Word)),
            }
        }
        let entry = match &self.entry {
            None => 0,
            Some(symbol) => match self.symbols.get(symbol) {
                Some(addr) => *addr,
                None => {
                    errors.push(error!(UndefinedLabel; "entry point"));
                    0
                }
            },
        };
        if errors.is_empty() {
            Ok(Program::new(self.text.clone()).with_entry(entry))
        } else {
            Err(errors)
        }
    }
}
