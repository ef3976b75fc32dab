use super::{Address, Word};

/// Encoded instructions for TEXT plus the offset execution starts at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    text: Vec<Word>,
    entry: Address,
}

impl Program {
    pub fn new(text: Vec<Word>) -> Program {
        Program { text, entry: 0 }
    }
    pub fn with_entry(self, entry: Address) -> Program {
        Program { entry, ..self }
    }
    pub fn text(&self) -> &[Word] {
        &self.text
    }
    pub fn entry(&self) -> Address {
        self.entry
    }
    pub fn len(&self) -> usize {
        self.text.len()
    }
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl From<Vec<Word>> for Program {
    fn from(text: Vec<Word>) -> Program {
        Program::new(text)
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", super::Listing::new(&self.text))
    }
}
