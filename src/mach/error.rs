use super::{Address, Segment, Word};

#[derive(Clone, PartialEq)]
pub struct Error {
    code: ErrorCode,
    pc: Option<Address>,
    word: Option<Word>,
    segment: Option<Segment>,
    message: &'static str,
}

#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($err:ident) => {
        $crate::mach::Error::new($crate::mach::ErrorCode::$err)
    };
    ($err:ident; $msg:expr) => {
        $crate::mach::Error::new($crate::mach::ErrorCode::$err).message($msg)
    };
    ($err:ident, $word:expr) => {
        $crate::mach::Error::new($crate::mach::ErrorCode::$err).with_word($word)
    };
    ($err:ident, $word:expr; $msg:expr) => {
        $crate::mach::Error::new($crate::mach::ErrorCode::$err)
            .with_word($word)
            .message($msg)
    };
    ($err:ident, $word:expr, $seg:expr) => {
        $crate::mach::Error::new($crate::mach::ErrorCode::$err)
            .with_word($word)
            .in_segment($seg)
    };
    ($err:ident, $word:expr, $seg:expr; $msg:expr) => {
        $crate::mach::Error::new($crate::mach::ErrorCode::$err)
            .with_word($word)
            .in_segment($seg)
            .message($msg)
    };
}

impl Error {
    pub fn new(code: ErrorCode) -> Error {
        Error {
            code,
            pc: None,
            word: None,
            segment: None,
            message: "",
        }
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Offset in TEXT of the instruction that failed.
    pub fn pc(&self) -> Option<Address> {
        self.pc
    }

    /// The offending opcode for `UnknownInstruction`, the offending
    /// address for `OutOfBounds`, otherwise whatever the raiser attached.
    pub fn word(&self) -> Option<Word> {
        self.word
    }

    pub fn segment(&self) -> Option<Segment> {
        self.segment
    }

    pub fn at_pc(self, pc: Address) -> Error {
        debug_assert!(self.pc.is_none());
        Error {
            pc: Some(pc),
            ..self
        }
    }

    pub fn with_word(self, word: Word) -> Error {
        debug_assert!(self.word.is_none());
        Error {
            word: Some(word),
            ..self
        }
    }

    pub fn in_segment(self, segment: Segment) -> Error {
        Error {
            segment: Some(segment),
            ..self
        }
    }

    pub fn message(self, message: &'static str) -> Error {
        debug_assert_eq!(self.message.len(), 0);
        Error { message, ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    UnknownInstruction = 1,
    OutOfBounds = 2,
    StackOverflow = 3,
    StackUnderflow = 4,
    DivisionByZero = 5,
    ReadOnly = 6,
    OutOfMemory = 7,
    UndefinedLabel = 8,
    DuplicateLabel = 9,
    AlreadyStarted = 10,
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error {{ {} }}", self.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use ErrorCode::*;
        let code_str = match self.code {
            UnknownInstruction => "unknown instruction",
            OutOfBounds => "out of bounds address",
            StackOverflow => "stack overflow",
            StackUnderflow => "stack underflow",
            DivisionByZero => "division by zero",
            ReadOnly => "write to read-only address",
            OutOfMemory => "out of memory",
            UndefinedLabel => "undefined label",
            DuplicateLabel => "duplicate label",
            AlreadyStarted => "already started",
        };
        write!(f, "{}", code_str)?;
        if let Some(word) = self.word {
            match self.code {
                OutOfBounds | ReadOnly => write!(f, " {:#x}", word)?,
                _ => write!(f, " {}", word)?,
            }
        }
        if let Some(segment) = self.segment {
            write!(f, " in {}", segment)?;
        }
        if let Some(pc) = self.pc {
            write!(f, " at pc {}", pc)?;
        }
        if !self.message.is_empty() {
            write!(f, "; {}", self.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}
