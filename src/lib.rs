//! # xc
//!
//! A tiny stack machine for a C-like language.
//!
//! The machine has three word segments (TEXT for code, DATA for
//! globals, STACK for call frames) and four registers: PC, SP, BP and
//! the accumulator AX. A front end hands it a flat sequence of encoded
//! instructions; the machine runs them until `EXIT` and reports the
//! value on top of the stack.
//!
//! ```
//! use xc::mach::{run, Opcode::*, Program, Word};
//!
//! let text: Vec<Word> = vec![
//!     Imm.into(), 10,
//!     Push.into(),
//!     Imm.into(), 20,
//!     Add.into(),
//!     Push.into(),
//!     Exit.into(),
//! ];
//! assert_eq!(run(&Program::new(text), &[], 0, &[]).unwrap(), 30);
//! ```
//!
//! Calls follow the c4 convention. The caller pushes arguments and
//! emits `CALL`; the callee opens its frame with `ENT n`, reaches
//! arguments and locals through `LEA`, and returns with `LEV`; the
//! caller then drops its arguments with `ADJ`.
//!
//! Set `RUST_LOG=trace` to see every instruction as it executes.

pub mod mach;
