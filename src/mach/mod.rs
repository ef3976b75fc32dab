/*!
## Rust Machine Module

This Rust module is the virtual machine for xc. It owns three word
segments (TEXT, DATA, STACK), four registers (PC, SP, BP, AX) and
the fetch-decode-execute loop that drives them.

A compiled program is handed over as a flat sequence of words. The
[`Link`] emitter builds one with symbolic labels, [`Listing`] turns
one back into text, and [`run`] executes one to its `EXIT`.

*/

/// A single untagged machine word.
pub type Word = i64;
/// Element index into a segment. PC and return addresses are TEXT indices.
pub type Address = usize;

/// Default capacity, in words, of each segment.
pub const POOL_SIZE: usize = 256 * 1024;

mod config;
mod error;
mod link;
mod listing;
mod memory;
mod opcode;
mod operation;
mod program;
mod registers;
mod runtime;
mod segment;
mod stack;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use error::Error;
pub use error::ErrorCode;
pub use link::Link;
pub use listing::Listing;
pub use memory::Memory;
pub use opcode::Opcode;
pub use operation::Operation;
pub use program::Program;
pub use registers::Registers;
pub use runtime::run;
pub use runtime::run_with;
pub use runtime::Event;
pub use runtime::Runtime;
pub use segment::Segment;
pub use stack::Stack;

pub type Result<T> = std::result::Result<T, Error>;
