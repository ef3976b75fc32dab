use super::{Error, Word};
use crate::error;
use std::convert::TryFrom;

/// ## Virtual machine instruction set
///
/// A single accumulator, AX, holds the current value. Binary operators
/// take their left operand from the stack and their right from AX.
///
/// For example: `10 + 20` runs as `[IMM 10, PUSH, IMM 20, ADD]`
///
/// Opcodes are numbered in declaration order, starting at zero.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // *** Memory access
    /// Load the inline operand into AX.
    Imm,
    /// Load the char at address AX into AX.
    Lc,
    /// Load the word at address AX into AX.
    Li,
    /// Pop an address and store AX there as a char.
    Sc,
    /// Pop an address and store AX there.
    Si,
    /// Push AX.
    Push,

    // *** Control flow
    /// Unconditional branch to the inline operand.
    Jmp,
    /// Branch when AX is zero.
    Jz,
    /// Branch when AX is not zero.
    Jnz,
    /// Push the return address and branch.
    Call,
    /// Pop the return address into PC.
    Ret,
    /// Open a frame with room for N locals.
    Ent,
    /// Discard N words from the stack.
    Adj,
    /// Close the current frame and return.
    Lev,
    /// Load the address BP+N into AX.
    Lea,

    // *** Expression operations
    Or,
    Xor,
    And,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Shl,
    Shr,
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // *** Termination
    /// Halt with the stack top as the exit status.
    Exit,
}

impl Opcode {
    pub const ALL: [Opcode; 32] = {
        use Opcode::*;
        [
            Imm, Lc, Li, Sc, Si, Push, Jmp, Jz, Jnz, Call, Ret, Ent, Adj, Lev, Lea, Or, Xor, And,
            Eq, Ne, Lt, Le, Gt, Ge, Shl, Shr, Add, Sub, Mul, Div, Mod, Exit,
        ]
    };

    /// Whether the next TEXT word belongs to this instruction.
    pub fn has_operand(self) -> bool {
        use Opcode::*;
        matches!(self, Imm | Jmp | Jz | Jnz | Call | Ent | Adj | Lea)
    }

    /// Whether the operand is a TEXT address.
    pub fn is_branch(self) -> bool {
        use Opcode::*;
        matches!(self, Jmp | Jz | Jnz | Call)
    }

    pub fn is_binary(self) -> bool {
        (Opcode::Or as usize..=Opcode::Mod as usize).contains(&(self as usize))
    }
}

impl From<Opcode> for Word {
    fn from(opcode: Opcode) -> Word {
        opcode as Word
    }
}

impl TryFrom<Word> for Opcode {
    type Error = Error;
    fn try_from(word: Word) -> Result<Opcode, Error> {
        match usize::try_from(word) {
            Ok(index) if index < Opcode::ALL.len() => Ok(Opcode::ALL[index]),
            _ => Err(error!(UnknownInstruction, word)),
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Opcode::*;
        let s = match self {
            Imm => "IMM",
            Lc => "LC",
            Li => "LI",
            Sc => "SC",
            Si => "SI",
            Push => "PUSH",
            Jmp => "JMP",
            Jz => "JZ",
            Jnz => "JNZ",
            Call => "CALL",
            Ret => "RET",
            Ent => "ENT",
            Adj => "ADJ",
            Lev => "LEV",
            Lea => "LEA",
            Or => "OR",
            Xor => "XOR",
            And => "AND",
            Eq => "EQ",
            Ne => "NE",
            Lt => "LT",
            Le => "LE",
            Gt => "GT",
            Ge => "GE",
            Shl => "SHL",
            Shr => "SHR",
            Add => "ADD",
            Sub => "SUB",
            Mul => "MUL",
            Div => "DIV",
            Mod => "MOD",
            Exit => "EXIT",
        };
        write!(f, "{}", s)
    }
}
