use super::{Opcode, Result, Word};
use crate::error;

/// ## Binary operators
///
/// The left operand comes off the stack, the right operand is AX.
/// Arithmetic wraps like the machine word it models. Comparisons
/// produce 1 or 0.

pub struct Operation {}

impl Operation {
    pub fn binary(opcode: Opcode, lhs: Word, rhs: Word) -> Result<Word> {
        use Opcode::*;
        match opcode {
            Or => Ok(lhs | rhs),
            Xor => Ok(lhs ^ rhs),
            And => Ok(lhs & rhs),
            Eq => Ok(Operation::truth(lhs == rhs)),
            Ne => Ok(Operation::truth(lhs != rhs)),
            Lt => Ok(Operation::truth(lhs < rhs)),
            Le => Ok(Operation::truth(lhs <= rhs)),
            Gt => Ok(Operation::truth(lhs > rhs)),
            Ge => Ok(Operation::truth(lhs >= rhs)),
            Shl => Ok(Operation::shift_left(lhs, rhs)),
            Shr => Ok(Operation::shift_right(lhs, rhs)),
            Add => Ok(lhs.wrapping_add(rhs)),
            Sub => Ok(lhs.wrapping_sub(rhs)),
            Mul => Ok(lhs.wrapping_mul(rhs)),
            Div => Operation::divide(lhs, rhs),
            Mod => Operation::remainder(lhs, rhs),
            _ => Err(error!(UnknownInstruction, Word::from(opcode); "not a binary operator")),
        }
    }

    fn truth(b: bool) -> Word {
        if b {
            1
        } else {
            0
        }
    }

    pub fn shift_left(lhs: Word, rhs: Word) -> Word {
        lhs.wrapping_shl(rhs as u32)
    }

    pub fn shift_right(lhs: Word, rhs: Word) -> Word {
        lhs.wrapping_shr(rhs as u32)
    }

    pub fn divide(lhs: Word, rhs: Word) -> Result<Word> {
        if rhs == 0 {
            Err(error!(DivisionByZero, lhs))
        } else {
            Ok(lhs.wrapping_div(rhs))
        }
    }

    pub fn remainder(lhs: Word, rhs: Word) -> Result<Word> {
        if rhs == 0 {
            Err(error!(DivisionByZero, lhs))
        } else {
            Ok(lhs.wrapping_rem(rhs))
        }
    }
}
