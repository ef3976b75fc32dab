use super::{Address, Result, Word};
use crate::error;
use std::convert::TryFrom;

/// ## Call stack segment
///
/// Fixed capacity and growing down. SP addresses the lowest word in use,
/// so an empty stack has SP equal to the capacity. The stack never moves
/// SP itself; callers pass in the SP they are staging.

pub struct Stack {
    cells: Vec<Word>,
}

impl std::fmt::Debug for Stack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Stack({} words)", self.cells.len())
    }
}

impl Stack {
    pub fn new(len: usize) -> Stack {
        Stack {
            cells: vec![0; len],
        }
    }
    /// The initial SP and BP.
    pub fn origin(&self) -> Address {
        self.cells.len()
    }
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
    pub fn get(&self, index: Address) -> Option<&Word> {
        self.cells.get(index)
    }
    pub fn get_mut(&mut self, index: Address) -> Option<&mut Word> {
        self.cells.get_mut(index)
    }
    /// The words from `sp` up to the origin, top of stack first.
    pub fn live(&self, sp: Address) -> &[Word] {
        self.cells.get(sp..).unwrap_or(&[])
    }
    fn underflow_error(&self) -> super::Error {
        error!(StackUnderflow)
    }
    pub fn peek(&self, sp: Address) -> Result<Word> {
        match self.cells.get(sp) {
            Some(v) => Ok(*v),
            None => Err(self.underflow_error()),
        }
    }
    pub fn pop(&self, sp: &mut Address) -> Result<Word> {
        let val = self.peek(*sp)?;
        *sp += 1;
        Ok(val)
    }
    /// SP after reserving `len` more words below `sp`.
    pub fn reserve(&self, sp: Address, len: usize) -> Result<Address> {
        match sp.checked_sub(len) {
            Some(sp) => Ok(sp),
            None => Err(error!(StackOverflow)),
        }
    }
    pub fn push(&mut self, sp: &mut Address, val: Word) -> Result<()> {
        let top = self.reserve(*sp, 1)?;
        match self.cells.get_mut(top) {
            Some(cell) => *cell = val,
            None => return Err(self.underflow_error()),
        }
        *sp = top;
        Ok(())
    }
    /// SP after moving it by `n` words toward the origin.
    pub fn adjust(&self, sp: Address, n: Word) -> Result<Address> {
        let moved = match Address::try_from(n) {
            Ok(n) => sp.checked_add(n),
            Err(_) => return self.reserve(sp, n.unsigned_abs() as usize),
        };
        match moved {
            Some(sp) if sp <= self.origin() => Ok(sp),
            _ => Err(error!(StackUnderflow, n)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mach::ErrorCode;

    #[test]
    fn test_push_pop() {
        let mut stack = Stack::new(4);
        let mut sp = stack.origin();
        stack.push(&mut sp, 7).unwrap();
        stack.push(&mut sp, 8).unwrap();
        assert_eq!(sp, 2);
        assert_eq!(stack.live(sp), &[8, 7]);
        assert_eq!(stack.pop(&mut sp).unwrap(), 8);
        assert_eq!(stack.pop(&mut sp).unwrap(), 7);
        assert_eq!(stack.pop(&mut sp).unwrap_err().code(), ErrorCode::StackUnderflow);
        assert_eq!(sp, 4);
    }

    #[test]
    fn test_overflow_leaves_sp() {
        let mut stack = Stack::new(1);
        let mut sp = stack.origin();
        stack.push(&mut sp, 1).unwrap();
        let e = stack.push(&mut sp, 2).unwrap_err();
        assert_eq!(e.code(), ErrorCode::StackOverflow);
        assert_eq!(sp, 0);
        assert_eq!(stack.peek(0).unwrap(), 1);
    }

    #[test]
    fn test_adjust() {
        let stack = Stack::new(8);
        assert_eq!(stack.adjust(5, 3).unwrap(), 8);
        assert_eq!(stack.adjust(5, -5).unwrap(), 0);
        assert_eq!(stack.adjust(5, 4).unwrap_err().code(), ErrorCode::StackUnderflow);
        assert_eq!(stack.adjust(5, -6).unwrap_err().code(), ErrorCode::StackOverflow);
    }
}
