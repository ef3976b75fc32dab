use super::{Address, Segment, Word};

/// Register file for one execution.
///
/// PC is an index into TEXT. SP and BP are indexes into STACK, where
/// the origin (one past the last cell) means nothing is in use. CYCLE
/// counts completed instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Registers {
    pub pc: Address,
    pub sp: Address,
    pub bp: Address,
    pub ax: Word,
    pub cycle: usize,
}

impl Registers {
    pub fn new(pc: Address, stack_origin: Address) -> Registers {
        Registers {
            pc,
            sp: stack_origin,
            bp: stack_origin,
            ax: 0,
            cycle: 0,
        }
    }

    /// BP as a data address, the way a program sees it.
    pub fn bp_address(&self) -> Word {
        Segment::Stack.encode(self.bp)
    }
}

impl std::fmt::Display for Registers {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "pc={:04} sp={} bp={} ax={} cycle={}",
            self.pc, self.sp, self.bp, self.ax, self.cycle
        )
    }
}
