use super::{
    Address, Config, Listing, Memory, Opcode, Operation, Program, Registers, Result, Segment, Word,
};
use super::segment::MAX_SEGMENT_LEN;
use crate::error;
use log::{debug, info, log_enabled, trace, warn, Level};
use std::convert::TryFrom;

/// Outcome of executing one or more instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// More instructions remain.
    Running,
    /// EXIT was reached with this status.
    Exited(Word),
}

/// ## Per-execution machine state
///
/// Owns the three segments and the register file for one run of one
/// program. Build a fresh one for every run.
///
/// Each instruction works on a staged copy of the registers that is
/// committed only when the instruction succeeds, and the one memory
/// write an instruction may perform happens after all of its checks.
/// A failed step therefore leaves the machine as it was before it.

#[derive(Debug)]
pub struct Runtime {
    memory: Memory,
    regs: Registers,
    exit_stub: Address,
    data_end: Address,
    started: bool,
    status: Option<Word>,
}

impl Runtime {
    /// Loads `program` into TEXT followed by a `PUSH; EXIT` stub, and
    /// `data` into the bottom of DATA.
    pub fn load(program: &Program, data: &[Word], config: &Config) -> Result<Runtime> {
        config.validate()?;
        let mut memory = Memory::new(config);
        let exit_stub = program.len();
        memory.write_image(Segment::Text, 0, program.text())?;
        memory.write_image(
            Segment::Text,
            exit_stub,
            &[Opcode::Push.into(), Opcode::Exit.into()],
        )?;
        memory.write_image(Segment::Data, 0, data)?;
        if program.entry() > exit_stub {
            return Err(error!(OutOfBounds, program.entry() as Word, Segment::Text; "entry point"));
        }
        let regs = Registers::new(program.entry(), memory.stack().origin());
        debug!(
            "loaded {} text words, {} data words, entry {}",
            program.len(),
            data.len(),
            program.entry()
        );
        Ok(Runtime {
            memory,
            regs,
            exit_stub,
            data_end: data.len(),
            started: false,
            status: None,
        })
    }

    /// Copies `argv` into DATA after the data image and pushes `argc`,
    /// the address of the argv array, and a return address into the
    /// exit stub. Only valid once, before the first step.
    pub fn start(&mut self, argc: Word, argv: &[&str]) -> Result<()> {
        if self.started || self.regs.cycle > 0 {
            return Err(error!(AlreadyStarted));
        }
        let mut words: Vec<Word> = Vec::new();
        let mut pointers: Vec<Word> = Vec::new();
        for arg in argv {
            pointers.push(Segment::Data.encode(self.data_end + words.len()));
            words.extend(arg.bytes().map(|b| b as i8 as Word));
            words.push(0);
        }
        let array = self.data_end + words.len();
        words.extend(pointers);
        if self.data_end + words.len() > self.memory.data().len() {
            return Err(error!(OutOfMemory; "argv does not fit in DATA"));
        }
        self.memory
            .write_image(Segment::Data, self.data_end, &words)?;
        self.data_end += words.len();

        let mut sp = self.regs.sp;
        self.memory.stack().reserve(sp, 3)?;
        let stack = self.memory.stack_mut();
        stack.push(&mut sp, argc)?;
        stack.push(&mut sp, Segment::Data.encode(array))?;
        stack.push(&mut sp, self.exit_stub as Word)?;
        self.regs.sp = sp;
        self.started = true;
        Ok(())
    }

    pub fn registers(&self) -> Registers {
        self.regs
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Status of the EXIT that ended execution, if it has.
    pub fn exit_status(&self) -> Option<Word> {
        self.status
    }

    /// Executes up to `cycles` instructions.
    pub fn execute(&mut self, cycles: usize) -> Result<Event> {
        for _ in 0..cycles {
            if let Event::Exited(status) = self.step()? {
                return Ok(Event::Exited(status));
            }
        }
        Ok(self.status.map_or(Event::Running, Event::Exited))
    }

    /// Executes exactly one instruction.
    pub fn step(&mut self) -> Result<Event> {
        if let Some(status) = self.status {
            return Ok(Event::Exited(status));
        }
        let pc = self.regs.pc;
        let mut regs = self.regs;
        match self.dispatch(&mut regs) {
            Ok(event) => {
                regs.cycle += 1;
                self.regs = regs;
                if let Event::Exited(status) = event {
                    info!("exit({}) after {} cycles", status, regs.cycle);
                    self.status = Some(status);
                }
                Ok(event)
            }
            Err(error) => {
                let error = error.at_pc(pc);
                debug!("{}", error);
                Err(error)
            }
        }
    }

    fn dispatch(&mut self, regs: &mut Registers) -> Result<Event> {
        if log_enabled!(Level::Trace) {
            if let Some((instruction, _)) = Listing::new(self.memory.text()).line(regs.pc) {
                trace!("{:>6} {:04} {:<12} {}", regs.cycle, regs.pc, instruction, regs);
            }
        }
        let opcode = Opcode::try_from(self.memory.fetch(&mut regs.pc)?)?;
        use Opcode::*;
        match opcode {
            Imm => regs.ax = self.memory.fetch(&mut regs.pc)?,
            Lc => regs.ax = self.memory.load(regs.ax)? as i8 as Word,
            Li => regs.ax = self.memory.load(regs.ax)?,
            Sc => {
                let addr = self.memory.stack().pop(&mut regs.sp)?;
                let byte = regs.ax as i8 as Word;
                self.memory.store(addr, byte)?;
                regs.ax = byte;
            }
            Si => {
                let addr = self.memory.stack().pop(&mut regs.sp)?;
                self.memory.store(addr, regs.ax)?;
            }
            Push => self.memory.stack_mut().push(&mut regs.sp, regs.ax)?,
            Jmp => {
                let target = self.memory.fetch(&mut regs.pc)?;
                regs.pc = self.memory.jump_target(target)?;
            }
            Jz | Jnz => {
                let target = self.memory.fetch(&mut regs.pc)?;
                if (regs.ax == 0) == (opcode == Jz) {
                    regs.pc = self.memory.jump_target(target)?;
                }
            }
            Call => {
                let target = self.memory.fetch(&mut regs.pc)?;
                let target = self.memory.jump_target(target)?;
                self.memory
                    .stack_mut()
                    .push(&mut regs.sp, regs.pc as Word)?;
                regs.pc = target;
            }
            Ret => {
                let ret = self.memory.stack().pop(&mut regs.sp)?;
                regs.pc = self.memory.jump_target(ret)?;
            }
            Ent => {
                let n = self.memory.fetch(&mut regs.pc)?;
                let locals = match usize::try_from(n) {
                    Ok(locals) => locals,
                    Err(_) => return Err(error!(StackUnderflow, n; "negative frame size")),
                };
                let frame_sp = self.memory.stack().reserve(regs.sp, 1)?;
                let sp = self.memory.stack().reserve(frame_sp, locals)?;
                let saved_bp = regs.bp_address();
                self.memory.stack_mut().push(&mut regs.sp, saved_bp)?;
                regs.bp = frame_sp;
                regs.sp = sp;
            }
            Adj => {
                let n = self.memory.fetch(&mut regs.pc)?;
                regs.sp = self.memory.stack().adjust(regs.sp, n)?;
            }
            Lev => {
                let mut sp = regs.bp;
                let saved_bp = self.memory.stack().pop(&mut sp)?;
                let ret = self.memory.stack().pop(&mut sp)?;
                regs.bp = self.memory.frame_base(saved_bp)?;
                regs.pc = self.memory.jump_target(ret)?;
                regs.sp = sp;
            }
            Lea => {
                let n = self.memory.fetch(&mut regs.pc)?;
                // wider displacements could carry into another tag
                if n.unsigned_abs() > MAX_SEGMENT_LEN as u64 {
                    return Err(error!(OutOfBounds, n, Segment::Stack; "frame offset"));
                }
                regs.ax = regs.bp_address().wrapping_add(n);
            }
            Or | Xor | And | Eq | Ne | Lt | Le | Gt | Ge | Shl | Shr | Add | Sub | Mul | Div
            | Mod => {
                let lhs = self.memory.stack().pop(&mut regs.sp)?;
                regs.ax = Operation::binary(opcode, lhs, regs.ax)?;
            }
            Exit => {
                let status = self.memory.stack().peek(regs.sp)?;
                return Ok(Event::Exited(status));
            }
        }
        Ok(Event::Running)
    }
}

/// Runs `program` to its EXIT with default segment sizes.
pub fn run(program: &Program, data: &[Word], argc: Word, argv: &[&str]) -> Result<Word> {
    run_with(&Config::default(), program, data, argc, argv)
}

pub fn run_with(
    config: &Config,
    program: &Program,
    data: &[Word],
    argc: Word,
    argv: &[&str],
) -> Result<Word> {
    let mut runtime = Runtime::load(program, data, config)?;
    runtime.start(argc, argv)?;
    loop {
        match runtime.step() {
            Ok(Event::Running) => {}
            Ok(Event::Exited(status)) => return Ok(status),
            Err(error) => {
                warn!("{}", error);
                return Err(error);
            }
        }
    }
}
