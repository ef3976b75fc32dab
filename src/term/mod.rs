extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;

use ansi_term::Style;
use linefeed::{DefaultTerminal, Interface, ReadResult, Signal};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use xc::mach::{Config, Error, Event, Listing, Opcode, Program, Runtime};

const SLICE: usize = 5000;

pub fn main() {
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");
    if let Err(error) = main_loop(interrupted) {
        eprintln!("{}", error);
    }
}

/// The image the bootstrap interpreter ran before it had a compiler.
fn demo_program() -> Program {
    use Opcode::*;
    Program::new(vec![
        Imm.into(),
        10,
        Push.into(),
        Imm.into(),
        20,
        Add.into(),
        Push.into(),
        Exit.into(),
    ])
}

fn boot(program: &Program) -> Result<Runtime, Error> {
    let mut runtime = Runtime::load(program, &[], &Config::default())?;
    runtime.start(0, &[])?;
    Ok(runtime)
}

fn main_loop(interrupted: Arc<AtomicBool>) -> std::io::Result<()> {
    let program = demo_program();
    let command = Interface::new("xc")?;
    command.set_prompt("xc> ")?;
    let mut runtime = match boot(&program) {
        Ok(runtime) => runtime,
        Err(error) => return print_error(&command, &error),
    };
    command.write_fmt(format_args!("{}", program))?;

    loop {
        let string = match command.read_line()? {
            ReadResult::Input(string) => string,
            ReadResult::Signal(Signal::Interrupt) => continue,
            ReadResult::Signal(_) | ReadResult::Eof => break,
        };
        let mut words = string.split_whitespace();
        let verb = match words.next() {
            Some(verb) => verb,
            None => continue,
        };
        let count = words.next().and_then(|s| s.parse::<usize>().ok());
        match verb {
            "s" | "step" => {
                for _ in 0..count.unwrap_or(1) {
                    let pc = runtime.registers().pc;
                    let listed = Listing::new(runtime.memory().text()).line(pc);
                    let result = runtime.step();
                    if let Some((instruction, _)) = listed {
                        command.write_fmt(format_args!("{:04}  {}\n", pc, instruction))?;
                    }
                    if !report(&command, result)? {
                        break;
                    }
                }
            }
            "c" | "cont" => {
                interrupted.store(false, Ordering::SeqCst);
                loop {
                    if interrupted.load(Ordering::SeqCst) {
                        interrupted.store(false, Ordering::SeqCst);
                        command.write_fmt(format_args!(
                            "break at pc {}\n",
                            runtime.registers().pc
                        ))?;
                        break;
                    }
                    let result = runtime.execute(SLICE);
                    if !report(&command, result)? {
                        break;
                    }
                }
            }
            "r" | "regs" => {
                command.write_fmt(format_args!("{}\n", runtime.registers()))?;
            }
            "l" | "list" => {
                let pc = runtime.registers().pc;
                let listing = Listing::new(runtime.memory().text());
                for (addr, s) in listing.lines(pc, count.unwrap_or(8)) {
                    command.write_fmt(format_args!("{:04}  {}\n", addr, s))?;
                }
            }
            "stack" => {
                let sp = runtime.registers().sp;
                let live = runtime.memory().stack().live(sp);
                for (index, word) in live.iter().take(count.unwrap_or(8)).enumerate() {
                    command.write_fmt(format_args!("{:>8}  {}\n", sp + index, word))?;
                }
            }
            "reset" => match boot(&program) {
                Ok(fresh) => runtime = fresh,
                Err(error) => print_error(&command, &error)?,
            },
            "h" | "help" => {
                command.write_fmt(format_args!(
                    "step [n], cont, regs, list [n], stack [n], reset, quit\n"
                ))?;
            }
            "q" | "quit" => break,
            _ => {
                command.write_fmt(format_args!("?{}\n", verb))?;
                continue;
            }
        }
        command.add_history_unique(string);
    }
    Ok(())
}

/// Prints the outcome of a step or slice. False once execution cannot
/// continue.
fn report(
    command: &Interface<DefaultTerminal>,
    result: Result<Event, Error>,
) -> std::io::Result<bool> {
    match result {
        Ok(Event::Running) => Ok(true),
        Ok(Event::Exited(status)) => {
            command.write_fmt(format_args!("exit({})\n", status))?;
            Ok(false)
        }
        Err(error) => {
            print_error(command, &error)?;
            Ok(false)
        }
    }
}

fn print_error(command: &Interface<DefaultTerminal>, error: &Error) -> std::io::Result<()> {
    command.write_fmt(format_args!(
        "{}\n",
        Style::new().bold().paint(error.to_string())
    ))
}
