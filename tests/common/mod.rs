use xc::mach::{Address, Config, Error, Event, Link, Program, Runtime, Word};

pub fn small() -> Config {
    Config::with_pool_size(256)
}

pub fn program(link: &mut Link) -> Program {
    match link.link() {
        Ok(program) => program,
        Err(errors) => panic!("link failed: {:?}", errors),
    }
}

pub fn boot(link: &mut Link, data: &[Word]) -> Runtime {
    let mut runtime = Runtime::load(&program(link), data, &small()).unwrap();
    runtime.start(0, &[]).unwrap();
    runtime
}

pub fn exec(link: &mut Link) -> Result<Word, Error> {
    exec_n(link, 100_000)
}

/// Runs with small segments, giving up after `cycles` instructions.
pub fn exec_n(link: &mut Link, cycles: usize) -> Result<Word, Error> {
    let mut runtime = boot(link, &[]);
    match runtime.execute(cycles)? {
        Event::Exited(status) => Ok(status),
        Event::Running => panic!("{} execution cycles exceeded", cycles),
    }
}

pub fn step_until(runtime: &mut Runtime, pc: Address) {
    for _ in 0..10_000 {
        if runtime.registers().pc == pc {
            return;
        }
        assert_eq!(runtime.step().unwrap(), Event::Running);
    }
    panic!("pc {} never reached", pc);
}
