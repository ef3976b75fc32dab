use super::*;

mod frame_test;

fn config() -> Config {
    Config::with_pool_size(64)
}

fn boot(link: &mut Link) -> Runtime {
    let program = link.link().unwrap();
    let mut runtime = Runtime::load(&program, &[], &config()).unwrap();
    runtime.start(0, &[]).unwrap();
    runtime
}

fn run_link(link: &mut Link) -> Result<Word> {
    let program = link.link().unwrap();
    run_with(&config(), &program, &[], 0, &[])
}

/// Steps until PC reaches `pc`, failing the test on errors or EXIT.
fn step_until(runtime: &mut Runtime, pc: Address) {
    for _ in 0..1000 {
        if runtime.registers().pc == pc {
            return;
        }
        assert_eq!(runtime.step().unwrap(), Event::Running);
    }
    panic!("pc {} never reached", pc);
}
