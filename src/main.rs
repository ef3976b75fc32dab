//! # xc
//!
//! Single-step monitor for the xc virtual machine.
//!

mod term;

fn main() {
    env_logger::init();
    term::main();
}
