mod common;
use common::*;
use xc::mach::Opcode::*;
use xc::mach::{ErrorCode, Link};

/// int fib(int i) { if (i <= 1) return 1; return fib(i-1) + fib(i-2); }
fn fib(link: &mut Link) {
    link.label("fib")
        .push_with(Ent, 0)
        .push_with(Lea, 2)
        .push(Li)
        .push(Push)
        .push_with(Imm, 1)
        .push(Le)
        .push_symbol(Jz, "recurse")
        .push_with(Imm, 1)
        .push(Lev)
        .label("recurse")
        .push_with(Lea, 2)
        .push(Li)
        .push(Push)
        .push_with(Imm, 1)
        .push(Sub)
        .push(Push)
        .push_symbol(Call, "fib")
        .push_with(Adj, 1)
        .push(Push)
        .push_with(Lea, 2)
        .push(Li)
        .push(Push)
        .push_with(Imm, 2)
        .push(Sub)
        .push(Push)
        .push_symbol(Call, "fib")
        .push_with(Adj, 1)
        .push(Add)
        .push(Lev);
}

fn main_calling_fib(n: i64) -> Link {
    let mut link = Link::new();
    fib(&mut link);
    link.label("main")
        .push_with(Ent, 0)
        .push_with(Imm, n)
        .push(Push)
        .push_symbol(Call, "fib")
        .push_with(Adj, 1)
        .push(Lev);
    link.entry("main");
    link
}

#[test]
fn test_fibonacci() {
    let expected = [1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89];
    for (n, want) in expected.iter().enumerate() {
        let mut link = main_calling_fib(n as i64);
        assert_eq!(exec(&mut link).unwrap(), *want, "fib({})", n);
    }
}

#[test]
fn test_stack_is_balanced_after_call() {
    let mut link = main_calling_fib(6);
    let main = link.address_of("main").unwrap();
    let mut r = boot(&mut link, &[]);
    let sp = r.registers().sp;
    let bp = r.registers().bp;
    assert_eq!(r.registers().pc, main);
    // run to main's LEV
    let lev = main + 9;
    step_until(&mut r, lev);
    assert_eq!(r.registers().ax, 13);
    assert_eq!(r.registers().sp, r.registers().bp);
    r.step().unwrap();
    assert_eq!(r.registers().sp, sp + 1);
    assert_eq!(r.registers().bp, bp);
}

#[test]
fn test_runaway_recursion_overflows() {
    let mut link = Link::new();
    link.label("f")
        .push_with(Ent, 4)
        .push_symbol(Call, "f");
    let e = exec(&mut link).unwrap_err();
    assert_eq!(e.code(), ErrorCode::StackOverflow);
    assert!(e.pc().is_some());
}
