use super::*;
use crate::mach::Opcode::*;

#[test]
fn test_frame_balance() {
    for &n in &[0, 1, 5, 20] {
        let mut link = Link::new();
        link.push_with(Imm, 7)
            .push(Push)
            .push_symbol(Call, "f")
            .label("back")
            .push_with(Adj, 1)
            .push(Push)
            .push(Exit);
        link.label("f")
            .push_with(Ent, n)
            .push_with(Lea, 2)
            .push(Li)
            .push(Lev);
        let f = link.address_of("f").unwrap();
        let back = link.address_of("back").unwrap();
        let mut r = boot(&mut link);

        step_until(&mut r, f);
        let before = r.registers().sp;
        r.step().unwrap();
        assert_eq!(r.registers().bp, before - 1);
        assert_eq!(r.registers().sp, before - 1 - n as usize);

        step_until(&mut r, back);
        // LEV put SP back where ENT found it, then took the return address.
        assert_eq!(r.registers().sp, before + 1);
        assert_eq!(r.registers().bp, r.memory().stack().origin());
        assert_eq!(r.registers().ax, 7);
        assert_eq!(r.execute(10).unwrap(), Event::Exited(7));
    }
}

#[test]
fn test_call_ret_resumes_after_operand() {
    let mut link = Link::new();
    link.push_symbol(Call, "g")
        .push(Push)
        .push(Exit)
        .label("g")
        .push_with(Imm, 42)
        .push(Ret);
    let mut r = boot(&mut link);
    let sp = r.registers().sp;
    r.step().unwrap();
    assert_eq!(r.registers().pc, 4);
    assert_eq!(r.registers().sp, sp - 1);
    assert_eq!(r.memory().stack().peek(sp - 1).unwrap(), 2);
    r.step().unwrap();
    r.step().unwrap();
    assert_eq!(r.registers().pc, 2);
    assert_eq!(r.registers().sp, sp);
    assert_eq!(r.execute(10).unwrap(), Event::Exited(42));
}

#[test]
fn test_locals() {
    let mut link = Link::new();
    link.push_symbol(Call, "f").push(Push).push(Exit);
    link.label("f")
        .push_with(Ent, 2)
        .push_with(Lea, -1)
        .push(Push)
        .push_with(Imm, 5)
        .push(Si)
        .push_with(Lea, -2)
        .push(Push)
        .push_with(Imm, 6)
        .push(Si)
        .push_with(Lea, -1)
        .push(Li)
        .push(Push)
        .push_with(Lea, -2)
        .push(Li)
        .push(Mul)
        .push(Lev);
    assert_eq!(run_link(&mut link).unwrap(), 30);
}

#[test]
fn test_saved_bp_chain() {
    let mut link = Link::new();
    link.label("main")
        .push_with(Ent, 0)
        .push_symbol(Call, "f")
        .push(Lev);
    link.label("f")
        .push_with(Ent, 1)
        .push_with(Lea, 0)
        .push(Li)
        .push(Lev);
    // main's frame base sits just below argc, argv and the return address.
    let main_bp = config().stack - 4;
    assert_eq!(
        run_link(&mut link).unwrap(),
        Segment::Stack.encode(main_bp)
    );
}

#[test]
fn test_adj_drops_arguments() {
    let mut link = Link::new();
    link.push_with(Imm, 10)
        .push(Push)
        .push_with(Imm, 20)
        .push(Push)
        .push_with(Imm, 3)
        .push(Push)
        .push_symbol(Call, "f")
        .push_with(Adj, 3)
        .label("after")
        .push(Push)
        .push(Exit);
    link.label("f")
        .push_with(Ent, 0)
        .push_with(Lea, 4)
        .push(Li)
        .push(Push)
        .push_with(Lea, 2)
        .push(Li)
        .push(Sub)
        .push(Lev);
    let after = link.address_of("after").unwrap();
    let mut r = boot(&mut link);
    let sp = r.registers().sp;
    step_until(&mut r, after);
    assert_eq!(r.registers().sp, sp);
    assert_eq!(r.registers().ax, 7);
    assert_eq!(r.execute(10).unwrap(), Event::Exited(7));
}
