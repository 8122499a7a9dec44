use super::*;

#[test]
fn pushes_the_effective_address() {
    let mut machine = loaded(&[pack(0x70, 0, 2), 0x0001]);
    machine.set_gr(2, 0x0041);
    assert_eq!(step(&mut machine), StepResult::Continue);
    assert_eq!(machine.sp(), 0xFFFE);
    assert_eq!(machine.memory().get(0xFFFE), 0x0042);
    assert_eq!(machine.pr(), 2);
}
