use super::*;

#[test]
fn taken_when_zero_is_set() {
    let mut machine = loaded(&[pack(0x63, 0, 0), 0x0010]);
    machine.set_flags(false, false, true);
    assert_eq!(step(&mut machine), StepResult::Continue);
    assert_eq!(machine.pr(), 0x0010);
}

#[test]
fn falls_through_otherwise() {
    let mut machine = loaded(&[pack(0x63, 0, 0), 0x0010]);
    step(&mut machine);
    assert_eq!(machine.pr(), 0x0002);
}
