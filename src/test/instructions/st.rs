use super::*;

#[test]
fn stores_through_the_index_register() {
    let mut machine = loaded(&[pack(0x11, 1, 2), 0x0010]);
    machine.set_gr(1, 0xBEEF);
    machine.set_gr(2, 0x0005);
    assert_eq!(step(&mut machine), StepResult::Continue);
    assert_eq!(machine.memory().get(0x0015), 0xBEEF);
    assert_eq!(machine.pr(), 2);
}

#[test]
fn leaves_the_flags() {
    let mut machine = loaded(&[pack(0x11, 1, 0), 0x0010]);
    machine.set_flags(true, true, true);
    step(&mut machine);
    assert_eq!(machine.flags(), (true, true, true));
}
