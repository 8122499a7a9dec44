use super::*;

#[test]
fn memory_form() {
    machine_runs! {
        [pack(0x32, 1, 0), 0x0003, 0x0000, 0xFFFF],
        [GR1 = 0x0F0F] => [GR1 = 0xF0F0],
        flags: (0, 1, 0)
    };
}

#[test]
fn clearing_a_register_sets_zero() {
    machine_runs! {
        [pack(0x36, 1, 1)],
        [GR1 = 0x1234] => [GR1 = 0x0000],
        flags: (0, 0, 1)
    };
}

#[test]
fn clears_overflow() {
    let mut machine = loaded(&[pack(0x36, 1, 2)]);
    machine.set_flags(true, false, false);
    machine.set_gr(1, 0x0001);
    step(&mut machine);
    assert_eq!(machine.flags(), (false, false, false));
}
