use super::*;

#[test]
fn register_form() {
    machine_runs! {
        [pack(0x35, 1, 2)],
        [GR1 = 0x00FF, GR2 = 0x0F0F] => [GR1 = 0x0FFF],
        flags: (0, 0, 0)
    };
}

#[test]
fn clears_overflow() {
    let mut machine = loaded(&[pack(0x35, 1, 2)]);
    machine.set_flags(true, false, false);
    machine.set_gr(2, 0x0001);
    step(&mut machine);
    assert_eq!(machine.flags(), (false, false, false));
}
