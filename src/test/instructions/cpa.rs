use super::*;

#[test]
fn equal_sets_zero() {
    machine_runs! {
        [pack(0x44, 1, 2)],
        [GR1 = 0x1234, GR2 = 0x1234] => [],
        flags: (0, 0, 1)
    };
}

#[test]
fn wraps_the_difference() {
    // -32768 compared against 1: the true difference -32769 wraps to
    // 0x7FFF, so SF stays clear. OF is untouched.
    let mut machine = loaded(&[pack(0x44, 1, 2)]);
    machine.set_flags(true, false, false);
    machine.set_gr(1, 0x8000);
    machine.set_gr(2, 0x0001);
    step(&mut machine);
    assert_eq!(machine.gr(1), 0x8000);
    assert_eq!(machine.flags(), (true, false, false));
}

#[test]
fn smaller_value_sets_sign() {
    machine_runs! {
        [pack(0x44, 1, 2)],
        [GR1 = 0x0001, GR2 = 0x0002] => [],
        flags: (0, 1, 0)
    };
}
