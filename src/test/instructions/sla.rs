use super::*;

#[test]
fn shifts_under_the_sign_bit() {
    // The second shift pushes out the bit that started at position 13.
    machine_runs! {
        [pack(0x50, 1, 0), 0x0002],
        [GR1 = 0xA001] => [GR1 = 0x8004],
        flags: (1, 1, 0)
    };
}

#[test]
fn keeps_a_positive_sign() {
    machine_runs! {
        [pack(0x50, 1, 0), 0x0001],
        [GR1 = 0x0001] => [GR1 = 0x0002],
        flags: (0, 0, 0)
    };
}
