use super::*;

#[test]
fn sign_extends() {
    machine_runs! {
        [pack(0x51, 1, 0), 0x0001],
        [GR1 = 0x8000] => [GR1 = 0xC000],
        flags: (0, 1, 0)
    };
}

#[test]
fn flag_is_the_last_bit_shifted_off() {
    machine_runs! {
        [pack(0x51, 1, 0), 0x0001],
        [GR1 = 0x0003] => [GR1 = 0x0001],
        flags: (1, 0, 0)
    };
}
