use super::*;

#[test]
fn flag_is_the_bit_out_of_position_15() {
    machine_runs! {
        [pack(0x52, 1, 0), 0x0001],
        [GR1 = 0x8000] => [GR1 = 0x0000],
        flags: (1, 0, 1)
    };
}

#[test]
fn shifts_into_the_sign_bit() {
    machine_runs! {
        [pack(0x52, 1, 0), 0x0001],
        [GR1 = 0x4000] => [GR1 = 0x8000],
        flags: (0, 1, 0)
    };
}
