use super::*;

#[test]
fn plain_addition() {
    machine_runs! {
        [pack(0x26, 1, 2)],
        [GR1 = 0x0002, GR2 = 0x0003] => [GR1 = 0x0005],
        flags: (0, 0, 0)
    };
}

#[test]
fn carry_out_of_bit_15() {
    machine_runs! {
        [pack(0x26, 1, 2)],
        [GR1 = 0xFFFF, GR2 = 0x0001] => [GR1 = 0x0000],
        flags: (1, 0, 1)
    };
}
