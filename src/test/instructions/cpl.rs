use super::*;

#[test]
fn clamps_the_difference() {
    // Unsigned 0 - 0xFFFF = -65535, clamped to -32768 before the flags.
    machine_runs! {
        [pack(0x45, 1, 2)],
        [GR1 = 0x0000, GR2 = 0xFFFF] => [],
        flags: (0, 1, 0)
    };
}

#[test]
fn compares_unsigned() {
    // 0xFFFF > 1 as unsigned values, so the difference is positive.
    machine_runs! {
        [pack(0x45, 1, 2)],
        [GR1 = 0xFFFF, GR2 = 0x0001] => [],
        flags: (0, 0, 0)
    };
}

#[test]
fn equal_sets_zero() {
    machine_runs! {
        [pack(0x45, 1, 2)],
        [GR1 = 0x8000, GR2 = 0x8000] => [],
        flags: (0, 0, 1)
    };
}
