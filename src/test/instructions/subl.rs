use super::*;

#[test]
fn plain_subtraction() {
    machine_runs! {
        [pack(0x27, 1, 2)],
        [GR1 = 0x0005, GR2 = 0x0003] => [GR1 = 0x0002],
        flags: (0, 0, 0)
    };
}

#[test]
fn borrow_sets_overflow() {
    machine_runs! {
        [pack(0x27, 1, 2)],
        [GR1 = 0x0000, GR2 = 0x0001] => [GR1 = 0xFFFF],
        flags: (1, 1, 0)
    };
}
