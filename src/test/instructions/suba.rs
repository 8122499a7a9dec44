use super::*;

#[test]
fn negative_result() {
    machine_runs! {
        [pack(0x25, 1, 2)],
        [GR1 = 0x0001, GR2 = 0x0002] => [GR1 = 0xFFFF],
        flags: (0, 1, 0)
    };
}

#[test]
fn overflow_at_the_negative_edge() {
    machine_runs! {
        [pack(0x25, 1, 2)],
        [GR1 = 0x8000, GR2 = 0x0001] => [GR1 = 0x7FFF],
        flags: (1, 0, 0)
    };
}
