use super::*;

#[test]
fn register_form() {
    machine_runs! {
        [pack(0x24, 1, 2)],
        [GR1 = 0x0010, GR2 = 0x0005] => [GR1 = 0x0015],
        flags: (0, 0, 0)
    };
}

#[test]
fn overflow_at_the_positive_edge() {
    machine_runs! {
        [pack(0x24, 1, 2)],
        [GR1 = 0x7FFF, GR2 = 0x0001] => [GR1 = 0x8000],
        flags: (1, 1, 0)
    };
}

#[test]
fn memory_form() {
    machine_runs! {
        [pack(0x20, 1, 0), 0x0003, 0x0000, 0x0007],
        [GR1 = 0x0001] => [GR1 = 0x0008],
        flags: (0, 0, 0)
    };
}

#[test]
fn negative_operands_wrap() {
    machine_runs! {
        [pack(0x24, 1, 2)],
        [GR1 = 0xFFFF, GR2 = 0x0001] => [GR1 = 0x0000],
        flags: (0, 0, 1)
    };
}
