use super::*;

#[test]
fn inserts_zeros() {
    machine_runs! {
        [pack(0x53, 1, 0), 0x0001],
        [GR1 = 0x8000] => [GR1 = 0x4000],
        flags: (0, 0, 0)
    };
}

#[test]
fn count_comes_from_the_effective_address() {
    machine_runs! {
        [pack(0x53, 1, 2), 0x0001],
        [GR1 = 0x00F0, GR2 = 0x0003] => [GR1 = 0x000F],
        flags: (0, 0, 0)
    };
}
