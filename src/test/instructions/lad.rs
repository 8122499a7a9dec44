use super::*;

#[test]
fn loads_the_address_itself() {
    machine_runs! {
        [pack(0x12, 3, 0), 0x1234],
        [] => [GR3 = 0x1234]
    };
}

#[test]
fn indexed() {
    machine_runs! {
        [pack(0x12, 1, 2), 0x0008],
        [GR2 = 0x0002] => [GR1 = 0x000A]
    };
}

#[test]
fn leaves_the_flags() {
    let mut machine = loaded(&[pack(0x12, 3, 0), 0x1234]);
    machine.set_flags(true, true, true);
    assert_eq!(step(&mut machine), StepResult::Continue);
    assert_eq!(machine.gr(3), 0x1234);
    assert_eq!(machine.flags(), (true, true, true));
}
