use super::*;

#[test]
fn memory_form_sets_the_flags() {
    machine_runs! {
        [pack(0x10, 1, 0), 0x0003, 0x0000, 0x8000],
        [] => [GR1 = 0x8000],
        flags: (0, 1, 0)
    };
}

#[test]
fn register_form_and_the_zero_flag() {
    machine_runs! {
        [pack(0x14, 1, 2)],
        [GR1 = 42] => [GR1 = 0],
        flags: (0, 0, 1)
    };
}

#[test]
fn clears_overflow() {
    let mut machine = loaded(&[pack(0x14, 1, 2)]);
    machine.set_flags(true, false, false);
    machine.set_gr(2, 0x0001);
    assert_eq!(step(&mut machine), StepResult::Continue);
    assert_eq!(machine.flags(), (false, false, false));
    assert_eq!(machine.pr(), 1);
}
