use super::*;

#[test]
fn advances_one_word() {
    let mut machine = loaded(&[pack(0x00, 0, 0)]);
    assert_eq!(step(&mut machine), StepResult::Continue);
    assert_eq!(machine.pr(), 1);
}

#[test]
fn touches_nothing() {
    machine_runs! {
        [pack(0x00, 0, 0)],
        [GR3 = 0x1234] => []
    };
}
