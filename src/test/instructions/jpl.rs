use super::*;

#[test]
fn requires_sign_and_zero_clear() {
    let mut machine = loaded(&[pack(0x65, 0, 0), 0x0030]);
    step(&mut machine);
    assert_eq!(machine.pr(), 0x0030);
}

#[test]
fn falls_through_on_zero() {
    let mut machine = loaded(&[pack(0x65, 0, 0), 0x0030]);
    machine.set_flags(false, false, true);
    step(&mut machine);
    assert_eq!(machine.pr(), 0x0002);
}

#[test]
fn falls_through_on_sign() {
    let mut machine = loaded(&[pack(0x65, 0, 0), 0x0030]);
    machine.set_flags(false, true, false);
    step(&mut machine);
    assert_eq!(machine.pr(), 0x0002);
}
