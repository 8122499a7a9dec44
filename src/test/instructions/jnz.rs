use super::*;

#[test]
fn taken_when_zero_is_clear() {
    let mut machine = loaded(&[pack(0x62, 0, 0), 0x0050]);
    step(&mut machine);
    assert_eq!(machine.pr(), 0x0050);
}

#[test]
fn falls_through_on_zero() {
    let mut machine = loaded(&[pack(0x62, 0, 0), 0x0050]);
    machine.set_flags(false, false, true);
    step(&mut machine);
    assert_eq!(machine.pr(), 0x0002);
}
