use super::*;

#[test]
fn follows_the_overflow_flag() {
    let mut machine = loaded(&[pack(0x66, 0, 0), 0x0040]);
    machine.set_flags(true, false, false);
    step(&mut machine);
    assert_eq!(machine.pr(), 0x0040);
}

#[test]
fn falls_through_otherwise() {
    let mut machine = loaded(&[pack(0x66, 0, 0), 0x0040]);
    step(&mut machine);
    assert_eq!(machine.pr(), 0x0002);
}
