use super::*;

#[test]
fn follows_the_sign_flag() {
    let mut machine = loaded(&[pack(0x61, 0, 0), 0x0020]);
    machine.set_flags(false, true, false);
    step(&mut machine);
    assert_eq!(machine.pr(), 0x0020);
}

#[test]
fn falls_through_on_a_positive_result() {
    let mut machine = loaded(&[pack(0x61, 0, 0), 0x0020]);
    step(&mut machine);
    assert_eq!(machine.pr(), 0x0002);
}
