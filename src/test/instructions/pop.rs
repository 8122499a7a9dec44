use super::*;

#[test]
fn restores_and_shrinks() {
    let mut machine = loaded(&[pack(0x70, 0, 2), 0x0000, pack(0x71, 5, 0)]);
    machine.set_gr(2, 0x1234);
    step(&mut machine);
    step(&mut machine);
    assert_eq!(machine.gr(5), 0x1234);
    assert_eq!(machine.sp(), 0xFFFF);
    assert_eq!(machine.pr(), 3);
}
