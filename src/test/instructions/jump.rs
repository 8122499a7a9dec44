use super::*;

#[test]
fn unconditional() {
    let mut machine = loaded(&[pack(0x64, 0, 0), 0x0010]);
    step(&mut machine);
    assert_eq!(machine.pr(), 0x0010);
}

#[test]
fn indexed() {
    let mut machine = loaded(&[pack(0x64, 0, 3), 0x0010]);
    machine.set_gr(3, 0x0008);
    step(&mut machine);
    assert_eq!(machine.pr(), 0x0018);
}
