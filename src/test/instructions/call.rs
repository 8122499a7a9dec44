use super::*;

#[test]
fn links_and_returns() {
    // CALL 4; RET at 4 returns to the NOP after the CALL.
    let image = [
        pack(0x80, 0, 0),
        0x0004,
        pack(0x00, 0, 0),
        0x0000,
        pack(0x81, 0, 0),
    ];
    let mut machine = loaded(&image);
    assert_eq!(step(&mut machine), StepResult::Continue);
    assert_eq!(machine.pr(), 0x0004);
    assert_eq!(machine.memory().get(0xFFFE), 0x0002);
    assert_eq!(step(&mut machine), StepResult::Continue);
    assert_eq!(machine.pr(), 0x0002);
    assert_eq!(machine.sp(), 0xFFFF);
}
