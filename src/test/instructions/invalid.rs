use super::*;

#[test]
fn unknown_opcodes_refuse_to_dispatch() {
    machine_stops! {
        [0x1342],
        [] => [],
        StepResult::Trap(Trap::UndefinedInstruction {
            addr: 0,
            word: 0x1342,
        })
    };
}

#[test]
fn register_nibbles_above_seven() {
    machine_stops! {
        [0x1088],
        [] => [],
        StepResult::Trap(Trap::InvalidRegister {
            addr: 0,
            gr: 8,
            xr: 8,
        })
    };
}
