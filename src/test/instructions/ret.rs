use super::*;

#[test]
fn terminates_on_the_empty_stack() {
    machine_stops! {
        [pack(0x81, 0, 0)],
        [] => [],
        StepResult::Halted
    };
}
