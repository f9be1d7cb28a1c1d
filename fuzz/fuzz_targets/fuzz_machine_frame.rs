//! Fuzz target for whole machine frames.
//!
//! Runs a random program under random breakpoints and stepping modes and
//! checks that a frame either completes its tact budget or stops early with
//! a termination reason.

#![no_main]

use arbitrary::Arbitrary;
use lib6510::{
    BreakpointInfo, DebugStepMode, FlatMemory, Machine, MachineConfig, MemoryBus, NoHooks,
    TerminationReason,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum FuzzMode {
    NoDebug,
    StopAtBreakpoint,
    StepInto,
    StepOver,
    StepOut,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    program: [u8; 64],
    breakpoints: Vec<u16>,
    write_watches: Vec<u16>,
    mode: FuzzMode,
    multiplier: u8,
    frames: u8,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();
    memory.load(0xFFFA, &[0x00, 0x80, 0x00, 0x80, 0x00, 0x80]);
    memory.load(0x8000, &input.program);

    let config = MachineConfig {
        tacts_in_frame: 400,
        clock_multiplier: input.multiplier % 4 + 1,
        ..MachineConfig::default()
    };
    let Ok(mut machine) = Machine::with_config(memory, NoHooks, config) else {
        return;
    };

    for &address in input.breakpoints.iter().take(8) {
        let _ = machine.add_breakpoint(BreakpointInfo::exec(address));
    }
    for &address in input.write_watches.iter().take(8) {
        let _ = machine.add_breakpoint(BreakpointInfo::memory_write(address));
    }
    machine.context_mut().debug_step_mode = match input.mode {
        FuzzMode::NoDebug => DebugStepMode::NoDebug,
        FuzzMode::StopAtBreakpoint => DebugStepMode::StopAtBreakpoint,
        FuzzMode::StepInto => DebugStepMode::StepInto,
        FuzzMode::StepOver => DebugStepMode::StepOver,
        FuzzMode::StepOut => DebugStepMode::StepOut,
    };

    for _ in 0..(input.frames % 4 + 1) {
        let start = machine.cpu().tacts();
        let reason = machine.execute_machine_frame();
        assert!(machine.cpu().tacts() >= start);
        if reason == TerminationReason::Normal {
            assert!(machine.frame_completed());
        }
    }
});
