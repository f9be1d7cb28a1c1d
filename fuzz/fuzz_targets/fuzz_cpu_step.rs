//! Fuzz target for CPU step execution.
//!
//! Arbitrary register state and memory contents, then one instruction with
//! optional stall, snooze and interrupt lines. Checks the tact accounting
//! rather than just looking for panics.

#![no_main]

use arbitrary::Arbitrary;
use lib6510::{FlatMemory, MemoryBus, CPU, OPCODE_TABLE};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    sp: u8,
    status: u8,
}

#[derive(Debug, Arbitrary)]
struct FuzzLines {
    nmi: bool,
    irq: bool,
    snooze: bool,
    /// Stall with this watchdog limit
    stall: Option<u8>,
}

#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Bytes at the PC location (instruction + operands)
    instruction_bytes: [u8; 3],
    zero_page: [u8; 256],
    stack_page: [u8; 256],
    main_memory: [u8; 256],
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    lines: FuzzLines,
    memory: FuzzMemory,
}

fuzz_target!(|input: FuzzInput| {
    let mut memory = FlatMemory::new();
    memory.load(0xFFFA, &[0x00, 0xA0, 0x00, 0x80, 0x00, 0x90]);
    memory.load(0x8000, &input.memory.instruction_bytes);
    memory.load(0x0000, &input.memory.zero_page);
    memory.load(0x0100, &input.memory.stack_page);
    memory.load(0x4000, &input.memory.main_memory);

    let mut cpu = CPU::new(memory);
    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp);
    cpu.set_status(input.cpu_state.status);

    if input.lines.nmi {
        cpu.request_nmi();
    }
    if input.lines.irq {
        cpu.request_irq();
    }
    let mut stall_budget = 0;
    if let Some(limit) = input.lines.stall {
        stall_budget = u64::from(limit.max(1));
        cpu.set_stall_watchdog_tacts(stall_budget);
        cpu.stall_cpu();
    }
    if input.lines.snooze {
        cpu.snooze();
    }

    let before = cpu.tacts();
    let spent = cpu.step();

    assert_eq!(cpu.tacts() - before, spent);
    assert!(cpu.status() & 0x20 != 0);
    if input.lines.snooze {
        assert_eq!(spent, 4);
    } else if !input.lines.nmi && !input.lines.irq {
        let metadata = &OPCODE_TABLE[input.memory.instruction_bytes[0] as usize];
        let base = u64::from(metadata.base_cycles);
        assert!(spent >= base + stall_budget);
        assert!(spent <= base + 2 + stall_budget);
    }
});
