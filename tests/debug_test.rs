//! Tests for breakpoints and watchpoints through the machine.
//!
//! Tests cover:
//! - Breakpoint validation against the memory's partition layout
//! - Partition-qualified address parsing
//! - Partitioned execution breakpoints on banked memory
//! - Memory and I/O watchpoints stopping a frame
//! - Hit-counted breakpoints and enabling/disabling
//! - Source-line breakpoints resolved to addresses

use lib6510::{
    BankedMemory, BreakpointError, BreakpointInfo, BreakpointKey, BreakpointKind, DebugStepMode,
    FlatMemory, Machine, MemoryBus, NoHooks, Partition, TerminationReason,
};

/// Helper function to create a debug-ready machine with the program at 0x8000
fn setup_machine(program: &[u8]) -> Machine<FlatMemory, NoHooks> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    memory.load(0x8000, program);
    let mut machine = Machine::new(memory, NoHooks);
    machine.context_mut().debug_step_mode = DebugStepMode::StopAtBreakpoint;
    machine
}

/// Banked machine: 8 RAM banks, bank select at $0001 pages RAM into $C000.
///
/// $8000: LDA #$05; STA $01; JMP $C000, with NOPs in RAM bank 5.
fn setup_banked_machine() -> Machine<BankedMemory, NoHooks> {
    let mut memory = BankedMemory::new(0, 8, 0x0001);
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    for (i, byte) in [0xA9, 0x05, 0x85, 0x01, 0x4C, 0x00, 0xC0].into_iter().enumerate() {
        memory.write(0x8000 + i as u16, byte);
    }
    for offset in 0..0x100 {
        memory.write_partition(Partition::Ram(5), offset, 0xEA);
    }
    let mut machine = Machine::new(memory, NoHooks);
    machine.context_mut().debug_step_mode = DebugStepMode::StopAtBreakpoint;
    machine
}

// ========== Validation ==========

#[test]
fn test_partitioned_breakpoint_rejected_on_flat_memory() {
    let mut machine = setup_machine(&[0xEA]);

    let result = machine.add_breakpoint(BreakpointInfo::exec(0x8000).with_partition(Partition::Ram(1)));

    assert_eq!(result, Err(BreakpointError::PartitionsNotSupported));
    assert!(machine.debug_support().unwrap().list_breakpoints().is_empty());
}

#[test]
fn test_parse_exec_breakpoint_on_flat_memory() {
    let machine = setup_machine(&[0xEA]);

    let bp = machine.parse_exec_breakpoint("$C000").unwrap();
    assert_eq!(bp.address, Some(0xC000));
    assert_eq!(bp.partition, None);

    assert_eq!(
        machine.parse_exec_breakpoint("R0:$C000"),
        Err(BreakpointError::PartitionsNotSupported)
    );
    assert!(matches!(
        machine.parse_exec_breakpoint("$10000"),
        Err(BreakpointError::AddressOutOfRange(0x10000))
    ));
}

#[test]
fn test_parse_exec_breakpoint_on_banked_memory() {
    let machine = setup_banked_machine();

    let bp = machine.parse_exec_breakpoint("5:$C000").unwrap();
    assert_eq!(bp.partition, Some(Partition::Ram(5)));

    assert_eq!(
        machine.parse_exec_breakpoint("B9:$C000"),
        Err(BreakpointError::RamBankOutOfRange { bank: 9, count: 8 })
    );
    assert_eq!(
        machine.parse_exec_breakpoint("R0:$C000"),
        Err(BreakpointError::RomBankOutOfRange { bank: 0, count: 0 })
    );
    assert!(matches!(
        machine.parse_exec_breakpoint("Q1:$C000"),
        Err(BreakpointError::InvalidPartitionLabel(_))
    ));
}

#[test]
fn test_rom_only_model_rejects_ram_partition() {
    let mut machine = Machine::new(BankedMemory::new(2, 0, 0xDE00), NoHooks);

    assert_eq!(
        machine.add_breakpoint(BreakpointInfo::exec(0x8000).with_partition(Partition::Ram(0))),
        Err(BreakpointError::RamBankOutOfRange { bank: 0, count: 0 })
    );
    assert_eq!(
        machine.add_breakpoint(BreakpointInfo::exec(0xC000).with_partition(Partition::Rom(1))),
        Ok(true)
    );
}

#[test]
fn test_partitioned_io_watchpoint_rejected() {
    let mut machine = setup_banked_machine();
    assert_eq!(
        machine.add_breakpoint(BreakpointInfo::io_write(0x0001, 0xFFFF).with_partition(Partition::Ram(0))),
        Err(BreakpointError::PartitionedIoBreakpoint)
    );
}

// ========== Partitioned Breakpoints ==========

#[test]
fn test_partitioned_breakpoint_stops_in_paged_bank() {
    let mut machine = setup_banked_machine();
    machine
        .add_breakpoint(BreakpointInfo::exec(0xC000).with_partition(Partition::Ram(5)))
        .unwrap();

    assert_eq!(machine.execute_machine_frame(), TerminationReason::DebugEvent);
    assert_eq!(machine.cpu().pc(), 0xC000);
    assert_eq!(machine.cpu().memory().partition_of(0xC000), Some(Partition::Ram(5)));
}

#[test]
fn test_partitioned_breakpoint_ignores_other_bank() {
    let mut machine = setup_banked_machine();
    machine
        .add_breakpoint(BreakpointInfo::exec(0xC000).with_partition(Partition::Ram(4)))
        .unwrap();

    assert_eq!(machine.execute_machine_frame(), TerminationReason::Normal);
}

// ========== Watchpoints ==========

#[test]
fn test_io_write_watchpoint() {
    let mut machine = setup_banked_machine();
    machine
        .add_breakpoint(BreakpointInfo::io_write(0x0001, 0xFFFF))
        .unwrap();

    assert_eq!(machine.execute_machine_frame(), TerminationReason::DebugEvent);
    // Stopped right after STA $01
    assert_eq!(machine.cpu().pc(), 0x8004);
    assert_eq!(machine.cpu().last_io_write_port(), Some(0x0001));
}

#[test]
fn test_memory_write_watchpoint() {
    // LDA #$01; STA $0300; NOP
    let mut machine = setup_machine(&[0xA9, 0x01, 0x8D, 0x00, 0x03, 0xEA]);
    machine.add_breakpoint(BreakpointInfo::memory_write(0x0300)).unwrap();

    assert_eq!(machine.execute_machine_frame(), TerminationReason::DebugEvent);
    assert_eq!(machine.cpu().pc(), 0x8005);
    assert_eq!(machine.cpu().memory().read(0x0300), 0x01);
}

#[test]
fn test_memory_read_watchpoint_sees_operand_fetch() {
    // LDA #$01; NOP
    let mut machine = setup_machine(&[0xA9, 0x01, 0xEA]);
    machine.add_breakpoint(BreakpointInfo::memory_read(0x8001)).unwrap();

    assert_eq!(machine.execute_machine_frame(), TerminationReason::DebugEvent);
    assert_eq!(machine.cpu().pc(), 0x8002);
}

#[test]
fn test_watchpoints_ignored_outside_debug_mode() {
    let mut machine = setup_machine(&[0xA9, 0x01, 0x8D, 0x00, 0x03, 0x4C, 0x00, 0x80]);
    machine.add_breakpoint(BreakpointInfo::memory_write(0x0300)).unwrap();
    machine.context_mut().debug_step_mode = DebugStepMode::NoDebug;

    assert_eq!(machine.execute_machine_frame(), TerminationReason::Normal);
}

// ========== Enable, Disable, Hit Count ==========

#[test]
fn test_hit_count_breakpoint() {
    // INX; JMP $8000
    let mut machine = setup_machine(&[0xE8, 0x4C, 0x00, 0x80]);
    machine
        .add_breakpoint(BreakpointInfo::exec(0x8000).with_hit_target(3))
        .unwrap();

    assert_eq!(machine.execute_machine_frame(), TerminationReason::DebugEvent);
    // The check before the first instruction counts as the first hit
    assert_eq!(machine.cpu().x(), 2);
}

#[test]
fn test_disabled_breakpoint_does_not_stop() {
    let mut machine = setup_machine(&[0xE8, 0x4C, 0x00, 0x80]);
    let key = BreakpointKey::Address {
        address: 0x8001,
        partition: None,
    };
    machine.add_breakpoint(BreakpointInfo::exec(0x8001)).unwrap();
    machine.enable_breakpoint(&key, false).unwrap();

    assert_eq!(machine.execute_machine_frame(), TerminationReason::Normal);

    machine
        .enable_breakpoint_kind(&key, BreakpointKind::EXEC, true)
        .unwrap();
    assert_eq!(machine.execute_machine_frame(), TerminationReason::DebugEvent);
    assert_eq!(machine.cpu().pc(), 0x8001);
}

#[test]
fn test_unknown_breakpoint_errors() {
    let mut machine = setup_machine(&[0xEA]);
    let key = BreakpointKey::Address {
        address: 0x1234,
        partition: None,
    };

    assert_eq!(machine.remove_breakpoint(&key), Err(BreakpointError::UnknownBreakpoint));
    assert_eq!(
        machine.enable_breakpoint(&key, true),
        Err(BreakpointError::UnknownBreakpoint)
    );
}

#[test]
fn test_remove_breakpoint() {
    let mut machine = setup_machine(&[0xE8, 0x4C, 0x00, 0x80]);
    machine.add_breakpoint(BreakpointInfo::exec(0x8001)).unwrap();
    let key = BreakpointInfo::exec(0x8001).key();

    machine.remove_breakpoint(&key).unwrap();

    assert_eq!(machine.execute_machine_frame(), TerminationReason::Normal);
}

// ========== Source Breakpoints ==========

#[test]
fn test_source_breakpoint_stops_once_resolved() {
    let mut machine = setup_machine(&[0xE8, 0x4C, 0x00, 0x80]);
    machine
        .add_breakpoint(BreakpointInfo::source("loop.asm", 2))
        .unwrap();

    // Unresolved: nothing to stop at
    assert_eq!(machine.execute_machine_frame(), TerminationReason::Normal);

    machine
        .debug_support_mut()
        .unwrap()
        .resolve_source_breakpoints("loop.asm", |line| (line == 2).then_some(0x8001));

    assert_eq!(machine.execute_machine_frame(), TerminationReason::DebugEvent);
    assert_eq!(machine.cpu().pc(), 0x8001);
}
