//! Tact-accuracy tests.
//!
//! Every bus access costs one tact, so these tests check that the access
//! pattern of each opcode adds up to the canonical cycle table:
//! - All 256 opcodes without page crossings
//! - The extra tact of indexed reads that cross a page
//! - Stores and read-modify-write instructions that never pay it
//! - Branch timing (not taken, taken, taken across a page)

use lib6510::{AddressingMode, FlatMemory, MemoryBus, Mnemonic, CPU, OPCODE_TABLE};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    CPU::new(memory)
}

// ========== Table Timings ==========

#[test]
fn test_every_non_branch_opcode_matches_table() {
    for (opcode, meta) in OPCODE_TABLE.iter().enumerate() {
        if meta.mnemonic.is_branch() {
            continue;
        }
        let mut cpu = setup_cpu();
        // Operand $2010 / zero page $10; X = Y = 0 so nothing crosses a page
        cpu.memory_mut().load(0x8000, &[opcode as u8, 0x10, 0x20]);

        let tacts = cpu.step();
        assert_eq!(
            tacts, meta.base_cycles as u64,
            "opcode 0x{:02X} ({} {:?})",
            opcode, meta.mnemonic, meta.addressing_mode
        );
    }
}

#[test]
fn test_page_cross_penalty_matches_table() {
    for (opcode, meta) in OPCODE_TABLE.iter().enumerate() {
        if !meta.addressing_mode.is_indexed() || meta.mnemonic.is_branch() {
            continue;
        }
        let mut cpu = setup_cpu();
        cpu.set_x(0x01);
        cpu.set_y(0x01);
        // Absolute base $20FF, or ($10) -> $20FF for (zp),Y
        cpu.memory_mut().load(0x8000, &[opcode as u8, 0xFF, 0x20]);
        if meta.addressing_mode == AddressingMode::IndirectY {
            cpu.memory_mut().load(0x8000, &[opcode as u8, 0x10]);
            cpu.memory_mut().load(0x0010, &[0xFF, 0x20]);
        }

        let expected = meta.base_cycles as u64 + meta.page_penalty as u64;
        assert_eq!(
            cpu.step(),
            expected,
            "opcode 0x{:02X} ({} {:?})",
            opcode,
            meta.mnemonic,
            meta.addressing_mode
        );
    }
}

#[test]
fn test_rmw_writes_twice() {
    let mut cpu = setup_cpu();
    // INC $0200
    cpu.memory_mut().load(0x8000, &[0xEE, 0x00, 0x02]);
    cpu.memory_mut().write(0x0200, 0x41);

    assert_eq!(cpu.step(), 6);
    assert_eq!(cpu.memory().read(0x0200), 0x42);
    // The dummy write is not recorded; only the final write is
    assert_eq!(cpu.last_memory_writes(), &[0x0200]);
}

// ========== Branch Timings ==========

#[test]
fn test_branch_not_taken() {
    let mut cpu = setup_cpu();
    // BNE +$10 with Z set
    cpu.memory_mut().load(0x8000, &[0xD0, 0x10]);
    cpu.set_flag_z(true);

    assert_eq!(cpu.step(), 2);
    assert_eq!(cpu.pc(), 0x8002);
}

#[test]
fn test_branch_taken_same_page() {
    let mut cpu = setup_cpu();
    cpu.memory_mut().load(0x8000, &[0xD0, 0x10]);
    cpu.set_flag_z(false);

    assert_eq!(cpu.step(), 3);
    assert_eq!(cpu.pc(), 0x8012);
}

#[test]
fn test_branch_taken_backward_across_page() {
    let mut cpu = setup_cpu();
    // BCC -4 from $8002 lands at $7FFE
    cpu.memory_mut().load(0x8000, &[0x90, 0xFC]);
    cpu.set_flag_c(false);

    assert_eq!(cpu.step(), 4);
    assert_eq!(cpu.pc(), 0x7FFE);
}

#[test]
fn test_every_branch_not_taken_costs_two() {
    for (opcode, meta) in OPCODE_TABLE.iter().enumerate() {
        if !meta.mnemonic.is_branch() {
            continue;
        }
        let mut cpu = setup_cpu();
        cpu.memory_mut().load(0x8000, &[opcode as u8, 0x10]);
        // Pick the flag value that makes the condition false
        let (flag_value, set): (bool, fn(&mut CPU<FlatMemory>, bool)) = match meta.mnemonic {
            Mnemonic::Bcc => (true, CPU::set_flag_c),
            Mnemonic::Bcs => (false, CPU::set_flag_c),
            Mnemonic::Bne => (true, CPU::set_flag_z),
            Mnemonic::Beq => (false, CPU::set_flag_z),
            Mnemonic::Bpl => (true, CPU::set_flag_n),
            Mnemonic::Bmi => (false, CPU::set_flag_n),
            Mnemonic::Bvc => (true, CPU::set_flag_v),
            _ => (false, CPU::set_flag_v),
        };
        set(&mut cpu, flag_value);

        assert_eq!(cpu.step(), meta.base_cycles as u64, "opcode 0x{:02X}", opcode);
        assert_eq!(cpu.pc(), 0x8002);
    }
}

// ========== Frame Counters ==========

#[test]
fn test_frame_counters_wrap() {
    let mut cpu = setup_cpu();
    cpu.set_tacts_in_frame(10);
    // NOP loop
    cpu.memory_mut().load(0x8000, &[0xEA; 16]);

    for _ in 0..6 {
        cpu.step();
    }
    assert_eq!(cpu.tacts(), 12);
    assert_eq!(cpu.frames(), 1);
    assert_eq!(cpu.frame_tacts(), 2);
}

#[test]
fn test_current_frame_tact_scales_with_multiplier() {
    let mut cpu = setup_cpu();
    cpu.set_tacts_in_frame(100);
    cpu.set_clock_multiplier(2);
    cpu.memory_mut().load(0x8000, &[0xEA; 16]);

    for _ in 0..5 {
        cpu.step();
    }
    assert_eq!(cpu.tacts_in_current_frame(), 200);
    assert_eq!(cpu.frame_tacts(), 10);
    assert_eq!(cpu.current_frame_tact(), 5);
}
