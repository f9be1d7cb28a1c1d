//! Tests for documented instruction semantics.
//!
//! Tests cover:
//! - Logic and shift results with their Z/N/C flags
//! - BIT taking N and V from the operand
//! - Binary and decimal ADC/SBC
//! - Zero-page and pointer wraparound
//! - The indirect JMP page bug
//! - Stack behavior of PHP/PLP, JSR/RTS

use lib6510::{FlatMemory, MemoryBus, CPU};

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> CPU<FlatMemory> {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    CPU::new(memory)
}

// ========== Logic and Shifts ==========

#[test]
fn test_and_immediate_clears_upper_nibble() {
    let mut cpu = setup_cpu();
    // AND #$0F
    cpu.memory_mut().load(0x8000, &[0x29, 0x0F]);
    cpu.set_a(0x33);

    let tacts = cpu.step();

    assert_eq!(cpu.a(), 0x03);
    assert!(!cpu.flag_z());
    assert!(!cpu.flag_n());
    assert_eq!(tacts, 2);
    assert_eq!(cpu.pc(), 0x8002);
}

#[test]
fn test_lsr_accumulator_to_zero() {
    let mut cpu = setup_cpu();
    // LSR A
    cpu.memory_mut().load(0x8000, &[0x4A]);
    cpu.set_a(0x01);

    let tacts = cpu.step();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
    assert_eq!(tacts, 2);
}

#[test]
fn test_ror_memory_rotates_carry_in() {
    let mut cpu = setup_cpu();
    // ROR $40
    cpu.memory_mut().load(0x8000, &[0x66, 0x40]);
    cpu.memory_mut().write(0x0040, 0x02);
    cpu.set_flag_c(true);

    assert_eq!(cpu.step(), 5);
    assert_eq!(cpu.memory().read(0x0040), 0x81);
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
}

#[test]
fn test_bit_takes_n_and_v_from_operand() {
    let mut cpu = setup_cpu();
    // BIT $40
    cpu.memory_mut().load(0x8000, &[0x24, 0x40]);
    cpu.memory_mut().write(0x0040, 0xC0);
    cpu.set_a(0x01);

    cpu.step();

    assert!(cpu.flag_z()); // A AND M == 0
    assert!(cpu.flag_n());
    assert!(cpu.flag_v());
    assert_eq!(cpu.a(), 0x01);
}

#[test]
fn test_cmp_equal() {
    let mut cpu = setup_cpu();
    // CMP #$40
    cpu.memory_mut().load(0x8000, &[0xC9, 0x40]);
    cpu.set_a(0x40);

    cpu.step();

    assert!(cpu.flag_z());
    assert!(cpu.flag_c());
    assert!(!cpu.flag_n());
}

// ========== Arithmetic ==========

#[test]
fn test_adc_signed_overflow() {
    let mut cpu = setup_cpu();
    // ADC #$50
    cpu.memory_mut().load(0x8000, &[0x69, 0x50]);
    cpu.set_a(0x50);

    cpu.step();

    assert_eq!(cpu.a(), 0xA0);
    assert!(cpu.flag_v());
    assert!(cpu.flag_n());
    assert!(!cpu.flag_c());
}

#[test]
fn test_sbc_signed_overflow() {
    let mut cpu = setup_cpu();
    // SBC #$B0
    cpu.memory_mut().load(0x8000, &[0xE9, 0xB0]);
    cpu.set_a(0x50);
    cpu.set_flag_c(true);

    cpu.step();

    assert_eq!(cpu.a(), 0xA0);
    assert!(cpu.flag_v());
    assert!(!cpu.flag_c());
}

#[test]
fn test_adc_decimal() {
    let mut cpu = setup_cpu();
    // SED; ADC #$27
    cpu.memory_mut().load(0x8000, &[0xF8, 0x69, 0x27]);
    cpu.set_a(0x15);

    cpu.step();
    cpu.step();

    assert_eq!(cpu.a(), 0x42);
    assert!(!cpu.flag_c());
}

#[test]
fn test_adc_decimal_carry_out() {
    let mut cpu = setup_cpu();
    // SED; ADC #$01
    cpu.memory_mut().load(0x8000, &[0xF8, 0x69, 0x01]);
    cpu.set_a(0x99);

    cpu.step();
    cpu.step();

    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    // NMOS: Z follows the binary sum ($9A), not the BCD result
    assert!(!cpu.flag_z());
}

#[test]
fn test_sbc_decimal() {
    let mut cpu = setup_cpu();
    // SED; SBC #$15
    cpu.memory_mut().load(0x8000, &[0xF8, 0xE9, 0x15]);
    cpu.set_a(0x42);
    cpu.set_flag_c(true);

    cpu.step();
    cpu.step();

    assert_eq!(cpu.a(), 0x27);
    assert!(cpu.flag_c());
}

#[test]
fn test_sbc_decimal_borrow() {
    let mut cpu = setup_cpu();
    // SED; SBC #$01
    cpu.memory_mut().load(0x8000, &[0xF8, 0xE9, 0x01]);
    cpu.set_a(0x00);
    cpu.set_flag_c(true);

    cpu.step();
    cpu.step();

    assert_eq!(cpu.a(), 0x99);
    assert!(!cpu.flag_c());
}

// ========== Wraparound ==========

#[test]
fn test_zero_page_x_wraps() {
    let mut cpu = setup_cpu();
    // LDA $FF,X
    cpu.memory_mut().load(0x8000, &[0xB5, 0xFF]);
    cpu.memory_mut().write(0x0001, 0x77);
    cpu.memory_mut().write(0x0101, 0x11);
    cpu.set_x(0x02);

    assert_eq!(cpu.step(), 4);
    assert_eq!(cpu.a(), 0x77);
}

#[test]
fn test_indirect_x_pointer_wraps_in_zero_page() {
    let mut cpu = setup_cpu();
    // LDA ($FE,X) with X=1: pointer at $FF/$00
    cpu.memory_mut().load(0x8000, &[0xA1, 0xFE]);
    cpu.memory_mut().write(0x00FF, 0x34);
    cpu.memory_mut().write(0x0000, 0x12);
    cpu.memory_mut().write(0x1234, 0x5A);
    cpu.set_x(0x01);

    cpu.step();

    assert_eq!(cpu.a(), 0x5A);
}

#[test]
fn test_indirect_y_pointer_wraps_in_zero_page() {
    let mut cpu = setup_cpu();
    // LDA ($FF),Y
    cpu.memory_mut().load(0x8000, &[0xB1, 0xFF]);
    cpu.memory_mut().write(0x00FF, 0x00);
    cpu.memory_mut().write(0x0000, 0x30);
    cpu.memory_mut().write(0x3005, 0xA5);
    cpu.set_y(0x05);

    assert_eq!(cpu.step(), 5);
    assert_eq!(cpu.a(), 0xA5);
    assert!(cpu.flag_n());
}

#[test]
fn test_absolute_x_wraps_address_space() {
    let mut cpu = setup_cpu();
    // LDA $FFFF,X
    cpu.memory_mut().load(0x8000, &[0xBD, 0xFF, 0xFF]);
    cpu.memory_mut().write(0x0001, 0x42);
    cpu.set_x(0x02);

    assert_eq!(cpu.step(), 5);
    assert_eq!(cpu.a(), 0x42);
}

#[test]
fn test_jmp_indirect_page_bug() {
    let mut cpu = setup_cpu();
    // JMP ($10FF)
    cpu.memory_mut().load(0x8000, &[0x6C, 0xFF, 0x10]);
    cpu.memory_mut().write(0x10FF, 0x34);
    cpu.memory_mut().write(0x1000, 0x12);
    cpu.memory_mut().write(0x1100, 0x56);

    cpu.step();

    assert_eq!(cpu.pc(), 0x1234);
}

// ========== Stack ==========

#[test]
fn test_php_pushes_break_and_bit_five() {
    let mut cpu = setup_cpu();
    // PHP
    cpu.memory_mut().load(0x8000, &[0x08]);
    cpu.set_status(0x00);

    cpu.step();

    assert_eq!(cpu.memory().read(0x01FD), 0x30);
    assert_eq!(cpu.sp(), 0xFC);
}

#[test]
fn test_plp_keeps_break_flag() {
    let mut cpu = setup_cpu();
    // PLP
    cpu.memory_mut().load(0x8000, &[0x28]);
    cpu.memory_mut().write(0x01FE, 0xC3);
    cpu.set_flag_b(false);

    assert_eq!(cpu.step(), 4);
    assert!(cpu.flag_n());
    assert!(cpu.flag_v());
    assert!(cpu.flag_z());
    assert!(cpu.flag_c());
    assert!(!cpu.flag_b());
}

#[test]
fn test_jsr_rts_round_trip() {
    let mut cpu = setup_cpu();
    // JSR $9000 ... $9000: RTS
    cpu.memory_mut().load(0x8000, &[0x20, 0x00, 0x90]);
    cpu.memory_mut().write(0x9000, 0x60);

    assert_eq!(cpu.step(), 6);
    assert_eq!(cpu.pc(), 0x9000);
    assert_eq!(cpu.memory().read(0x01FD), 0x80);
    assert_eq!(cpu.memory().read(0x01FC), 0x02);
    assert_eq!(cpu.step_out_stack().top(), Some(0x8003));

    assert_eq!(cpu.step(), 6);
    assert_eq!(cpu.pc(), 0x8003);
    assert_eq!(cpu.sp(), 0xFD);
    assert!(cpu.ret_executed());
}

#[test]
fn test_status_bit_five_always_reads_set() {
    let mut cpu = setup_cpu();
    cpu.set_status(0x00);
    assert_eq!(cpu.status() & 0x20, 0x20);
}
