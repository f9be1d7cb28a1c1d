//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY and BIT. The arithmetic cores
//! (`add_with_carry`, `subtract_with_borrow`, `compare`) are shared with the
//! undocumented combined opcodes (RRA, ISC, DCP, SBX).
//!
//! Decimal mode follows the NMOS 6502: the accumulator gets the BCD-adjusted
//! result, Z comes from the binary sum, and N/V from the intermediate value
//! after the low-nibble adjustment (ADC) or from the binary difference (SBC).

use crate::{AddressingMode, MemoryBus, CPU};

pub(crate) fn execute_adc<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    add_with_carry(cpu, value);
}

pub(crate) fn execute_sbc<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    subtract_with_borrow(cpu, value);
}

pub(crate) fn execute_and<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    cpu.a &= value;
    cpu.set_nz(cpu.a);
}

pub(crate) fn execute_ora<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    cpu.a |= value;
    cpu.set_nz(cpu.a);
}

pub(crate) fn execute_eor<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    cpu.a ^= value;
    cpu.set_nz(cpu.a);
}

pub(crate) fn execute_cmp<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    let register = cpu.a;
    compare(cpu, register, value);
}

pub(crate) fn execute_cpx<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    let register = cpu.x;
    compare(cpu, register, value);
}

pub(crate) fn execute_cpy<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    let register = cpu.y;
    compare(cpu, register, value);
}

/// BIT: Z from A AND M, but N and V are copied from bits 7 and 6 of the
/// operand itself.
pub(crate) fn execute_bit<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    cpu.flag_z = cpu.a & value == 0;
    cpu.flag_n = value & 0x80 != 0;
    cpu.flag_v = value & 0x40 != 0;
}

/// Compares a register with a value: C = reg >= value, N/Z from reg - value.
pub(crate) fn compare<M: MemoryBus>(cpu: &mut CPU<M>, register: u8, value: u8) {
    cpu.flag_c = register >= value;
    cpu.set_nz(register.wrapping_sub(value));
}

/// Adds `value` and the carry to the accumulator.
pub(crate) fn add_with_carry<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    let a = cpu.a as u16;
    let v = value as u16;
    let carry = cpu.flag_c as u16;

    if !cpu.flag_d {
        let sum = a + v + carry;
        let result = sum as u8;
        cpu.flag_c = sum > 0xFF;
        // Signed overflow: both operands share a sign the result lacks
        cpu.flag_v = (a as u8 ^ result) & (value ^ result) & 0x80 != 0;
        cpu.a = result;
        cpu.set_nz(result);
        return;
    }

    let mut tmp = (a & 0x0F) + (v & 0x0F) + carry;
    if tmp > 0x09 {
        tmp += 0x06;
    }
    tmp = if tmp <= 0x0F {
        (tmp & 0x0F) + (a & 0xF0) + (v & 0xF0)
    } else {
        (tmp & 0x0F) + (a & 0xF0) + (v & 0xF0) + 0x10
    };
    cpu.flag_z = (a + v + carry) & 0xFF == 0;
    cpu.flag_n = tmp & 0x80 != 0;
    cpu.flag_v = (a ^ tmp) & 0x80 != 0 && (a ^ v) & 0x80 == 0;
    if tmp & 0x1F0 > 0x90 {
        tmp += 0x60;
    }
    cpu.flag_c = tmp & 0xFF0 > 0xF0;
    cpu.a = tmp as u8;
}

/// Subtracts `value` and the inverted carry (borrow) from the accumulator.
pub(crate) fn subtract_with_borrow<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    let a = cpu.a as i32;
    let v = value as i32;
    let borrow = (!cpu.flag_c) as i32;
    let diff = a - v - borrow;
    let binary = diff as u8;

    cpu.flag_c = diff >= 0;
    cpu.flag_v = (a ^ diff) & 0x80 != 0 && (a ^ v) & 0x80 != 0;
    cpu.set_nz(binary);

    if !cpu.flag_d {
        cpu.a = binary;
        return;
    }

    let low = (a & 0x0F) - (v & 0x0F) - borrow;
    let mut tmp = if low & 0x10 != 0 {
        ((low - 6) & 0x0F) | ((a & 0xF0) - (v & 0xF0) - 0x10)
    } else {
        (low & 0x0F) | ((a & 0xF0) - (v & 0xF0))
    };
    if tmp & 0x100 != 0 {
        tmp -= 0x60;
    }
    cpu.a = tmp as u8;
}
