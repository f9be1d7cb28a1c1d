//! # Undocumented Instructions
//!
//! The NMOS illegal opcodes. Combined read-modify-write opcodes reuse the
//! documented shift/increment cores and share their timing; the immediate
//! combinations (ANC, ALR, ARR, ANE, LXA, SBX) run in 2 tacts.
//!
//! ANE and LXA are "unstable" on real silicon: the result depends on an
//! analog magic constant. Both use 0xEE, the value VICE and most C64s show.
//! SHA, SHX, SHY and TAS store `value & (H + 1)`, H being the high byte of
//! the base address, and when indexing crosses a page the stored value also
//! replaces the high byte of the target address.

use super::alu::{add_with_carry, compare, subtract_with_borrow};
use super::shifts::{asl, lsr, rol, ror};
use crate::{AddressingMode, MemoryBus, CPU};

const UNSTABLE_MAGIC: u8 = 0xEE;

/// SLO: ASL memory, then ORA.
pub(crate) fn execute_slo<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    cpu.read_modify_write(mode, |cpu, value| {
        let result = asl(cpu, value);
        cpu.a |= result;
        cpu.set_nz(cpu.a);
        result
    });
}

/// RLA: ROL memory, then AND.
pub(crate) fn execute_rla<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    cpu.read_modify_write(mode, |cpu, value| {
        let result = rol(cpu, value);
        cpu.a &= result;
        cpu.set_nz(cpu.a);
        result
    });
}

/// SRE: LSR memory, then EOR.
pub(crate) fn execute_sre<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    cpu.read_modify_write(mode, |cpu, value| {
        let result = lsr(cpu, value);
        cpu.a ^= result;
        cpu.set_nz(cpu.a);
        result
    });
}

/// RRA: ROR memory, then ADC with the carry rotated out.
pub(crate) fn execute_rra<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    cpu.read_modify_write(mode, |cpu, value| {
        let result = ror(cpu, value);
        add_with_carry(cpu, result);
        result
    });
}

/// DCP: DEC memory, then CMP.
pub(crate) fn execute_dcp<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    cpu.read_modify_write(mode, |cpu, value| {
        let result = value.wrapping_sub(1);
        let a = cpu.a;
        compare(cpu, a, result);
        result
    });
}

/// ISC: INC memory, then SBC.
pub(crate) fn execute_isc<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    cpu.read_modify_write(mode, |cpu, value| {
        let result = value.wrapping_add(1);
        subtract_with_borrow(cpu, result);
        result
    });
}

/// SAX: store A AND X. No flags.
pub(crate) fn execute_sax<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.a & cpu.x;
    cpu.store(mode, value);
}

/// LAX: load A and X with the same value.
pub(crate) fn execute_lax<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    cpu.a = value;
    cpu.x = value;
    cpu.set_nz(value);
}

/// ANC: AND, then copy N into C.
pub(crate) fn execute_anc<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    cpu.a &= value;
    cpu.set_nz(cpu.a);
    cpu.flag_c = cpu.flag_n;
}

/// ALR: AND, then LSR A.
pub(crate) fn execute_alr<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    let anded = cpu.a & value;
    cpu.a = lsr(cpu, anded);
}

/// ARR: AND, then ROR A, with flags from the adder.
///
/// Binary mode: C = bit 6 of the result, V = bit 6 XOR bit 5. Decimal mode
/// additionally applies the BCD fix-ups to each nibble of the result.
pub(crate) fn execute_arr<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    let anded = cpu.a & value;
    let rotated = (anded >> 1) | ((cpu.flag_c as u8) << 7);

    if !cpu.flag_d {
        cpu.set_nz(rotated);
        cpu.flag_c = rotated & 0x40 != 0;
        cpu.flag_v = ((rotated >> 6) ^ (rotated >> 5)) & 0x01 != 0;
        cpu.a = rotated;
        return;
    }

    cpu.flag_n = cpu.flag_c;
    cpu.flag_z = rotated == 0;
    cpu.flag_v = (rotated ^ anded) & 0x40 != 0;

    let mut result = rotated;
    if (anded & 0x0F) + (anded & 0x01) > 0x05 {
        result = (result & 0xF0) | (result.wrapping_add(0x06) & 0x0F);
    }
    if (anded as u16 & 0xF0) + (anded as u16 & 0x10) > 0x50 {
        result = (result & 0x0F) | (result.wrapping_add(0x60) & 0xF0);
        cpu.flag_c = true;
    } else {
        cpu.flag_c = false;
    }
    cpu.a = result;
}

/// ANE (XAA): A = (A | magic) & X & imm.
pub(crate) fn execute_ane<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    cpu.a = (cpu.a | UNSTABLE_MAGIC) & cpu.x & value;
    cpu.set_nz(cpu.a);
}

/// LXA: A = X = (A | magic) & imm.
pub(crate) fn execute_lxa<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    let result = (cpu.a | UNSTABLE_MAGIC) & value;
    cpu.a = result;
    cpu.x = result;
    cpu.set_nz(result);
}

/// SBX (AXS): X = (A & X) - imm, carry as in CMP, decimal flag ignored.
pub(crate) fn execute_sbx<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.read_operand(mode);
    let anded = cpu.a & cpu.x;
    cpu.flag_c = anded >= value;
    cpu.x = anded.wrapping_sub(value);
    cpu.set_nz(cpu.x);
}

/// LAS: A = X = SP = M & SP.
pub(crate) fn execute_las<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.read_operand(mode) & cpu.sp;
    cpu.a = value;
    cpu.x = value;
    cpu.sp = value;
    cpu.set_nz(value);
}

/// SHA (AHX): store A & X & (H + 1).
pub(crate) fn execute_sha<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.a & cpu.x;
    store_high_byte_and(cpu, mode, value);
}

/// SHX: store X & (H + 1).
pub(crate) fn execute_shx<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.x;
    store_high_byte_and(cpu, mode, value);
}

/// SHY: store Y & (H + 1).
pub(crate) fn execute_shy<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.y;
    store_high_byte_and(cpu, mode, value);
}

/// TAS (SHS): SP = A & X, then store SP & (H + 1).
pub(crate) fn execute_tas<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    cpu.sp = cpu.a & cpu.x;
    let value = cpu.sp;
    store_high_byte_and(cpu, mode, value);
}

fn store_high_byte_and<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode, value: u8) {
    let target = cpu.effective_address(mode, true);
    let stored = value & ((target.base >> 8) as u8).wrapping_add(1);
    let addr = if target.page_crossed() {
        ((stored as u16) << 8) | (target.addr & 0x00FF)
    } else {
        target.addr
    };
    cpu.write_memory(addr, stored);
}
