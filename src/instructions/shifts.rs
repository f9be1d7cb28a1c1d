//! # Shift and Rotate Instructions
//!
//! ASL, LSR, ROL and ROR on the accumulator or memory. The carry receives
//! the bit shifted out. The bare operations are reused by SLO, SRE, RLA and
//! RRA.

use crate::{AddressingMode, MemoryBus, CPU};

pub(crate) fn execute_asl<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    cpu.read_modify_write(mode, asl);
}

pub(crate) fn execute_lsr<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    cpu.read_modify_write(mode, lsr);
}

pub(crate) fn execute_rol<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    cpu.read_modify_write(mode, rol);
}

pub(crate) fn execute_ror<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    cpu.read_modify_write(mode, ror);
}

pub(crate) fn asl<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) -> u8 {
    cpu.flag_c = value & 0x80 != 0;
    let result = value << 1;
    cpu.set_nz(result);
    result
}

pub(crate) fn lsr<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) -> u8 {
    cpu.flag_c = value & 0x01 != 0;
    let result = value >> 1;
    cpu.set_nz(result);
    result
}

pub(crate) fn rol<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) -> u8 {
    let result = (value << 1) | cpu.flag_c as u8;
    cpu.flag_c = value & 0x80 != 0;
    cpu.set_nz(result);
    result
}

pub(crate) fn ror<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) -> u8 {
    let result = (value >> 1) | ((cpu.flag_c as u8) << 7);
    cpu.flag_c = value & 0x01 != 0;
    cpu.set_nz(result);
    result
}
