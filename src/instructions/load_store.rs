//! # Load and Store Instructions
//!
//! Loads update N and Z and pay the page-crossing tact on indexed reads.
//! Stores never touch flags and always spend the fix-up tact on indexed
//! modes.

use crate::{AddressingMode, MemoryBus, CPU};

pub(crate) fn execute_lda<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    cpu.a = cpu.read_operand(mode);
    cpu.set_nz(cpu.a);
}

pub(crate) fn execute_ldx<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    cpu.x = cpu.read_operand(mode);
    cpu.set_nz(cpu.x);
}

pub(crate) fn execute_ldy<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    cpu.y = cpu.read_operand(mode);
    cpu.set_nz(cpu.y);
}

pub(crate) fn execute_sta<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.a;
    cpu.store(mode, value);
}

pub(crate) fn execute_stx<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.x;
    cpu.store(mode, value);
}

pub(crate) fn execute_sty<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    let value = cpu.y;
    cpu.store(mode, value);
}
