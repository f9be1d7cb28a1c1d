//! # Increment and Decrement Instructions
//!
//! INC and DEC are read-modify-write on memory; INX, INY, DEX and DEY work on
//! the index registers. All update N and Z and wrap at the byte boundary.

use crate::{AddressingMode, MemoryBus, CPU};

pub(crate) fn execute_inc<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    cpu.read_modify_write(mode, |cpu, value| {
        let result = value.wrapping_add(1);
        cpu.set_nz(result);
        result
    });
}

pub(crate) fn execute_dec<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    cpu.read_modify_write(mode, |cpu, value| {
        let result = value.wrapping_sub(1);
        cpu.set_nz(result);
        result
    });
}

pub(crate) fn execute_inx<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.dummy_read(cpu.pc);
    cpu.x = cpu.x.wrapping_add(1);
    cpu.set_nz(cpu.x);
}

pub(crate) fn execute_iny<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.dummy_read(cpu.pc);
    cpu.y = cpu.y.wrapping_add(1);
    cpu.set_nz(cpu.y);
}

pub(crate) fn execute_dex<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.dummy_read(cpu.pc);
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.set_nz(cpu.x);
}

pub(crate) fn execute_dey<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.dummy_read(cpu.pc);
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.set_nz(cpu.y);
}
