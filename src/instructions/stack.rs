//! # Stack Instructions
//!
//! PHA and PHP take 3 tacts, PLA and PLP take 4 (the extra tact is the read
//! of the stack slot before SP is incremented).

use super::control::restore_status;
use crate::{MemoryBus, CPU};

pub(crate) fn execute_pha<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.dummy_read(cpu.pc);
    let value = cpu.a;
    cpu.push(value);
}

/// PHP always pushes B and bit 5 set.
pub(crate) fn execute_php<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.dummy_read(cpu.pc);
    let value = cpu.status() | 0b0011_0000;
    cpu.push(value);
}

pub(crate) fn execute_pla<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.dummy_read(cpu.pc);
    cpu.dummy_read(0x0100 | cpu.sp as u16);
    cpu.a = cpu.pull();
    cpu.set_nz(cpu.a);
}

pub(crate) fn execute_plp<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.dummy_read(cpu.pc);
    cpu.dummy_read(0x0100 | cpu.sp as u16);
    let value = cpu.pull();
    restore_status(cpu, value);
}
