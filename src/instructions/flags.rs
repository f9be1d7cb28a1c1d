//! # Status Flag Manipulation Instructions
//!
//! CLC, SEC, CLI, SEI, CLV, CLD and SED. All are implied, 2 tacts.

use crate::{MemoryBus, CPU};

pub(crate) fn execute_clc<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.dummy_read(cpu.pc);
    cpu.flag_c = false;
}

pub(crate) fn execute_sec<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.dummy_read(cpu.pc);
    cpu.flag_c = true;
}

pub(crate) fn execute_cli<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.dummy_read(cpu.pc);
    cpu.flag_i = false;
}

pub(crate) fn execute_sei<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.dummy_read(cpu.pc);
    cpu.flag_i = true;
}

pub(crate) fn execute_clv<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.dummy_read(cpu.pc);
    cpu.flag_v = false;
}

pub(crate) fn execute_cld<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.dummy_read(cpu.pc);
    cpu.flag_d = false;
}

pub(crate) fn execute_sed<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.dummy_read(cpu.pc);
    cpu.flag_d = true;
}
