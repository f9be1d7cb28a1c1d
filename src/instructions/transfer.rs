//! # Register Transfer Instructions
//!
//! TAX, TAY, TXA, TYA and TSX update N and Z. TXS does not touch flags.

use crate::{MemoryBus, CPU};

pub(crate) fn execute_tax<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.dummy_read(cpu.pc);
    cpu.x = cpu.a;
    cpu.set_nz(cpu.x);
}

pub(crate) fn execute_tay<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.dummy_read(cpu.pc);
    cpu.y = cpu.a;
    cpu.set_nz(cpu.y);
}

pub(crate) fn execute_txa<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.dummy_read(cpu.pc);
    cpu.a = cpu.x;
    cpu.set_nz(cpu.a);
}

pub(crate) fn execute_tya<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.dummy_read(cpu.pc);
    cpu.a = cpu.y;
    cpu.set_nz(cpu.a);
}

pub(crate) fn execute_tsx<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.dummy_read(cpu.pc);
    cpu.x = cpu.sp;
    cpu.set_nz(cpu.x);
}

pub(crate) fn execute_txs<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.dummy_read(cpu.pc);
    cpu.sp = cpu.x;
}
