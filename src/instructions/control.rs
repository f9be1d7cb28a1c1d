//! # Control Flow Instructions
//!
//! JMP, JSR, RTS, RTI, BRK, the NOP family, and the hardware interrupt
//! entry sequence shared with BRK.
//!
//! JSR and RTS also feed the step-out stack the debugger uses: JSR pushes the
//! address the subroutine will return to, RTS raises `ret_executed` so that
//! the frame runner pops it after the instruction completes.

use crate::{AddressingMode, MemoryBus, CPU};

pub(crate) fn execute_jmp<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    cpu.pc = cpu.effective_address(mode, false).addr;
}

/// JSR: 6 tacts. The pushed address is the last byte of the JSR itself.
pub(crate) fn execute_jsr<M: MemoryBus>(cpu: &mut CPU<M>) {
    let lo = cpu.fetch_byte() as u16;
    cpu.dummy_read(0x0100 | cpu.sp as u16);
    let pushed = cpu.pc;
    cpu.push((pushed >> 8) as u8);
    cpu.push(pushed as u8);
    let hi = cpu.read_memory(cpu.pc) as u16;

    cpu.step_out_stack.push(pushed.wrapping_add(1));
    cpu.pc = (hi << 8) | lo;
}

pub(crate) fn execute_rts<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.dummy_read(cpu.pc);
    cpu.dummy_read(0x0100 | cpu.sp as u16);
    let lo = cpu.pull() as u16;
    let hi = cpu.pull() as u16;
    let pulled = (hi << 8) | lo;
    cpu.dummy_read(pulled);

    cpu.pc = pulled.wrapping_add(1);
    cpu.ret_executed = true;
}

pub(crate) fn execute_rti<M: MemoryBus>(cpu: &mut CPU<M>) {
    cpu.dummy_read(cpu.pc);
    cpu.dummy_read(0x0100 | cpu.sp as u16);
    let status = cpu.pull();
    restore_status(cpu, status);
    let lo = cpu.pull() as u16;
    let hi = cpu.pull() as u16;
    cpu.pc = (hi << 8) | lo;
}

/// BRK: a 7-tact software interrupt. Pushes PC+2 and the status with B set.
pub(crate) fn execute_brk<M: MemoryBus>(cpu: &mut CPU<M>) {
    // Padding byte after the opcode
    cpu.fetch_byte();
    let status = cpu.status() | 0b0011_0000;
    enter_vector(cpu, status, crate::cpu::IRQ_VECTOR);
}

/// Hardware interrupt entry (NMI or IRQ): 7 tacts, status pushed with B
/// clear.
pub(crate) fn service_interrupt<M: MemoryBus>(cpu: &mut CPU<M>, vector: u16) {
    cpu.dummy_read(cpu.pc);
    cpu.dummy_read(cpu.pc);
    let status = (cpu.status() & !0b0001_0000) | 0b0010_0000;
    enter_vector(cpu, status, vector);
}

fn enter_vector<M: MemoryBus>(cpu: &mut CPU<M>, status: u8, vector: u16) {
    let pc = cpu.pc;
    cpu.push((pc >> 8) as u8);
    cpu.push(pc as u8);
    cpu.push(status);
    cpu.flag_i = true;
    let lo = cpu.read_memory(vector) as u16;
    let hi = cpu.read_memory(vector.wrapping_add(1)) as u16;
    cpu.pc = (hi << 8) | lo;
}

/// PLP and RTI restore every flag except B, which only exists on the stack.
pub(crate) fn restore_status<M: MemoryBus>(cpu: &mut CPU<M>, value: u8) {
    let flag_b = cpu.flag_b;
    cpu.set_status(value);
    cpu.flag_b = flag_b;
}

/// NOP in all its addressing modes. The undocumented variants still perform
/// their operand read, with the same page-crossing tact as a load.
pub(crate) fn execute_nop<M: MemoryBus>(cpu: &mut CPU<M>, mode: AddressingMode) {
    cpu.read_operand(mode);
}
