//! # CPU State and Execution
//!
//! This module contains the `CPU` struct representing the 6510 processor
//! state and the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC) and **stack pointer** (SP)
//! - **Status flags**: N, V, B, D, I, Z, C (individual bool fields); bit 5 of
//!   the packed status byte always reads as 1
//! - **Tact counter**: monotonic, one tact per bus cycle
//! - **Frame counters**: tacts within the current frame and completed frames
//!
//! ## Execution Model
//!
//! Every bus access costs exactly one tact, including the dummy reads and
//! writes the real silicon performs, so the tact total of each instruction
//! falls out of its bus activity rather than being added from a table:
//! - `execute_cpu_cycle()`: fetch, decode and execute one full instruction
//! - `step()`: one instruction, honoring snooze
//! - `run_for_tacts()`: execute until a tact budget is exhausted
//!
//! ## Stall and Snooze
//!
//! A peripheral that needs the bus asserts the [`StallLine`]. Before each
//! memory access the CPU checks the line and, while it is asserted, keeps
//! advancing tacts without touching memory. Snoozing is different: the CPU
//! is halted internally and `on_snooze()` burns 4 tacts without fetching.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{trace, warn};

use crate::config::DEFAULT_TACTS_IN_FRAME;
use crate::debug::StepOutStack;
use crate::instructions;
use crate::{AddressingMode, MemoryBus};

/// NMI vector address.
pub const NMI_VECTOR: u16 = 0xFFFA;

/// Reset vector address.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// IRQ/BRK vector address.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Tacts consumed by one snoozed step.
pub const SNOOZE_TACTS: u64 = 4;

/// Default number of tacts a stall may last before the CPU releases itself.
pub const DEFAULT_STALL_WATCHDOG_TACTS: u64 = 1000;

/// Shared stall signal between the CPU and a peripheral.
///
/// The line is boolean: stalling an already stalled CPU changes nothing, and
/// one `release()` from any holder fully releases the CPU. Clones share the
/// same line, so a peripheral living on another scheduling context can keep
/// its own handle.
///
/// ```
/// use lib6510::StallLine;
///
/// let line = StallLine::new();
/// let peripheral = line.clone();
///
/// peripheral.stall();
/// peripheral.stall();
/// assert!(line.is_stalled());
///
/// line.release();
/// assert!(!peripheral.is_stalled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct StallLine(Arc<AtomicBool>);

impl StallLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stall(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn release(&self) {
        self.0.store(false, Ordering::Release);
    }

    pub fn is_stalled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// 6510 CPU state and execution context.
///
/// The CPU is generic over the memory implementation via the `MemoryBus`
/// trait. It never fails: every opcode, including the undocumented ones, has
/// a defined behavior, and all arithmetic wraps.
///
/// # Examples
///
/// ```
/// use lib6510::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00);
/// memory.write(0xFFFD, 0x80);
/// memory.load(0x8000, &[0x29, 0x0F]); // AND #$0F
///
/// let mut cpu = CPU::new(memory);
/// cpu.set_a(0x33);
///
/// assert_eq!(cpu.step(), 2);
/// assert_eq!(cpu.a(), 0x03);
/// assert_eq!(cpu.status(), 0x34);
/// ```
pub struct CPU<M: MemoryBus> {
    pub(crate) a: u8,
    pub(crate) x: u8,
    pub(crate) y: u8,
    pub(crate) pc: u16,
    pub(crate) sp: u8,

    pub(crate) flag_n: bool,
    pub(crate) flag_v: bool,
    pub(crate) flag_b: bool,
    pub(crate) flag_d: bool,
    pub(crate) flag_i: bool,
    pub(crate) flag_z: bool,
    pub(crate) flag_c: bool,

    /// Total tacts since the last reset. Never decreases.
    pub(crate) tacts: u64,

    tacts_in_frame: u64,
    clock_multiplier: u8,
    tacts_in_current_frame: u64,
    frame_tacts: u64,
    frames: u64,
    current_frame_tact: u64,

    stall: StallLine,
    stall_watchdog_tacts: u64,
    snoozed: bool,
    jammed: bool,

    nmi_pending: bool,
    irq_requested: bool,

    /// Opcode of the instruction executed last (or being executed).
    pub(crate) opcode: u8,
    pub(crate) op_start_address: u16,

    pub(crate) step_out_stack: StepOutStack,
    pub(crate) ret_executed: bool,

    last_memory_reads: Vec<u16>,
    last_memory_writes: Vec<u16>,
    last_memory_read_value: u8,
    last_memory_write_value: u8,
    last_io_read_port: Option<u16>,
    last_io_write_port: Option<u16>,

    pub(crate) memory: M,
}

/// Result of an effective address calculation.
///
/// `base` is the address before indexing; the unstable SHA/SHX/SHY/TAS
/// stores derive their value from its high byte.
#[derive(Debug, Clone, Copy)]
pub(crate) struct EffectiveAddress {
    pub addr: u16,
    pub base: u16,
}

impl EffectiveAddress {
    pub fn page_crossed(&self) -> bool {
        (self.addr ^ self.base) & 0xFF00 != 0
    }
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a new CPU with the given memory bus and applies `reset()`.
    ///
    /// Loading the reset vector does not consume tacts.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib6510::{CPU, FlatMemory, MemoryBus};
    ///
    /// let mut mem = FlatMemory::new();
    /// mem.write(0xFFFC, 0x00);
    /// mem.write(0xFFFD, 0x80);
    ///
    /// let cpu = CPU::new(mem);
    /// assert_eq!(cpu.pc(), 0x8000);
    /// assert_eq!(cpu.sp(), 0xFD);
    /// assert_eq!(cpu.tacts(), 0);
    /// ```
    pub fn new(memory: M) -> Self {
        let mut cpu = Self {
            a: 0,
            x: 0,
            y: 0,
            pc: 0,
            sp: 0,
            flag_n: false,
            flag_v: false,
            flag_b: false,
            flag_d: false,
            flag_i: false,
            flag_z: false,
            flag_c: false,
            tacts: 0,
            tacts_in_frame: DEFAULT_TACTS_IN_FRAME,
            clock_multiplier: 1,
            tacts_in_current_frame: DEFAULT_TACTS_IN_FRAME,
            frame_tacts: 0,
            frames: 0,
            current_frame_tact: 0,
            stall: StallLine::new(),
            stall_watchdog_tacts: DEFAULT_STALL_WATCHDOG_TACTS,
            snoozed: false,
            jammed: false,
            nmi_pending: false,
            irq_requested: false,
            opcode: 0,
            op_start_address: 0,
            step_out_stack: StepOutStack::new(),
            ret_executed: false,
            last_memory_reads: Vec::with_capacity(8),
            last_memory_writes: Vec::with_capacity(8),
            last_memory_read_value: 0,
            last_memory_write_value: 0,
            last_io_read_port: None,
            last_io_write_port: None,
            memory,
        };
        cpu.reset();
        cpu
    }

    /// Applies the power-on register state.
    ///
    /// - A = X = Y = 0, SP = 0xFD, P = 0x34 (I and B set, bit 5 always set)
    /// - PC is loaded from the reset vector at 0xFFFC/0xFFFD
    /// - Tact and frame counters are zeroed, the clock multiplier returns to 1
    /// - Stall, snooze, JAM and pending interrupts are cleared
    pub fn reset(&mut self) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = 0xFD;
        self.set_status(0x34);

        let lo = self.memory.read(RESET_VECTOR) as u16;
        let hi = self.memory.read(RESET_VECTOR.wrapping_add(1)) as u16;
        self.pc = (hi << 8) | lo;

        self.tacts = 0;
        self.frame_tacts = 0;
        self.frames = 0;
        self.current_frame_tact = 0;
        self.clock_multiplier = 1;
        self.tacts_in_current_frame = self.tacts_in_frame;

        self.stall.release();
        self.snoozed = false;
        self.jammed = false;
        self.nmi_pending = false;
        self.irq_requested = false;
        self.ret_executed = false;
        self.opcode = 0;
        self.op_start_address = self.pc;
        self.clear_bus_records();
    }

    /// `reset()` plus clearing the step-out stack.
    pub fn hard_reset(&mut self) {
        self.reset();
        self.step_out_stack.clear();
    }

    /// Executes one full instruction (or interrupt entry), including all of
    /// its internal cycles.
    ///
    /// Pending interrupts are serviced at the instruction boundary: NMI
    /// first, then IRQ if the I flag is clear. A jammed CPU burns two tacts
    /// per call and leaves PC untouched.
    pub fn execute_cpu_cycle(&mut self) {
        self.clear_bus_records();

        if self.jammed {
            self.increment_tacts();
            self.increment_tacts();
            return;
        }

        if self.nmi_pending {
            self.nmi_pending = false;
            trace!(pc = self.pc, "NMI");
            instructions::control::service_interrupt(self, NMI_VECTOR);
            return;
        }
        if (self.irq_requested || self.memory.irq_active()) && !self.flag_i {
            trace!(pc = self.pc, "IRQ");
            instructions::control::service_interrupt(self, IRQ_VECTOR);
            return;
        }

        self.op_start_address = self.pc;
        let opcode = self.fetch_byte();
        self.opcode = opcode;
        instructions::execute(self, opcode);
    }

    /// Executes one instruction, or one snooze period if the CPU is snoozed.
    ///
    /// Returns the number of tacts consumed.
    pub fn step(&mut self) -> u64 {
        let start = self.tacts;
        if self.snoozed {
            self.on_snooze();
        } else {
            self.execute_cpu_cycle();
        }
        self.tacts - start
    }

    /// Runs the CPU until at least `tact_budget` tacts have elapsed.
    ///
    /// Returns the tacts actually consumed, which may exceed the budget by
    /// less than one instruction.
    pub fn run_for_tacts(&mut self, tact_budget: u64) -> u64 {
        let start = self.tacts;
        let target = start + tact_budget;
        while self.tacts < target {
            self.step();
        }
        self.tacts - start
    }

    /// Instructions always run to completion inside `execute_cpu_cycle()`.
    pub fn instruction_execution_in_progress(&self) -> bool {
        false
    }

    // ========== Snooze ==========

    pub fn snooze(&mut self) {
        self.snoozed = true;
    }

    pub fn awake(&mut self) {
        self.snoozed = false;
    }

    pub fn is_snoozed(&self) -> bool {
        self.snoozed
    }

    /// Burns [`SNOOZE_TACTS`] tacts without any bus access.
    pub fn on_snooze(&mut self) {
        for _ in 0..SNOOZE_TACTS {
            self.increment_tacts();
        }
    }

    // ========== Stall ==========

    pub fn stall_cpu(&mut self) {
        self.stall.stall();
    }

    /// Releases the CPU. A no-op if it is not stalled.
    pub fn release_cpu(&mut self) {
        self.stall.release();
    }

    pub fn is_stalled(&self) -> bool {
        self.stall.is_stalled()
    }

    /// Returns a handle to the stall line for a peripheral to keep.
    pub fn stall_line(&self) -> StallLine {
        self.stall.clone()
    }

    pub fn set_stall_watchdog_tacts(&mut self, tacts: u64) {
        self.stall_watchdog_tacts = tacts.max(1);
    }

    /// Spins on the tact clock while the stall line is asserted.
    fn wait_for_release(&mut self) {
        let mut waited = 0u64;
        while self.stall.is_stalled() {
            self.increment_tacts();
            waited += 1;
            if waited >= self.stall_watchdog_tacts {
                warn!(
                    tacts = self.tacts,
                    waited, "CPU stalled past the watchdog limit, releasing"
                );
                self.stall.release();
            }
        }
    }

    // ========== Interrupts ==========

    /// Latches an NMI edge, serviced at the next instruction boundary.
    pub fn request_nmi(&mut self) {
        self.nmi_pending = true;
    }

    /// Asserts the IRQ line until `clear_interrupts()`.
    pub fn request_irq(&mut self) {
        self.irq_requested = true;
    }

    pub fn clear_interrupts(&mut self) {
        self.nmi_pending = false;
        self.irq_requested = false;
    }

    /// True once a JAM opcode has halted the CPU. Only `reset()` recovers.
    pub fn is_jammed(&self) -> bool {
        self.jammed
    }

    pub(crate) fn jam(&mut self) {
        trace!(pc = self.op_start_address, opcode = self.opcode, "JAM");
        self.jammed = true;
        self.pc = self.op_start_address;
        self.increment_tacts();
    }

    // ========== Tact and Frame Counters ==========

    /// Advances the tact counter by one, updating the frame counters and
    /// notifying the bus.
    pub(crate) fn increment_tacts(&mut self) {
        self.tacts += 1;
        self.frame_tacts += 1;
        if self.frame_tacts >= self.tacts_in_current_frame {
            self.frame_tacts -= self.tacts_in_current_frame;
            self.frames += 1;
        }
        self.current_frame_tact = self.frame_tacts / self.clock_multiplier as u64;
        self.memory.on_tact(self.tacts);
    }

    pub fn tacts(&self) -> u64 {
        self.tacts
    }

    /// Tacts within the current frame at the current clock speed.
    pub fn frame_tacts(&self) -> u64 {
        self.frame_tacts
    }

    /// Tacts within the current frame, normalized to the base clock.
    pub fn current_frame_tact(&self) -> u64 {
        self.current_frame_tact
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Base tacts per frame (at clock multiplier 1).
    pub fn tacts_in_frame(&self) -> u64 {
        self.tacts_in_frame
    }

    pub fn tacts_in_current_frame(&self) -> u64 {
        self.tacts_in_current_frame
    }

    pub fn set_tacts_in_frame(&mut self, tacts: u64) {
        self.tacts_in_frame = tacts.max(1);
        self.tacts_in_current_frame = self.tacts_in_frame * self.clock_multiplier as u64;
    }

    pub fn clock_multiplier(&self) -> u8 {
        self.clock_multiplier
    }

    /// Changes the clock multiplier and recomputes the frame tact budget.
    pub fn set_clock_multiplier(&mut self, multiplier: u8) {
        self.clock_multiplier = multiplier.max(1);
        self.tacts_in_current_frame = self.tacts_in_frame * self.clock_multiplier as u64;
    }

    // ========== Bus Access ==========

    fn clear_bus_records(&mut self) {
        self.last_memory_reads.clear();
        self.last_memory_writes.clear();
        self.last_io_read_port = None;
        self.last_io_write_port = None;
    }

    /// Reads memory in one tact and records the access.
    pub(crate) fn read_memory(&mut self, addr: u16) -> u8 {
        self.wait_for_release();
        self.increment_tacts();
        let value = self.memory.read(addr);
        if self.memory.is_io(addr) {
            self.last_io_read_port = Some(addr);
        } else {
            self.last_memory_reads.push(addr);
        }
        self.last_memory_read_value = value;
        value
    }

    /// Writes memory in one tact and records the access.
    pub(crate) fn write_memory(&mut self, addr: u16, value: u8) {
        self.wait_for_release();
        self.increment_tacts();
        if self.memory.is_io(addr) {
            self.last_io_write_port = Some(addr);
        } else {
            self.last_memory_writes.push(addr);
        }
        self.last_memory_write_value = value;
        self.memory.write(addr, value);
    }

    /// A bus read whose value the CPU throws away.
    pub(crate) fn dummy_read(&mut self, addr: u16) {
        self.wait_for_release();
        self.increment_tacts();
        let _ = self.memory.read(addr);
    }

    /// The extra write of the unmodified value in read-modify-write cycles.
    pub(crate) fn dummy_write(&mut self, addr: u16, value: u8) {
        self.wait_for_release();
        self.increment_tacts();
        self.memory.write(addr, value);
    }

    pub(crate) fn fetch_byte(&mut self) -> u8 {
        let value = self.read_memory(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    pub(crate) fn fetch_word(&mut self) -> u16 {
        let lo = self.fetch_byte() as u16;
        let hi = self.fetch_byte() as u16;
        (hi << 8) | lo
    }

    pub(crate) fn push(&mut self, value: u8) {
        self.write_memory(0x0100 | self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    pub(crate) fn pull(&mut self) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        self.read_memory(0x0100 | self.sp as u16)
    }

    // ========== Addressing ==========

    /// Computes the effective address of a memory operand.
    ///
    /// Indexed modes perform the dummy read at the partially fixed address
    /// when a page is crossed, or always when `always_fix` is set (stores and
    /// read-modify-write instructions).
    pub(crate) fn effective_address(
        &mut self,
        mode: AddressingMode,
        always_fix: bool,
    ) -> EffectiveAddress {
        match mode {
            AddressingMode::ZeroPage => {
                let addr = self.fetch_byte() as u16;
                EffectiveAddress { addr, base: addr }
            }
            AddressingMode::ZeroPageX | AddressingMode::ZeroPageY => {
                let zp = self.fetch_byte();
                self.dummy_read(zp as u16);
                let index = if mode == AddressingMode::ZeroPageX {
                    self.x
                } else {
                    self.y
                };
                let addr = zp.wrapping_add(index) as u16;
                EffectiveAddress {
                    addr,
                    base: zp as u16,
                }
            }
            AddressingMode::Absolute => {
                let addr = self.fetch_word();
                EffectiveAddress { addr, base: addr }
            }
            AddressingMode::AbsoluteX | AddressingMode::AbsoluteY => {
                let base = self.fetch_word();
                let index = if mode == AddressingMode::AbsoluteX {
                    self.x
                } else {
                    self.y
                };
                self.index_with_fixup(base, index, always_fix)
            }
            AddressingMode::IndirectX => {
                let zp = self.fetch_byte();
                self.dummy_read(zp as u16);
                let ptr = zp.wrapping_add(self.x);
                let lo = self.read_memory(ptr as u16) as u16;
                let hi = self.read_memory(ptr.wrapping_add(1) as u16) as u16;
                let addr = (hi << 8) | lo;
                EffectiveAddress { addr, base: addr }
            }
            AddressingMode::IndirectY => {
                let zp = self.fetch_byte();
                let lo = self.read_memory(zp as u16) as u16;
                let hi = self.read_memory(zp.wrapping_add(1) as u16) as u16;
                self.index_with_fixup((hi << 8) | lo, self.y, always_fix)
            }
            AddressingMode::Indirect => {
                let ptr = self.fetch_word();
                let lo = self.read_memory(ptr) as u16;
                // NMOS bug: the pointer high byte never carries into the next page
                let hi = self.read_memory((ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF)) as u16;
                let addr = (hi << 8) | lo;
                EffectiveAddress { addr, base: addr }
            }
            AddressingMode::Immediate | AddressingMode::Relative => {
                let addr = self.pc;
                self.pc = self.pc.wrapping_add(1);
                EffectiveAddress { addr, base: addr }
            }
            AddressingMode::Implicit | AddressingMode::Accumulator => EffectiveAddress {
                addr: self.pc,
                base: self.pc,
            },
        }
    }

    fn index_with_fixup(&mut self, base: u16, index: u8, always_fix: bool) -> EffectiveAddress {
        let effective = EffectiveAddress {
            addr: base.wrapping_add(index as u16),
            base,
        };
        if always_fix || effective.page_crossed() {
            self.dummy_read((base & 0xFF00) | (effective.addr & 0x00FF));
        }
        effective
    }

    /// Reads the operand of a read-class instruction.
    pub(crate) fn read_operand(&mut self, mode: AddressingMode) -> u8 {
        match mode {
            AddressingMode::Immediate => self.fetch_byte(),
            AddressingMode::Accumulator | AddressingMode::Implicit => {
                self.dummy_read(self.pc);
                self.a
            }
            _ => {
                let addr = self.effective_address(mode, false).addr;
                self.read_memory(addr)
            }
        }
    }

    /// Stores a register value through a write-class addressing mode.
    pub(crate) fn store(&mut self, mode: AddressingMode, value: u8) {
        let addr = self.effective_address(mode, true).addr;
        self.write_memory(addr, value);
    }

    /// Runs a read-modify-write cycle: read, write back the unmodified value,
    /// then write the result. On the accumulator the operation takes one
    /// idle read instead.
    pub(crate) fn read_modify_write(
        &mut self,
        mode: AddressingMode,
        op: impl FnOnce(&mut Self, u8) -> u8,
    ) -> u8 {
        if mode == AddressingMode::Accumulator {
            self.dummy_read(self.pc);
            let a = self.a;
            let result = op(self, a);
            self.a = result;
            return result;
        }
        let addr = self.effective_address(mode, true).addr;
        let value = self.read_memory(addr);
        self.dummy_write(addr, value);
        let result = op(self, value);
        self.write_memory(addr, result);
        result
    }

    pub(crate) fn set_nz(&mut self, value: u8) {
        self.flag_z = value == 0;
        self.flag_n = value & 0x80 != 0;
    }

    // ========== Bus Records ==========

    /// Non-I/O addresses read by the last instruction, in access order.
    pub fn last_memory_reads(&self) -> &[u16] {
        &self.last_memory_reads
    }

    /// Non-I/O addresses written by the last instruction, in access order.
    pub fn last_memory_writes(&self) -> &[u16] {
        &self.last_memory_writes
    }

    pub fn last_memory_read_value(&self) -> u8 {
        self.last_memory_read_value
    }

    pub fn last_memory_write_value(&self) -> u8 {
        self.last_memory_write_value
    }

    pub fn last_io_read_port(&self) -> Option<u16> {
        self.last_io_read_port
    }

    pub fn last_io_write_port(&self) -> Option<u16> {
        self.last_io_write_port
    }

    pub fn opcode(&self) -> u8 {
        self.opcode
    }

    /// Address of the opcode of the last executed instruction.
    pub fn op_start_address(&self) -> u16 {
        self.op_start_address
    }

    // ========== Step-Out Tracking ==========

    pub fn step_out_stack(&self) -> &StepOutStack {
        &self.step_out_stack
    }

    pub fn step_out_stack_mut(&mut self) -> &mut StepOutStack {
        &mut self.step_out_stack
    }

    /// True if the last instruction was a subroutine return.
    pub fn ret_executed(&self) -> bool {
        self.ret_executed
    }

    /// Clears the return marker, returning its previous value.
    pub fn take_ret_executed(&mut self) -> bool {
        std::mem::take(&mut self.ret_executed)
    }

    // ========== Memory ==========

    pub fn memory(&self) -> &M {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    // ========== Register Getters ==========

    pub fn a(&self) -> u8 {
        self.a
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer value.
    ///
    /// The full stack address is 0x0100 + SP; the stack grows downward.
    pub fn sp(&self) -> u8 {
        self.sp
    }

    /// Returns the status register as a packed byte (NV1BDIZC).
    ///
    /// Bit 5 is always set.
    pub fn status(&self) -> u8 {
        let mut status: u8 = 0b0010_0000;
        if self.flag_n {
            status |= 0b1000_0000;
        }
        if self.flag_v {
            status |= 0b0100_0000;
        }
        if self.flag_b {
            status |= 0b0001_0000;
        }
        if self.flag_d {
            status |= 0b0000_1000;
        }
        if self.flag_i {
            status |= 0b0000_0100;
        }
        if self.flag_z {
            status |= 0b0000_0010;
        }
        if self.flag_c {
            status |= 0b0000_0001;
        }
        status
    }

    pub fn flag_n(&self) -> bool {
        self.flag_n
    }

    pub fn flag_v(&self) -> bool {
        self.flag_v
    }

    pub fn flag_b(&self) -> bool {
        self.flag_b
    }

    pub fn flag_d(&self) -> bool {
        self.flag_d
    }

    pub fn flag_i(&self) -> bool {
        self.flag_i
    }

    pub fn flag_z(&self) -> bool {
        self.flag_z
    }

    pub fn flag_c(&self) -> bool {
        self.flag_c
    }

    // ========== Register Setters ==========

    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    pub fn set_sp(&mut self, value: u8) {
        self.sp = value;
    }

    /// Unpacks a status byte into the individual flags. Bit 5 is ignored.
    pub fn set_status(&mut self, value: u8) {
        self.flag_n = value & 0b1000_0000 != 0;
        self.flag_v = value & 0b0100_0000 != 0;
        self.flag_b = value & 0b0001_0000 != 0;
        self.flag_d = value & 0b0000_1000 != 0;
        self.flag_i = value & 0b0000_0100 != 0;
        self.flag_z = value & 0b0000_0010 != 0;
        self.flag_c = value & 0b0000_0001 != 0;
    }

    pub fn set_flag_n(&mut self, value: bool) {
        self.flag_n = value;
    }

    pub fn set_flag_v(&mut self, value: bool) {
        self.flag_v = value;
    }

    pub fn set_flag_b(&mut self, value: bool) {
        self.flag_b = value;
    }

    pub fn set_flag_d(&mut self, value: bool) {
        self.flag_d = value;
    }

    pub fn set_flag_i(&mut self, value: bool) {
        self.flag_i = value;
    }

    pub fn set_flag_z(&mut self, value: bool) {
        self.flag_z = value;
    }

    pub fn set_flag_c(&mut self, value: bool) {
        self.flag_c = value;
    }
}
