//! # Machine
//!
//! A [`Machine`] ties a [`CPU`] to the machine-specific behavior the frame
//! runner needs but does not implement, expressed by the [`MachineHooks`]
//! trait:
//!
//! - **Frame boundaries**: clock-change policy, frame initialization and
//!   keystroke injection
//! - **Instruction boundaries**: before/after hooks and event handling
//! - **Run control**: the termination-point predicate and call detection
//!   for step-over
//!
//! The machine also owns the [`ExecutionContext`], the [`FrameCommandSlot`]
//! a host uses to interrupt a running frame, and an [`EventQueue`] of
//! tact-scheduled callbacks.
//!
//! # Example
//!
//! ```rust
//! use lib6510::{FlatMemory, Machine, MemoryBus, NoHooks};
//!
//! let mut memory = FlatMemory::new();
//! memory.write(0xFFFC, 0x00);
//! memory.write(0xFFFD, 0x80);
//! memory.load(0x8000, &[0x4C, 0x00, 0x80]); // JMP $8000
//!
//! let mut machine = Machine::new(memory, NoHooks);
//! machine.execute_machine_frame();
//! assert!(machine.cpu().tacts() >= 19_656);
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{MachineConfig, MAX_CLOCK_MULTIPLIER};
use crate::context::{ExecutionContext, FrameTerminationMode};
use crate::debug::{
    parse_breakpoint_address, BreakpointInfo, BreakpointKey, BreakpointKind, DebugSupport,
};
use crate::error::{
    BreakpointError, BreakpointResult, ConfigError, ConfigResult, InjectionError, InjectionResult,
};
use crate::partition::Partition;
use crate::{MemoryBus, CPU};

/// Opcode of JSR, the only call-like 6510 instruction.
const JSR_OPCODE: u8 = 0x20;

/// Machine-specific behavior called by the frame runner.
///
/// Every method has a default, so a plain machine implements nothing. All
/// hooks run on the frame runner's thread at instruction or frame
/// boundaries, never in the middle of an instruction.
pub trait MachineHooks<M: MemoryBus> {
    /// Whether a pending clock multiplier change may be applied at this
    /// frame boundary. Machines veto it while an operation that depends on
    /// the current speed is in flight.
    fn allow_cpu_clock_change(&self, _cpu: &CPU<M>) -> bool {
        true
    }

    /// Called when a new frame starts, after any clock change.
    fn on_init_new_frame(&mut self, _cpu: &mut CPU<M>, _clock_changed: bool) {}

    /// Called at frame boundaries outside debug mode to feed queued keys.
    fn emulate_keystroke(&mut self, _cpu: &mut CPU<M>) {}

    fn before_instruction_executed(&mut self, _cpu: &mut CPU<M>) {}

    fn after_instruction_executed(&mut self, _cpu: &mut CPU<M>) {}

    /// Handles one event from the machine's [`EventQueue`] that came due.
    fn handle_event(&mut self, _cpu: &mut CPU<M>, _event: ScheduledEvent) {}

    /// Called after the due events are drained, for machines that keep
    /// their own event sources.
    fn consume_events(&mut self, _cpu: &mut CPU<M>) {}

    /// Whether execution reached the point the host asked to run to.
    ///
    /// The default matches PC against the context's termination point and,
    /// if one is given, the termination partition.
    fn test_termination_point(&self, cpu: &CPU<M>, context: &ExecutionContext) -> bool {
        if context.frame_termination_mode != FrameTerminationMode::UntilExecutionPoint {
            return false;
        }
        let pc = cpu.pc();
        context.termination_point == Some(pc)
            && (context.termination_partition.is_none()
                || context.termination_partition == cpu.memory().partition_of(pc))
    }

    /// Length of the call-like instruction at PC, or 0 if the instruction
    /// there is not a call. Step-over arms its imminent breakpoint at
    /// `PC + length`.
    fn call_instruction_length(&self, cpu: &CPU<M>) -> u16 {
        if cpu.memory().read(cpu.pc()) == JSR_OPCODE {
            3
        } else {
            0
        }
    }

    /// Executes a custom frame command after the frame runner yielded for
    /// it.
    fn process_frame_command(&mut self, _cpu: &mut CPU<M>, _command: u32) {}

    /// Steps the controller runs to place and start injected code.
    fn code_injection_flow(&self, _code: &CodeToInject) -> Vec<InjectionStep> {
        vec![InjectionStep::Inject]
    }
}

/// Hooks for a machine with no behavior beyond the CPU and its bus.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl<M: MemoryBus> MachineHooks<M> for NoHooks {}

// ========== Frame Commands ==========

/// A request for the frame runner to yield at the next instruction boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameCommand {
    Pause,
    Stop,
    /// Executed by [`MachineHooks::process_frame_command`].
    Custom(u32),
}

/// The single pending frame command, shared with other threads.
///
/// Writes replace any command not yet consumed; there is no queue.
///
/// ```
/// use lib6510::{FrameCommand, FrameCommandSlot};
///
/// let slot = FrameCommandSlot::new();
/// let host = slot.clone();
/// host.set(FrameCommand::Pause);
/// host.set(FrameCommand::Stop);
/// assert_eq!(slot.take(), Some(FrameCommand::Stop));
/// assert_eq!(slot.take(), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FrameCommandSlot(Arc<Mutex<Option<FrameCommand>>>);

impl FrameCommandSlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<FrameCommand>> {
        // The slot holds plain data, so a poisoned lock is still consistent
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set(&self, command: FrameCommand) {
        let previous = self.lock().replace(command);
        if let Some(previous) = previous {
            warn!(?previous, ?command, "frame command overwritten before it was consumed");
        }
    }

    pub fn peek(&self) -> Option<FrameCommand> {
        *self.lock()
    }

    pub fn is_pending(&self) -> bool {
        self.lock().is_some()
    }

    pub fn take(&self) -> Option<FrameCommand> {
        self.lock().take()
    }

    pub fn clear(&self) {
        *self.lock() = None;
    }
}

// ========== Event Queue ==========

/// A callback scheduled for a tact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledEvent {
    pub due_tact: u64,
    pub id: u32,
    pub payload: u32,
}

/// Events ordered by due tact; events due at the same tact keep their
/// scheduling order.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: VecDeque<ScheduledEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due_tact: u64, id: u32, payload: u32) {
        let index = self.events.partition_point(|e| e.due_tact <= due_tact);
        self.events.insert(
            index,
            ScheduledEvent {
                due_tact,
                id,
                payload,
            },
        );
    }

    /// Removes every event with the given id. Returns how many were removed.
    pub fn cancel(&mut self, id: u32) -> usize {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        before - self.events.len()
    }

    /// Pops the earliest event if it is due at `tacts`.
    pub fn pop_due(&mut self, tacts: u64) -> Option<ScheduledEvent> {
        match self.events.front() {
            Some(event) if event.due_tact <= tacts => self.events.pop_front(),
            _ => None,
        }
    }

    pub fn next_due(&self) -> Option<u64> {
        self.events.front().map(|e| e.due_tact)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

// ========== Code Injection ==========

/// One block of bytes to place into memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectedSegment {
    pub start_address: u16,
    /// When set, the bytes go into this partition at `bank_offset`
    /// regardless of the current paging.
    #[serde(default)]
    pub bank: Option<Partition>,
    #[serde(default)]
    pub bank_offset: u16,
    pub bytes: Vec<u8>,
}

/// Compiled code handed over by an assembler or compiler integration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeToInject {
    pub segments: Vec<InjectedSegment>,
    /// Entry point; the start of the first segment when missing.
    #[serde(default)]
    pub entry: Option<u16>,
    /// Run the code as a subroutine returning to the machine's return point.
    #[serde(default)]
    pub subroutine: bool,
}

impl CodeToInject {
    pub fn entry_point(&self) -> Option<u16> {
        self.entry
            .or_else(|| self.segments.first().map(|s| s.start_address))
    }
}

/// One step of a machine's code injection flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectionStep {
    /// Run until PC reaches `point` (for example, the end of the ROM's
    /// initialization) before touching memory.
    ReachExecPoint {
        point: u16,
        partition: Option<Partition>,
    },
    Inject,
    /// Push `return_point` so that the injected code returns there with RTS.
    /// Only applies to code marked as a subroutine.
    SetReturn { return_point: u16 },
}

// ========== Machine ==========

/// A CPU, its machine hooks and the frame runner state.
pub struct Machine<M: MemoryBus, H: MachineHooks<M>> {
    pub(crate) cpu: CPU<M>,
    pub(crate) hooks: H,
    pub(crate) context: ExecutionContext,
    pub(crate) frame_commands: FrameCommandSlot,
    pub(crate) events: EventQueue,
    config: MachineConfig,

    pub(crate) target_clock_multiplier: u8,
    pub(crate) current_frame_start: u64,
    pub(crate) next_frame_start_tact: u64,
    pub(crate) frame_overflow: u64,
    pub(crate) frame_completed: bool,
    pub(crate) tacts_at_last_start: u64,
}

impl<M: MemoryBus, H: MachineHooks<M>> Machine<M, H> {
    /// Creates a machine with the default configuration and debug support
    /// attached.
    ///
    /// The configuration takes its bank counts from the memory's partition
    /// layout.
    pub fn new(memory: M, hooks: H) -> Self {
        let layout = memory.partition_layout();
        let config = MachineConfig {
            rom_banks: layout.rom_banks,
            ram_banks: layout.ram_banks,
            ..MachineConfig::default()
        };
        let mut machine = Self {
            cpu: CPU::new(memory),
            hooks,
            context: ExecutionContext::with_debug_support(),
            frame_commands: FrameCommandSlot::new(),
            events: EventQueue::new(),
            target_clock_multiplier: config.clock_multiplier,
            config,
            current_frame_start: 0,
            next_frame_start_tact: 0,
            frame_overflow: 0,
            frame_completed: true,
            tacts_at_last_start: 0,
        };
        machine.apply_config();
        machine
    }

    /// Creates a machine from a validated configuration. The declared bank
    /// counts must match the memory's partition layout.
    pub fn with_config(memory: M, hooks: H, config: MachineConfig) -> ConfigResult<Self> {
        config.validate()?;
        let layout = memory.partition_layout();
        if config.partition_layout() != layout {
            return Err(ConfigError::PartitionLayoutMismatch {
                config: config.partition_layout(),
                memory: layout,
            });
        }
        let mut machine = Self::new(memory, hooks);
        machine.target_clock_multiplier = config.clock_multiplier;
        machine.config = config;
        machine.apply_config();
        Ok(machine)
    }

    fn apply_config(&mut self) {
        self.cpu.set_tacts_in_frame(self.config.tacts_in_frame);
        self.cpu.set_clock_multiplier(self.config.clock_multiplier);
        self.cpu
            .set_stall_watchdog_tacts(self.config.stall_watchdog_tacts);
    }

    // ========== Accessors ==========

    pub fn cpu(&self) -> &CPU<M> {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut CPU<M> {
        &mut self.cpu
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut ExecutionContext {
        &mut self.context
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn debug_support(&self) -> Option<&DebugSupport> {
        self.context.debug_support.as_ref()
    }

    pub fn debug_support_mut(&mut self) -> Option<&mut DebugSupport> {
        self.context.debug_support.as_mut()
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    /// Schedules an event `delay` tacts from now.
    pub fn schedule_event(&mut self, delay: u64, id: u32, payload: u32) {
        self.events.schedule(self.cpu.tacts() + delay, id, payload);
    }

    pub fn cancel_event(&mut self, id: u32) -> usize {
        self.events.cancel(id)
    }

    // ========== Frame Commands ==========

    /// A handle another thread can use to post frame commands.
    pub fn frame_command_slot(&self) -> FrameCommandSlot {
        self.frame_commands.clone()
    }

    pub fn set_frame_command(&self, command: FrameCommand) {
        self.frame_commands.set(command);
    }

    /// The command that made the last frame yield, if any.
    pub fn take_frame_command(&self) -> Option<FrameCommand> {
        self.frame_commands.take()
    }

    // ========== Frame Bookkeeping ==========

    pub fn target_clock_multiplier(&self) -> u8 {
        self.target_clock_multiplier
    }

    /// Requests a clock multiplier; it takes effect at the next frame
    /// boundary that allows it.
    pub fn set_target_clock_multiplier(&mut self, multiplier: u8) {
        self.target_clock_multiplier = multiplier.clamp(1, MAX_CLOCK_MULTIPLIER);
    }

    pub fn frame_completed(&self) -> bool {
        self.frame_completed
    }

    pub fn current_frame_start(&self) -> u64 {
        self.current_frame_start
    }

    pub fn next_frame_start_tact(&self) -> u64 {
        self.next_frame_start_tact
    }

    /// Tacts the last completed frame ran past its end.
    pub fn frame_overflow(&self) -> u64 {
        self.frame_overflow
    }

    pub fn tacts_at_last_start(&self) -> u64 {
        self.tacts_at_last_start
    }

    pub(crate) fn mark_start(&mut self) {
        self.tacts_at_last_start = self.cpu.tacts();
    }

    /// Tacts executed since the controller last started the machine.
    pub fn tacts_since_last_start(&self) -> u64 {
        self.cpu.tacts() - self.tacts_at_last_start
    }

    // ========== Reset ==========

    /// Resets the CPU and the frame bookkeeping. Breakpoints and stepping
    /// markers are kept.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.apply_config();
        self.reset_frame_state();
    }

    /// `reset()` plus clearing the step-out stack and pending events.
    pub fn hard_reset(&mut self) {
        self.cpu.hard_reset();
        self.apply_config();
        self.events.clear();
        self.frame_commands.clear();
        self.reset_frame_state();
    }

    fn reset_frame_state(&mut self) {
        self.frame_completed = true;
        self.frame_overflow = 0;
        self.current_frame_start = 0;
        self.next_frame_start_tact = 0;
        self.tacts_at_last_start = 0;
        self.context.last_termination_reason = None;
    }

    // ========== Breakpoints ==========

    /// Validates a breakpoint against the machine's partition layout and adds
    /// it. Attaches debug support if the machine had none.
    ///
    /// Returns true if the breakpoint is new.
    pub fn add_breakpoint(&mut self, info: BreakpointInfo) -> BreakpointResult<bool> {
        info.validate(&self.config.partition_layout())?;
        Ok(self
            .context
            .debug_support
            .get_or_insert_with(DebugSupport::new)
            .add_breakpoint(info))
    }

    /// Parses `partition:address` text into an execution breakpoint.
    pub fn parse_exec_breakpoint(&self, text: &str) -> BreakpointResult<BreakpointInfo> {
        let parsed = parse_breakpoint_address(text, &self.config.partition_layout())?;
        let info = BreakpointInfo::exec(parsed.address);
        Ok(match parsed.partition {
            Some(partition) => info.with_partition(partition),
            None => info,
        })
    }

    pub fn remove_breakpoint(&mut self, key: &BreakpointKey) -> BreakpointResult<()> {
        let removed = self
            .context
            .debug_support
            .as_mut()
            .is_some_and(|debug| debug.remove_breakpoint(key));
        if removed {
            Ok(())
        } else {
            Err(BreakpointError::UnknownBreakpoint)
        }
    }

    pub fn enable_breakpoint(&mut self, key: &BreakpointKey, enabled: bool) -> BreakpointResult<()> {
        let found = self
            .context
            .debug_support
            .as_mut()
            .is_some_and(|debug| debug.enable_breakpoint(key, enabled));
        if found {
            Ok(())
        } else {
            Err(BreakpointError::UnknownBreakpoint)
        }
    }

    pub fn enable_breakpoint_kind(
        &mut self,
        key: &BreakpointKey,
        kind: BreakpointKind,
        enabled: bool,
    ) -> BreakpointResult<()> {
        let found = self
            .context
            .debug_support
            .as_mut()
            .is_some_and(|debug| debug.enable_breakpoint_kind(key, kind, enabled));
        if found {
            Ok(())
        } else {
            Err(BreakpointError::UnknownBreakpoint)
        }
    }

    /// Copies the top of the CPU's step-out stack into debug support.
    pub fn mark_step_out_address(&mut self) {
        let top = self.cpu.step_out_stack().top();
        if let Some(debug) = self.context.debug_support.as_mut() {
            debug.mark_step_out_address(top);
        }
    }

    /// Clears the stepping markers and the CPU's step-out stack.
    pub fn reset_debug_state(&mut self) {
        self.cpu.step_out_stack_mut().clear();
        if let Some(debug) = self.context.debug_support.as_mut() {
            debug.reset_debug_state();
        }
    }

    // ========== Code Injection ==========

    /// Writes the code's segments into memory and returns its entry point.
    ///
    /// Segments with a bank bypass the current paging; the others are
    /// written through the bus at their start address. No tacts are
    /// consumed.
    pub fn inject_code(&mut self, code: &CodeToInject) -> InjectionResult<u16> {
        let entry = code.entry_point().ok_or(InjectionError::NoSegments)?;
        for segment in &code.segments {
            match segment.bank {
                Some(partition) => {
                    for (i, &byte) in segment.bytes.iter().enumerate() {
                        let offset = segment.bank_offset.wrapping_add(i as u16);
                        if !self.cpu.memory_mut().write_partition(partition, offset, byte) {
                            return Err(InjectionError::PartitionWriteRejected { partition, offset });
                        }
                    }
                }
                None => {
                    for (i, &byte) in segment.bytes.iter().enumerate() {
                        let addr = segment.start_address.wrapping_add(i as u16);
                        self.cpu.memory_mut().write(addr, byte);
                    }
                }
            }
        }
        debug!(entry, segments = code.segments.len(), "code injected");
        Ok(entry)
    }

    /// Pushes a return address so that an RTS at the end of injected code
    /// continues at `return_point`.
    pub fn push_return_address(&mut self, return_point: u16) {
        let pushed = return_point.wrapping_sub(1);
        let cpu = &mut self.cpu;
        for byte in [(pushed >> 8) as u8, pushed as u8] {
            let sp = cpu.sp;
            cpu.memory.write(0x0100 | sp as u16, byte);
            cpu.sp = sp.wrapping_sub(1);
        }
    }
}
