//! # Frame Runner
//!
//! Drives the CPU through one frame's worth of tacts, stopping early for a
//! breakpoint, a completed step, the termination point or a frame command.
//!
//! ## Loop
//!
//! Each iteration of [`Machine::execute_machine_frame`]:
//! 1. On a frame boundary: applies a pending clock multiplier change (if the
//!    hooks allow it), starts the new frame and, outside debug mode, feeds a
//!    queued keystroke
//! 2. Runs one instruction, or one snooze period
//! 3. Pops the step-out stack after an RTS, drains due events, runs the
//!    after-instruction hook
//! 4. In debug mode, checks the watchpoints against the instruction's bus
//!    accesses
//! 5. Tests the termination point, then (in debug mode) the breakpoint and
//!    step predicate
//! 6. Yields if a frame command is pending
//!
//! Debug mode also checks the breakpoint and step predicate once before the
//! first instruction. A breakpoint at the address where the previous call
//! stopped does not fire again there; step-over still arms on a call at
//! that address.

use tracing::debug;

use crate::context::{DebugStepMode, ExecutionContext, TerminationReason};
use crate::machine::{Machine, MachineHooks};
use crate::{MemoryBus, CPU};

impl<M: MemoryBus, H: MachineHooks<M>> Machine<M, H> {
    /// Runs the machine until the current frame completes or something stops
    /// it. Returns why it stopped; the same value is left in the context's
    /// `last_termination_reason`.
    ///
    /// Clears the frame command slot on entry.
    pub fn execute_machine_frame(&mut self) -> TerminationReason {
        self.frame_commands.clear();
        self.context.last_termination_reason = None;
        let reason = self.run_frame_loop();
        if reason != TerminationReason::Normal {
            if let Some(debug) = self.context.debug_support.as_mut() {
                debug.last_startup_breakpoint = Some(self.cpu.pc);
            }
        }
        if reason == TerminationReason::DebugEvent {
            debug!(pc = self.cpu.pc, mode = ?self.context.debug_step_mode, "stopped on debug event");
        }
        self.context.last_termination_reason = Some(reason);
        reason
    }

    fn run_frame_loop(&mut self) -> TerminationReason {
        let debug_mode =
            self.context.debug_step_mode.is_debug() && self.context.debug_support.is_some();
        let mut instructions_executed = 0u64;

        if debug_mode {
            if check_breakpoints(&mut self.context, &self.cpu, &self.hooks, instructions_executed) {
                return TerminationReason::DebugEvent;
            }
            if let Some(debug) = self.context.debug_support.as_mut() {
                debug.last_startup_breakpoint = None;
            }
        }

        loop {
            if self.frame_completed {
                self.start_new_frame(debug_mode);
            }

            self.hooks.before_instruction_executed(&mut self.cpu);

            loop {
                if self.cpu.is_snoozed() {
                    self.cpu.on_snooze();
                } else {
                    self.cpu.execute_cpu_cycle();
                }
                instructions_executed += 1;
                if !self.cpu.instruction_execution_in_progress() {
                    break;
                }
            }

            if self.cpu.take_ret_executed() {
                self.cpu.step_out_stack_mut().pop();
            }

            while let Some(event) = self.events.pop_due(self.cpu.tacts()) {
                self.hooks.handle_event(&mut self.cpu, event);
            }
            self.hooks.consume_events(&mut self.cpu);

            self.hooks.after_instruction_executed(&mut self.cpu);

            if debug_mode && self.watchpoint_hit() {
                return TerminationReason::DebugEvent;
            }

            if self.hooks.test_termination_point(&self.cpu, &self.context) {
                return TerminationReason::UntilExecutionPoint;
            }

            if debug_mode
                && check_breakpoints(&mut self.context, &self.cpu, &self.hooks, instructions_executed)
            {
                return TerminationReason::DebugEvent;
            }

            self.frame_completed = self.cpu.tacts() >= self.next_frame_start_tact;

            if self.frame_commands.is_pending() {
                return TerminationReason::Normal;
            }
            if self.frame_completed {
                break;
            }
        }

        self.frame_overflow = self.cpu.tacts() - self.next_frame_start_tact;
        TerminationReason::Normal
    }

    fn start_new_frame(&mut self, debug_mode: bool) {
        // The host may have rewound the tact counter through `cpu_mut()`
        self.current_frame_start = self.cpu.tacts().saturating_sub(self.frame_overflow);

        let mut clock_changed = false;
        if self.hooks.allow_cpu_clock_change(&self.cpu)
            && self.config().allow_clock_change
            && self.cpu.clock_multiplier() != self.target_clock_multiplier
        {
            self.cpu.set_clock_multiplier(self.target_clock_multiplier);
            clock_changed = true;
        }

        self.hooks.on_init_new_frame(&mut self.cpu, clock_changed);
        self.frame_completed = false;
        self.next_frame_start_tact = self.current_frame_start + self.cpu.tacts_in_current_frame();

        if !debug_mode {
            self.hooks.emulate_keystroke(&mut self.cpu);
        }
    }

    /// True if the last instruction touched a watched address or port.
    fn watchpoint_hit(&self) -> bool {
        let Some(debug) = self.context.debug_support.as_ref() else {
            return false;
        };
        let partition_of = |addr| self.cpu.memory().partition_of(addr);
        debug.has_memory_read(self.cpu.last_memory_reads(), partition_of)
            || debug.has_memory_write(self.cpu.last_memory_writes(), partition_of)
            || debug.has_io_read(self.cpu.last_io_read_port())
            || debug.has_io_write(self.cpu.last_io_write_port())
    }
}

/// The breakpoint and step predicate, evaluated at instruction boundaries.
fn check_breakpoints<M: MemoryBus, H: MachineHooks<M>>(
    context: &mut ExecutionContext,
    cpu: &CPU<M>,
    hooks: &H,
    instructions_executed: u64,
) -> bool {
    let mode = context.debug_step_mode;
    let Some(debug) = context.debug_support.as_mut() else {
        return false;
    };
    let pc = cpu.pc();

    if mode == DebugStepMode::StepInto {
        let stop = instructions_executed > 0;
        if stop {
            debug.imminent_breakpoint = None;
        }
        return stop;
    }

    // Before the first instruction, the address of the previous stop is not
    // evaluated again
    let resumed_here = instructions_executed == 0
        && (debug.last_breakpoint == Some(pc) || debug.last_startup_breakpoint == Some(pc));
    if !resumed_here && debug.should_stop_at(pc, |addr| cpu.memory().partition_of(addr)) {
        debug.last_breakpoint = Some(pc);
        debug.imminent_breakpoint = None;
        return true;
    }

    match mode {
        DebugStepMode::StepOver => {
            if let Some(imminent) = debug.imminent_breakpoint {
                if imminent == pc {
                    debug.imminent_breakpoint = None;
                    return true;
                }
                return false;
            }
            let length = hooks.call_instruction_length(cpu);
            let just_created = length > 0;
            if just_created {
                debug.imminent_breakpoint = Some(pc.wrapping_add(length));
            }
            if instructions_executed > 0 && (debug.imminent_breakpoint.is_none() || just_created) {
                debug.imminent_breakpoint = None;
                return true;
            }
            false
        }
        DebugStepMode::StepOut => {
            if debug.step_out_address == Some(pc) {
                debug.imminent_breakpoint = None;
                return true;
            }
            false
        }
        _ => false,
    }
}
