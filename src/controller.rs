//! # Machine Controller
//!
//! Host run control on top of [`Machine::execute_machine_frame`]: start,
//! pause, stop, the three step commands, running to an execution point and
//! running injected code.
//!
//! The controller is synchronous. A host drives it with
//! [`MachineController::run_frames`] from its own timer or thread and owns
//! wall-clock pacing; other threads interrupt a running frame through the
//! machine's [`FrameCommandSlot`](crate::FrameCommandSlot).
//!
//! ## States
//!
//! ```text
//! None/Stopped --start--> Running --pause--> Pausing -> Paused
//!                            |                            |
//!                            +--stop--> Stopping -> Stopped
//! Paused --start/step_*--> Running
//! ```

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::context::{DebugStepMode, TerminationReason};
use crate::error::{ControllerError, ControllerResult};
use crate::machine::{CodeToInject, FrameCommand, InjectionStep, Machine, MachineHooks};
use crate::partition::Partition;
use crate::MemoryBus;

/// Upper bound of frames `run_code` runs while waiting for an execution
/// point of the injection flow.
pub const EXEC_POINT_FRAME_LIMIT: u64 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControllerState {
    #[default]
    None,
    Running,
    Pausing,
    Paused,
    Stopping,
    Stopped,
}

/// Frame timing collected while running.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameStats {
    pub frame_count: u64,
    pub last_frame_tacts: u64,
    pub avg_frame_tacts: f64,
}

impl FrameStats {
    fn record(&mut self, frame_tacts: u64) {
        self.frame_count += 1;
        self.last_frame_tacts = frame_tacts;
        let n = self.frame_count as f64;
        self.avg_frame_tacts += (frame_tacts as f64 - self.avg_frame_tacts) / n;
    }
}

/// An execution point to run to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ExecPoint {
    address: u16,
    partition: Option<Partition>,
}

pub struct MachineController<M: MemoryBus, H: MachineHooks<M>> {
    machine: Machine<M, H>,
    state: ControllerState,
    is_debugging: bool,
    frame_stats: FrameStats,
    /// Tacts spent in the frame currently being executed.
    partial_frame_tacts: u64,
}

impl<M: MemoryBus, H: MachineHooks<M>> MachineController<M, H> {
    pub fn new(machine: Machine<M, H>) -> Self {
        Self {
            machine,
            state: ControllerState::None,
            is_debugging: false,
            frame_stats: FrameStats::default(),
            partial_frame_tacts: 0,
        }
    }

    pub fn machine(&self) -> &Machine<M, H> {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut Machine<M, H> {
        &mut self.machine
    }

    pub fn into_machine(self) -> Machine<M, H> {
        self.machine
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn is_debugging(&self) -> bool {
        self.is_debugging
    }

    pub fn frame_stats(&self) -> FrameStats {
        self.frame_stats
    }

    fn set_state(&mut self, state: ControllerState) {
        if state != self.state {
            info!(from = ?self.state, to = ?state, pc = self.machine.cpu().pc(), "machine state changed");
            self.state = state;
        }
    }

    // ========== Run Control ==========

    /// Starts (or resumes) the machine without debugging.
    pub fn start(&mut self) -> ControllerResult<()> {
        self.is_debugging = false;
        self.run(DebugStepMode::NoDebug, None)
    }

    /// Starts (or resumes) the machine, stopping at breakpoints.
    pub fn start_debug(&mut self) -> ControllerResult<()> {
        self.require_debug_support()?;
        self.is_debugging = true;
        self.run(DebugStepMode::StopAtBreakpoint, None)
    }

    /// Runs until PC reaches `point` (in `partition`, if given). Reaching it
    /// pauses the machine.
    pub fn start_at(
        &mut self,
        point: u16,
        partition: Option<Partition>,
        debug: bool,
    ) -> ControllerResult<()> {
        let mode = if debug {
            self.require_debug_support()?;
            DebugStepMode::StopAtBreakpoint
        } else {
            DebugStepMode::NoDebug
        };
        self.is_debugging = debug;
        self.run(
            mode,
            Some(ExecPoint {
                address: point,
                partition,
            }),
        )
    }

    pub fn pause(&mut self) -> ControllerResult<()> {
        if self.state != ControllerState::Running {
            return Err(ControllerError::NotRunning(self.state));
        }
        self.set_state(ControllerState::Pausing);
        self.set_state(ControllerState::Paused);
        Ok(())
    }

    /// Stops the machine from any state and forgets the stepping markers, the
    /// step-out stack and the frame statistics. Breakpoints are kept.
    pub fn stop(&mut self) {
        self.is_debugging = false;
        if !matches!(self.state, ControllerState::None | ControllerState::Stopped) {
            self.set_state(ControllerState::Stopping);
        }
        self.set_state(ControllerState::Stopped);

        self.frame_stats = FrameStats::default();
        self.partial_frame_tacts = 0;
        self.machine.reset_debug_state();
    }

    /// Stops, hard-resets and starts again.
    pub fn restart(&mut self) -> ControllerResult<()> {
        self.stop();
        self.machine.hard_reset();
        self.start()
    }

    /// Stops, resets the CPU only and starts again.
    pub fn reset_cpu(&mut self) -> ControllerResult<()> {
        self.stop();
        self.machine.reset();
        self.start()
    }

    pub fn step_into(&mut self) -> ControllerResult<()> {
        self.step(DebugStepMode::StepInto)
    }

    pub fn step_over(&mut self) -> ControllerResult<()> {
        self.step(DebugStepMode::StepOver)
    }

    /// Runs until the current subroutine returns to its caller.
    pub fn step_out(&mut self) -> ControllerResult<()> {
        self.step(DebugStepMode::StepOut)
    }

    fn step(&mut self, mode: DebugStepMode) -> ControllerResult<()> {
        if self.state != ControllerState::Paused {
            return Err(ControllerError::NotPaused(self.state));
        }
        self.require_debug_support()?;
        self.is_debugging = true;
        self.machine.cpu_mut().awake();
        self.run(mode, None)
    }

    fn require_debug_support(&self) -> ControllerResult<()> {
        if self.machine.debug_support().is_none() {
            return Err(ControllerError::NoDebugSupport);
        }
        Ok(())
    }

    fn run(&mut self, mode: DebugStepMode, point: Option<ExecPoint>) -> ControllerResult<()> {
        match self.state {
            ControllerState::Running => return Err(ControllerError::AlreadyRunning),
            ControllerState::None | ControllerState::Stopped => {
                self.machine.hard_reset();
                self.machine.mark_start();
            }
            _ => {}
        }

        let context = self.machine.context_mut();
        context.debug_step_mode = mode;
        match point {
            Some(point) => context.set_termination_point(point.address, point.partition),
            None => context.clear_termination_point(),
        }
        if mode == DebugStepMode::StepOut {
            self.machine.mark_step_out_address();
        }
        self.set_state(ControllerState::Running);
        Ok(())
    }

    /// Executes up to `max_frames` frame calls while the machine is running.
    ///
    /// Returns the termination reason of the last call. Debug events and
    /// reaching the execution point pause the machine; `Pause` and `Stop`
    /// frame commands pause or stop it; custom commands go to the machine
    /// hooks and the run continues.
    pub fn run_frames(&mut self, max_frames: u64) -> ControllerResult<TerminationReason> {
        if self.state != ControllerState::Running {
            return Err(ControllerError::NotRunning(self.state));
        }

        let mut reason = TerminationReason::Normal;
        for _ in 0..max_frames {
            let start = self.machine.cpu().tacts();
            reason = self.machine.execute_machine_frame();
            self.partial_frame_tacts += self.machine.cpu().tacts() - start;

            if reason == TerminationReason::Normal && self.machine.frame_completed() {
                self.frame_stats.record(self.partial_frame_tacts);
                self.partial_frame_tacts = 0;
            }

            match reason {
                TerminationReason::DebugEvent | TerminationReason::UntilExecutionPoint => {
                    self.set_state(ControllerState::Pausing);
                    self.set_state(ControllerState::Paused);
                    break;
                }
                TerminationReason::Normal => match self.machine.take_frame_command() {
                    Some(FrameCommand::Pause) => {
                        self.pause()?;
                        break;
                    }
                    Some(FrameCommand::Stop) => {
                        self.stop();
                        break;
                    }
                    Some(FrameCommand::Custom(command)) => {
                        let Machine { cpu, hooks, .. } = &mut self.machine;
                        hooks.process_frame_command(cpu, command);
                    }
                    None => {}
                },
            }
        }
        Ok(reason)
    }

    // ========== Code Injection ==========

    /// Stops the machine, places `code` into memory following the machine's
    /// injection flow and starts it at the code's entry point.
    ///
    /// Returns the entry point.
    pub fn run_code(&mut self, code: &CodeToInject, debug: bool) -> ControllerResult<u16> {
        if debug {
            self.require_debug_support()?;
        }
        self.stop();
        self.machine.hard_reset();
        self.machine.mark_start();
        self.set_state(ControllerState::Paused);

        let mut entry = None;
        for step in self.machine.hooks().code_injection_flow(code) {
            match step {
                InjectionStep::ReachExecPoint { point, partition } => {
                    self.start_at(point, partition, debug)?;
                    self.run_frames(EXEC_POINT_FRAME_LIMIT)?;
                    if self.machine.context().last_termination_reason()
                        != Some(TerminationReason::UntilExecutionPoint)
                    {
                        self.stop();
                        return Err(ControllerError::ExecPointNotReached(point));
                    }
                }
                InjectionStep::Inject => {
                    entry = Some(self.machine.inject_code(code)?);
                }
                InjectionStep::SetReturn { return_point } => {
                    if code.subroutine {
                        self.machine.push_return_address(return_point);
                    }
                }
            }
        }

        let entry = match entry {
            Some(entry) => entry,
            None => self.machine.inject_code(code)?,
        };
        info!(entry, subroutine = code.subroutine, "starting injected code");
        self.machine.cpu_mut().set_pc(entry);
        if debug {
            self.start_debug()?;
        } else {
            self.start()?;
        }
        Ok(entry)
    }
}
