//! Tests for the machine controller.
//!
//! Tests cover:
//! - State transitions and the errors for illegal requests
//! - Running frames and the frame statistics
//! - Pause, stop and custom frame commands
//! - The step commands through the controller
//! - Running to an execution point
//! - Injecting and running code, including the subroutine return

use lib6510::{
    BreakpointInfo, CodeToInject, ControllerError, ControllerState, FlatMemory, FrameCommand,
    FrameCommandSlot, InjectedSegment, InjectionStep, Machine, MachineConfig, MachineController,
    MachineHooks, MemoryBus, NoHooks, TerminationReason, CPU,
};

/// $8000: NOP; NOP; NOP; JMP $8003
const IDLE_LOOP: [u8; 6] = [0xEA, 0xEA, 0xEA, 0x4C, 0x03, 0x80];

fn idle_memory() -> FlatMemory {
    let mut memory = FlatMemory::new();
    memory.write(0xFFFC, 0x00);
    memory.write(0xFFFD, 0x80);
    memory.load(0x8000, &IDLE_LOOP);
    memory
}

fn small_frames() -> MachineConfig {
    MachineConfig {
        tacts_in_frame: 120,
        ..MachineConfig::default()
    }
}

/// Helper function to create a controller around the idle loop
fn setup_controller() -> MachineController<FlatMemory, NoHooks> {
    let machine = Machine::with_config(idle_memory(), NoHooks, small_frames()).unwrap();
    MachineController::new(machine)
}

/// Hooks posting a frame command after a number of instructions and
/// recording the custom commands they process.
#[derive(Default)]
struct CommandHooks {
    slot: Option<FrameCommandSlot>,
    post_after: usize,
    command: Option<FrameCommand>,
    instructions: usize,
    processed: Vec<u32>,
}

impl MachineHooks<FlatMemory> for CommandHooks {
    fn after_instruction_executed(&mut self, _cpu: &mut CPU<FlatMemory>) {
        self.instructions += 1;
        if self.instructions == self.post_after {
            if let (Some(slot), Some(command)) = (&self.slot, self.command) {
                slot.set(command);
            }
        }
    }

    fn process_frame_command(&mut self, _cpu: &mut CPU<FlatMemory>, command: u32) {
        self.processed.push(command);
    }
}

fn command_controller(command: FrameCommand) -> MachineController<FlatMemory, CommandHooks> {
    let hooks = CommandHooks {
        post_after: 3,
        command: Some(command),
        ..CommandHooks::default()
    };
    let mut machine = Machine::with_config(idle_memory(), hooks, small_frames()).unwrap();
    let slot = machine.frame_command_slot();
    machine.hooks_mut().slot = Some(slot);
    MachineController::new(machine)
}

/// Hooks with a machine-specific injection flow.
struct InjectionHooks {
    flow: Vec<InjectionStep>,
}

impl MachineHooks<FlatMemory> for InjectionHooks {
    fn code_injection_flow(&self, _code: &CodeToInject) -> Vec<InjectionStep> {
        self.flow.clone()
    }
}

fn subroutine_code() -> CodeToInject {
    CodeToInject {
        segments: vec![InjectedSegment {
            start_address: 0x9000,
            bank: None,
            bank_offset: 0,
            // INX; INX; RTS
            bytes: vec![0xE8, 0xE8, 0x60],
        }],
        entry: None,
        subroutine: true,
    }
}

// ========== States ==========

#[test]
fn test_initial_state() {
    let controller = setup_controller();
    assert_eq!(controller.state(), ControllerState::None);
    assert!(!controller.is_debugging());
}

#[test]
fn test_run_frames_requires_running() {
    let mut controller = setup_controller();
    assert_eq!(
        controller.run_frames(1),
        Err(ControllerError::NotRunning(ControllerState::None))
    );
}

#[test]
fn test_start_twice_fails() {
    let mut controller = setup_controller();
    controller.start().unwrap();
    assert_eq!(controller.start(), Err(ControllerError::AlreadyRunning));
}

#[test]
fn test_pause_requires_running() {
    let mut controller = setup_controller();
    assert_eq!(
        controller.pause(),
        Err(ControllerError::NotRunning(ControllerState::None))
    );

    controller.start().unwrap();
    controller.pause().unwrap();
    assert_eq!(controller.state(), ControllerState::Paused);
}

#[test]
fn test_step_requires_paused() {
    let mut controller = setup_controller();
    controller.start().unwrap();
    assert_eq!(
        controller.step_into(),
        Err(ControllerError::NotPaused(ControllerState::Running))
    );
}

#[test]
fn test_debug_requires_debug_support() {
    let mut controller = setup_controller();
    controller.machine_mut().context_mut().debug_support = None;

    assert_eq!(controller.start_debug(), Err(ControllerError::NoDebugSupport));

    controller.start().unwrap();
    controller.pause().unwrap();
    assert_eq!(controller.step_over(), Err(ControllerError::NoDebugSupport));
}

// ========== Running ==========

#[test]
fn test_run_frames_collects_stats() {
    let mut controller = setup_controller();
    controller.start().unwrap();

    assert_eq!(controller.run_frames(3), Ok(TerminationReason::Normal));

    let stats = controller.frame_stats();
    assert_eq!(stats.frame_count, 3);
    assert!(stats.last_frame_tacts >= 120);
    assert!(stats.avg_frame_tacts >= 120.0);
    assert_eq!(controller.state(), ControllerState::Running);
}

#[test]
fn test_resume_after_pause_keeps_cpu_state() {
    let mut controller = setup_controller();
    controller.start().unwrap();
    controller.run_frames(1).unwrap();
    controller.pause().unwrap();
    let tacts = controller.machine().cpu().tacts();

    controller.start().unwrap();

    assert_eq!(controller.machine().cpu().tacts(), tacts);
    assert_eq!(controller.state(), ControllerState::Running);
}

#[test]
fn test_start_from_stopped_hard_resets() {
    let mut controller = setup_controller();
    controller.start().unwrap();
    controller.run_frames(2).unwrap();
    controller.stop();
    assert_eq!(controller.state(), ControllerState::Stopped);

    controller.start().unwrap();

    assert_eq!(controller.machine().cpu().tacts(), 0);
    assert_eq!(controller.machine().cpu().pc(), 0x8000);
}

#[test]
fn test_stop_clears_markers_and_stats() {
    let mut controller = setup_controller();
    controller
        .machine_mut()
        .add_breakpoint(BreakpointInfo::exec(0x8002))
        .unwrap();
    controller.start_debug().unwrap();
    assert_eq!(controller.run_frames(1), Ok(TerminationReason::DebugEvent));
    assert_eq!(controller.state(), ControllerState::Paused);

    controller.stop();

    let debug = controller.machine().debug_support().unwrap();
    assert_eq!(debug.last_breakpoint(), None);
    assert_eq!(debug.last_startup_breakpoint(), None);
    assert_eq!(debug.list_breakpoints().len(), 1);
    assert_eq!(controller.frame_stats().frame_count, 0);
    assert!(!controller.is_debugging());
}

#[test]
fn test_stop_forgets_step_out_stack() {
    // $8000: JSR $8010; $8010: NOP; JMP $8010
    let mut memory = idle_memory();
    memory.load(0x8000, &[0x20, 0x10, 0x80]);
    memory.load(0x8010, &[0xEA, 0x4C, 0x10, 0x80]);
    let machine = Machine::with_config(memory, NoHooks, small_frames()).unwrap();
    let mut controller = MachineController::new(machine);
    controller
        .machine_mut()
        .add_breakpoint(BreakpointInfo::exec(0x8011))
        .unwrap();
    controller.start_debug().unwrap();
    assert_eq!(controller.run_frames(1), Ok(TerminationReason::DebugEvent));
    assert_eq!(controller.machine().cpu().step_out_stack().top(), Some(0x8003));

    controller.stop();

    assert!(controller.machine().cpu().step_out_stack().is_empty());
    assert_eq!(
        controller.machine().debug_support().unwrap().step_out_address(),
        None
    );
}

#[test]
fn test_restart() {
    let mut controller = setup_controller();
    controller.start().unwrap();
    controller.run_frames(2).unwrap();

    controller.restart().unwrap();

    assert_eq!(controller.state(), ControllerState::Running);
    assert_eq!(controller.machine().cpu().tacts(), 0);
}

// ========== Frame Commands ==========

#[test]
fn test_pause_command() {
    let mut controller = command_controller(FrameCommand::Pause);
    controller.start().unwrap();

    assert_eq!(controller.run_frames(5), Ok(TerminationReason::Normal));

    assert_eq!(controller.state(), ControllerState::Paused);
    assert_eq!(controller.machine().cpu().pc(), 0x8003);
}

#[test]
fn test_stop_command() {
    let mut controller = command_controller(FrameCommand::Stop);
    controller.start().unwrap();

    controller.run_frames(5).unwrap();

    assert_eq!(controller.state(), ControllerState::Stopped);
}

#[test]
fn test_custom_command_goes_to_hooks() {
    let mut controller = command_controller(FrameCommand::Custom(5));
    controller.start().unwrap();

    controller.run_frames(2).unwrap();

    assert_eq!(controller.machine().hooks().processed, vec![5]);
    assert_eq!(controller.state(), ControllerState::Running);
    // The interrupted frame is finished by the second call
    assert_eq!(controller.frame_stats().frame_count, 1);
}

// ========== Stepping ==========

#[test]
fn test_step_commands() {
    // $8000: JSR $9000; JMP $8000    $9000: NOP; RTS
    let mut memory = FlatMemory::new();
    memory.load(0xFFFC, &[0x00, 0x80]);
    memory.load(0x8000, &[0x20, 0x00, 0x90, 0x4C, 0x00, 0x80]);
    memory.load(0x9000, &[0xEA, 0x60]);
    let mut controller = MachineController::new(Machine::new(memory, NoHooks));
    controller
        .machine_mut()
        .add_breakpoint(BreakpointInfo::exec(0x8000))
        .unwrap();

    controller.start_debug().unwrap();
    assert_eq!(controller.run_frames(1), Ok(TerminationReason::DebugEvent));
    assert_eq!(controller.machine().cpu().pc(), 0x8000);

    controller.step_into().unwrap();
    assert!(controller.is_debugging());
    controller.run_frames(1).unwrap();
    assert_eq!(controller.machine().cpu().pc(), 0x9000);

    controller.step_out().unwrap();
    controller.run_frames(1).unwrap();
    assert_eq!(controller.machine().cpu().pc(), 0x8003);
    assert_eq!(controller.state(), ControllerState::Paused);

    controller.step_over().unwrap();
    controller.run_frames(1).unwrap();
    assert_eq!(controller.machine().cpu().pc(), 0x8000);
}

#[test]
fn test_step_over_call_through_controller() {
    let mut memory = FlatMemory::new();
    memory.load(0xFFFC, &[0x00, 0x10]);
    memory.load(0x1000, &[0x20, 0x00, 0x20, 0xEA]);
    memory.load(0x2000, &[0xEA, 0xEA, 0x60]);
    let mut controller = MachineController::new(Machine::new(memory, NoHooks));
    controller
        .machine_mut()
        .add_breakpoint(BreakpointInfo::exec(0x1000))
        .unwrap();
    controller.start_debug().unwrap();
    controller.run_frames(1).unwrap();

    controller.step_over().unwrap();
    assert_eq!(controller.run_frames(1), Ok(TerminationReason::DebugEvent));

    assert_eq!(controller.machine().cpu().pc(), 0x1003);
}

// ========== Execution Points ==========

#[test]
fn test_start_at_pauses_at_point() {
    let mut controller = setup_controller();

    controller.start_at(0x8003, None, false).unwrap();
    assert_eq!(
        controller.run_frames(10),
        Ok(TerminationReason::UntilExecutionPoint)
    );

    assert_eq!(controller.state(), ControllerState::Paused);
    assert_eq!(controller.machine().cpu().pc(), 0x8003);
    assert_eq!(controller.machine().tacts_since_last_start(), 6);
}

// ========== Code Injection ==========

#[test]
fn test_run_code_default_flow() {
    let mut controller = setup_controller();
    let code = CodeToInject {
        entry: Some(0x9001),
        subroutine: false,
        ..subroutine_code()
    };

    assert_eq!(controller.run_code(&code, false), Ok(0x9001));

    assert_eq!(controller.state(), ControllerState::Running);
    assert_eq!(controller.machine().cpu().pc(), 0x9001);
    assert_eq!(controller.machine().cpu().memory().read(0x9000), 0xE8);
}

#[test]
fn test_run_code_as_subroutine() {
    let hooks = InjectionHooks {
        flow: vec![
            InjectionStep::ReachExecPoint {
                point: 0x8003,
                partition: None,
            },
            InjectionStep::Inject,
            InjectionStep::SetReturn {
                return_point: 0x8003,
            },
        ],
    };
    let machine = Machine::with_config(idle_memory(), hooks, small_frames()).unwrap();
    let mut controller = MachineController::new(machine);

    assert_eq!(controller.run_code(&subroutine_code(), false), Ok(0x9000));
    assert_eq!(controller.machine().cpu().pc(), 0x9000);

    controller.run_frames(1).unwrap();

    // INX twice, then RTS back into the idle loop
    assert_eq!(controller.machine().cpu().x(), 2);
    assert_eq!(controller.machine().cpu().pc(), 0x8003);
    assert_eq!(controller.machine().cpu().sp(), 0xFD);
}

#[test]
fn test_run_code_exec_point_not_reached() {
    let hooks = InjectionHooks {
        flow: vec![
            InjectionStep::ReachExecPoint {
                point: 0x7000,
                partition: None,
            },
            InjectionStep::Inject,
        ],
    };
    let machine = Machine::with_config(idle_memory(), hooks, small_frames()).unwrap();
    let mut controller = MachineController::new(machine);

    assert_eq!(
        controller.run_code(&subroutine_code(), false),
        Err(ControllerError::ExecPointNotReached(0x7000))
    );
    assert_eq!(controller.state(), ControllerState::Stopped);
}

#[test]
fn test_run_code_without_segments() {
    let mut controller = setup_controller();
    assert!(matches!(
        controller.run_code(&CodeToInject::default(), false),
        Err(ControllerError::Injection(_))
    ));
}
