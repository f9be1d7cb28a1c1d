//! # 6510 Emulator Core
//!
//! A cycle-accurate NMOS 6502/6510 CPU emulator with a frame-based execution
//! scheduler and a debugger-grade run controller.
//!
//! The crate provides the CPU (documented and undocumented opcodes, exact
//! per-tact bus timing, stall and snooze), a frame runner that executes one
//! video frame's worth of tacts at a time, breakpoint and stepping support,
//! and a banked memory resolver for partition-qualified breakpoints.
//!
//! ## Quick Start
//!
//! ```rust
//! use lib6510::{CPU, FlatMemory, MemoryBus};
//!
//! // Create 64KB flat memory
//! let mut memory = FlatMemory::new();
//!
//! // Set reset vector to point to program start at 0x8000
//! memory.write(0xFFFC, 0x00); // Low byte
//! memory.write(0xFFFD, 0x80); // High byte
//!
//! // Initialize CPU - it will load PC from the reset vector
//! let mut cpu = CPU::new(memory);
//!
//! assert_eq!(cpu.pc(), 0x8000);
//! assert_eq!(cpu.sp(), 0xFD);
//! assert_eq!(cpu.flag_i(), true);
//! ```
//!
//! ## Debugging a Frame
//!
//! ```rust
//! use lib6510::{BreakpointInfo, DebugStepMode, FlatMemory, Machine, MemoryBus, NoHooks, TerminationReason};
//!
//! let mut memory = FlatMemory::new();
//! memory.write(0xFFFC, 0x00);
//! memory.write(0xFFFD, 0x80);
//! // $8000: INX; INX; JMP $8000
//! memory.load(0x8000, &[0xE8, 0xE8, 0x4C, 0x00, 0x80]);
//!
//! let mut machine = Machine::new(memory, NoHooks);
//! machine.add_breakpoint(BreakpointInfo::exec(0x8001)).unwrap();
//! machine.context_mut().debug_step_mode = DebugStepMode::StopAtBreakpoint;
//!
//! assert_eq!(machine.execute_machine_frame(), TerminationReason::DebugEvent);
//! assert_eq!(machine.cpu().pc(), 0x8001);
//! assert_eq!(machine.cpu().x(), 1);
//! ```
//!
//! ## Modules
//!
//! - `cpu` - CPU state, bus timing and the fetch-decode-execute loop
//! - `memory` - MemoryBus trait and flat memory
//! - `partition` - Partitions and the banked memory resolver
//! - `opcodes` - Opcode metadata table
//! - `addressing` - Addressing mode enumerations
//! - `debug` - Breakpoint registry and stepping state
//! - `machine` - Machine hooks, frame commands, events and code injection
//! - `controller` - Host run control
//! - `config` - Machine configuration
//! - `error` - Error types for host-facing entry points

pub mod addressing;
pub mod config;
pub mod context;
pub mod controller;
pub mod cpu;
pub mod debug;
pub mod error;
pub mod machine;
pub mod memory;
pub mod opcodes;
pub mod partition;
pub mod wasm;

// Internal implementations (not part of public API)
mod frame_runner;
mod instructions;

// Re-export public API
pub use addressing::AddressingMode;
pub use config::MachineConfig;
pub use context::{DebugStepMode, ExecutionContext, FrameTerminationMode, TerminationReason};
pub use controller::{ControllerState, FrameStats, MachineController};
pub use cpu::{StallLine, CPU};
pub use debug::{
    parse_breakpoint_address, parse_numeric_literal, BreakpointAddress, BreakpointInfo,
    BreakpointKey, BreakpointKind, DebugSupport, StepOutStack,
};
pub use error::{
    BreakpointError, BreakpointResult, ConfigError, ConfigResult, ControllerError,
    ControllerResult, InjectionError, InjectionResult,
};
pub use machine::{
    CodeToInject, EventQueue, FrameCommand, FrameCommandSlot, InjectedSegment, InjectionStep,
    Machine, MachineHooks, NoHooks, ScheduledEvent,
};
pub use memory::{FlatMemory, MemoryBus};
pub use opcodes::{Mnemonic, OpcodeMetadata, OPCODE_TABLE};
pub use partition::{BankedMemory, Cell, Partition, PartitionLayout};
