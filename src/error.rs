//! Error types for the host-facing entry points.
//!
//! The CPU core and the frame runner never fail: all arithmetic wraps and all
//! addresses are taken modulo 0x10000. Errors only arise where a host hands
//! in configuration (breakpoints, machine settings) or drives the controller
//! from a state where the requested operation makes no sense.

use thiserror::Error;

use crate::controller::ControllerState;
use crate::partition::{Partition, PartitionLayout};

/// Rejected breakpoint definitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BreakpointError {
    #[error("invalid address literal: '{0}'")]
    InvalidLiteral(String),

    #[error("address {0} is out of the 0x0000-0xFFFF range")]
    AddressOutOfRange(i64),

    #[error("invalid partition label: '{0}'")]
    InvalidPartitionLabel(String),

    #[error("this model does not support partitions")]
    PartitionsNotSupported,

    #[error("ROM bank {bank} is out of range (the model has {count} ROM banks)")]
    RomBankOutOfRange { bank: u8, count: u8 },

    #[error("RAM bank {bank} is out of range (the model has {count} RAM banks)")]
    RamBankOutOfRange { bank: u8, count: u8 },

    #[error("I/O breakpoints cannot be partitioned")]
    PartitionedIoBreakpoint,

    #[error("no breakpoint matches the given key")]
    UnknownBreakpoint,
}

pub type BreakpointResult<T> = Result<T, BreakpointError>;

/// Host run-control requests that are illegal in the current state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControllerError {
    #[error("the machine is already running")]
    AlreadyRunning,

    #[error("the machine is not running (state: {0:?})")]
    NotRunning(ControllerState),

    #[error("stepping requires a paused machine (state: {0:?})")]
    NotPaused(ControllerState),

    #[error("the machine has no debug support attached")]
    NoDebugSupport,

    #[error("execution point {0:#06x} was not reached")]
    ExecPointNotReached(u16),

    #[error(transparent)]
    Injection(#[from] InjectionError),
}

pub type ControllerResult<T> = Result<T, ControllerError>;

/// Code that cannot be placed into the machine's memory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InjectionError {
    #[error("no code segments to inject")]
    NoSegments,

    #[error("partition {partition} cannot be written at offset {offset:#06x}")]
    PartitionWriteRejected { partition: Partition, offset: u16 },
}

pub type InjectionResult<T> = Result<T, InjectionError>;

/// Invalid machine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse machine configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("tacts per frame must be positive")]
    ZeroTactsInFrame,

    #[error("clock multiplier must be positive")]
    ZeroClockMultiplier,

    #[error("clock multiplier {0} exceeds the supported maximum of {max}", max = crate::config::MAX_CLOCK_MULTIPLIER)]
    ClockMultiplierTooLarge(u8),

    #[error(
        "configuration declares {} ROM and {} RAM banks but the memory has {} and {}",
        .config.rom_banks, .config.ram_banks, .memory.rom_banks, .memory.ram_banks
    )]
    PartitionLayoutMismatch {
        config: PartitionLayout,
        memory: PartitionLayout,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
