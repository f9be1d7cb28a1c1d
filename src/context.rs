//! Execution context shared by the frame runner and debug support.
//!
//! The frame runner owns `last_termination_reason`; debug support owns the
//! breakpoint state inside `debug_support`. The host sets the step mode and
//! termination point before each frame.

use serde::{Deserialize, Serialize};

use crate::debug::DebugSupport;
use crate::partition::Partition;

/// How the frame runner consults debug support between instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DebugStepMode {
    #[default]
    NoDebug,
    StepInto,
    StepOver,
    StepOut,
    StopAtBreakpoint,
}

impl DebugStepMode {
    pub fn is_debug(self) -> bool {
        self != DebugStepMode::NoDebug
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FrameTerminationMode {
    #[default]
    Normal,
    /// Stop as soon as PC reaches the termination point.
    UntilExecutionPoint,
}

/// Why a call to `execute_machine_frame` returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationReason {
    /// The frame completed, or a frame command asked to yield.
    Normal,
    UntilExecutionPoint,
    /// A breakpoint, watchpoint or step completed.
    DebugEvent,
}

impl TerminationReason {
    pub fn as_str(self) -> &'static str {
        match self {
            TerminationReason::Normal => "Normal",
            TerminationReason::UntilExecutionPoint => "UntilExecutionPoint",
            TerminationReason::DebugEvent => "DebugEvent",
        }
    }
}

#[derive(Default)]
pub struct ExecutionContext {
    pub debug_step_mode: DebugStepMode,
    pub frame_termination_mode: FrameTerminationMode,
    pub termination_point: Option<u16>,
    pub termination_partition: Option<Partition>,
    pub debug_support: Option<DebugSupport>,
    pub(crate) last_termination_reason: Option<TerminationReason>,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debug_support() -> Self {
        Self {
            debug_support: Some(DebugSupport::new()),
            ..Self::default()
        }
    }

    /// The reason the last frame call stopped; `None` while a call runs or
    /// before the first one.
    pub fn last_termination_reason(&self) -> Option<TerminationReason> {
        self.last_termination_reason
    }

    /// Runs until PC reaches `point` (optionally only while `partition` is
    /// paged in there).
    pub fn set_termination_point(&mut self, point: u16, partition: Option<Partition>) {
        self.frame_termination_mode = FrameTerminationMode::UntilExecutionPoint;
        self.termination_point = Some(point);
        self.termination_partition = partition;
    }

    pub fn clear_termination_point(&mut self) {
        self.frame_termination_mode = FrameTerminationMode::Normal;
        self.termination_point = None;
        self.termination_partition = None;
    }
}
