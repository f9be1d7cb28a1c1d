//! WASM API for the 6510 emulator.
//!
//! Provides JavaScript-callable interfaces for frame execution, breakpoints,
//! stepping and state inspection on a 64KB flat-memory machine.

use crate::{
    BreakpointInfo, BreakpointKey, DebugStepMode, FlatMemory, Machine, MemoryBus, NoHooks,
    TerminationReason,
};
use wasm_bindgen::prelude::*;

/// JavaScript-compatible error wrapper
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsError {
    message: String,
}

#[wasm_bindgen]
impl JsError {
    #[wasm_bindgen(constructor)]
    pub fn new(message: &str) -> JsError {
        JsError {
            message: message.to_string(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn message(&self) -> String {
        self.message.clone()
    }
}

impl<E: std::error::Error> From<E> for JsError {
    fn from(error: E) -> Self {
        JsError::new(&error.to_string())
    }
}

#[wasm_bindgen]
pub struct Emulator6510 {
    machine: Machine<FlatMemory, NoHooks>,
    on_debug_event: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl Emulator6510 {
    /// Create an emulator with 64KB of RAM and debug support attached
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Emulator6510 {
            machine: Machine::new(FlatMemory::new(), NoHooks),
            on_debug_event: None,
        }
    }

    /// Called with the PC whenever a frame stops on a breakpoint or step
    pub fn set_on_debug_event(&mut self, callback: js_sys::Function) {
        self.on_debug_event = Some(callback);
    }

    /// Reset the CPU, keeping memory and breakpoints
    pub fn reset(&mut self) {
        self.machine.hard_reset();
    }

    /// Execute one machine frame; returns the termination reason
    pub fn execute_frame(&mut self) -> String {
        let reason = self.machine.execute_machine_frame();
        if reason == TerminationReason::DebugEvent {
            if let Some(callback) = &self.on_debug_event {
                let pc = JsValue::from(self.machine.cpu().pc());
                let _ = callback.call1(&JsValue::NULL, &pc);
            }
        }
        reason.as_str().to_string()
    }

    /// Set the debug step mode: "none", "into", "over", "out" or "breakpoint"
    pub fn set_step_mode(&mut self, mode: &str) -> Result<(), JsError> {
        let mode = match mode {
            "none" => DebugStepMode::NoDebug,
            "into" => DebugStepMode::StepInto,
            "over" => DebugStepMode::StepOver,
            "out" => DebugStepMode::StepOut,
            "breakpoint" => DebugStepMode::StopAtBreakpoint,
            other => return Err(JsError::new(&format!("unknown step mode '{}'", other))),
        };
        if mode == DebugStepMode::StepOut {
            self.machine.mark_step_out_address();
        }
        self.machine.context_mut().debug_step_mode = mode;
        Ok(())
    }

    /// Add an execution breakpoint from text such as "$C000" or "R1:$A000"
    pub fn add_breakpoint(&mut self, address: &str) -> Result<bool, JsError> {
        let info = self.machine.parse_exec_breakpoint(address)?;
        Ok(self.machine.add_breakpoint(info)?)
    }

    /// Add a memory write watchpoint
    pub fn add_write_watch(&mut self, address: u16) -> Result<bool, JsError> {
        Ok(self.machine.add_breakpoint(BreakpointInfo::memory_write(address))?)
    }

    /// Remove an unpartitioned breakpoint
    pub fn remove_breakpoint(&mut self, address: u16) -> Result<(), JsError> {
        let key = BreakpointKey::Address {
            address,
            partition: None,
        };
        Ok(self.machine.remove_breakpoint(&key)?)
    }

    // Register getters
    #[wasm_bindgen(getter)]
    pub fn a(&self) -> u8 {
        self.machine.cpu().a()
    }

    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u8 {
        self.machine.cpu().x()
    }

    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u8 {
        self.machine.cpu().y()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u16 {
        self.machine.cpu().pc()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.machine.cpu().sp()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> u8 {
        self.machine.cpu().status()
    }

    #[wasm_bindgen(getter)]
    pub fn tacts(&self) -> f64 {
        self.machine.cpu().tacts() as f64 // Convert u64 to f64 for JavaScript
    }

    #[wasm_bindgen(getter)]
    pub fn frames(&self) -> f64 {
        self.machine.cpu().frames() as f64
    }

    // Memory access methods

    pub fn read_memory(&self, addr: u16) -> u8 {
        self.machine.cpu().memory().read(addr)
    }

    pub fn write_memory(&mut self, addr: u16, value: u8) {
        self.machine.cpu_mut().memory_mut().write(addr, value);
    }

    /// Load a program into memory and set PC
    pub fn load_program(&mut self, program: &[u8], start_addr: u16) {
        self.machine.cpu_mut().memory_mut().load(start_addr, program);
        self.machine.cpu_mut().set_pc(start_addr);
    }
}

impl Default for Emulator6510 {
    fn default() -> Self {
        Self::new()
    }
}
