//! WebAssembly bindings for the lib6510 emulator.
//!
//! This module provides a JavaScript-callable wrapper around a flat-memory
//! machine with the debug-capable frame runner.

#[cfg(feature = "wasm")]
pub mod api;

#[cfg(feature = "wasm")]
pub use api::Emulator6510;
