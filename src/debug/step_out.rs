//! Step-out stack: return addresses of the subroutine calls in flight.

use std::collections::VecDeque;

/// Maximum number of return addresses kept. Deeper call chains drop the
/// oldest entry.
pub const MAX_STEP_OUT_STACK_SIZE: usize = 256;

/// LIFO of return addresses, pushed by JSR and popped after RTS.
///
/// Popping an empty stack is a silent no-op: code that balances the stack by
/// hand (`PLA`/`PLA`/`RTS` tricks, `RTS` used as a jump) must never corrupt
/// or crash the debugger.
///
/// ```
/// use lib6510::StepOutStack;
///
/// let mut stack = StepOutStack::new();
/// assert_eq!(stack.pop(), None);
///
/// stack.push(0x1003);
/// stack.push(0x2010);
/// assert_eq!(stack.top(), Some(0x2010));
/// assert_eq!(stack.pop(), Some(0x2010));
/// assert_eq!(stack.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StepOutStack {
    entries: VecDeque<u16>,
}

impl StepOutStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, return_address: u16) {
        if self.entries.len() >= MAX_STEP_OUT_STACK_SIZE {
            self.entries.pop_front();
        }
        self.entries.push_back(return_address);
    }

    pub fn pop(&mut self) -> Option<u16> {
        self.entries.pop_back()
    }

    pub fn top(&self) -> Option<u16> {
        self.entries.back().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries from the oldest to the most recent call.
    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.entries.iter().copied()
    }
}
