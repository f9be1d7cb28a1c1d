//! # Debug Support
//!
//! The breakpoint registry and the transient markers the frame runner uses
//! to implement stepping:
//!
//! - **Registry**: execution breakpoints, memory read/write and I/O
//!   read/write watchpoints, kept in insertion order and keyed by address and
//!   partition (or by source resource and line).
//! - **Imminent breakpoint**: armed by step-over on a subroutine call, at the
//!   address right after the call.
//! - **Last breakpoint**: where the previous stop happened, so resuming does
//!   not immediately stop again at the same place.
//! - **Last startup breakpoint**: suppresses the pre-instruction check at the
//!   address where the machine was resumed.
//! - **Step-out address**: the return address step-out waits for.
//!
//! Registry mutations assume validated input; see
//! [`BreakpointInfo::validate`] and [`Machine::add_breakpoint`](crate::Machine::add_breakpoint).

mod address;
mod breakpoints;
mod step_out;

pub use address::{
    parse_breakpoint_address, parse_numeric_literal, split_partition_qualifier,
    BreakpointAddress,
};
pub use breakpoints::{BreakpointInfo, BreakpointKey, BreakpointKind};
pub use step_out::{StepOutStack, MAX_STEP_OUT_STACK_SIZE};

use std::collections::HashSet;

use tracing::debug;

use crate::partition::Partition;

/// Breakpoint registry plus stepping state.
///
/// ```
/// use lib6510::{BreakpointInfo, BreakpointKey, DebugSupport};
///
/// let mut debug = DebugSupport::new();
/// assert!(debug.add_breakpoint(BreakpointInfo::exec(0x8000)));
/// assert!(!debug.add_breakpoint(BreakpointInfo::exec(0x8000)));
/// assert_eq!(debug.list_breakpoints().len(), 1);
///
/// assert!(debug.should_stop_at(0x8000, |_| None));
/// assert!(!debug.should_stop_at(0x8001, |_| None));
///
/// let key = BreakpointKey::Address { address: 0x8000, partition: None };
/// assert!(debug.enable_breakpoint(&key, false));
/// assert!(!debug.should_stop_at(0x8000, |_| None));
/// ```
pub struct DebugSupport {
    breakpoints: Vec<BreakpointInfo>,
    /// Union of the watch bits of the resolved records at each address.
    index: Box<[BreakpointKind]>,

    pub(crate) imminent_breakpoint: Option<u16>,
    pub(crate) last_breakpoint: Option<u16>,
    pub(crate) last_startup_breakpoint: Option<u16>,
    pub(crate) step_out_address: Option<u16>,
}

impl Default for DebugSupport {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugSupport {
    pub fn new() -> Self {
        Self {
            breakpoints: Vec::new(),
            index: vec![BreakpointKind::empty(); 0x10000].into_boxed_slice(),
            imminent_breakpoint: None,
            last_breakpoint: None,
            last_startup_breakpoint: None,
            step_out_address: None,
        }
    }

    // ========== Registry ==========

    /// Adds a breakpoint. Returns true if it is new; false if a record with
    /// the same key existed, in which case that record takes the new watch
    /// kinds (re-enabling them), mask and hit target, keeping its position.
    pub fn add_breakpoint(&mut self, info: BreakpointInfo) -> bool {
        let key = info.key();
        let added = match self.breakpoints.iter_mut().find(|bp| bp.key() == key) {
            Some(existing) => {
                let watches = info.kind - BreakpointKind::ALL_DISABLED;
                existing.kind = (existing.kind | info.kind) - watches.disable_bits();
                existing.io_mask = info.io_mask;
                if info.hit_target.is_some() {
                    existing.hit_target = info.hit_target;
                    existing.hit_count = 0;
                }
                if info.address.is_some() {
                    existing.address = info.address;
                }
                false
            }
            None => {
                self.breakpoints.push(info);
                true
            }
        };
        debug!(?key, added, "breakpoint set");
        self.rebuild_index();
        added
    }

    pub fn remove_breakpoint(&mut self, key: &BreakpointKey) -> bool {
        let before = self.breakpoints.len();
        self.breakpoints.retain(|bp| bp.key() != *key);
        let removed = self.breakpoints.len() != before;
        if removed {
            debug!(?key, "breakpoint removed");
            self.rebuild_index();
        }
        removed
    }

    pub fn remove_all_breakpoints(&mut self) {
        self.breakpoints.clear();
        self.rebuild_index();
    }

    /// Enables or disables every watch of the record.
    pub fn enable_breakpoint(&mut self, key: &BreakpointKey, enabled: bool) -> bool {
        let Some(bp) = self.breakpoints.iter_mut().find(|bp| bp.key() == *key) else {
            return false;
        };
        let disable = (bp.kind - BreakpointKind::ALL_DISABLED).disable_bits();
        if enabled {
            bp.kind -= disable;
        } else {
            bp.kind |= disable;
        }
        debug!(?key, enabled, "breakpoint toggled");
        self.rebuild_index();
        true
    }

    /// Enables or disables only the `kind` watches of the record.
    pub fn enable_breakpoint_kind(
        &mut self,
        key: &BreakpointKey,
        kind: BreakpointKind,
        enabled: bool,
    ) -> bool {
        let Some(bp) = self.breakpoints.iter_mut().find(|bp| bp.key() == *key) else {
            return false;
        };
        let disable = (bp.kind & kind).disable_bits();
        if enabled {
            bp.kind -= disable;
        } else {
            bp.kind |= disable;
        }
        self.rebuild_index();
        true
    }

    /// All records, in the order they were added.
    pub fn list_breakpoints(&self) -> &[BreakpointInfo] {
        &self.breakpoints
    }

    pub fn find_breakpoint(&self, key: &BreakpointKey) -> Option<&BreakpointInfo> {
        self.breakpoints.iter().find(|bp| bp.key() == *key)
    }

    fn rebuild_index(&mut self) {
        self.index.fill(BreakpointKind::empty());
        for bp in &self.breakpoints {
            if let Some(address) = bp.address {
                let memory_watches = bp.kind
                    & (BreakpointKind::EXEC | BreakpointKind::MEM_READ | BreakpointKind::MEM_WRITE);
                self.index[address as usize] |= memory_watches;
            }
        }
    }

    // ========== Source Breakpoints ==========

    /// Drops the resolved address of every source breakpoint.
    pub fn reset_breakpoint_resolution(&mut self) {
        for bp in self.breakpoints.iter_mut().filter(|bp| bp.is_source()) {
            bp.address = None;
        }
        self.rebuild_index();
    }

    /// Binds a source line to the address the compiler emitted for it.
    pub fn resolve_breakpoint(&mut self, resource: &str, line: u32, address: u16) {
        for bp in self.breakpoints.iter_mut() {
            if bp.resource.as_deref() == Some(resource) && bp.line == Some(line) {
                bp.address = Some(address);
            }
        }
        self.rebuild_index();
    }

    /// Resolves every source breakpoint of `resource` through `resolver`,
    /// which maps a line to an address (or `None` if the line has no code).
    pub fn resolve_source_breakpoints(
        &mut self,
        resource: &str,
        resolver: impl Fn(u32) -> Option<u16>,
    ) {
        for bp in self.breakpoints.iter_mut() {
            if bp.resource.as_deref() == Some(resource) {
                bp.address = bp.line.and_then(&resolver);
            }
        }
        self.rebuild_index();
    }

    /// Shifts the lines of `resource`'s breakpoints at or after `from_line`
    /// by `shift` lines, as when lines are inserted or deleted above them.
    /// Breakpoints shifted before line 1 are dropped.
    pub fn scroll_breakpoints(&mut self, resource: &str, from_line: u32, shift: i32) {
        self.breakpoints.retain_mut(|bp| {
            if bp.resource.as_deref() != Some(resource) {
                return true;
            }
            match bp.line {
                Some(line) if line >= from_line => {
                    let moved = line as i64 + shift as i64;
                    if moved < 1 {
                        return false;
                    }
                    bp.line = Some(moved as u32);
                    true
                }
                _ => true,
            }
        });
        self.rebuild_index();
    }

    /// Removes `resource`'s breakpoints past the last line and keeps only the
    /// first of any duplicates.
    pub fn normalize_breakpoints(&mut self, resource: &str, line_count: u32) {
        let mut seen = HashSet::new();
        self.breakpoints.retain(|bp| {
            if bp.resource.as_deref() != Some(resource) {
                return true;
            }
            match bp.line {
                Some(line) if line > line_count => false,
                Some(line) => seen.insert(line),
                None => true,
            }
        });
        self.rebuild_index();
    }

    // ========== Suspend Decisions ==========

    /// True if an enabled execution breakpoint matches `pc`.
    ///
    /// An unpartitioned breakpoint at the address decides alone. Otherwise a
    /// partitioned one matches only while its partition is paged in at `pc`.
    /// Hit-counted breakpoints count every match and stop on the target hit.
    pub fn should_stop_at(
        &mut self,
        pc: u16,
        partition_of: impl Fn(u16) -> Option<Partition>,
    ) -> bool {
        if !self.index[pc as usize].contains(BreakpointKind::EXEC) {
            return false;
        }

        let unpartitioned = self
            .breakpoints
            .iter()
            .position(|bp| bp.address == Some(pc) && bp.partition.is_none() && bp.kind.contains(BreakpointKind::EXEC));
        let found = match unpartitioned {
            Some(index) => Some(index),
            None => {
                let current = partition_of(pc);
                self.breakpoints.iter().position(|bp| {
                    bp.address == Some(pc)
                        && bp.partition.is_some()
                        && bp.partition == current
                        && bp.kind.contains(BreakpointKind::EXEC)
                })
            }
        };

        let Some(index) = found else {
            return false;
        };
        let bp = &mut self.breakpoints[index];
        if !bp.kind.is_active(BreakpointKind::EXEC) {
            return false;
        }
        match bp.hit_target {
            Some(target) => {
                bp.hit_count = bp.hit_count.saturating_add(1);
                bp.hit_count == target
            }
            None => true,
        }
    }

    /// True if any of the addresses read matches an enabled memory-read
    /// watchpoint.
    pub fn has_memory_read(
        &self,
        addresses: &[u16],
        partition_of: impl Fn(u16) -> Option<Partition>,
    ) -> bool {
        self.has_memory_access(addresses, BreakpointKind::MEM_READ, partition_of)
    }

    pub fn has_memory_write(
        &self,
        addresses: &[u16],
        partition_of: impl Fn(u16) -> Option<Partition>,
    ) -> bool {
        self.has_memory_access(addresses, BreakpointKind::MEM_WRITE, partition_of)
    }

    fn has_memory_access(
        &self,
        addresses: &[u16],
        kind: BreakpointKind,
        partition_of: impl Fn(u16) -> Option<Partition>,
    ) -> bool {
        addresses.iter().any(|&addr| {
            self.index[addr as usize].contains(kind)
                && self.breakpoints.iter().any(|bp| {
                    bp.address == Some(addr)
                        && bp.kind.is_active(kind)
                        && (bp.partition.is_none() || bp.partition == partition_of(addr))
                })
        })
    }

    pub fn has_io_read(&self, port: Option<u16>) -> bool {
        self.has_io_access(port, BreakpointKind::IO_READ)
    }

    pub fn has_io_write(&self, port: Option<u16>) -> bool {
        self.has_io_access(port, BreakpointKind::IO_WRITE)
    }

    fn has_io_access(&self, port: Option<u16>, kind: BreakpointKind) -> bool {
        let Some(port) = port else {
            return false;
        };
        self.breakpoints
            .iter()
            .any(|bp| bp.kind.is_active(kind) && bp.matches_port(port))
    }

    // ========== Stepping Markers ==========

    pub fn imminent_breakpoint(&self) -> Option<u16> {
        self.imminent_breakpoint
    }

    pub fn last_breakpoint(&self) -> Option<u16> {
        self.last_breakpoint
    }

    pub fn last_startup_breakpoint(&self) -> Option<u16> {
        self.last_startup_breakpoint
    }

    pub fn step_out_address(&self) -> Option<u16> {
        self.step_out_address
    }

    /// Arms step-out at the return address on top of the step-out stack.
    pub fn mark_step_out_address(&mut self, top: Option<u16>) {
        self.step_out_address = top;
    }

    /// Clears the imminent, last and startup markers and the step-out
    /// address. Breakpoints stay.
    pub fn reset_debug_state(&mut self) {
        self.imminent_breakpoint = None;
        self.last_breakpoint = None;
        self.last_startup_breakpoint = None;
        self.step_out_address = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_partition(_: u16) -> Option<Partition> {
        None
    }

    #[test]
    fn test_listing_keeps_insertion_order() {
        let mut debug = DebugSupport::new();
        debug.add_breakpoint(BreakpointInfo::exec(0x3000));
        debug.add_breakpoint(BreakpointInfo::exec(0x1000));
        debug.add_breakpoint(BreakpointInfo::memory_read(0x2000));
        debug.add_breakpoint(BreakpointInfo::exec(0x3000).with_kind_added(BreakpointKind::MEM_WRITE));

        let addresses: Vec<_> = debug
            .list_breakpoints()
            .iter()
            .map(|bp| bp.address)
            .collect();
        assert_eq!(addresses, vec![Some(0x3000), Some(0x1000), Some(0x2000)]);
        assert!(debug.list_breakpoints()[0]
            .kind
            .contains(BreakpointKind::MEM_WRITE));
    }

    #[test]
    fn test_readding_reenables() {
        let mut debug = DebugSupport::new();
        let key = BreakpointKey::Address {
            address: 0x1000,
            partition: None,
        };
        debug.add_breakpoint(BreakpointInfo::exec(0x1000));
        debug.enable_breakpoint(&key, false);
        assert!(!debug.should_stop_at(0x1000, no_partition));

        debug.add_breakpoint(BreakpointInfo::exec(0x1000));
        assert!(debug.should_stop_at(0x1000, no_partition));
    }

    #[test]
    fn test_unpartitioned_wins_over_partitioned() {
        let mut debug = DebugSupport::new();
        debug.add_breakpoint(BreakpointInfo::exec(0x8000).with_partition(Partition::Ram(2)));
        assert!(debug.should_stop_at(0x8000, |_| Some(Partition::Ram(2))));
        assert!(!debug.should_stop_at(0x8000, |_| Some(Partition::Ram(3))));

        let mut disabled = BreakpointInfo::exec(0x8000);
        disabled.kind |= BreakpointKind::DIS_EXEC;
        debug.add_breakpoint(disabled);
        // The disabled unpartitioned record decides, even though bank 2 matches
        assert!(!debug.should_stop_at(0x8000, |_| Some(Partition::Ram(2))));
    }

    #[test]
    fn test_disable_single_kind() {
        let mut debug = DebugSupport::new();
        let key = BreakpointKey::Address {
            address: 0x2000,
            partition: None,
        };
        debug.add_breakpoint(BreakpointInfo::exec(0x2000).with_kind_added(BreakpointKind::MEM_WRITE));
        assert!(debug.enable_breakpoint_kind(&key, BreakpointKind::MEM_WRITE, false));

        assert!(debug.should_stop_at(0x2000, no_partition));
        assert!(!debug.has_memory_write(&[0x2000], no_partition));
        assert!(!debug.enable_breakpoint_kind(
            &BreakpointKey::Address { address: 0x2001, partition: None },
            BreakpointKind::EXEC,
            false
        ));
    }

    #[test]
    fn test_hit_count() {
        let mut debug = DebugSupport::new();
        debug.add_breakpoint(BreakpointInfo::exec(0x1234).with_hit_target(3));

        assert!(!debug.should_stop_at(0x1234, no_partition));
        assert!(!debug.should_stop_at(0x1234, no_partition));
        assert!(debug.should_stop_at(0x1234, no_partition));
        assert!(!debug.should_stop_at(0x1234, no_partition));
    }

    #[test]
    fn test_memory_watchpoints() {
        let mut debug = DebugSupport::new();
        debug.add_breakpoint(BreakpointInfo::memory_read(0x0400));
        debug.add_breakpoint(BreakpointInfo::memory_write(0xC000).with_partition(Partition::Ram(1)));

        assert!(debug.has_memory_read(&[0x0200, 0x0400], no_partition));
        assert!(!debug.has_memory_write(&[0x0400], no_partition));
        assert!(debug.has_memory_write(&[0xC000], |_| Some(Partition::Ram(1))));
        assert!(!debug.has_memory_write(&[0xC000], |_| Some(Partition::Ram(0))));
        // An execution breakpoint is not a read watchpoint
        debug.add_breakpoint(BreakpointInfo::exec(0x0500));
        assert!(!debug.has_memory_read(&[0x0500], no_partition));
    }

    #[test]
    fn test_io_watchpoint_mask() {
        let mut debug = DebugSupport::new();
        debug.add_breakpoint(BreakpointInfo::io_read(0x00FE, 0x00FF));

        assert!(debug.has_io_read(Some(0x7FFE)));
        assert!(!debug.has_io_read(Some(0x7FFD)));
        assert!(!debug.has_io_write(Some(0x00FE)));
        assert!(!debug.has_io_read(None));
    }

    #[test]
    fn test_source_breakpoint_lifecycle() {
        let mut debug = DebugSupport::new();
        debug.add_breakpoint(BreakpointInfo::source("main.asm", 10));
        debug.add_breakpoint(BreakpointInfo::source("main.asm", 20));
        debug.add_breakpoint(BreakpointInfo::source("lib.asm", 10));

        debug.resolve_source_breakpoints("main.asm", |line| match line {
            10 => Some(0x0810),
            _ => None,
        });
        assert!(debug.should_stop_at(0x0810, no_partition));

        debug.scroll_breakpoints("main.asm", 15, 5);
        let lines: Vec<_> = debug.list_breakpoints().iter().map(|bp| bp.line).collect();
        assert_eq!(lines, vec![Some(10), Some(25), Some(10)]);

        debug.normalize_breakpoints("main.asm", 20);
        assert_eq!(debug.list_breakpoints().len(), 2);

        debug.reset_breakpoint_resolution();
        assert!(!debug.should_stop_at(0x0810, no_partition));
    }

    #[test]
    fn test_normalize_drops_duplicates_after_scroll() {
        let mut debug = DebugSupport::new();
        debug.add_breakpoint(BreakpointInfo::source("a.asm", 3));
        debug.add_breakpoint(BreakpointInfo::source("a.asm", 5));
        debug.scroll_breakpoints("a.asm", 5, -2);

        debug.normalize_breakpoints("a.asm", 100);
        assert_eq!(debug.list_breakpoints().len(), 1);
    }
}
