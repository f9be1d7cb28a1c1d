//! Breakpoint records and their identity.

use bitflags::bitflags;

use crate::error::{BreakpointError, BreakpointResult};
use crate::partition::{Partition, PartitionLayout};

bitflags! {
    /// What a breakpoint watches, and which of those watches are disabled.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BreakpointKind: u16 {
        const EXEC = 0x0001;
        const MEM_READ = 0x0002;
        const MEM_WRITE = 0x0004;
        const IO_READ = 0x0008;
        const IO_WRITE = 0x0010;
        /// The record only suspends on a specific hit.
        const HIT_COUNT = 0x0020;

        const DIS_EXEC = 0x0100;
        const DIS_MEM_READ = 0x0200;
        const DIS_MEM_WRITE = 0x0400;
        const DIS_IO_READ = 0x0800;
        const DIS_IO_WRITE = 0x1000;

        const ANY_IO = Self::IO_READ.bits() | Self::IO_WRITE.bits();
        const ALL_DISABLED = Self::DIS_EXEC.bits()
            | Self::DIS_MEM_READ.bits()
            | Self::DIS_MEM_WRITE.bits()
            | Self::DIS_IO_READ.bits()
            | Self::DIS_IO_WRITE.bits();
    }
}

impl BreakpointKind {
    /// The disable bit matching each watch bit in `self`.
    pub fn disable_bits(self) -> BreakpointKind {
        BreakpointKind::from_bits_truncate((self.bits() & 0x001F) << 8)
    }

    /// True if `kind` is watched and not disabled.
    pub fn is_active(self, kind: BreakpointKind) -> bool {
        self.contains(kind) && !self.intersects(kind.disable_bits())
    }
}

/// Identity of a breakpoint in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BreakpointKey {
    Address {
        address: u16,
        partition: Option<Partition>,
    },
    Source {
        resource: String,
        line: u32,
    },
}

/// A breakpoint or watchpoint.
///
/// Address breakpoints carry an address and optional partition. Source
/// breakpoints carry a resource and line, and get their address once the
/// source is compiled and the line resolved.
///
/// ```
/// use lib6510::{BreakpointInfo, BreakpointKind, Partition};
///
/// let bp = BreakpointInfo::exec(0x8000).with_partition(Partition::Ram(2));
/// assert!(bp.kind.contains(BreakpointKind::EXEC));
/// assert!(bp.is_enabled());
///
/// let io = BreakpointInfo::io_write(0xD020, 0xFFF0);
/// assert!(io.matches_port(0xD02F));
/// assert!(!io.matches_port(0xD030));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BreakpointInfo {
    pub address: Option<u16>,
    pub partition: Option<Partition>,
    pub resource: Option<String>,
    pub line: Option<u32>,
    pub kind: BreakpointKind,
    /// I/O port mask; a port matches when `port & mask == address & mask`.
    pub io_mask: u16,
    pub hit_target: Option<u32>,
    pub hit_count: u32,
}

impl BreakpointInfo {
    fn with_kind(address: u16, kind: BreakpointKind) -> Self {
        Self {
            address: Some(address),
            kind,
            io_mask: 0xFFFF,
            ..Self::default()
        }
    }

    pub fn exec(address: u16) -> Self {
        Self::with_kind(address, BreakpointKind::EXEC)
    }

    pub fn memory_read(address: u16) -> Self {
        Self::with_kind(address, BreakpointKind::MEM_READ)
    }

    pub fn memory_write(address: u16) -> Self {
        Self::with_kind(address, BreakpointKind::MEM_WRITE)
    }

    pub fn io_read(port: u16, mask: u16) -> Self {
        Self {
            io_mask: mask,
            ..Self::with_kind(port, BreakpointKind::IO_READ)
        }
    }

    pub fn io_write(port: u16, mask: u16) -> Self {
        Self {
            io_mask: mask,
            ..Self::with_kind(port, BreakpointKind::IO_WRITE)
        }
    }

    /// An execution breakpoint on a source line, unresolved until the line
    /// is mapped to an address.
    pub fn source(resource: impl Into<String>, line: u32) -> Self {
        Self {
            resource: Some(resource.into()),
            line: Some(line),
            kind: BreakpointKind::EXEC,
            io_mask: 0xFFFF,
            ..Self::default()
        }
    }

    pub fn with_partition(mut self, partition: Partition) -> Self {
        self.partition = Some(partition);
        self
    }

    pub fn with_kind_added(mut self, kind: BreakpointKind) -> Self {
        self.kind |= kind;
        self
    }

    /// Suspends only on the `target`-th hit.
    pub fn with_hit_target(mut self, target: u32) -> Self {
        self.hit_target = Some(target);
        self.kind |= BreakpointKind::HIT_COUNT;
        self
    }

    pub fn key(&self) -> BreakpointKey {
        match (&self.resource, self.line) {
            (Some(resource), Some(line)) => BreakpointKey::Source {
                resource: resource.clone(),
                line,
            },
            _ => BreakpointKey::Address {
                address: self.address.unwrap_or_default(),
                partition: self.partition,
            },
        }
    }

    pub fn is_source(&self) -> bool {
        self.resource.is_some() && self.line.is_some()
    }

    /// True if at least one of the watches is enabled.
    pub fn is_enabled(&self) -> bool {
        [
            BreakpointKind::EXEC,
            BreakpointKind::MEM_READ,
            BreakpointKind::MEM_WRITE,
            BreakpointKind::IO_READ,
            BreakpointKind::IO_WRITE,
        ]
        .into_iter()
        .any(|kind| self.kind.is_active(kind))
    }

    pub fn matches_port(&self, port: u16) -> bool {
        match self.address {
            Some(address) => port & self.io_mask == address & self.io_mask,
            None => false,
        }
    }

    /// Checks the definition against a machine's partition layout.
    ///
    /// I/O breakpoints cannot be partitioned; any other partition must exist
    /// on the machine.
    pub fn validate(&self, layout: &PartitionLayout) -> BreakpointResult<()> {
        let Some(partition) = self.partition else {
            return Ok(());
        };
        if self.kind.intersects(BreakpointKind::ANY_IO) {
            return Err(BreakpointError::PartitionedIoBreakpoint);
        }
        layout.validate(partition)
    }
}
