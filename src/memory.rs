//! # Memory Bus Abstraction
//!
//! The `MemoryBus` trait decouples the CPU from the machine it is plugged into.
//! Besides plain reads and writes, a bus can tell the CPU which addresses are
//! I/O ports, which partition (ROM or RAM bank) an address currently maps to,
//! and can observe every tact the CPU spends.
//!
//! ## Design Principles
//!
//! The trait follows 6502 hardware behavior:
//! - No bus errors: reads and writes always succeed
//! - Writes to ROM or unmapped regions may be ignored
//! - Every optional capability has a default, so a flat 64K RAM needs only
//!   `read` and `write`

use crate::partition::{Partition, PartitionLayout};

/// Memory bus trait for CPU to read/write bytes.
///
/// # Examples
///
/// ```
/// use lib6510::{MemoryBus, FlatMemory};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x1234, 0x42);
/// assert_eq!(mem.read(0x1234), 0x42);
/// ```
///
/// ## Implementing Custom Memory
///
/// ```
/// use lib6510::MemoryBus;
///
/// struct RomRamMemory {
///     ram: [u8; 0x8000],
///     rom: [u8; 0x8000],
/// }
///
/// impl MemoryBus for RomRamMemory {
///     fn read(&self, addr: u16) -> u8 {
///         if addr < 0x8000 {
///             self.ram[addr as usize]
///         } else {
///             self.rom[(addr - 0x8000) as usize]
///         }
///     }
///
///     fn write(&mut self, addr: u16, value: u8) {
///         if addr < 0x8000 {
///             self.ram[addr as usize] = value;
///         }
///     }
///
///     fn is_io(&self, addr: u16) -> bool {
///         (0xD000..=0xDFFF).contains(&addr)
///     }
/// }
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address.
    ///
    /// This method must never panic.
    fn read(&self, addr: u16) -> u8;

    /// Writes a byte to the specified 16-bit address.
    ///
    /// This method must never panic. Writes to read-only cells are dropped.
    fn write(&mut self, addr: u16, value: u8);

    /// Checks if the level-sensitive IRQ line is active.
    ///
    /// The CPU samples this at every instruction boundary.
    fn irq_active(&self) -> bool {
        false
    }

    /// Returns true if the address is an I/O port rather than plain memory.
    ///
    /// Accesses to I/O addresses are recorded separately so that I/O
    /// watchpoints can match them.
    fn is_io(&self, _addr: u16) -> bool {
        false
    }

    /// Returns the partition the address currently maps to, or `None` on an
    /// unbanked region or machine.
    fn partition_of(&self, _addr: u16) -> Option<Partition> {
        None
    }

    /// Declared ROM/RAM bank counts used to validate partitioned breakpoints.
    fn partition_layout(&self) -> PartitionLayout {
        PartitionLayout::default()
    }

    /// Writes directly into a partition, bypassing the current paging.
    ///
    /// Returns false if the partition does not exist.
    fn write_partition(&mut self, _partition: Partition, _offset: u16, _value: u8) -> bool {
        false
    }

    /// Called once for every tact the CPU consumes, after the counter moved.
    ///
    /// Peripherals that count cycles (or stall the CPU through a
    /// [`StallLine`](crate::StallLine)) hook in here.
    fn on_tact(&mut self, _tacts: u64) {}
}

/// Simple 64KB flat memory implementation.
///
/// All addresses (0x0000-0xFFFF) are writable RAM initialized to 0x00.
///
/// # Examples
///
/// ```
/// use lib6510::{CPU, FlatMemory, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.write(0xFFFC, 0x00);
/// memory.write(0xFFFD, 0x80);
/// memory.load(0x8000, &[0xEA]);
///
/// let cpu = CPU::new(memory);
/// assert_eq!(cpu.pc(), 0x8000);
/// ```
pub struct FlatMemory {
    data: Box<[u8; 65536]>,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; 65536]),
        }
    }

    /// Copies `bytes` into memory starting at `start`, wrapping at 0xFFFF.
    pub fn load(&mut self, start: u16, bytes: &[u8]) {
        for (i, &byte) in bytes.iter().enumerate() {
            self.data[start.wrapping_add(i as u16) as usize] = byte;
        }
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }
}
