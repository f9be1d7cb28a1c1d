//! # Memory Partitions
//!
//! Banked machines page ROM and RAM banks into the 64K address space. A
//! *partition* names one such bank so that breakpoints and watchpoints can be
//! qualified with it: a breakpoint at `$8000` in RAM bank 2 does not fire
//! while bank 5 is paged in.
//!
//! This module provides:
//! - [`Partition`]: the bank selector, with its integer encoding and labels
//! - [`PartitionLayout`]: declared bank counts, used for validation
//! - [`BankedMemory`]: a concrete 4 x 16K slot resolver implementing
//!   [`MemoryBus`]

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BreakpointError, BreakpointResult};
use crate::MemoryBus;

/// Size of one bank and one slot.
pub const BANK_SIZE: usize = 0x4000;

/// A ROM or RAM bank selector.
///
/// The integer encoding used by hosts: non-negative values select a RAM
/// bank, negative values select ROM bank `-(value + 1)`.
///
/// ```
/// use lib6510::Partition;
///
/// assert_eq!(Partition::from_index(2), Some(Partition::Ram(2)));
/// assert_eq!(Partition::from_index(-1), Some(Partition::Rom(0)));
/// assert_eq!(Partition::Rom(1).index(), -2);
/// assert_eq!(Partition::Rom(1).to_string(), "R1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Partition {
    Rom(u8),
    Ram(u8),
}

impl Partition {
    /// Decodes the signed integer form. Out-of-range values yield `None`.
    pub fn from_index(index: i32) -> Option<Self> {
        if index >= 0 {
            u8::try_from(index).ok().map(Partition::Ram)
        } else {
            u8::try_from(-(index + 1)).ok().map(Partition::Rom)
        }
    }

    /// Encodes the partition as a signed integer.
    pub fn index(self) -> i32 {
        match self {
            Partition::Ram(bank) => bank as i32,
            Partition::Rom(bank) => -(bank as i32) - 1,
        }
    }

    /// Parses a partition label: `R<n>` for a ROM bank, `B<n>` or a bare
    /// `<n>` for a RAM bank. Case-insensitive, decimal only.
    pub fn parse_label(label: &str) -> BreakpointResult<Self> {
        let trimmed = label.trim();
        let invalid = || BreakpointError::InvalidPartitionLabel(label.to_string());

        let (is_rom, digits) = match trimmed.chars().next() {
            Some('R') | Some('r') => (true, &trimmed[1..]),
            Some('B') | Some('b') => (false, &trimmed[1..]),
            Some(_) => (false, trimmed),
            None => return Err(invalid()),
        };
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let bank: u8 = digits.parse().map_err(|_| invalid())?;

        Ok(if is_rom {
            Partition::Rom(bank)
        } else {
            Partition::Ram(bank)
        })
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Partition::Rom(bank) => write!(f, "R{}", bank),
            Partition::Ram(bank) => write!(f, "{}", bank),
        }
    }
}

/// Declared bank counts of a machine model.
///
/// A layout with no banks at all describes an unbanked machine, which
/// rejects every partitioned breakpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartitionLayout {
    pub rom_banks: u8,
    pub ram_banks: u8,
}

impl PartitionLayout {
    pub fn new(rom_banks: u8, ram_banks: u8) -> Self {
        Self {
            rom_banks,
            ram_banks,
        }
    }

    pub fn supports_partitions(&self) -> bool {
        self.rom_banks > 0 || self.ram_banks > 0
    }

    /// Checks that the partition exists on this model.
    pub fn validate(&self, partition: Partition) -> BreakpointResult<()> {
        if !self.supports_partitions() {
            return Err(BreakpointError::PartitionsNotSupported);
        }
        match partition {
            Partition::Rom(bank) if bank >= self.rom_banks => {
                Err(BreakpointError::RomBankOutOfRange {
                    bank,
                    count: self.rom_banks,
                })
            }
            Partition::Ram(bank) if bank >= self.ram_banks => {
                Err(BreakpointError::RamBankOutOfRange {
                    bank,
                    count: self.ram_banks,
                })
            }
            _ => Ok(()),
        }
    }

    /// Parses and validates a partition label in one go.
    pub fn parse(&self, label: &str) -> BreakpointResult<Partition> {
        if !self.supports_partitions() {
            return Err(BreakpointError::PartitionsNotSupported);
        }
        let partition = Partition::parse_label(label)?;
        self.validate(partition)?;
        Ok(partition)
    }
}

/// A concrete storage location: which bank, and where inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub partition: Partition,
    pub offset: u16,
}

/// Banked memory with four 16K slots.
///
/// Each slot shows one ROM or RAM bank. Writes to a slot showing ROM are
/// dropped. A single bank-select register (an I/O port) pages RAM banks into
/// slot 3: the low bits of the written value select the bank.
///
/// Power-on paging: slot 0..2 show RAM banks 0..2 (as far as they exist),
/// slot 3 shows ROM bank 0 if any ROM is present.
///
/// ```
/// use lib6510::{BankedMemory, MemoryBus, Partition};
///
/// let mut mem = BankedMemory::new(1, 8, 0x00FF);
/// mem.write(0x00FF, 0x05); // page RAM bank 5 into slot 3
/// mem.write(0xC010, 0x42);
///
/// let cell = mem.resolve(0xC010);
/// assert_eq!(cell.partition, Partition::Ram(5));
/// assert_eq!(cell.offset, 0x0010);
/// assert_eq!(mem.read(0xC010), 0x42);
/// ```
pub struct BankedMemory {
    rom: Vec<Box<[u8; BANK_SIZE]>>,
    ram: Vec<Box<[u8; BANK_SIZE]>>,
    /// Declared RAM banks. Backing storage always holds at least one bank;
    /// with none declared it is plain unbanked RAM.
    ram_banks: u8,
    slots: [Partition; 4],
    bank_select_port: u16,
    bank_select_value: u8,
}

impl BankedMemory {
    /// Creates banked memory with the given bank counts and bank-select
    /// port. At least one RAM bank is always allocated, but only the
    /// declared ones can be named as partitions.
    pub fn new(rom_banks: u8, ram_banks: u8, bank_select_port: u16) -> Self {
        let backing = ram_banks.max(1);
        let rom = (0..rom_banks).map(|_| Box::new([0u8; BANK_SIZE])).collect();
        let ram = (0..backing).map(|_| Box::new([0u8; BANK_SIZE])).collect();

        let ram_slot = |n: u8| Partition::Ram(n.min(backing - 1));
        let top = if rom_banks > 0 {
            Partition::Rom(0)
        } else {
            ram_slot(3)
        };

        Self {
            rom,
            ram,
            ram_banks,
            slots: [ram_slot(0), ram_slot(1), ram_slot(2), top],
            bank_select_port,
            bank_select_value: 0,
        }
    }

    /// Maps an address to the cell it currently selects.
    pub fn resolve(&self, addr: u16) -> Cell {
        Cell {
            partition: self.slots[(addr >> 14) as usize],
            offset: addr & 0x3FFF,
        }
    }

    /// Pages a bank into a slot (0..=3). Returns false if the slot or bank
    /// does not exist.
    pub fn page_in(&mut self, slot: usize, partition: Partition) -> bool {
        if slot >= self.slots.len() || !self.is_declared(partition) {
            return false;
        }
        self.slots[slot] = partition;
        true
    }

    /// Returns the partition shown in the slot.
    pub fn slot(&self, slot: usize) -> Option<Partition> {
        self.slots.get(slot).copied()
    }

    /// Loads a ROM image into a bank. Excess bytes are ignored.
    pub fn load_rom(&mut self, bank: u8, image: &[u8]) -> bool {
        match self.rom.get_mut(bank as usize) {
            Some(data) => {
                let len = image.len().min(BANK_SIZE);
                data[..len].copy_from_slice(&image[..len]);
                true
            }
            None => false,
        }
    }

    /// Creates banked memory with the bank counts of a machine model.
    pub fn with_layout(layout: PartitionLayout, bank_select_port: u16) -> Self {
        Self::new(layout.rom_banks, layout.ram_banks, bank_select_port)
    }

    fn is_declared(&self, partition: Partition) -> bool {
        match partition {
            Partition::Rom(n) => (n as usize) < self.rom.len(),
            Partition::Ram(n) => n < self.ram_banks,
        }
    }

    fn store(&mut self, partition: Partition, offset: u16, value: u8) -> bool {
        match partition {
            // ROM is read-only from the CPU side; writes are absorbed.
            Partition::Rom(n) => (n as usize) < self.rom.len(),
            Partition::Ram(n) => match self.ram.get_mut(n as usize) {
                Some(bank) => {
                    bank[offset as usize % BANK_SIZE] = value;
                    true
                }
                None => false,
            },
        }
    }

    fn bank(&self, partition: Partition) -> Option<&[u8; BANK_SIZE]> {
        match partition {
            Partition::Rom(n) => self.rom.get(n as usize).map(|b| &**b),
            Partition::Ram(n) => self.ram.get(n as usize).map(|b| &**b),
        }
    }

    fn select_bank(&mut self, value: u8) {
        self.bank_select_value = value;
        let bank = value % self.ram.len() as u8;
        self.slots[3] = Partition::Ram(bank);
    }
}

impl MemoryBus for BankedMemory {
    fn read(&self, addr: u16) -> u8 {
        if addr == self.bank_select_port {
            return self.bank_select_value;
        }
        let cell = self.resolve(addr);
        self.bank(cell.partition)
            .map(|bank| bank[cell.offset as usize])
            .unwrap_or(0xFF)
    }

    fn write(&mut self, addr: u16, value: u8) {
        if addr == self.bank_select_port {
            self.select_bank(value);
            return;
        }
        let cell = self.resolve(addr);
        self.store(cell.partition, cell.offset, value);
    }

    fn is_io(&self, addr: u16) -> bool {
        addr == self.bank_select_port
    }

    fn partition_of(&self, addr: u16) -> Option<Partition> {
        let partition = self.resolve(addr).partition;
        self.is_declared(partition).then_some(partition)
    }

    fn partition_layout(&self) -> PartitionLayout {
        PartitionLayout::new(self.rom.len() as u8, self.ram_banks)
    }

    fn write_partition(&mut self, partition: Partition, offset: u16, value: u8) -> bool {
        self.is_declared(partition) && self.store(partition, offset, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels() {
        assert_eq!(Partition::parse_label("R0").unwrap(), Partition::Rom(0));
        assert_eq!(Partition::parse_label("r3").unwrap(), Partition::Rom(3));
        assert_eq!(Partition::parse_label("B7").unwrap(), Partition::Ram(7));
        assert_eq!(Partition::parse_label("12").unwrap(), Partition::Ram(12));
        assert!(Partition::parse_label("").is_err());
        assert!(Partition::parse_label("R").is_err());
        assert!(Partition::parse_label("X1").is_err());
        assert!(Partition::parse_label("B300").is_err());
    }

    #[test]
    fn test_index_encoding_round_trips_through_display() {
        for index in [-3, -1, 0, 4] {
            let partition = Partition::from_index(index).unwrap();
            assert_eq!(partition.index(), index);
        }
        assert_eq!(Partition::from_index(-300), None);
        assert_eq!(Partition::Ram(4).to_string(), "4");
    }

    #[test]
    fn test_layout_without_banks_rejects_everything() {
        let layout = PartitionLayout::default();
        assert_eq!(
            layout.validate(Partition::Ram(2)),
            Err(BreakpointError::PartitionsNotSupported)
        );
        assert_eq!(
            layout.parse("R0"),
            Err(BreakpointError::PartitionsNotSupported)
        );
    }

    #[test]
    fn test_layout_bounds() {
        let layout = PartitionLayout::new(2, 8);
        assert!(layout.validate(Partition::Rom(1)).is_ok());
        assert!(layout.validate(Partition::Ram(7)).is_ok());
        assert_eq!(
            layout.validate(Partition::Rom(2)),
            Err(BreakpointError::RomBankOutOfRange { bank: 2, count: 2 })
        );
        assert_eq!(
            layout.validate(Partition::Ram(8)),
            Err(BreakpointError::RamBankOutOfRange { bank: 8, count: 8 })
        );
    }

    #[test]
    fn test_rom_slot_ignores_writes() {
        let mut mem = BankedMemory::new(1, 4, 0x0001);
        mem.load_rom(0, &[0xAB; 4]);

        mem.write(0xC000, 0x00);
        assert_eq!(mem.read(0xC000), 0xAB);
        assert_eq!(mem.partition_of(0xC000), Some(Partition::Rom(0)));
    }

    #[test]
    fn test_bank_switch_keeps_contents_per_bank() {
        let mut mem = BankedMemory::new(0, 4, 0x0001);

        mem.write(0x0001, 2);
        mem.write(0xC000, 0x22);
        mem.write(0x0001, 3);
        mem.write(0xC000, 0x33);

        assert_eq!(mem.read(0xC000), 0x33);
        mem.write(0x0001, 2);
        assert_eq!(mem.read(0xC000), 0x22);
        assert!(mem.is_io(0x0001));
    }

    #[test]
    fn test_write_partition_bypasses_paging() {
        let mut mem = BankedMemory::new(0, 4, 0x0001);
        assert!(mem.write_partition(Partition::Ram(3), 0x0100, 0x99));
        assert!(!mem.write_partition(Partition::Ram(9), 0x0100, 0x99));

        assert!(mem.page_in(1, Partition::Ram(3)));
        assert_eq!(mem.read(0x4100), 0x99);
    }

    #[test]
    fn test_rom_only_model_has_unbanked_ram() {
        let mut mem = BankedMemory::new(2, 0, 0xDE00);

        assert_eq!(mem.partition_layout(), PartitionLayout::new(2, 0));
        assert_eq!(
            mem.partition_layout().validate(Partition::Ram(0)),
            Err(BreakpointError::RamBankOutOfRange { bank: 0, count: 0 })
        );

        // The backing RAM still works through the bus
        mem.write(0x1000, 0x5A);
        assert_eq!(mem.read(0x1000), 0x5A);
        assert_eq!(mem.partition_of(0x1000), None);
        assert_eq!(mem.partition_of(0xC000), Some(Partition::Rom(0)));
        assert!(!mem.write_partition(Partition::Ram(0), 0x1000, 0x00));
        assert!(!mem.page_in(3, Partition::Ram(0)));
    }
}
