//! Machine configuration.
//!
//! A host describes the emulated model as JSON; every field is optional and
//! falls back to PAL C64-like timing with no banking.
//!
//! ```
//! use lib6510::MachineConfig;
//!
//! let config = MachineConfig::from_json_str(r#"{ "ram_banks": 4, "clock_multiplier": 2 }"#).unwrap();
//! assert_eq!(config.ram_banks, 4);
//! assert_eq!(config.clock_multiplier, 2);
//! assert_eq!(config.tacts_in_frame, 19_656);
//! ```

use serde::{Deserialize, Serialize};

use crate::cpu::DEFAULT_STALL_WATCHDOG_TACTS;
use crate::error::{ConfigError, ConfigResult};
use crate::partition::PartitionLayout;

/// PAL C64 CPU clock in Hz.
pub const DEFAULT_BASE_CLOCK_FREQUENCY: u32 = 985_248;

/// 312 raster lines of 63 tacts.
pub const DEFAULT_TACTS_IN_FRAME: u64 = 19_656;

pub const MAX_CLOCK_MULTIPLIER: u8 = 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    pub base_clock_frequency: u32,
    /// Base tacts per frame, at clock multiplier 1.
    pub tacts_in_frame: u64,
    pub clock_multiplier: u8,
    pub rom_banks: u8,
    pub ram_banks: u8,
    pub stall_watchdog_tacts: u64,
    /// Whether the machine accepts clock multiplier changes at frame
    /// boundaries.
    pub allow_clock_change: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            base_clock_frequency: DEFAULT_BASE_CLOCK_FREQUENCY,
            tacts_in_frame: DEFAULT_TACTS_IN_FRAME,
            clock_multiplier: 1,
            rom_banks: 0,
            ram_banks: 0,
            stall_watchdog_tacts: DEFAULT_STALL_WATCHDOG_TACTS,
            allow_clock_change: true,
        }
    }
}

impl MachineConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.tacts_in_frame == 0 {
            return Err(ConfigError::ZeroTactsInFrame);
        }
        match self.clock_multiplier {
            0 => Err(ConfigError::ZeroClockMultiplier),
            m if m > MAX_CLOCK_MULTIPLIER => Err(ConfigError::ClockMultiplierTooLarge(m)),
            _ => Ok(()),
        }
    }

    pub fn partition_layout(&self) -> PartitionLayout {
        PartitionLayout::new(self.rom_banks, self.ram_banks)
    }

    /// Frames per second at the base clock.
    pub fn frame_rate(&self) -> f64 {
        self.base_clock_frequency as f64 / self.tacts_in_frame as f64
    }
}
