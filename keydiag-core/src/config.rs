//! Build-time configuration of the diagnostic core

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use keydiag_protocol::MatrixGeometry;

use crate::clock::DEFAULT_CPU_HZ;
use crate::persist::DEFAULT_CONFIG_BASE;

/// Parameters fixed by the board the core runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiagConfig {
    /// Core clock feeding the cycle counter
    pub cpu_hz: u32,
    /// First EEPROM address of the per-key configuration table
    pub eeprom_base: u16,
    /// Matrix dimensions reported in scan summaries
    pub geometry: MatrixGeometry,
}

impl DiagConfig {
    pub const fn new() -> Self {
        Self {
            cpu_hz: DEFAULT_CPU_HZ,
            eeprom_base: DEFAULT_CONFIG_BASE,
            geometry: MatrixGeometry::DEFAULT,
        }
    }

    pub const fn with_cpu_hz(mut self, cpu_hz: u32) -> Self {
        self.cpu_hz = cpu_hz;
        self
    }

    pub const fn with_eeprom_base(mut self, eeprom_base: u16) -> Self {
        self.eeprom_base = eeprom_base;
        self
    }

    pub const fn with_geometry(mut self, geometry: MatrixGeometry) -> Self {
        self.geometry = geometry;
        self
    }
}

impl Default for DiagConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DiagConfig::default();
        assert_eq!(config.cpu_hz, 168_000_000);
        assert_eq!(config.eeprom_base, DEFAULT_CONFIG_BASE);
        assert_eq!(config.geometry, MatrixGeometry::new(6, 15));
    }

    #[test]
    fn test_builders() {
        let config = DiagConfig::new()
            .with_cpu_hz(72_000_000)
            .with_eeprom_base(0x100)
            .with_geometry(MatrixGeometry::new(8, 24));
        assert_eq!(config.cpu_hz, 72_000_000);
        assert_eq!(config.eeprom_base, 0x100);
        assert_eq!(config.geometry.stride(), 3);
    }
}
