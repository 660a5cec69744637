//! Commands sent from the host to the controller
//!
//! Every command is a 32-byte report. Byte 0 is the command code; the
//! arguments, if any, follow in bytes 1 and 2. Trailing bytes are ignored.

use crate::frame::{Report, REPORT_SIZE};

// Command codes: host → device
pub const CMD_SAVE_EEPROM: u8 = 0x4A;
pub const CMD_LOAD_EEPROM: u8 = 0x4B;
pub const CMD_METRICS_DUMP: u8 = 0x52;
pub const CMD_ENABLE: u8 = 0x5A;
pub const CMD_RESET: u8 = 0x5B;
pub const CMD_SET_DEBOUNCE: u8 = 0x5C;
pub const CMD_SET_EAGER: u8 = 0x5D;
/// Reserved for per-row/column scan masking; not handled by the controller
pub const CMD_SET_SCANMASK: u8 = 0x5E;

/// Why a command report was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Zero-length report
    Empty,
    /// Known command, too few argument bytes
    Truncated { code: u8, needed: usize, got: usize },
    /// Code is reserved but has no behavior yet
    Reserved(u8),
    /// Code is not a command
    Unknown(u8),
}

/// Host commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    /// Turn telemetry on or off and set the scan summary divider
    ///
    /// `scan_div` is carried as sent; a zero divider is coerced to 1 by the
    /// controller.
    Enable { enabled: bool, scan_div: u8 },
    /// Clear all counters, keeping configuration
    Reset,
    /// Set the debounce window of one key
    SetDebounce { key: u8, ms: u8 },
    /// Set the eager-actuation flag of one key
    SetEager { key: u8, eager: bool },
    /// Persist per-key configuration
    SaveEeprom,
    /// Reload per-key configuration from storage
    LoadEeprom,
    /// Request an aggregate statistics report
    MetricsDump,
}

impl Command {
    /// Parse a command from a received report
    ///
    /// `data` may be shorter than a full report; only the bytes a command
    /// needs are checked.
    pub fn parse(data: &[u8]) -> Result<Self, CommandError> {
        let code = *data.first().ok_or(CommandError::Empty)?;

        match code {
            CMD_ENABLE => {
                let [enabled, scan_div] = args(code, data)?;
                Ok(Command::Enable {
                    enabled: enabled != 0,
                    scan_div,
                })
            }
            CMD_RESET => Ok(Command::Reset),
            CMD_SET_DEBOUNCE => {
                let [key, ms] = args(code, data)?;
                Ok(Command::SetDebounce { key, ms })
            }
            CMD_SET_EAGER => {
                let [key, eager] = args(code, data)?;
                Ok(Command::SetEager {
                    key,
                    eager: eager != 0,
                })
            }
            CMD_SAVE_EEPROM => Ok(Command::SaveEeprom),
            CMD_LOAD_EEPROM => Ok(Command::LoadEeprom),
            CMD_METRICS_DUMP => Ok(Command::MetricsDump),
            CMD_SET_SCANMASK => Err(CommandError::Reserved(code)),
            _ => Err(CommandError::Unknown(code)),
        }
    }

    /// Command code byte
    pub fn code(&self) -> u8 {
        match self {
            Command::Enable { .. } => CMD_ENABLE,
            Command::Reset => CMD_RESET,
            Command::SetDebounce { .. } => CMD_SET_DEBOUNCE,
            Command::SetEager { .. } => CMD_SET_EAGER,
            Command::SaveEeprom => CMD_SAVE_EEPROM,
            Command::LoadEeprom => CMD_LOAD_EEPROM,
            Command::MetricsDump => CMD_METRICS_DUMP,
        }
    }

    /// Encode into a zero-padded report (host side)
    pub fn encode(&self) -> Report {
        let mut report = [0u8; REPORT_SIZE];
        report[0] = self.code();

        match *self {
            Command::Enable { enabled, scan_div } => {
                report[1] = enabled as u8;
                report[2] = scan_div;
            }
            Command::SetDebounce { key, ms } => {
                report[1] = key;
                report[2] = ms;
            }
            Command::SetEager { key, eager } => {
                report[1] = key;
                report[2] = eager as u8;
            }
            Command::Reset | Command::SaveEeprom | Command::LoadEeprom | Command::MetricsDump => {}
        }

        report
    }
}

/// Extract the two argument bytes following the command code
fn args(code: u8, data: &[u8]) -> Result<[u8; 2], CommandError> {
    match data {
        [_, a, b, ..] => Ok([*a, *b]),
        _ => Err(CommandError::Truncated {
            code,
            needed: 3,
            got: data.len(),
        }),
    }
}
