//! Host command dispatch
//!
//! Commands are one-shot: each report is parsed, applied to the diagnostic
//! state, and forgotten. Nothing is sent back. Empty, truncated, reserved
//! and unknown commands are dropped without touching any state, so the host
//! cannot tell an ignored command from a lost one.

use keydiag_hal::{ByteStore, CycleCounter, ReportSink};
use keydiag_protocol::{Command, CommandError};

use crate::diag::Diagnostics;

impl<C, S, R> Diagnostics<C, S, R>
where
    C: CycleCounter,
    S: ByteStore,
    R: ReportSink,
{
    /// Handle a raw command report from the host
    pub fn process_command(&mut self, data: &[u8]) {
        match Command::parse(data) {
            Ok(command) => self.apply(command),
            Err(e) => log_rejected(e),
        }
    }

    /// Apply an already parsed command
    pub fn apply(&mut self, command: Command) {
        #[cfg(feature = "defmt")]
        defmt::debug!("diag command: {:?}", command);

        match command {
            Command::Enable { enabled, scan_div } => self.state.enable(enabled, scan_div),
            Command::Reset => self.state.reset_counters(),
            Command::SetDebounce { key, ms } => {
                if !self.state.set_debounce(key, ms) {
                    log_unknown_key(key);
                }
            }
            Command::SetEager { key, eager } => {
                if !self.state.set_eager(key, eager) {
                    log_unknown_key(key);
                }
            }
            Command::SaveEeprom => self.save_config(),
            Command::LoadEeprom => self.load_config(),
            Command::MetricsDump => self.reporter.send_metrics_dump(),
        }
    }
}

fn log_rejected(_error: CommandError) {
    #[cfg(feature = "defmt")]
    defmt::debug!("ignoring command: {:?}", _error);
}

fn log_unknown_key(_key: u8) {
    #[cfg(feature = "defmt")]
    defmt::debug!("ignoring config for unknown key {=u8}", _key);
}
