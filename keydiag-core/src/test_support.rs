//! In-memory hardware doubles for unit tests

use core::cell::Cell;

use heapless::Vec;
use keydiag_hal::{ByteStore, CycleCounter, ReportSink, ERASED_BYTE};
use keydiag_protocol::Report;

/// Cycle counter driven by the test through a shared cell
pub struct FakeCounter<'a> {
    cycles: &'a Cell<u32>,
}

impl<'a> FakeCounter<'a> {
    pub fn new(cycles: &'a Cell<u32>) -> Self {
        Self { cycles }
    }
}

impl CycleCounter for FakeCounter<'_> {
    fn reset(&mut self) {
        self.cycles.set(0);
    }

    fn cycles(&self) -> u32 {
        self.cycles.get()
    }
}

const STORE_SIZE: usize = 512;
const MAX_LOGGED_WRITES: usize = 512;

/// EEPROM image that starts fully erased
pub struct MemoryStore {
    cells: [u8; STORE_SIZE],
    writes: Vec<u16, MAX_LOGGED_WRITES>,
}

impl MemoryStore {
    pub fn blank() -> Self {
        Self {
            cells: [ERASED_BYTE; STORE_SIZE],
            writes: Vec::new(),
        }
    }

    pub fn cell(&self, addr: u16) -> u8 {
        self.cells[addr as usize]
    }

    /// Poke a cell without logging it as a write
    pub fn set_cell(&mut self, addr: u16, value: u8) {
        self.cells[addr as usize] = value;
    }

    /// Addresses physically written, in order
    pub fn write_log(&self) -> &[u16] {
        &self.writes
    }
}

impl ByteStore for MemoryStore {
    fn read_byte(&mut self, addr: u16) -> u8 {
        self.cells
            .get(addr as usize)
            .copied()
            .unwrap_or(ERASED_BYTE)
    }

    fn update_byte(&mut self, addr: u16, value: u8) {
        if let Some(cell) = self.cells.get_mut(addr as usize) {
            if *cell != value {
                *cell = value;
                self.writes.push(addr).expect("write log full");
            }
        }
    }
}

const MAX_RECORDED: usize = 32;

/// Report sink that keeps everything it is given
#[derive(Default)]
pub struct RecordingSink {
    reports: Vec<Report, MAX_RECORDED>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn get(&self, index: usize) -> &Report {
        &self.reports[index]
    }
}

impl ReportSink for RecordingSink {
    fn send(&mut self, report: &Report) {
        self.reports.push(*report).expect("recording sink full");
    }
}
