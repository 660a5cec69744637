//! Persistent per-key configuration
//!
//! Layout, starting at the codec's base address:
//!
//! ```text
//! base                 base + KEY_COUNT        base + 2 * KEY_COUNT
//! ├─ debounce_ms[0..] ─┼─ eager_mode[0..] ─────┤
//! │  1 byte per key    │  1 byte per key (0/1) │
//! ```
//!
//! Blank storage reads 0xFF everywhere. A blank debounce byte loads as the
//! default window; a blank eager byte loads as false. Any other debounce
//! value is trusted as stored.
//!
//! Saving writes one byte at a time in key order. A power loss in the middle
//! leaves a partly updated table, which is acceptable for data the host can
//! always send again.

use keydiag_hal::{ByteStore, ERASED_BYTE};
use keydiag_protocol::KEY_COUNT;

use crate::state::{DiagState, DEFAULT_DEBOUNCE_MS};

/// Bytes reserved at the start of the EEPROM by the keyboard firmware's own
/// configuration block
pub const RESERVED_EEPROM_BYTES: u16 = 32;

/// Default start of the per-key configuration table
pub const DEFAULT_CONFIG_BASE: u16 = RESERVED_EEPROM_BYTES;

/// Size of the per-key configuration table
pub const CONFIG_REGION_SIZE: u16 = 2 * KEY_COUNT as u16;

/// Highest base at which the whole table fits in the 16-bit address space
pub const MAX_CONFIG_BASE: u16 = u16::MAX - CONFIG_REGION_SIZE;

const EAGER_TRUE: u8 = 1;
const EAGER_FALSE: u8 = 0;

/// Decode a stored debounce byte
pub fn decode_debounce(byte: u8) -> u8 {
    if byte == ERASED_BYTE {
        DEFAULT_DEBOUNCE_MS
    } else {
        byte
    }
}

/// Decode a stored eager byte; both 0 and blank are false
pub fn decode_eager(byte: u8) -> bool {
    byte != EAGER_FALSE && byte != ERASED_BYTE
}

pub fn encode_eager(eager: bool) -> u8 {
    if eager {
        EAGER_TRUE
    } else {
        EAGER_FALSE
    }
}

/// Maps per-key configuration onto a [`ByteStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConfigCodec {
    base: u16,
}

impl Default for ConfigCodec {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_BASE)
    }
}

impl ConfigCodec {
    /// Bind the table to `base`
    ///
    /// A base above [`MAX_CONFIG_BASE`] is clamped to it, so no table
    /// address can wrap around to the start of the store.
    pub const fn new(base: u16) -> Self {
        let base = if base > MAX_CONFIG_BASE {
            MAX_CONFIG_BASE
        } else {
            base
        };
        Self { base }
    }

    pub fn base(&self) -> u16 {
        self.base
    }

    /// Address range occupied by the table
    pub fn region(&self) -> core::ops::Range<u16> {
        self.base..self.base + CONFIG_REGION_SIZE
    }

    fn debounce_addr(&self, index: usize) -> u16 {
        self.base + index as u16
    }

    fn eager_addr(&self, index: usize) -> u16 {
        self.base + (KEY_COUNT + index) as u16
    }

    /// Write all debounce bytes, then all eager bytes
    pub fn save<S: ByteStore>(&self, state: &DiagState, store: &mut S) {
        for (index, &ms) in state.debounce_table().iter().enumerate() {
            store.update_byte(self.debounce_addr(index), ms);
        }
        for (index, &eager) in state.eager_table().iter().enumerate() {
            store.update_byte(self.eager_addr(index), encode_eager(eager));
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("saved {} key configs at {=u16:#x}", KEY_COUNT, self.base);
    }

    /// Replace per-key configuration with the stored table
    pub fn load<S: ByteStore>(&self, state: &mut DiagState, store: &mut S) {
        for (index, ms) in state.debounce_table_mut().iter_mut().enumerate() {
            *ms = decode_debounce(store.read_byte(self.debounce_addr(index)));
        }
        for (index, eager) in state.eager_table_mut().iter_mut().enumerate() {
            *eager = decode_eager(store.read_byte(self.eager_addr(index)));
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("loaded {} key configs from {=u16:#x}", KEY_COUNT, self.base);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MemoryStore;

    #[test]
    fn test_decode_debounce() {
        assert_eq!(decode_debounce(0xFF), DEFAULT_DEBOUNCE_MS);
        assert_eq!(decode_debounce(0), 0);
        assert_eq!(decode_debounce(0xFE), 0xFE);
    }

    #[test]
    fn test_decode_eager() {
        assert!(!decode_eager(0x00));
        assert!(!decode_eager(0xFF));
        assert!(decode_eager(0x01));
        assert!(decode_eager(0x7F));
    }

    #[test]
    fn test_region() {
        let codec = ConfigCodec::new(100);
        assert_eq!(codec.region(), 100..270);
        assert_eq!(ConfigCodec::default().base(), DEFAULT_CONFIG_BASE);
    }

    #[test]
    fn test_high_base_is_clamped() {
        let codec = ConfigCodec::new(0xFFC0);
        assert_eq!(codec.base(), MAX_CONFIG_BASE);
        assert_eq!(codec.region(), MAX_CONFIG_BASE..u16::MAX);
        assert_eq!(ConfigCodec::new(MAX_CONFIG_BASE).base(), MAX_CONFIG_BASE);
        assert_eq!(ConfigCodec::new(u16::MAX).base(), MAX_CONFIG_BASE);

        // Cells beyond the in-memory image are dropped and read back blank
        let mut store = MemoryStore::blank();
        let mut state = DiagState::new();
        state.set_debounce(0, 9);
        codec.save(&state, &mut store);
        codec.load(&mut state, &mut store);
        assert!(store.write_log().is_empty());
        assert_eq!(state.debounce(0), DEFAULT_DEBOUNCE_MS);
    }

    #[test]
    fn test_save_layout() {
        let codec = ConfigCodec::new(16);
        let mut store = MemoryStore::blank();
        let mut state = DiagState::new();
        state.set_debounce(0, 9);
        state.set_debounce(84, 40);
        state.set_eager(1, true);

        codec.save(&state, &mut store);

        assert_eq!(store.cell(16), 9);
        assert_eq!(store.cell(17), DEFAULT_DEBOUNCE_MS);
        assert_eq!(store.cell(16 + 84), 40);
        assert_eq!(store.cell(16 + 85), 0);
        assert_eq!(store.cell(16 + 86), 1);
        assert_eq!(store.cell(16 + 169), 0);
        // Nothing outside the region
        assert_eq!(store.cell(15), ERASED_BYTE);
        assert_eq!(store.cell(16 + 170), ERASED_BYTE);
    }

    #[test]
    fn test_save_order() {
        let codec = ConfigCodec::new(0);
        let mut store = MemoryStore::blank();
        codec.save(&DiagState::new(), &mut store);

        let log = store.write_log();
        assert_eq!(log.len(), 2 * KEY_COUNT);
        assert!(log.iter().enumerate().all(|(i, &addr)| addr == i as u16));
    }

    #[test]
    fn test_load_blank_store() {
        let codec = ConfigCodec::default();
        let mut store = MemoryStore::blank();
        let mut state = DiagState::new();
        state.set_debounce(3, 50);
        state.set_eager(3, true);

        codec.load(&mut state, &mut store);

        assert_eq!(state.debounce(3), DEFAULT_DEBOUNCE_MS);
        assert!(!state.is_eager(3));
    }

    #[test]
    fn test_load_trusts_corrupt_debounce() {
        let codec = ConfigCodec::new(0);
        let mut store = MemoryStore::blank();
        store.set_cell(2, 0xC8);
        store.set_cell(KEY_COUNT as u16 + 2, 0x42);

        let mut state = DiagState::new();
        codec.load(&mut state, &mut store);

        assert_eq!(state.debounce(2), 0xC8);
        assert!(state.is_eager(2));
    }

    #[test]
    fn test_save_load_roundtrip() {
        let codec = ConfigCodec::default();
        let mut store = MemoryStore::blank();
        let mut saved = DiagState::new();
        for key in 0..KEY_COUNT as u8 {
            saved.set_debounce(key, key.wrapping_mul(3));
            saved.set_eager(key, key % 3 == 0);
        }
        codec.save(&saved, &mut store);

        let mut loaded = DiagState::new();
        codec.load(&mut loaded, &mut store);

        for key in 0..KEY_COUNT as u8 {
            assert_eq!(loaded.is_eager(key), key % 3 == 0);
            // 0xFF is indistinguishable from blank and loads as the default
            let expected = decode_debounce(key.wrapping_mul(3));
            assert_eq!(loaded.debounce(key), expected);
        }
    }
}
