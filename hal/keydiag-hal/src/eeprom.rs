//! Byte-addressed persistent storage
//!
//! Mirrors an EEPROM (or an emulated EEPROM in flash): single bytes are
//! read and written at absolute addresses. Erased cells read as
//! [`ERASED_BYTE`].

/// Value of a byte that has never been written
pub const ERASED_BYTE: u8 = 0xFF;

/// Byte-addressed non-volatile store
///
/// Neither operation can fail from the caller's point of view. A store
/// that cannot read a cell should report it as erased.
pub trait ByteStore {
    /// Read the byte at `addr`
    fn read_byte(&mut self, addr: u16) -> u8;

    /// Write `value` to `addr`
    ///
    /// Implementations skip the physical write when the cell already holds
    /// `value`.
    fn update_byte(&mut self, addr: u16, value: u8);
}

impl<T: ByteStore + ?Sized> ByteStore for &mut T {
    fn read_byte(&mut self, addr: u16) -> u8 {
        (**self).read_byte(addr)
    }

    fn update_byte(&mut self, addr: u16, value: u8) {
        (**self).update_byte(addr, value)
    }
}
