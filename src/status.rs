//! # Processor Status Register
//!
//! The eight status flags are stored as a single `bitflags` value so the
//! flag view and the byte view can never drift apart.
//!
//! Bit layout (NV-BDIZC):
//! - Bit 7: N (Negative)
//! - Bit 6: V (Overflow)
//! - Bit 5: U (Unused, always 1 when composed)
//! - Bit 4: B (Break)
//! - Bit 3: D (Decimal, stored but has no effect on the 2A03)
//! - Bit 2: I (Interrupt Disable)
//! - Bit 1: Z (Zero)
//! - Bit 0: C (Carry)

use bitflags::bitflags;

bitflags! {
    /// 6502 processor status flags.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib2a03::Status;
    ///
    /// let status = Status::CARRY | Status::NEGATIVE;
    /// assert_eq!(status.compose(), 0b1010_0001);
    ///
    /// let pulled = Status::from_byte(0b0000_0010);
    /// assert!(pulled.contains(Status::ZERO));
    /// assert!(!pulled.contains(Status::UNUSED));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Status: u8 {
        const CARRY = 0x01;
        const ZERO = 0x02;
        const INTERRUPT_DISABLE = 0x04;
        const DECIMAL = 0x08;
        const BREAK = 0x10;
        const UNUSED = 0x20;
        const OVERFLOW = 0x40;
        const NEGATIVE = 0x80;
    }
}

impl Status {
    /// State after reset: every flag clear except Unused.
    pub const fn power_on() -> Self {
        Self::UNUSED
    }

    /// Decodes a status byte, e.g. one pulled by PLP or RTI.
    ///
    /// Every bit is taken from the byte, Unused included.
    pub const fn from_byte(byte: u8) -> Self {
        Self::from_bits_retain(byte)
    }

    /// Encodes the flags as a status byte with Unused forced to 1.
    pub const fn compose(self) -> u8 {
        self.bits() | Self::UNUSED.bits()
    }

    /// The byte pushed to the stack by BRK/PHP (`brk = true`) or by
    /// hardware interrupts (`brk = false`).
    pub const fn pushed(self, brk: bool) -> u8 {
        if brk {
            self.compose() | Self::BREAK.bits()
        } else {
            self.compose() & !Self::BREAK.bits()
        }
    }

    /// Updates Z and N from a result byte.
    #[inline]
    pub(crate) fn set_zn(&mut self, value: u8) {
        self.set(Self::ZERO, value == 0);
        self.set(Self::NEGATIVE, value & 0x80 != 0);
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::power_on()
    }
}
