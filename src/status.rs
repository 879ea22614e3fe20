//! Processor status register (`P`).

use bitflags::bitflags;

bitflags! {
    /// The eight bits of the 6502 status register.
    ///
    /// ```text
    /// 7 6 5 4 3 2 1 0
    /// N V U B D I Z C
    /// ```
    ///
    /// `BREAK` and `UNUSED` have no storage on real silicon. They only exist
    /// in the byte pushed by PHP, BRK and interrupt entry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
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
    /// Value of `P` after reset: I, Z and U set.
    pub const RESET: Status = Status::INTERRUPT_DISABLE
        .union(Status::ZERO)
        .union(Status::UNUSED);

    /// Byte pushed by PHP and BRK.
    pub fn to_pushed_brk(self) -> u8 {
        (self | Status::BREAK | Status::UNUSED).bits()
    }

    /// Byte pushed on hardware interrupt entry (IRQ, NMI).
    pub fn to_pushed_irq(self) -> u8 {
        ((self | Status::UNUSED) - Status::BREAK).bits()
    }

    /// Status restored by PLP and RTI.
    pub fn from_pulled(value: u8) -> Status {
        (Status::from_bits_retain(value) | Status::UNUSED) - Status::BREAK
    }

    /// Updates N and Z from an 8-bit result.
    #[inline]
    pub fn set_nz(&mut self, value: u8) {
        self.set(Status::ZERO, value == 0);
        self.set(Status::NEGATIVE, value & 0x80 != 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_value() {
        assert_eq!(Status::RESET.bits(), 0x26);
    }

    #[test]
    fn test_pushed_bytes_force_unused() {
        let p = Status::CARRY;
        assert_eq!(p.to_pushed_brk(), 0x31);
        assert_eq!(p.to_pushed_irq(), 0x21);
        assert_eq!((p | Status::BREAK).to_pushed_irq(), 0x21);
    }

    #[test]
    fn test_pulled_status_drops_break() {
        assert_eq!(Status::from_pulled(0xFF).bits(), 0xEF);
        assert_eq!(Status::from_pulled(0x00).bits(), 0x20);
    }

    #[test]
    fn test_set_nz() {
        let mut p = Status::empty();
        p.set_nz(0);
        assert!(p.contains(Status::ZERO));
        assert!(!p.contains(Status::NEGATIVE));
        p.set_nz(0x80);
        assert!(!p.contains(Status::ZERO));
        assert!(p.contains(Status::NEGATIVE));
        p.set_nz(0x01);
        assert!(p.is_empty());
    }
}
