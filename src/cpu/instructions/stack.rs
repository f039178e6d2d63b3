// Stack operation instructions for 6502 CPU
// These instructions handle pushing and pulling values to/from the stack.

use crate::bus::Bus;
use crate::cpu::{flags, pack_status, unpack_status, Cpu};
use crate::error::Result;

impl Cpu {
    /// PHA - Push Accumulator
    ///
    /// Flags affected: None
    pub fn pha(&mut self, bus: &mut Bus) -> Result<()> {
        self.stack_push(bus, self.a)
    }

    /// PLA - Pull Accumulator
    ///
    /// Flags affected: Z, N
    pub fn pla(&mut self, bus: &mut Bus) -> Result<()> {
        self.a = self.stack_pop(bus)?;
        self.update_zero_and_negative_flags(self.a);
        Ok(())
    }

    /// PHP - Push Processor Status
    ///
    /// The pushed copy always has the B flag and bit 5 set (software
    /// push, as opposed to the hardware interrupt entry which clears B).
    ///
    /// Flags affected: None
    pub fn php(&mut self, bus: &mut Bus) -> Result<()> {
        self.stack_push(bus, pack_status(self.status | flags::BREAK))
    }

    /// PLP - Pull Processor Status
    ///
    /// Bit 5 reads back as 1; the B bit has no storage in the live
    /// register and is dropped.
    ///
    /// Flags affected: all (loaded from the stack)
    pub fn plp(&mut self, bus: &mut Bus) -> Result<()> {
        let byte = self.stack_pop(bus)?;
        self.status = unpack_status(byte) & !flags::BREAK;
        Ok(())
    }
}
