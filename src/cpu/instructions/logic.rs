// Logic and bit operation instructions for 6502 CPU

use crate::bus::Bus;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::flags;
use crate::cpu::Cpu;
use crate::error::Result;

impl Cpu {
    /// AND - Logical AND with Accumulator
    ///
    /// Flags affected: Z, N
    pub fn and(&mut self, bus: &mut Bus, addr_result: &AddressingResult) -> Result<()> {
        let value = self.read_operand(bus, addr_result)?;
        self.a &= value;
        self.update_zero_and_negative_flags(self.a);
        Ok(())
    }

    /// ORA - Logical OR with Accumulator
    ///
    /// Flags affected: Z, N
    pub fn ora(&mut self, bus: &mut Bus, addr_result: &AddressingResult) -> Result<()> {
        let value = self.read_operand(bus, addr_result)?;
        self.a |= value;
        self.update_zero_and_negative_flags(self.a);
        Ok(())
    }

    /// EOR - Logical Exclusive OR with Accumulator
    ///
    /// Flags affected: Z, N
    pub fn eor(&mut self, bus: &mut Bus, addr_result: &AddressingResult) -> Result<()> {
        let value = self.read_operand(bus, addr_result)?;
        self.a ^= value;
        self.update_zero_and_negative_flags(self.a);
        Ok(())
    }

    /// BIT - Bit Test
    ///
    /// Tests memory against the accumulator without modifying either:
    /// - Z: set if `A & M == 0`
    /// - V: copied from bit 6 of the operand
    /// - N: copied from bit 7 of the operand
    ///
    /// Flags affected: Z, V, N
    pub fn bit(&mut self, bus: &mut Bus, addr_result: &AddressingResult) -> Result<()> {
        let value = self.read_operand(bus, addr_result)?;
        self.update_flag(flags::ZERO, (value & self.a) == 0);
        self.update_flag(flags::OVERFLOW, (value & 0x40) != 0);
        self.update_flag(flags::NEGATIVE, (value & 0x80) != 0);
        Ok(())
    }
}
