// Arithmetic instructions for 6502 CPU

use crate::bus::Bus;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::{flags, Cpu};
use crate::error::Result;

impl Cpu {
    /// Shared add core for ADC and SBC
    ///
    /// Computes `A + value + carry` in 16 bits, writes the truncated
    /// result back to A, and derives all four flags:
    /// - C: the 16-bit sum exceeded 255
    /// - V: `(~(A^value)) & (A^result) & 0x80` - the operands agreed in
    ///   sign and the result disagrees
    /// - Z, N from the result
    fn add_with_carry(&mut self, value: u8) {
        let carry = if self.get_carry() { 1u16 } else { 0 };
        let sum = self.a as u16 + value as u16 + carry;
        let result = sum as u8;

        self.set_carry(sum > 0xFF);
        let overflow = (!(self.a ^ value)) & (self.a ^ result) & 0x80 != 0;
        self.update_flag(flags::OVERFLOW, overflow);

        self.a = result;
        self.update_zero_and_negative_flags(result);
    }

    /// ADC - Add with Carry
    ///
    /// Formula: A = A + M + C
    ///
    /// Flags affected: C, Z, V, N
    pub fn adc(&mut self, bus: &mut Bus, addr_result: &AddressingResult) -> Result<()> {
        let value = self.read_operand(bus, addr_result)?;
        self.add_with_carry(value);
        Ok(())
    }

    /// SBC - Subtract with Carry
    ///
    /// Formula: A = A - M - (1 - C), implemented as ADC of the one's
    /// complement: A + !M + C.
    ///
    /// Flags affected: C, Z, V, N
    pub fn sbc(&mut self, bus: &mut Bus, addr_result: &AddressingResult) -> Result<()> {
        let value = self.read_operand(bus, addr_result)?;
        self.add_with_carry(!value);
        Ok(())
    }

    /// INC - Increment Memory
    ///
    /// Flags affected: Z, N
    pub fn inc(&mut self, bus: &mut Bus, addr_result: &AddressingResult) -> Result<()> {
        let value = bus.read(addr_result.address)?.wrapping_add(1);
        bus.write(addr_result.address, value)?;
        self.update_zero_and_negative_flags(value);
        Ok(())
    }

    /// DEC - Decrement Memory
    ///
    /// Flags affected: Z, N
    pub fn dec(&mut self, bus: &mut Bus, addr_result: &AddressingResult) -> Result<()> {
        let value = bus.read(addr_result.address)?.wrapping_sub(1);
        bus.write(addr_result.address, value)?;
        self.update_zero_and_negative_flags(value);
        Ok(())
    }

    /// INX - Increment X Register
    ///
    /// Flags affected: Z, N
    pub fn inx(&mut self) {
        self.x = self.x.wrapping_add(1);
        self.update_zero_and_negative_flags(self.x);
    }

    /// INY - Increment Y Register
    ///
    /// Flags affected: Z, N
    pub fn iny(&mut self) {
        self.y = self.y.wrapping_add(1);
        self.update_zero_and_negative_flags(self.y);
    }

    /// DEX - Decrement X Register
    ///
    /// Flags affected: Z, N
    pub fn dex(&mut self) {
        self.x = self.x.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.x);
    }

    /// DEY - Decrement Y Register
    ///
    /// Flags affected: Z, N
    pub fn dey(&mut self) {
        self.y = self.y.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.y);
    }
}
