// Shift and rotate instructions for 6502 CPU
//
// All four operate either on the accumulator or on a memory location;
// the dispatcher passes `is_accumulator` based on the addressing mode.
// C always receives the bit shifted out; Z and N come from the new value.

use crate::bus::Bus;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;
use crate::error::Result;

impl Cpu {
    /// Read the shift operand from A or memory
    #[inline]
    fn shift_operand(
        &self,
        bus: &mut Bus,
        addr_result: &AddressingResult,
        is_accumulator: bool,
    ) -> Result<u8> {
        if is_accumulator {
            Ok(self.a)
        } else {
            bus.read(addr_result.address)
        }
    }

    /// Write the shift result back to A or memory
    #[inline]
    fn shift_writeback(
        &mut self,
        bus: &mut Bus,
        addr_result: &AddressingResult,
        is_accumulator: bool,
        result: u8,
    ) -> Result<()> {
        if is_accumulator {
            self.a = result;
            Ok(())
        } else {
            bus.write(addr_result.address, result)
        }
    }

    /// ASL - Arithmetic Shift Left
    ///
    /// Formula: C <- [76543210] <- 0
    ///
    /// Flags affected: C, Z, N
    pub fn asl(
        &mut self,
        bus: &mut Bus,
        addr_result: &AddressingResult,
        is_accumulator: bool,
    ) -> Result<()> {
        let value = self.shift_operand(bus, addr_result, is_accumulator)?;
        self.set_carry((value & 0x80) != 0);
        let result = value << 1;
        self.update_zero_and_negative_flags(result);
        self.shift_writeback(bus, addr_result, is_accumulator, result)
    }

    /// LSR - Logical Shift Right
    ///
    /// Formula: 0 -> [76543210] -> C
    ///
    /// Flags affected: C, Z, N (N always clears since bit 7 becomes 0)
    pub fn lsr(
        &mut self,
        bus: &mut Bus,
        addr_result: &AddressingResult,
        is_accumulator: bool,
    ) -> Result<()> {
        let value = self.shift_operand(bus, addr_result, is_accumulator)?;
        self.set_carry((value & 0x01) != 0);
        let result = value >> 1;
        self.update_zero_and_negative_flags(result);
        self.shift_writeback(bus, addr_result, is_accumulator, result)
    }

    /// ROL - Rotate Left through Carry
    ///
    /// Formula: C <- [76543210] <- C
    ///
    /// Flags affected: C, Z, N
    pub fn rol(
        &mut self,
        bus: &mut Bus,
        addr_result: &AddressingResult,
        is_accumulator: bool,
    ) -> Result<()> {
        let value = self.shift_operand(bus, addr_result, is_accumulator)?;
        let carry_in = if self.get_carry() { 1 } else { 0 };
        self.set_carry((value & 0x80) != 0);
        let result = (value << 1) | carry_in;
        self.update_zero_and_negative_flags(result);
        self.shift_writeback(bus, addr_result, is_accumulator, result)
    }

    /// ROR - Rotate Right through Carry
    ///
    /// Formula: C -> [76543210] -> C
    ///
    /// Flags affected: C, Z, N
    pub fn ror(
        &mut self,
        bus: &mut Bus,
        addr_result: &AddressingResult,
        is_accumulator: bool,
    ) -> Result<()> {
        let value = self.shift_operand(bus, addr_result, is_accumulator)?;
        let carry_in = if self.get_carry() { 0x80 } else { 0 };
        self.set_carry((value & 0x01) != 0);
        let result = (value >> 1) | carry_in;
        self.update_zero_and_negative_flags(result);
        self.shift_writeback(bus, addr_result, is_accumulator, result)
    }
}
