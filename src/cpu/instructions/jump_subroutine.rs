// Jump and Subroutine instructions for 6502 CPU
// These instructions perform unconditional jumps and subroutine calls/returns.

use crate::bus::Bus;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;
use crate::error::Result;

impl Cpu {
    /// JMP - Jump
    ///
    /// Sets PC to the effective address. Works with absolute and
    /// indirect addressing (the indirect page-wrap quirk lives in the
    /// addressing layer).
    ///
    /// Flags affected: None
    pub fn jmp(&mut self, addr_result: &AddressingResult) {
        self.pc = addr_result.address;
    }

    /// JSR - Jump to Subroutine
    ///
    /// Pushes `PC - 1` (the address of the last byte of the JSR
    /// instruction) high byte first, then jumps. RTS undoes this by
    /// popping and adding 1.
    ///
    /// Flags affected: None
    pub fn jsr(&mut self, bus: &mut Bus, addr_result: &AddressingResult) -> Result<()> {
        self.stack_push_u16(bus, self.pc.wrapping_sub(1))?;
        self.pc = addr_result.address;
        Ok(())
    }

    /// RTS - Return from Subroutine
    ///
    /// Pops the address pushed by JSR and adds 1 to land on the
    /// instruction after the call.
    ///
    /// Flags affected: None
    pub fn rts(&mut self, bus: &mut Bus) -> Result<()> {
        self.pc = self.stack_pop_u16(bus)?.wrapping_add(1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::bus::Bus;
    use crate::cpu::Cpu;

    fn setup(program: &[u8]) -> (Cpu, Bus) {
        let mut cpu = Cpu::new();
        let mut bus = Bus::with_test_rom();
        for (i, byte) in program.iter().enumerate() {
            bus.write(0x0200 + i as u16, *byte).unwrap();
        }
        cpu.pc = 0x0200;
        (cpu, bus)
    }

    #[test]
    fn test_jmp_absolute() {
        let (mut cpu, mut bus) = setup(&[0x4C, 0x34, 0x12]);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.pc, 0x1234);
    }

    #[test]
    fn test_jsr_rts_roundtrip() {
        // JSR $0300 ... at $0300: RTS
        let (mut cpu, mut bus) = setup(&[0x20, 0x00, 0x03]);
        bus.write(0x0300, 0x60).unwrap();

        cpu.step(&mut bus).unwrap(); // JSR
        assert_eq!(cpu.pc, 0x0300);
        assert_eq!(cpu.sp, 0xFB, "return address pushed");

        cpu.step(&mut bus).unwrap(); // RTS
        assert_eq!(cpu.pc, 0x0203, "back to the byte after the JSR");
        assert_eq!(cpu.sp, 0xFD, "stack balanced");
    }

    #[test]
    fn test_jsr_pushes_pc_minus_one() {
        let (mut cpu, mut bus) = setup(&[0x20, 0x00, 0x03]);
        cpu.step(&mut bus).unwrap();

        // Pushed word is $0202 (address of the JSR's last byte)
        assert_eq!(bus.read(0x01FD).unwrap(), 0x02, "high byte");
        assert_eq!(bus.read(0x01FC).unwrap(), 0x02, "low byte");
    }

    #[test]
    fn test_nested_subroutines() {
        // JSR $0300; $0300: JSR $0310; $0310: RTS; back at $0303: RTS
        let (mut cpu, mut bus) = setup(&[0x20, 0x00, 0x03]);
        bus.write(0x0300, 0x20).unwrap();
        bus.write(0x0301, 0x10).unwrap();
        bus.write(0x0302, 0x03).unwrap();
        bus.write(0x0303, 0x60).unwrap();
        bus.write(0x0310, 0x60).unwrap();

        cpu.step(&mut bus).unwrap(); // JSR $0300
        cpu.step(&mut bus).unwrap(); // JSR $0310
        assert_eq!(cpu.pc, 0x0310);
        cpu.step(&mut bus).unwrap(); // inner RTS
        assert_eq!(cpu.pc, 0x0303);
        cpu.step(&mut bus).unwrap(); // outer RTS
        assert_eq!(cpu.pc, 0x0203);
        assert_eq!(cpu.sp, 0xFD);
    }
}
