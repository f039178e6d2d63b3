// Load and Store instructions for 6502 CPU

use crate::bus::Bus;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;
use crate::error::Result;

impl Cpu {
    // ========================================
    // Load Instructions
    // ========================================
    // Load instructions read a value from memory into a register
    // and update the Zero (Z) and Negative (N) flags.

    /// LDA - Load Accumulator
    ///
    /// Loads a byte from memory into the accumulator.
    ///
    /// Flags affected: Z, N
    pub fn lda(&mut self, bus: &mut Bus, addr_result: &AddressingResult) -> Result<()> {
        let value = self.read_operand(bus, addr_result)?;
        self.a = value;
        self.update_zero_and_negative_flags(value);
        Ok(())
    }

    /// LDX - Load X Register
    ///
    /// Flags affected: Z, N
    pub fn ldx(&mut self, bus: &mut Bus, addr_result: &AddressingResult) -> Result<()> {
        let value = self.read_operand(bus, addr_result)?;
        self.x = value;
        self.update_zero_and_negative_flags(value);
        Ok(())
    }

    /// LDY - Load Y Register
    ///
    /// Flags affected: Z, N
    pub fn ldy(&mut self, bus: &mut Bus, addr_result: &AddressingResult) -> Result<()> {
        let value = self.read_operand(bus, addr_result)?;
        self.y = value;
        self.update_zero_and_negative_flags(value);
        Ok(())
    }

    // ========================================
    // Store Instructions
    // ========================================
    // Store instructions write a register value to memory.
    // They do NOT affect any processor flags.

    /// STA - Store Accumulator
    ///
    /// Flags affected: None
    pub fn sta(&self, bus: &mut Bus, addr_result: &AddressingResult) -> Result<()> {
        bus.write(addr_result.address, self.a)
    }

    /// STX - Store X Register
    ///
    /// Flags affected: None
    pub fn stx(&self, bus: &mut Bus, addr_result: &AddressingResult) -> Result<()> {
        bus.write(addr_result.address, self.x)
    }

    /// STY - Store Y Register
    ///
    /// Flags affected: None
    pub fn sty(&self, bus: &mut Bus, addr_result: &AddressingResult) -> Result<()> {
        bus.write(addr_result.address, self.y)
    }
}

#[cfg(test)]
mod tests {
    use crate::bus::Bus;
    use crate::cpu::Cpu;

    fn run_program(program: &[u8], steps: usize) -> (Cpu, Bus) {
        let mut cpu = Cpu::new();
        let mut bus = Bus::with_test_rom();
        for (i, byte) in program.iter().enumerate() {
            bus.write(0x0200 + i as u16, *byte).unwrap();
        }
        cpu.pc = 0x0200;
        for _ in 0..steps {
            cpu.step(&mut bus).unwrap();
        }
        (cpu, bus)
    }

    #[test]
    fn test_lda_immediate_sets_flags() {
        let (cpu, _) = run_program(&[0xA9, 0x42], 1);
        assert_eq!(cpu.a, 0x42);
        assert!(!cpu.get_zero());
        assert!(!cpu.get_negative());

        let (cpu, _) = run_program(&[0xA9, 0x00], 1);
        assert!(cpu.get_zero(), "loading zero sets Z");

        let (cpu, _) = run_program(&[0xA9, 0x80], 1);
        assert!(cpu.get_negative(), "loading bit-7 value sets N");
    }

    #[test]
    fn test_ldx_ldy() {
        let (cpu, _) = run_program(&[0xA2, 0x11, 0xA0, 0x22], 2);
        assert_eq!(cpu.x, 0x11);
        assert_eq!(cpu.y, 0x22);
    }

    #[test]
    fn test_sta_stores_without_flags() {
        // LDA #$80; STA $10
        let (cpu, mut bus) = run_program(&[0xA9, 0x80, 0x85, 0x10], 2);
        assert_eq!(bus.read(0x0010).unwrap(), 0x80);
        assert!(cpu.get_negative(), "flags still from the LDA");
    }

    #[test]
    fn test_stx_sty_absolute() {
        // LDX #$0A; LDY #$0B; STX $0300; STY $0301
        let program = &[0xA2, 0x0A, 0xA0, 0x0B, 0x8E, 0x00, 0x03, 0x8C, 0x01, 0x03];
        let (_, mut bus) = run_program(program, 4);
        assert_eq!(bus.read(0x0300).unwrap(), 0x0A);
        assert_eq!(bus.read(0x0301).unwrap(), 0x0B);
    }

    #[test]
    fn test_lda_indirect_indexed() {
        // Pointer at $40 -> $0300, Y=4 -> $0304
        let mut cpu = Cpu::new();
        let mut bus = Bus::with_test_rom();
        bus.write(0x0040, 0x00).unwrap();
        bus.write(0x0041, 0x03).unwrap();
        bus.write(0x0304, 0x77).unwrap();
        bus.write(0x0200, 0xB1).unwrap();
        bus.write(0x0201, 0x40).unwrap();
        cpu.pc = 0x0200;
        cpu.y = 4;

        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.a, 0x77);
    }
}
