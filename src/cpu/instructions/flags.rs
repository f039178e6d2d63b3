// Flag manipulation instructions for 6502 CPU
// These instructions directly set or clear specific processor status flags.
// None of them touch memory or other registers.

use crate::cpu::{flags, Cpu};

impl Cpu {
    /// CLC - Clear Carry Flag
    pub fn clc(&mut self) {
        self.clear_flag(flags::CARRY);
    }

    /// SEC - Set Carry Flag
    pub fn sec(&mut self) {
        self.set_flag(flags::CARRY);
    }

    /// CLD - Clear Decimal Mode
    ///
    /// The D flag is storable but has no arithmetic effect on this CPU.
    pub fn cld(&mut self) {
        self.clear_flag(flags::DECIMAL);
    }

    /// SED - Set Decimal Mode
    pub fn sed(&mut self) {
        self.set_flag(flags::DECIMAL);
    }

    /// CLI - Clear Interrupt Disable
    pub fn cli(&mut self) {
        self.clear_flag(flags::INTERRUPT_DISABLE);
    }

    /// SEI - Set Interrupt Disable
    pub fn sei(&mut self) {
        self.set_flag(flags::INTERRUPT_DISABLE);
    }

    /// CLV - Clear Overflow Flag
    ///
    /// There is no matching set instruction; V is only set by ADC/SBC
    /// and BIT.
    pub fn clv(&mut self) {
        self.clear_flag(flags::OVERFLOW);
    }
}

#[cfg(test)]
mod tests {
    use crate::bus::Bus;
    use crate::cpu::{flags, Cpu};

    fn run_program(program: &[u8], steps: usize) -> Cpu {
        let mut cpu = Cpu::new();
        let mut bus = Bus::with_test_rom();
        for (i, byte) in program.iter().enumerate() {
            bus.write(0x0200 + i as u16, *byte).unwrap();
        }
        cpu.pc = 0x0200;
        for _ in 0..steps {
            cpu.step(&mut bus).unwrap();
        }
        cpu
    }

    #[test]
    fn test_sec_clc() {
        let cpu = run_program(&[0x38], 1);
        assert!(cpu.get_carry());

        let cpu = run_program(&[0x38, 0x18], 2);
        assert!(!cpu.get_carry());
    }

    #[test]
    fn test_sed_cld() {
        let cpu = run_program(&[0xF8], 1);
        assert!(cpu.get_flag(flags::DECIMAL));

        let cpu = run_program(&[0xF8, 0xD8], 2);
        assert!(!cpu.get_flag(flags::DECIMAL));
    }

    #[test]
    fn test_sei_cli() {
        // I starts set at power-on
        let cpu = run_program(&[0x58], 1);
        assert!(!cpu.get_flag(flags::INTERRUPT_DISABLE));

        let cpu = run_program(&[0x58, 0x78], 2);
        assert!(cpu.get_flag(flags::INTERRUPT_DISABLE));
    }

    #[test]
    fn test_clv_after_overflow() {
        // LDA #$7F; ADC #$01 sets V; CLV clears it
        let cpu = run_program(&[0xA9, 0x7F, 0x69, 0x01, 0xB8], 3);
        assert!(!cpu.get_overflow());
    }
}
