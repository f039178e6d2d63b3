// Miscellaneous instructions for 6502 CPU
// NOP, BRK (software interrupt), and RTI (return from interrupt).

use crate::bus::Bus;
use crate::cpu::{flags, pack_status, unpack_status, vectors, Cpu};
use crate::error::Result;

impl Cpu {
    /// NOP - No Operation
    ///
    /// Also covers the tolerated unofficial NOP-alikes; their operand
    /// bytes are consumed by the addressing layer and discarded here.
    pub fn nop(&self) {}

    /// BRK - Force Interrupt
    ///
    /// Software interrupt through the IRQ/BRK vector. Pushes `PC + 1`
    /// (skipping the padding byte after the opcode), then the packed
    /// status with the B flag set, masks interrupts, and jumps.
    ///
    /// Flags affected: I (set)
    pub fn brk(&mut self, bus: &mut Bus) -> Result<()> {
        self.stack_push_u16(bus, self.pc.wrapping_add(1))?;
        self.stack_push(bus, pack_status(self.status | flags::BREAK))?;
        self.set_flag(flags::INTERRUPT_DISABLE);
        self.pc = bus.read_u16(vectors::IRQ)?;
        Ok(())
    }

    /// RTI - Return from Interrupt
    ///
    /// Pops the status byte first, then PC low, then PC high. Unlike
    /// RTS there is no +1 adjustment; the interrupt entry pushed the
    /// exact resume address. Bit 5 of the popped status reads back as 1
    /// and the B bit is dropped.
    ///
    /// Flags affected: all (loaded from the stack)
    pub fn rti(&mut self, bus: &mut Bus) -> Result<()> {
        let status = self.stack_pop(bus)?;
        self.status = unpack_status(status) & !flags::BREAK;
        self.pc = self.stack_pop_u16(bus)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::bus::Bus;
    use crate::cpu::{flags, vectors, Cpu};

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
    fn test_nop_advances_pc_only() {
        let (mut cpu, mut bus) = setup(&[0xEA]);
        let cycles = cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.pc, 0x0201);
        assert_eq!(cycles, 2);
    }

    #[test]
    fn test_unofficial_nop_consumes_operand() {
        // $0C is a 3-byte unofficial NOP
        let (mut cpu, mut bus) = setup(&[0x0C, 0x00, 0x03]);
        cpu.step(&mut bus).unwrap();
        assert_eq!(cpu.pc, 0x0203, "operand bytes skipped");
    }

    #[test]
    fn test_brk_enters_irq_vector() {
        let (mut cpu, mut bus) = setup(&[0x00]);
        bus.patch_rom_u16(vectors::IRQ, 0xA000);
        cpu.step(&mut bus).unwrap();

        assert_eq!(cpu.pc, 0xA000);
        assert!(cpu.get_flag(flags::INTERRUPT_DISABLE));
        // Pushed status has B set
        let pushed = bus.read(0x01FB).unwrap();
        assert_eq!(pushed & flags::BREAK, flags::BREAK);
    }

    #[test]
    fn test_rti_restores_nmi_frame() {
        // Simulate an NMI from $0200 with carry set, then RTI from the handler
        let (mut cpu, mut bus) = setup(&[]);
        bus.patch_rom_u16(vectors::NMI, 0x0300);
        bus.write(0x0300, 0x40).unwrap(); // RTI

        cpu.set_carry(true);
        cpu.nmi(&mut bus).unwrap();
        assert_eq!(cpu.pc, 0x0300);
        cpu.set_carry(false); // handler clobbers flags

        cpu.step(&mut bus).unwrap(); // RTI
        assert_eq!(cpu.pc, 0x0200, "resume address restored");
        assert!(cpu.get_carry(), "flags restored from the stack");
        assert_eq!(cpu.sp, 0xFD);
    }
}
