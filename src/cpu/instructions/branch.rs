// Branch instructions for 6502 CPU
// These instructions perform conditional branches based on processor status flags.
// All branch instructions use relative addressing mode and do not modify any flags.
//
// Cycles:
// - 2 cycles if the branch is not taken
// - 3 cycles if taken within the same page
// - 4 cycles if taken across a page boundary

use crate::cpu::addressing::AddressingResult;
use crate::cpu::Cpu;

impl Cpu {
    /// Shared branch core
    ///
    /// Jumps to the precomputed target when `condition` holds and
    /// returns the extra cycles: 1 for a taken branch, plus 1 more when
    /// the target sits on a different page than the post-decode PC.
    #[inline]
    fn branch(&mut self, condition: bool, addr_result: &AddressingResult) -> u8 {
        if !condition {
            return 0;
        }
        self.pc = addr_result.address;
        if addr_result.page_crossed {
            2
        } else {
            1
        }
    }

    /// BCC - Branch if Carry Clear
    pub fn bcc(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(!self.get_carry(), addr_result)
    }

    /// BCS - Branch if Carry Set
    pub fn bcs(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(self.get_carry(), addr_result)
    }

    /// BEQ - Branch if Equal (Z set)
    pub fn beq(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(self.get_zero(), addr_result)
    }

    /// BNE - Branch if Not Equal (Z clear)
    pub fn bne(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(!self.get_zero(), addr_result)
    }

    /// BMI - Branch if Minus (N set)
    pub fn bmi(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(self.get_negative(), addr_result)
    }

    /// BPL - Branch if Plus (N clear)
    pub fn bpl(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(!self.get_negative(), addr_result)
    }

    /// BVC - Branch if Overflow Clear
    pub fn bvc(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(!self.get_overflow(), addr_result)
    }

    /// BVS - Branch if Overflow Set
    pub fn bvs(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(self.get_overflow(), addr_result)
    }
}
