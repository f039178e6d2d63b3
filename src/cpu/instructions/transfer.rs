// Register Transfer instructions for 6502 CPU
//
// Transfers copy one register into another and update Z/N from the
// copied value, with the single exception of TXS, which touches no flags.

use crate::cpu::Cpu;

impl Cpu {
    /// TAX - Transfer Accumulator to X
    ///
    /// Flags affected: Z, N
    pub fn tax(&mut self) {
        self.x = self.a;
        self.update_zero_and_negative_flags(self.x);
    }

    /// TAY - Transfer Accumulator to Y
    ///
    /// Flags affected: Z, N
    pub fn tay(&mut self) {
        self.y = self.a;
        self.update_zero_and_negative_flags(self.y);
    }

    /// TXA - Transfer X to Accumulator
    ///
    /// Flags affected: Z, N
    pub fn txa(&mut self) {
        self.a = self.x;
        self.update_zero_and_negative_flags(self.a);
    }

    /// TYA - Transfer Y to Accumulator
    ///
    /// Flags affected: Z, N
    pub fn tya(&mut self) {
        self.a = self.y;
        self.update_zero_and_negative_flags(self.a);
    }

    /// TSX - Transfer Stack Pointer to X
    ///
    /// Flags affected: Z, N
    pub fn tsx(&mut self) {
        self.x = self.sp;
        self.update_zero_and_negative_flags(self.x);
    }

    /// TXS - Transfer X to Stack Pointer
    ///
    /// Flags affected: None
    pub fn txs(&mut self) {
        self.sp = self.x;
    }
}
