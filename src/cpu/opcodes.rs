// Opcode table for the 6502
//
// A 256-entry static table mapping every opcode to its mnemonic, byte
// size, addressing mode, and base cycle count. The table is data-driven
// so the scheduler can look up the cycle cost of the next instruction
// without executing it.
//
// Entries the decoder does not know carry the "???" mnemonic; executing
// one is a fatal fault. The documented unofficial NOP-alikes (and the
// unofficial SBC at $EB) are present with correct sizes and cycles so
// ROMs that lean on them keep running.

use crate::cpu::addressing::AddressingMode;

/// Decoded opcode information
#[derive(Debug, Clone, Copy)]
pub struct OpcodeInfo {
    /// Three-letter mnemonic, or "???" for unknown opcodes
    pub mnemonic: &'static str,
    /// Total instruction size in bytes (opcode + operands)
    pub bytes: u8,
    /// Addressing mode
    pub mode: AddressingMode,
    /// Base cycle count
    pub cycles: u8,
    /// Add one cycle when the effective address crosses a page
    pub page_cycle: bool,
    /// True for unofficial opcodes tolerated as NOPs (or aliased ops)
    pub unofficial: bool,
}

impl OpcodeInfo {
    /// Whether the decoder knows this opcode
    #[inline]
    pub fn is_known(&self) -> bool {
        self.mnemonic != "???"
    }
}

const UNKNOWN: OpcodeInfo = OpcodeInfo {
    mnemonic: "???",
    bytes: 1,
    mode: AddressingMode::Implied,
    cycles: 0,
    page_cycle: false,
    unofficial: false,
};

const fn op(
    mnemonic: &'static str,
    bytes: u8,
    mode: AddressingMode,
    cycles: u8,
    page_cycle: bool,
) -> OpcodeInfo {
    OpcodeInfo {
        mnemonic,
        bytes,
        mode,
        cycles,
        page_cycle,
        unofficial: false,
    }
}

const fn unofficial(
    mnemonic: &'static str,
    bytes: u8,
    mode: AddressingMode,
    cycles: u8,
    page_cycle: bool,
) -> OpcodeInfo {
    OpcodeInfo {
        mnemonic,
        bytes,
        mode,
        cycles,
        page_cycle,
        unofficial: true,
    }
}

/// The 256-entry opcode table
pub static OPCODE_TABLE: [OpcodeInfo; 256] = build_table();

#[allow(clippy::too_many_lines)]
const fn build_table() -> [OpcodeInfo; 256] {
    use AddressingMode::*;

    let mut t = [UNKNOWN; 256];

    // Load instructions
    t[0xA9] = op("LDA", 2, Immediate, 2, false);
    t[0xA5] = op("LDA", 2, ZeroPage, 3, false);
    t[0xB5] = op("LDA", 2, ZeroPageX, 4, false);
    t[0xAD] = op("LDA", 3, Absolute, 4, false);
    t[0xBD] = op("LDA", 3, AbsoluteX, 4, true);
    t[0xB9] = op("LDA", 3, AbsoluteY, 4, true);
    t[0xA1] = op("LDA", 2, IndexedIndirect, 6, false);
    t[0xB1] = op("LDA", 2, IndirectIndexed, 5, true);
    t[0xA2] = op("LDX", 2, Immediate, 2, false);
    t[0xA6] = op("LDX", 2, ZeroPage, 3, false);
    t[0xB6] = op("LDX", 2, ZeroPageY, 4, false);
    t[0xAE] = op("LDX", 3, Absolute, 4, false);
    t[0xBE] = op("LDX", 3, AbsoluteY, 4, true);
    t[0xA0] = op("LDY", 2, Immediate, 2, false);
    t[0xA4] = op("LDY", 2, ZeroPage, 3, false);
    t[0xB4] = op("LDY", 2, ZeroPageX, 4, false);
    t[0xAC] = op("LDY", 3, Absolute, 4, false);
    t[0xBC] = op("LDY", 3, AbsoluteX, 4, true);

    // Store instructions
    t[0x85] = op("STA", 2, ZeroPage, 3, false);
    t[0x95] = op("STA", 2, ZeroPageX, 4, false);
    t[0x8D] = op("STA", 3, Absolute, 4, false);
    t[0x9D] = op("STA", 3, AbsoluteX, 5, false);
    t[0x99] = op("STA", 3, AbsoluteY, 5, false);
    t[0x81] = op("STA", 2, IndexedIndirect, 6, false);
    t[0x91] = op("STA", 2, IndirectIndexed, 6, false);
    t[0x86] = op("STX", 2, ZeroPage, 3, false);
    t[0x96] = op("STX", 2, ZeroPageY, 4, false);
    t[0x8E] = op("STX", 3, Absolute, 4, false);
    t[0x84] = op("STY", 2, ZeroPage, 3, false);
    t[0x94] = op("STY", 2, ZeroPageX, 4, false);
    t[0x8C] = op("STY", 3, Absolute, 4, false);

    // Register transfers
    t[0xAA] = op("TAX", 1, Implied, 2, false);
    t[0xA8] = op("TAY", 1, Implied, 2, false);
    t[0x8A] = op("TXA", 1, Implied, 2, false);
    t[0x98] = op("TYA", 1, Implied, 2, false);
    t[0xBA] = op("TSX", 1, Implied, 2, false);
    t[0x9A] = op("TXS", 1, Implied, 2, false);

    // Stack operations
    t[0x48] = op("PHA", 1, Implied, 3, false);
    t[0x08] = op("PHP", 1, Implied, 3, false);
    t[0x68] = op("PLA", 1, Implied, 4, false);
    t[0x28] = op("PLP", 1, Implied, 4, false);

    // Logical instructions
    t[0x29] = op("AND", 2, Immediate, 2, false);
    t[0x25] = op("AND", 2, ZeroPage, 3, false);
    t[0x35] = op("AND", 2, ZeroPageX, 4, false);
    t[0x2D] = op("AND", 3, Absolute, 4, false);
    t[0x3D] = op("AND", 3, AbsoluteX, 4, true);
    t[0x39] = op("AND", 3, AbsoluteY, 4, true);
    t[0x21] = op("AND", 2, IndexedIndirect, 6, false);
    t[0x31] = op("AND", 2, IndirectIndexed, 5, true);
    t[0x49] = op("EOR", 2, Immediate, 2, false);
    t[0x45] = op("EOR", 2, ZeroPage, 3, false);
    t[0x55] = op("EOR", 2, ZeroPageX, 4, false);
    t[0x4D] = op("EOR", 3, Absolute, 4, false);
    t[0x5D] = op("EOR", 3, AbsoluteX, 4, true);
    t[0x59] = op("EOR", 3, AbsoluteY, 4, true);
    t[0x41] = op("EOR", 2, IndexedIndirect, 6, false);
    t[0x51] = op("EOR", 2, IndirectIndexed, 5, true);
    t[0x09] = op("ORA", 2, Immediate, 2, false);
    t[0x05] = op("ORA", 2, ZeroPage, 3, false);
    t[0x15] = op("ORA", 2, ZeroPageX, 4, false);
    t[0x0D] = op("ORA", 3, Absolute, 4, false);
    t[0x1D] = op("ORA", 3, AbsoluteX, 4, true);
    t[0x19] = op("ORA", 3, AbsoluteY, 4, true);
    t[0x01] = op("ORA", 2, IndexedIndirect, 6, false);
    t[0x11] = op("ORA", 2, IndirectIndexed, 5, true);
    t[0x24] = op("BIT", 2, ZeroPage, 3, false);
    t[0x2C] = op("BIT", 3, Absolute, 4, false);

    // Arithmetic instructions
    t[0x69] = op("ADC", 2, Immediate, 2, false);
    t[0x65] = op("ADC", 2, ZeroPage, 3, false);
    t[0x75] = op("ADC", 2, ZeroPageX, 4, false);
    t[0x6D] = op("ADC", 3, Absolute, 4, false);
    t[0x7D] = op("ADC", 3, AbsoluteX, 4, true);
    t[0x79] = op("ADC", 3, AbsoluteY, 4, true);
    t[0x61] = op("ADC", 2, IndexedIndirect, 6, false);
    t[0x71] = op("ADC", 2, IndirectIndexed, 5, true);
    t[0xE9] = op("SBC", 2, Immediate, 2, false);
    t[0xE5] = op("SBC", 2, ZeroPage, 3, false);
    t[0xF5] = op("SBC", 2, ZeroPageX, 4, false);
    t[0xED] = op("SBC", 3, Absolute, 4, false);
    t[0xFD] = op("SBC", 3, AbsoluteX, 4, true);
    t[0xF9] = op("SBC", 3, AbsoluteY, 4, true);
    t[0xE1] = op("SBC", 2, IndexedIndirect, 6, false);
    t[0xF1] = op("SBC", 2, IndirectIndexed, 5, true);

    // Compare instructions
    t[0xC9] = op("CMP", 2, Immediate, 2, false);
    t[0xC5] = op("CMP", 2, ZeroPage, 3, false);
    t[0xD5] = op("CMP", 2, ZeroPageX, 4, false);
    t[0xCD] = op("CMP", 3, Absolute, 4, false);
    t[0xDD] = op("CMP", 3, AbsoluteX, 4, true);
    t[0xD9] = op("CMP", 3, AbsoluteY, 4, true);
    t[0xC1] = op("CMP", 2, IndexedIndirect, 6, false);
    t[0xD1] = op("CMP", 2, IndirectIndexed, 5, true);
    t[0xE0] = op("CPX", 2, Immediate, 2, false);
    t[0xE4] = op("CPX", 2, ZeroPage, 3, false);
    t[0xEC] = op("CPX", 3, Absolute, 4, false);
    t[0xC0] = op("CPY", 2, Immediate, 2, false);
    t[0xC4] = op("CPY", 2, ZeroPage, 3, false);
    t[0xCC] = op("CPY", 3, Absolute, 4, false);

    // Increments and decrements
    t[0xE6] = op("INC", 2, ZeroPage, 5, false);
    t[0xF6] = op("INC", 2, ZeroPageX, 6, false);
    t[0xEE] = op("INC", 3, Absolute, 6, false);
    t[0xFE] = op("INC", 3, AbsoluteX, 7, false);
    t[0xE8] = op("INX", 1, Implied, 2, false);
    t[0xC8] = op("INY", 1, Implied, 2, false);
    t[0xC6] = op("DEC", 2, ZeroPage, 5, false);
    t[0xD6] = op("DEC", 2, ZeroPageX, 6, false);
    t[0xCE] = op("DEC", 3, Absolute, 6, false);
    t[0xDE] = op("DEC", 3, AbsoluteX, 7, false);
    t[0xCA] = op("DEX", 1, Implied, 2, false);
    t[0x88] = op("DEY", 1, Implied, 2, false);

    // Shifts and rotates
    t[0x0A] = op("ASL", 1, Accumulator, 2, false);
    t[0x06] = op("ASL", 2, ZeroPage, 5, false);
    t[0x16] = op("ASL", 2, ZeroPageX, 6, false);
    t[0x0E] = op("ASL", 3, Absolute, 6, false);
    t[0x1E] = op("ASL", 3, AbsoluteX, 7, false);
    t[0x4A] = op("LSR", 1, Accumulator, 2, false);
    t[0x46] = op("LSR", 2, ZeroPage, 5, false);
    t[0x56] = op("LSR", 2, ZeroPageX, 6, false);
    t[0x4E] = op("LSR", 3, Absolute, 6, false);
    t[0x5E] = op("LSR", 3, AbsoluteX, 7, false);
    t[0x2A] = op("ROL", 1, Accumulator, 2, false);
    t[0x26] = op("ROL", 2, ZeroPage, 5, false);
    t[0x36] = op("ROL", 2, ZeroPageX, 6, false);
    t[0x2E] = op("ROL", 3, Absolute, 6, false);
    t[0x3E] = op("ROL", 3, AbsoluteX, 7, false);
    t[0x6A] = op("ROR", 1, Accumulator, 2, false);
    t[0x66] = op("ROR", 2, ZeroPage, 5, false);
    t[0x76] = op("ROR", 2, ZeroPageX, 6, false);
    t[0x6E] = op("ROR", 3, Absolute, 6, false);
    t[0x7E] = op("ROR", 3, AbsoluteX, 7, false);

    // Jumps and subroutines
    t[0x4C] = op("JMP", 3, Absolute, 3, false);
    t[0x6C] = op("JMP", 3, Indirect, 5, false);
    t[0x20] = op("JSR", 3, Absolute, 6, false);
    t[0x60] = op("RTS", 1, Implied, 6, false);

    // Branches (2 base cycles, +1 taken, +1 more on page cross)
    t[0x90] = op("BCC", 2, Relative, 2, false);
    t[0xB0] = op("BCS", 2, Relative, 2, false);
    t[0xF0] = op("BEQ", 2, Relative, 2, false);
    t[0x30] = op("BMI", 2, Relative, 2, false);
    t[0xD0] = op("BNE", 2, Relative, 2, false);
    t[0x10] = op("BPL", 2, Relative, 2, false);
    t[0x50] = op("BVC", 2, Relative, 2, false);
    t[0x70] = op("BVS", 2, Relative, 2, false);

    // Flag instructions
    t[0x18] = op("CLC", 1, Implied, 2, false);
    t[0xD8] = op("CLD", 1, Implied, 2, false);
    t[0x58] = op("CLI", 1, Implied, 2, false);
    t[0xB8] = op("CLV", 1, Implied, 2, false);
    t[0x38] = op("SEC", 1, Implied, 2, false);
    t[0xF8] = op("SED", 1, Implied, 2, false);
    t[0x78] = op("SEI", 1, Implied, 2, false);

    // Miscellaneous
    t[0x00] = op("BRK", 1, Implied, 7, false);
    t[0x40] = op("RTI", 1, Implied, 6, false);
    t[0xEA] = op("NOP", 1, Implied, 2, false);

    // Unofficial single-byte NOPs
    t[0x1A] = unofficial("NOP", 1, Implied, 2, false);
    t[0x3A] = unofficial("NOP", 1, Implied, 2, false);
    t[0x5A] = unofficial("NOP", 1, Implied, 2, false);
    t[0x7A] = unofficial("NOP", 1, Implied, 2, false);
    t[0xDA] = unofficial("NOP", 1, Implied, 2, false);
    t[0xFA] = unofficial("NOP", 1, Implied, 2, false);

    // Unofficial NOPs with an immediate operand
    t[0x80] = unofficial("NOP", 2, Immediate, 2, false);
    t[0x82] = unofficial("NOP", 2, Immediate, 2, false);
    t[0x89] = unofficial("NOP", 2, Immediate, 2, false);
    t[0xC2] = unofficial("NOP", 2, Immediate, 2, false);
    t[0xE2] = unofficial("NOP", 2, Immediate, 2, false);

    // Unofficial NOPs reading zero page
    t[0x04] = unofficial("NOP", 2, ZeroPage, 3, false);
    t[0x44] = unofficial("NOP", 2, ZeroPage, 3, false);
    t[0x64] = unofficial("NOP", 2, ZeroPage, 3, false);
    t[0x14] = unofficial("NOP", 2, ZeroPageX, 4, false);
    t[0x34] = unofficial("NOP", 2, ZeroPageX, 4, false);
    t[0x54] = unofficial("NOP", 2, ZeroPageX, 4, false);
    t[0x74] = unofficial("NOP", 2, ZeroPageX, 4, false);
    t[0xD4] = unofficial("NOP", 2, ZeroPageX, 4, false);
    t[0xF4] = unofficial("NOP", 2, ZeroPageX, 4, false);

    // Unofficial NOPs reading absolute
    t[0x0C] = unofficial("NOP", 3, Absolute, 4, false);
    t[0x1C] = unofficial("NOP", 3, AbsoluteX, 4, true);
    t[0x3C] = unofficial("NOP", 3, AbsoluteX, 4, true);
    t[0x5C] = unofficial("NOP", 3, AbsoluteX, 4, true);
    t[0x7C] = unofficial("NOP", 3, AbsoluteX, 4, true);
    t[0xDC] = unofficial("NOP", 3, AbsoluteX, 4, true);
    t[0xFC] = unofficial("NOP", 3, AbsoluteX, 4, true);

    // Unofficial SBC alias
    t[0xEB] = unofficial("SBC", 2, Immediate, 2, false);

    t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::addressing::AddressingMode;

    #[test]
    fn test_table_has_256_entries() {
        assert_eq!(OPCODE_TABLE.len(), 256);
    }

    #[test]
    fn test_known_official_opcodes() {
        let lda = &OPCODE_TABLE[0xA9];
        assert_eq!(lda.mnemonic, "LDA");
        assert_eq!(lda.bytes, 2);
        assert_eq!(lda.mode, AddressingMode::Immediate);
        assert_eq!(lda.cycles, 2);
        assert!(!lda.unofficial);

        let jsr = &OPCODE_TABLE[0x20];
        assert_eq!(jsr.mnemonic, "JSR");
        assert_eq!(jsr.cycles, 6);
    }

    #[test]
    fn test_unknown_opcode_marked() {
        // $02 is a JAM on real silicon; the decoder refuses it
        assert!(!OPCODE_TABLE[0x02].is_known());
        assert!(OPCODE_TABLE[0xA9].is_known());
    }

    #[test]
    fn test_unofficial_nops_present() {
        assert_eq!(OPCODE_TABLE[0x1A].mnemonic, "NOP");
        assert!(OPCODE_TABLE[0x1A].unofficial);
        assert_eq!(OPCODE_TABLE[0x0C].bytes, 3);
        assert_eq!(OPCODE_TABLE[0xEB].mnemonic, "SBC");
    }

    #[test]
    fn test_page_cycle_only_on_read_indexed_modes() {
        assert!(OPCODE_TABLE[0xBD].page_cycle, "LDA abs,X pays on cross");
        assert!(!OPCODE_TABLE[0x9D].page_cycle, "STA abs,X always 5");
        assert!(!OPCODE_TABLE[0xFE].page_cycle, "INC abs,X always 7");
    }

    #[test]
    fn test_official_opcode_count() {
        let official = OPCODE_TABLE
            .iter()
            .filter(|o| o.is_known() && !o.unofficial)
            .count();
        assert_eq!(official, 151, "the documented 6502 instruction set");
    }
}
