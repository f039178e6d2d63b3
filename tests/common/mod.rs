//! Shared helpers for the machine-level integration tests

use dotnes::{Bus, Cpu};

/// A CPU and bus with `program` planted in RAM at $0200 and PC aimed at it
pub fn machine(program: &[u8]) -> (Cpu, Bus) {
    let mut cpu = Cpu::new();
    let mut bus = Bus::with_test_rom();
    for (i, byte) in program.iter().enumerate() {
        bus.write(0x0200 + i as u16, *byte).unwrap();
    }
    cpu.pc = 0x0200;
    (cpu, bus)
}

/// Step until the opcode at PC matches `stop_opcode`; returns executed
/// instruction opcodes in order
pub fn run_until_opcode(cpu: &mut Cpu, bus: &mut Bus, stop_opcode: u8) -> Vec<u8> {
    let mut executed = Vec::new();
    let mut guard = 0;
    while bus.peek(cpu.pc) != stop_opcode {
        executed.push(bus.peek(cpu.pc));
        cpu.step(bus).unwrap();
        guard += 1;
        assert!(guard < 10_000, "program failed to reach ${:02X}", stop_opcode);
    }
    executed
}
