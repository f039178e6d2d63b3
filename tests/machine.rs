//! Machine-level integration tests
//!
//! Each test drives a small hand-assembled program through the whole
//! machine: CPU, bus decoding, PPU register protocol, APU register
//! decode, DMA, and interrupt entry.

mod common;

use common::{machine, run_until_opcode};
use dotnes::cpu::{flags, vectors};
use dotnes::{builtin_rom, Bus, Emulator, NullHost};

#[test]
fn test_countdown_loop_runs_five_iterations() {
    // LDX #5; loop: DEX; BNE loop; BRK
    let (mut cpu, mut bus) = machine(&[0xA2, 0x05, 0xCA, 0xD0, 0xFD, 0x00]);

    let executed = run_until_opcode(&mut cpu, &mut bus, 0x00);

    assert_eq!(cpu.x, 0, "X counted down to zero");
    assert!(cpu.get_zero(), "Z set by the final DEX");
    let dex_count = executed.iter().filter(|&&op| op == 0xCA).count();
    assert_eq!(dex_count, 5, "five DEX iterations observed");
}

#[test]
fn test_adc_sign_overflow_scenario() {
    // LDA #$7F; ADC #$01 with C clear
    let (mut cpu, mut bus) = machine(&[0xA9, 0x7F, 0x69, 0x01]);
    cpu.step(&mut bus).unwrap();
    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.a, 0x80);
    assert!(cpu.get_negative());
    assert!(cpu.get_overflow());
    assert!(!cpu.get_carry());
    assert!(!cpu.get_zero());
}

#[test]
fn test_sbc_borrow_scenario() {
    // LDA #$50; SBC #$70 with C set
    let (mut cpu, mut bus) = machine(&[0xA9, 0x50, 0xE9, 0x70]);
    cpu.set_carry(true);
    cpu.step(&mut bus).unwrap();
    cpu.step(&mut bus).unwrap();

    assert_eq!(cpu.a, 0xE0);
    assert!(cpu.get_negative());
    assert!(!cpu.get_overflow());
    assert!(!cpu.get_carry());
}

#[test]
fn test_ppu_addr_data_palette_protocol() {
    let mut bus = Bus::with_test_rom();

    // $2006 <- $3F, $2006 <- $00, then $2007 <- $12
    bus.write(0x2006, 0x3F).unwrap();
    bus.write(0x2006, 0x00).unwrap();
    bus.write(0x2007, 0x12).unwrap();

    // Re-point at $3F00 and read twice: first read is the stale buffer
    bus.write(0x2006, 0x3F).unwrap();
    bus.write(0x2006, 0x00).unwrap();
    let first = bus.read(0x2007).unwrap();
    let second = bus.read(0x2007).unwrap();

    assert_ne!(first, second, "first read drains the buffer");
    assert_eq!(second, 0x12, "second read returns the palette byte");
    assert_eq!(bus.ppu().read_vram(0x3F00), 0x12);
}

#[test]
fn test_ppu_data_reads_advance_v_each_time() {
    let mut bus = Bus::with_test_rom();
    bus.write(0x2006, 0x20).unwrap();
    bus.write(0x2006, 0x00).unwrap();

    bus.read(0x2007).unwrap();
    bus.read(0x2007).unwrap();
    assert_eq!(bus.ppu().v(), 0x2002, "two reads advanced v twice");

    // Increment-by-32 mode
    bus.write(0x2000, 0x04).unwrap();
    bus.write(0x2006, 0x20).unwrap();
    bus.write(0x2006, 0x00).unwrap();
    bus.read(0x2007).unwrap();
    assert_eq!(bus.ppu().v() & 0x0FFF, 0x0020);
}

#[test]
fn test_pulse_register_scenario() {
    // $4000 <- $BF (duty 2, loop, constant, volume 15)
    // $4002 <- $FE, $4003 <- $08
    let mut bus = Bus::with_test_rom();
    bus.write(0x4015, 0x01).unwrap();
    bus.write(0x4000, 0xBF).unwrap();
    bus.write(0x4002, 0xFE).unwrap();
    bus.write(0x4003, 0x08).unwrap();

    let pulse = bus.apu().pulse(0);
    assert_eq!(pulse.length_count(), 254, "length table index 1");
    assert_eq!(pulse.timer_period(), 0x0FE);

    let expected_dt = (1_789_773.0f32 / (16.0 * (0x0FE as f32 + 1.0))) / 44_100.0;
    assert!((pulse.phase_increment() - expected_dt).abs() < 1e-9);
}

#[test]
fn test_nmi_entry_stack_image() {
    let (mut cpu, mut bus) = machine(&[]);
    bus.patch_rom_u16(vectors::NMI, 0x9000);
    cpu.pc = 0x8000;
    cpu.sp = 0xFD;

    cpu.nmi(&mut bus).unwrap();

    assert_eq!(cpu.sp, 0xFA);
    assert!(cpu.get_flag(flags::INTERRUPT_DISABLE));
    assert_eq!(cpu.pc, 0x9000);

    // Stack image starting at $01FD: PC high, PC low, packed flags
    assert_eq!(bus.read(0x01FD).unwrap(), 0x80);
    assert_eq!(bus.read(0x01FC).unwrap(), 0x00);
    let pushed = bus.read(0x01FB).unwrap();
    assert_eq!(pushed & flags::UNUSED, flags::UNUSED, "bit 5 set");
    assert_eq!(pushed & flags::BREAK, 0, "bit 4 clear on hardware entry");
}

#[test]
fn test_oam_dma_via_program() {
    // Fill page $03 with an index ramp, set OAMADDR, fire the DMA
    let (mut cpu, mut bus) = machine(&[
        0xA9, 0x00, // LDA #$00
        0x8D, 0x03, 0x20, // STA $2003
        0xA9, 0x03, // LDA #$03
        0x8D, 0x14, 0x40, // STA $4014
        0x00, // BRK fence
    ]);
    for i in 0..256u16 {
        bus.write(0x0300 + i, (i as u8).wrapping_add(7)).unwrap();
    }

    run_until_opcode(&mut cpu, &mut bus, 0x00);

    assert_eq!(bus.ppu().read_oam(0), 7);
    assert_eq!(bus.ppu().read_oam(255), 6, "256 bytes, wrapped copy");
}

#[test]
fn test_controller_poll_sequence() {
    use dotnes::Controller;

    // strobe: LDA #1; STA $4016; LDA #0; STA $4016;
    // read 8 bits of $4016, OR-accumulating bit 0 shifted into $10
    let (mut cpu, mut bus) = machine(&[
        0xA9, 0x01, 0x8D, 0x16, 0x40, // strobe high
        0xA9, 0x00, 0x8D, 0x16, 0x40, // strobe low
        0x00, // BRK fence
    ]);
    let pad = Controller {
        a: true,
        start: true,
        ..Controller::default()
    };
    bus.controllers_mut().set_pads(pad, Controller::new());

    run_until_opcode(&mut cpu, &mut bus, 0x00);

    let bits: Vec<u8> = (0..8).map(|_| bus.read(0x4016).unwrap() & 1).collect();
    assert_eq!(bits, vec![1, 0, 0, 1, 0, 0, 0, 0], "A and Start latched");
}

#[test]
fn test_builtin_rom_boots_to_picture_and_tone() {
    let mut emulator = Emulator::new(builtin_rom()).unwrap();
    let mut host = NullHost::new();

    // A few frames: init code waits on vblank, paints, starts the tone.
    // Draining the pretend audio device between frames keeps the
    // scheduler synthesizing fresh blocks.
    for _ in 0..5 {
        emulator.service_host(&mut host).unwrap();
        host.consumed = host.audio.len();
    }

    assert!(host.frames_presented >= 5);

    // Backdrop is sky blue; the painted tile row shows color 1
    let frame = &host.last_frame;
    assert_eq!(frame[0], 0x21, "backdrop painted");
    // Tiles were written at $21CA: row 14, column 10 -> pixel (80, 112)
    assert_eq!(frame[112 * 256 + 80], 0x16, "tile row painted");

    // The pulse channel is running and produced audio
    let peak = host.audio.iter().fold(0.0f32, |m, &s| m.max(s.abs()));
    assert!(peak > 0.01, "the startup tone reached the audio stream");
}

#[test]
fn test_unknown_opcode_crash_report_has_context() {
    let mut emulator = Emulator::new(builtin_rom()).unwrap();
    // Plant a JAM at the reset target
    emulator.bus_mut().patch_rom_u16(0xFFFC, 0x0200);
    emulator.bus_mut().write(0x0200, 0xEA).unwrap();
    emulator.bus_mut().write(0x0201, 0x02).unwrap();
    emulator.reset().unwrap();

    let report = emulator.run_host_frame().unwrap_err();
    let text = report.to_string();
    assert!(text.contains("unknown opcode"));
    assert!(text.contains("0201"), "faulting PC named");
    assert!(report.pc_trail.contains(&0x0200), "trail shows the NOP before");
}
