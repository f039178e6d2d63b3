// Input module - Controller input handling
//
// Shift-register model of the two standard controller ports.
//
// ## Register Map
//
// | Address | Name          | Access | Description                     |
// |---------|---------------|--------|---------------------------------|
// | $4016   | Controller 1  | R/W    | Controller 1 data / Strobe      |
// | $4017   | Controller 2  | R      | Controller 2 data               |
//
// Note: $4017 is shared with the APU frame counter; reads come here,
// writes go to the APU.
//
// ## Reading Sequence
//
// 1. Write $01 to $4016 (strobe high; the rising edge latches both pads)
// 2. Write $00 to $4016 (strobe low; shifting begins)
// 3. Read $4016 / $4017 eight times for the button states
//
// Each read returns the next button in bit 0, A first:
// A, B, Select, Start, Up, Down, Left, Right. Reads past the eighth
// return 0 until the next latch.

pub mod gamepad;
pub mod keyboard;

pub use gamepad::GamepadHandler;
pub use keyboard::{KeyboardHandler, KeyboardMapping};

/// Button state of one 8-button controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controller {
    /// A button state
    pub a: bool,
    /// B button state
    pub b: bool,
    /// Select button state
    pub select: bool,
    /// Start button state
    pub start: bool,
    /// Up D-pad state
    pub up: bool,
    /// Down D-pad state
    pub down: bool,
    /// Left D-pad state
    pub left: bool,
    /// Right D-pad state
    pub right: bool,
}

impl Controller {
    /// Create a controller with all buttons released
    pub fn new() -> Self {
        Self::default()
    }

    /// Pack the buttons into the shift-register byte
    ///
    /// Bit 0 is A, matching the order the register shifts out.
    pub fn pack(&self) -> u8 {
        let mut byte = 0u8;
        byte |= self.right as u8;
        byte <<= 1;
        byte |= self.left as u8;
        byte <<= 1;
        byte |= self.down as u8;
        byte <<= 1;
        byte |= self.up as u8;
        byte <<= 1;
        byte |= self.start as u8;
        byte <<= 1;
        byte |= self.select as u8;
        byte <<= 1;
        byte |= self.b as u8;
        byte <<= 1;
        byte |= self.a as u8;
        byte
    }

    /// Merge another controller's pressed buttons into this one
    ///
    /// Used to combine keyboard and gamepad input for the same port.
    pub fn merge(&self, other: &Controller) -> Controller {
        Controller {
            a: self.a || other.a,
            b: self.b || other.b,
            select: self.select || other.select,
            start: self.start || other.start,
            up: self.up || other.up,
            down: self.down || other.down,
            left: self.left || other.left,
            right: self.right || other.right,
        }
    }
}

/// Controller I/O: the two shift registers behind $4016/$4017
///
/// The host pushes fresh pad states with [`ControllerIO::set_pads`]
/// once per frame; the emulated program latches them by strobing $4016.
pub struct ControllerIO {
    /// Most recent host pad states
    pads: [Controller; 2],

    /// Shift registers holding the latched button bits
    shift: [u8; 2],

    /// Strobe line level (bit 0 of the last $4016 write)
    strobe: bool,
}

impl ControllerIO {
    /// Create a controller I/O block with both ports idle
    pub fn new() -> Self {
        ControllerIO {
            pads: [Controller::new(); 2],
            shift: [0; 2],
            strobe: false,
        }
    }

    /// Reset the shift registers and strobe line
    pub fn reset(&mut self) {
        self.shift = [0; 2];
        self.strobe = false;
    }

    /// Update the host-side pad states
    pub fn set_pads(&mut self, pad1: Controller, pad2: Controller) {
        self.pads = [pad1, pad2];
    }

    /// Write the strobe line ($4016)
    ///
    /// The rising edge of bit 0 latches both pads into their shift
    /// registers.
    pub fn write_strobe(&mut self, data: u8) {
        let level = data & 0x01 != 0;
        if !self.strobe && level {
            self.shift[0] = self.pads[0].pack();
            self.shift[1] = self.pads[1].pack();
        }
        self.strobe = level;
    }

    /// Read controller 1 ($4016)
    pub fn read_port1(&mut self) -> u8 {
        self.read_port(0)
    }

    /// Read controller 2 ($4017)
    pub fn read_port2(&mut self) -> u8 {
        self.read_port(1)
    }

    /// Shift one bit out of a port's register
    ///
    /// While the strobe is held high the register is continuously
    /// reloaded, so reads keep returning the A button. Bit 0 carries
    /// the button state; bits 1-7 read as 0 (open bus is not modeled).
    fn read_port(&mut self, port: usize) -> u8 {
        if self.strobe {
            self.shift[port] = self.pads[port].pack();
        }
        let bit = self.shift[port] & 0x01;
        self.shift[port] >>= 1;
        bit
    }
}

impl Default for ControllerIO {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pad_with_a_and_up() -> Controller {
        Controller {
            a: true,
            up: true,
            ..Controller::default()
        }
    }

    #[test]
    fn test_pack_bit_order() {
        let pad = pad_with_a_and_up();
        assert_eq!(pad.pack(), 0b0001_0001, "A is bit 0, Up is bit 4");

        let all = Controller {
            a: true,
            b: true,
            select: true,
            start: true,
            up: true,
            down: true,
            left: true,
            right: true,
        };
        assert_eq!(all.pack(), 0xFF);
    }

    #[test]
    fn test_strobe_sequence_shifts_lsb_first() {
        let mut io = ControllerIO::new();
        io.set_pads(pad_with_a_and_up(), Controller::new());

        io.write_strobe(1);
        io.write_strobe(0);

        let bits: Vec<u8> = (0..8).map(|_| io.read_port1() & 1).collect();
        assert_eq!(bits, vec![1, 0, 0, 0, 1, 0, 0, 0], "A then Up");
    }

    #[test]
    fn test_latch_on_rising_edge_only() {
        let mut io = ControllerIO::new();
        io.set_pads(pad_with_a_and_up(), Controller::new());
        io.write_strobe(1);
        io.write_strobe(0);

        // Pad state changes after the latch: reads still see the snapshot
        io.set_pads(Controller::new(), Controller::new());
        assert_eq!(io.read_port1() & 1, 1, "latched A bit survives");

        // Writing 0 again is not an edge; nothing re-latches
        io.write_strobe(0);
        assert_eq!(io.read_port1() & 1, 0, "shift continues, B is up");
    }

    #[test]
    fn test_reads_exhaust_to_zero() {
        let mut io = ControllerIO::new();
        io.set_pads(pad_with_a_and_up(), Controller::new());
        io.write_strobe(1);
        io.write_strobe(0);

        for _ in 0..8 {
            io.read_port1();
        }
        assert_eq!(io.read_port1() & 1, 0, "register exhausted");
    }

    #[test]
    fn test_strobe_high_keeps_returning_a() {
        let mut io = ControllerIO::new();
        io.set_pads(pad_with_a_and_up(), Controller::new());
        io.write_strobe(1);

        assert_eq!(io.read_port1() & 1, 1);
        assert_eq!(io.read_port1() & 1, 1, "held strobe reloads the register");
    }

    #[test]
    fn test_second_port_independent() {
        let mut io = ControllerIO::new();
        let pad2 = Controller {
            b: true,
            ..Controller::default()
        };
        io.set_pads(Controller::new(), pad2);
        io.write_strobe(1);
        io.write_strobe(0);

        assert_eq!(io.read_port1() & 1, 0);
        assert_eq!(io.read_port2() & 1, 0, "A clear on port 2");
        assert_eq!(io.read_port2() & 1, 1, "B set on port 2");
    }

    #[test]
    fn test_upper_bits_read_zero() {
        let mut io = ControllerIO::new();
        io.set_pads(
            Controller {
                a: true,
                ..Controller::default()
            },
            Controller::new(),
        );
        io.write_strobe(1);
        io.write_strobe(0);

        assert_eq!(io.read_port1(), 0x01, "only bit 0 carries data");
        assert_eq!(io.read_port1(), 0x00, "bits 1-7 are always 0");
    }

    #[test]
    fn test_merge_combines_sources() {
        let keyboard = Controller {
            a: true,
            ..Controller::default()
        };
        let pad = Controller {
            start: true,
            ..Controller::default()
        };
        let merged = keyboard.merge(&pad);
        assert!(merged.a && merged.start);
        assert!(!merged.b);
    }
}
