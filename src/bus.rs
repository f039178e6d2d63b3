// Bus module - Memory bus implementation
//
// The bus owns every memory-mapped component (RAM, PPU, APU, cartridge,
// controller ports) and routes CPU accesses by address. Accesses outside
// the defined map are fatal: they indicate either a ROM needing features
// this board does not have, or an emulator bug, and both must fail loudly.
//
// # Memory Map (CPU Address Space)
//
// ```text
// $0000-$07FF: 2KB internal RAM
// $0800-$1FFF: Mirrors of RAM
// $2000-$2007: PPU registers
// $2008-$3FFF: Mirrors of PPU registers (every 8 bytes)
// $4000-$4013: APU channel registers (write only)
// $4014:       OAM DMA (write only)
// $4015:       APU channel enables
// $4016:       Controller strobe / controller 1 data
// $4017:       APU frame counter (write) / controller 2 data (read)
// $4018-$401F: I/O test region (reads 0, writes ignored)
// $4020-$5FFF: Unmapped (fatal)
// $6000-$7FFF: Cartridge RAM, not present on this board (fatal write)
// $8000-$FFFF: PRG-ROM (writes fatal)
// ```

use crate::apu::Apu;
use crate::cartridge::Cartridge;
use crate::error::{EmuError, Result};
use crate::input::ControllerIO;
use crate::ppu::Ppu;

/// Main memory bus
pub struct Bus {
    /// Internal RAM: 2KB, mirrored through $1FFF
    ram: [u8; 2048],

    /// PPU (registers at $2000-$2007 and their mirrors)
    ppu: Ppu,

    /// APU (registers at $4000-$4017)
    apu: Apu,

    /// Controller ports ($4016/$4017)
    controllers: ControllerIO,

    /// The loaded cartridge ($8000-$FFFF, CHR feeds the PPU)
    cartridge: Cartridge,

    /// Set when a $4014 DMA completed; the scheduler consumes it to
    /// charge the transfer stall
    dma_stall: bool,
}

impl Bus {
    /// Create a bus around a loaded cartridge
    ///
    /// The cartridge's CHR payload is copied into the PPU's
    /// pattern-table window.
    pub fn new(cartridge: Cartridge) -> Self {
        let mut ppu = Ppu::new();
        ppu.load_chr_rom(cartridge.chr_rom().to_vec());

        Bus {
            ram: [0; 2048],
            ppu,
            apu: Apu::new(),
            controllers: ControllerIO::new(),
            cartridge,
            dma_stall: false,
        }
    }

    /// Create a bus around a blank 32KB test cartridge
    ///
    /// Test scaffolding: RAM-resident programs run against this bus, and
    /// [`Bus::patch_rom`] plants vectors or ROM-side code.
    pub fn with_test_rom() -> Self {
        let mut image = Vec::new();
        image.extend_from_slice(&[0x4E, 0x45, 0x53, 0x1A]);
        image.push(2); // two PRG pages: independent halves
        image.push(1);
        image.extend_from_slice(&[0; 10]);
        image.extend(vec![0u8; 2 * 16 * 1024 + 8 * 1024]);
        let cartridge = Cartridge::from_ines_bytes(&image).expect("blank test image must parse");
        Self::new(cartridge)
    }

    /// Overwrite PRG-ROM bytes (test scaffolding)
    pub fn patch_rom(&mut self, addr: u16, bytes: &[u8]) {
        for (i, byte) in bytes.iter().enumerate() {
            self.cartridge.poke_prg(addr.wrapping_add(i as u16), *byte);
        }
    }

    /// Overwrite a little-endian PRG-ROM word (test scaffolding)
    pub fn patch_rom_u16(&mut self, addr: u16, value: u16) {
        self.patch_rom(addr, &[(value & 0xFF) as u8, (value >> 8) as u8]);
    }

    /// Read a byte from the bus
    ///
    /// May have side effects: PPUSTATUS clears its vblank bit and the
    /// write toggle, PPUDATA cycles its read buffer, and the controller
    /// ports shift.
    pub fn read(&mut self, addr: u16) -> Result<u8> {
        match addr {
            // Internal RAM with mirroring
            0x0000..=0x1FFF => Ok(self.ram[(addr & 0x07FF) as usize]),

            // PPU registers, mirrored every 8 bytes
            0x2000..=0x3FFF => match addr & 0x0007 {
                2 => Ok(self.ppu.read_status()),
                4 => Ok(self.ppu.read_oam_data()),
                7 => Ok(self.ppu.read_data()),
                // $2000/$2001/$2003/$2005/$2006 are write only
                reg => {
                    eprintln!("read from write-only PPU register $200{}", reg);
                    Ok(0)
                }
            },

            // Sound registers and the DMA port are write only
            0x4000..=0x4014 => Err(EmuError::SoundRegisterRead { addr }),

            // Channel status: not modeled, reads as 0
            0x4015 => Ok(0),

            // Controller ports
            0x4016 => Ok(self.controllers.read_port1()),
            0x4017 => Ok(self.controllers.read_port2()),

            // I/O test region
            0x4018..=0x401F => Ok(0),

            // Unmapped window and absent cartridge RAM read as 0
            0x4020..=0x7FFF => Ok(0),

            // PRG-ROM
            0x8000..=0xFFFF => Ok(self.cartridge.prg_read(addr)),
        }
    }

    /// Write a byte to the bus
    pub fn write(&mut self, addr: u16, data: u8) -> Result<()> {
        match addr {
            0x0000..=0x1FFF => {
                self.ram[(addr & 0x07FF) as usize] = data;
                Ok(())
            }

            0x2000..=0x3FFF => {
                match addr & 0x0007 {
                    0 => self.ppu.write_ctrl(data),
                    1 => self.ppu.write_mask(data),
                    2 => {} // PPUSTATUS is read only
                    3 => self.ppu.write_oam_addr(data),
                    4 => self.ppu.write_oam_data(data),
                    5 => self.ppu.write_scroll(data),
                    6 => self.ppu.write_addr(data),
                    7 => self.ppu.write_data(data)?,
                    _ => unreachable!(),
                }
                Ok(())
            }

            // Pulse channel registers and the ignored triangle/noise/DMC block
            0x4000..=0x4013 => {
                self.apu.write_register(addr, data);
                Ok(())
            }

            0x4014 => self.oam_dma(data),

            0x4015 => {
                self.apu.write_register(addr, data);
                Ok(())
            }

            0x4016 => {
                self.controllers.write_strobe(data);
                Ok(())
            }

            0x4017 => {
                self.apu.write_register(addr, data);
                Ok(())
            }

            0x4018..=0x401F => Ok(()),

            0x4020..=0x5FFF => Err(EmuError::UnmappedAccess { addr }),

            0x6000..=0x7FFF => Err(EmuError::CartRamWrite { addr, value: data }),

            0x8000..=0xFFFF => Err(EmuError::RomWrite { addr, value: data }),
        }
    }

    /// Read a 16-bit word (little-endian)
    pub fn read_u16(&mut self, addr: u16) -> Result<u16> {
        let lo = self.read(addr)? as u16;
        let hi = self.read(addr.wrapping_add(1))? as u16;
        Ok((hi << 8) | lo)
    }

    /// Side-effect-free read for diagnostics
    ///
    /// Covers RAM and ROM; everything else answers 0. The scheduler uses
    /// this to look at the next opcode without disturbing latches, and
    /// the crash report uses it to dump the stack.
    pub fn peek(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.ram[(addr & 0x07FF) as usize],
            0x8000..=0xFFFF => self.cartridge.prg_read(addr),
            _ => 0,
        }
    }

    /// OAM DMA ($4014): copy 256 bytes from CPU page `$XX00` into OAM
    ///
    /// The copy starts at the PPU's current OAMADDR and wraps modulo
    /// 256. Completion raises the DMA stall flag.
    fn oam_dma(&mut self, page: u8) -> Result<()> {
        let base = (page as u16) << 8;
        let mut buffer = [0u8; 256];
        for (i, slot) in buffer.iter_mut().enumerate() {
            *slot = self.read(base + i as u16)?;
        }
        self.ppu.dma_oam(&buffer);
        self.dma_stall = true;
        Ok(())
    }

    /// Consume the DMA stall flag
    pub fn take_dma_stall(&mut self) -> bool {
        let stall = self.dma_stall;
        self.dma_stall = false;
        stall
    }

    /// PPU access
    pub fn ppu(&self) -> &Ppu {
        &self.ppu
    }

    /// Mutable PPU access
    pub fn ppu_mut(&mut self) -> &mut Ppu {
        &mut self.ppu
    }

    /// APU access
    pub fn apu(&self) -> &Apu {
        &self.apu
    }

    /// Mutable APU access
    pub fn apu_mut(&mut self) -> &mut Apu {
        &mut self.apu
    }

    /// Mutable controller-port access
    pub fn controllers_mut(&mut self) -> &mut ControllerIO {
        &mut self.controllers
    }

    /// Work RAM view (save stash and diagnostics)
    pub fn ram(&self) -> &[u8] {
        &self.ram
    }

    /// Overwrite work RAM (save stash restore)
    pub fn load_ram(&mut self, data: &[u8]) {
        let len = data.len().min(self.ram.len());
        self.ram[..len].copy_from_slice(&data[..len]);
    }
}
