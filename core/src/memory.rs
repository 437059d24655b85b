use std::io::Read;

use crate::constants::{ADDRESS_MASK, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::Chip8Error;

/// # Memory
/// 4096 bytes of flat, byte addressable memory.
///
/// - `0x000..0x200` is reserved; the font sprite sheet lives at its start
/// - `0x200..0x1000` holds the loaded program and its data
///
/// Addresses are 12 bits wide. Anything above `0xFFF` wraps back into range,
/// so every address handed to `Memory` is valid.
#[derive(Copy, Clone)]
pub struct Memory {
    cells: [u8; MEMORY_SIZE],
}

impl Memory {
    pub fn new() -> Self {
        let mut cells = [0; MEMORY_SIZE];
        cells[0..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        Memory { cells }
    }

    pub fn read_byte(&self, addr: u16) -> u8 {
        self.cells[(addr & ADDRESS_MASK) as usize]
    }

    pub fn write_byte(&mut self, addr: u16, value: u8) {
        self.cells[(addr & ADDRESS_MASK) as usize] = value;
    }

    /// Reads the 16 bit instruction at `addr`.
    /// Memory is stored as bytes, so two consecutive bytes are combined big-endian.
    pub fn read_instruction(&self, addr: u16) -> u16 {
        let left = u16::from(self.read_byte(addr));
        let right = u16::from(self.read_byte(addr.wrapping_add(1)));
        left << 8 | right
    }

    /// Copies `len` bytes starting at `addr` into a new buffer
    pub fn read_range(&self, addr: u16, len: usize) -> Vec<u8> {
        (0..len)
            .map(|offset| self.read_byte(addr.wrapping_add(offset as u16)))
            .collect()
    }

    /// Copies a program verbatim into memory at `PROGRAM_START`
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), Chip8Error> {
        let start = PROGRAM_START as usize;
        let max = MEMORY_SIZE - start;
        if program.len() > max {
            return Err(Chip8Error::RomTooLarge {
                size: program.len(),
                max,
            });
        }
        self.cells[start..start + program.len()].copy_from_slice(program);
        Ok(())
    }

    /// Reads a whole ROM and loads it as a program
    ///
    /// # Arguments
    /// * `reader` a reader over the ROM's bytes; read until exhausted
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize, Chip8Error> {
        let mut program = Vec::new();
        reader.read_to_end(&mut program)?;
        self.load_program(&program)?;
        Ok(program.len())
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
