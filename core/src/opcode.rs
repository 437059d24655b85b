/// # Opcodes
///
/// Chip-8 instructions are 16 bits each, read as four nibbles `(f, x, y, n)`.
///
/// The leading nibble `f` picks the instruction family. Some families are
/// refined by the trailing nibble or the trailing byte.
///
/// The nibbles that don't pick the operation carry its operands:
/// - `[_nnn]` a 12-bit address
/// - `[__kk]` a byte assigned to and/or compared with Vx
/// - `[_x__]` the register Vx, or the end of the register range V0..=Vx
/// - `[__y_]` the register Vy
/// - `[___n]` the height of a sprite
///
/// Operands are pulled out of the raw instruction when it's executed; nothing is pre-parsed.
pub trait Opcode {
    /// Returns the Opcode's component nibbles.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// The index of Vx.
    /// `[_x__]`
    fn x(&self) -> usize;

    /// The index of Vy.
    /// `[__y_]`
    fn y(&self) -> usize;

    /// The Opcode's fourth nibble.
    /// `[___n]`
    fn n(&self) -> u8;

    /// The Opcode's least significant byte.
    /// `[__kk]`
    fn kk(&self) -> u8;

    /// The Opcode without its most significant nibble.
    /// `[_nnn]`
    fn addr(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (
            ((self & 0xF000) >> 12) as u8,
            self.x() as u8,
            self.y() as u8,
            self.n(),
        )
    }

    fn x(&self) -> usize {
        ((self & 0x0F00) >> 8) as usize
    }

    fn y(&self) -> usize {
        ((self & 0x00F0) >> 4) as usize
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn addr(&self) -> u16 {
        self & 0x0FFF
    }
}
