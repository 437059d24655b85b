use std::time::Duration;

/// Bytes of addressable memory
pub const MEMORY_SIZE: usize = 4096;
/// Programs are loaded here and the program counter starts here
pub const PROGRAM_START: u16 = 0x200;
/// Every address an instruction can name fits in 12 bits
pub const ADDRESS_MASK: u16 = 0x0FFF;

pub const REGISTER_COUNT: usize = 16;
/// VF doubles as the carry/borrow/collision flag
pub const FLAG_REGISTER: usize = 0xF;
pub const STACK_DEPTH: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;
pub const DISPLAY_SIZE: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT;

/// Sixteen hexadecimal keys, 0x0..=0xF
pub const KEY_COUNT: u8 = 16;

/// Instructions run no faster than one every ~2ms
pub const CYCLE_INTERVAL: Duration = Duration::from_millis(2);
/// Timers count down at ~60Hz
pub const TIMER_INTERVAL: Duration = Duration::from_micros(16_600);
/// How often a pending key wait re-checks the input source
pub const KEY_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Each font glyph is 5 rows tall
pub const FONT_GLYPH_SIZE: u16 = 5;

/// # Sprite Sheet
/// Hexadecimal digits 0..F, each drawn as a 4x5 sprite.
/// One byte per row; only the high nibble of each byte is lit.
///
/// ```text
/// 0xF0  ****
/// 0x90  *  *
/// 0x90  *  *
/// 0x90  *  *
/// 0xF0  ****
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
