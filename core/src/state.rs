use crate::constants::{PROGRAM_START, REGISTER_COUNT};
use crate::frame_buffer::FrameBuffer;
use crate::memory::Memory;
use crate::stack::Stack;

/// A snapshot of the Chip8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is also the carry/borrow/collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter, starting where programs are loaded
///
/// Timers
/// - 2 8-bit timers (delay & sound) counting down at 60Hz while non-zero
///
/// ## Memory
/// - a 16 address call stack
/// - 4096 bytes of addressable memory
/// - a 64x32 frame buffer holding the next frame to be drawn
///
/// ## Input
/// - execution of instructions halts while a key's value is awaited by some register
#[derive(Copy, Clone)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: Stack,
    pub memory: Memory,
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub register_needing_key: Option<usize>,
}

impl State {
    pub fn new() -> Self {
        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            delay_timer: 0,
            sound_timer: 0,
            stack: Stack::new(),
            memory: Memory::new(),
            frame_buffer: FrameBuffer::new(),
            draw_flag: false,
            register_needing_key: None,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
