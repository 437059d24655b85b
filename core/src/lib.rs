pub use chip8::{Chip8, FrameSink};
pub use error::Chip8Error;
pub use frame_buffer::FrameBuffer;
pub use instruction::{decode, Instruction, Operation};
pub use keypad::{InputSource, Keypad};
pub use memory::Memory;
pub use stack::Stack;

mod chip8;
mod clock;
pub mod constants;
mod error;
mod frame_buffer;
mod instruction;
mod keypad;
mod memory;
mod opcode;
mod operations;
mod stack;
pub mod state;
