use thiserror::Error;

/// Everything that can stop a Chip-8 from loading or running.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("unsupported opcode {0:#06X}")]
    UnsupportedOpcode(u16),

    #[error("call stack overflow: more than 16 nested subroutine calls")]
    StackOverflow,

    #[error("call stack underflow: returned with no subroutine on the stack")]
    StackUnderflow,

    #[error("ROM is too large ({size} bytes), at most {max} bytes fit in program memory")]
    RomTooLarge { size: usize, max: usize },

    #[error("unable to read ROM: {0}")]
    Io(#[from] std::io::Error),
}
