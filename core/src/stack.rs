use crate::constants::STACK_DEPTH;
use crate::error::Chip8Error;

/// # Call Stack
/// Return addresses of the subroutines currently being executed, last in first out.
/// Well formed programs never nest deeper than 16 calls.
#[derive(Copy, Clone)]
pub struct Stack {
    addresses: [u16; STACK_DEPTH],
    depth: usize,
}

impl Stack {
    pub fn new() -> Self {
        Stack {
            addresses: [0; STACK_DEPTH],
            depth: 0,
        }
    }

    pub fn push(&mut self, addr: u16) -> Result<(), Chip8Error> {
        if self.depth == STACK_DEPTH {
            return Err(Chip8Error::StackOverflow);
        }
        self.addresses[self.depth] = addr;
        self.depth += 1;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u16, Chip8Error> {
        if self.depth == 0 {
            return Err(Chip8Error::StackUnderflow);
        }
        self.depth -= 1;
        Ok(self.addresses[self.depth])
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_empty(&self) -> bool {
        self.depth == 0
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}
