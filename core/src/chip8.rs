use std::io::Read;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::Instant;

use log::{debug, error, info, trace, warn};

use crate::clock::{Scheduler, TimerDue};
use crate::constants::KEY_POLL_INTERVAL;
use crate::error::Chip8Error;
use crate::frame_buffer::FrameBuffer;
use crate::instruction::decode;
use crate::keypad::InputSource;
use crate::operations::routine;
use crate::state::State;

/// Receives a copy of the FrameBuffer every time it changes
pub trait FrameSink {
    fn present(&mut self, frame: &FrameBuffer);
}

impl FrameSink for Sender<FrameBuffer> {
    fn present(&mut self, frame: &FrameBuffer) {
        if self.send(*frame).is_err() {
            debug!("frame dropped; nothing is listening for frames");
        }
    }
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the `input` source it asks for the pressed key
///
/// Supplies interfaces for:
/// - loading roms
/// - advancing the CPU and its timers
/// - inspecting its frame buffer for rendering by some display
/// - running in real time until something goes wrong
pub struct Chip8 {
    state: State,
    input: Arc<dyn InputSource>,
}

impl Chip8 {
    pub fn new(input: Arc<dyn InputSource>) -> Self {
        Chip8 {
            state: State::new(),
            input,
        }
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a reader over the whole ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize, Chip8Error> {
        self.state.memory.load_rom(reader)
    }

    pub fn load_program(&mut self, program: &[u8]) -> Result<(), Chip8Error> {
        self.state.memory.load_program(program)
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Returns the FrameBuffer if the display should be redrawn, clearing the draw flag
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    pub fn awaiting_key(&self) -> bool {
        self.state.register_needing_key.is_some()
    }

    /// Advances the CPU by a single cycle
    /// - polls for a key instead if a register is awaiting one
    /// - otherwise gets and executes the next opcode
    pub fn advance_cpu(&mut self) -> Result<(), Chip8Error> {
        if self.awaiting_key() {
            self.poll_key();
            Ok(())
        } else {
            self.step()
        }
    }

    /// Fetches, decodes and executes the instruction at the pc.
    /// The pc moves past the instruction before it's executed.
    pub fn step(&mut self) -> Result<(), Chip8Error> {
        let op = self.state.memory.read_instruction(self.state.pc);
        let at = self.state.pc;
        self.state.pc = self.state.pc.wrapping_add(0x2);

        let instruction = decode(op);
        trace!(
            "{:04X} {:04X} {:<16} v{:02X?} i{:04X}",
            at,
            op,
            instruction.to_string(),
            self.state.v,
            self.state.i
        );

        let execute = routine(instruction.operation).ok_or(Chip8Error::UnsupportedOpcode(op))?;
        execute(op, &mut self.state, self.input.as_ref())?;

        if let Some(register) = self.state.register_needing_key {
            debug!("V{:X} is waiting for a key press", register);
        }
        Ok(())
    }

    /// Stores the pressed key in the register awaiting one, if there is a key to store.
    /// Returns true once the wait is over.
    pub fn poll_key(&mut self) -> bool {
        let register = match self.state.register_needing_key {
            Some(register) => register,
            None => return true,
        };
        match self.input.current_key() {
            Some(key) => {
                self.state.v[register] = key;
                self.state.register_needing_key = None;
                debug!("V{:X} received key {:X}", register, key);
                true
            }
            None => false,
        }
    }

    /// Decrements both timers towards zero
    pub fn advance_timers(&mut self) {
        if self.state.delay_timer > 0 {
            self.state.delay_timer -= 1;
        }
        if self.state.sound_timer > 0 {
            self.state.sound_timer -= 1;
        }
    }

    /// Runs in real time until the program faults.
    ///
    /// Instructions execute at most once per `CYCLE_INTERVAL` and the timers tick every
    /// `TIMER_INTERVAL`, each on its own deadline. While a register waits for a key only
    /// instruction execution pauses; the input is re-checked every `KEY_POLL_INTERVAL`
    /// and the timers carry on.
    ///
    /// # Arguments
    /// * `sink` receives the frame buffer after every draw or clear
    pub fn run(&mut self, sink: &mut dyn FrameSink) -> Result<(), Chip8Error> {
        info!("running from {:#05X}", self.state.pc);
        let mut scheduler = Scheduler::new(Instant::now());

        loop {
            let now = Instant::now();

            match scheduler.timer(now) {
                TimerDue::Idle => (),
                TimerDue::Tick => self.advance_timers(),
                TimerDue::Lagged => {
                    warn!("timers fell behind; skipping missed ticks");
                    self.advance_timers();
                }
            }

            if scheduler.cycle_due(now) {
                if self.awaiting_key() && !self.poll_key() {
                    scheduler.cycle_done(now, KEY_POLL_INTERVAL);
                } else {
                    if let Err(e) = self.step() {
                        error!("halted at {:#05X}: {}", self.state.pc.wrapping_sub(0x2), e);
                        return Err(e);
                    }
                    scheduler.cycle_ran(now);
                }

                if let Some(frame) = self.take_frame() {
                    sink.present(&frame);
                }
            }

            let wake = scheduler.next_wake();
            let now = Instant::now();
            if wake > now {
                std::thread::sleep(wake - now);
            }
        }
    }
}
