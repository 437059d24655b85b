use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use color_eyre::eyre::{eyre, Result, WrapErr};
use log::{debug, info};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use vm8_core::{Chip8, FrameBuffer, Keypad};
use vm8_display::Display;

use crate::keymap::keymap;

/// How often the window handles input and redraws
const FRAME_TIME: Duration = Duration::from_micros(16_600);

/// Loads `rom` and runs it until the window is closed or the program faults.
///
/// The Chip-8 runs on its own thread. This thread owns the SDL2 context: it feeds key
/// events into the shared keypad and draws whichever frame the Chip-8 sent last.
pub fn run(rom: &Path, scale: u32) -> Result<()> {
    let keypad = Arc::new(Keypad::new());
    let mut chip8 = Chip8::new(keypad.clone());

    // Load ROM
    let file = File::open(rom).wrap_err_with(|| format!("unable to open ROM {}", rom.display()))?;
    let mut reader = BufReader::new(file);
    let size = chip8
        .load_rom(&mut reader)
        .wrap_err_with(|| format!("unable to load ROM {}", rom.display()))?;
    info!("loaded {} byte ROM from {}", size, rom.display());

    // Get SDL2 context
    let sdl = sdl2::init().map_err(|e| eyre!(e))?;
    let mut display = Display::new(&sdl, scale).map_err(|e| eyre!(e))?;
    let mut events = sdl.event_pump().map_err(|e| eyre!(e))?;

    let (mut frames, frame_rx) = mpsc::channel();
    let cpu = thread::Builder::new()
        .name("vm8-cpu".to_string())
        .spawn(move || chip8.run(&mut frames))
        .wrap_err("unable to start the CPU thread")?;

    'event: loop {
        let frame_start = Instant::now();

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    keycode: Some(key),
                    repeat: false,
                    ..
                } => {
                    if let Some(kc) = keymap(key) {
                        keypad.press(kc);
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        keypad.release(kc);
                    }
                }
                _ => continue,
            };
        }

        // Render the newest frame, if there is one
        let (frame, halted) = latest_frame(&frame_rx);
        if let Some(frame) = frame {
            display.render(&frame).map_err(|e| eyre!(e))?;
        }

        if halted {
            return match cpu.join() {
                Ok(Ok(())) => Ok(()),
                Ok(Err(e)) => Err(e).wrap_err("the program halted"),
                Err(_) => Err(eyre!("the CPU thread panicked")),
            };
        }

        // Handle timing
        if let Some(remaining) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }

    debug!("window closed");
    Ok(())
}

/// Drains every pending frame, keeping the last.
/// Also reports whether the CPU thread has hung up.
fn latest_frame(frame_rx: &Receiver<FrameBuffer>) -> (Option<FrameBuffer>, bool) {
    let mut latest = None;
    loop {
        match frame_rx.try_recv() {
            Ok(frame) => latest = Some(frame),
            Err(TryRecvError::Empty) => return (latest, false),
            Err(TryRecvError::Disconnected) => return (latest, true),
        }
    }
}
