use sdl2::pixels::PixelFormatEnum;
use sdl2::render::WindowCanvas;

use vm8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use vm8_core::FrameBuffer;

/// RGB colour of lit pixels
pub const FOREGROUND: [u8; 3] = [175, 129, 220];
/// RGB colour of unlit pixels
pub const BACKGROUND: [u8; 3] = [41, 50, 95];

const BYTES_PER_PIXEL: usize = 3;

/// # Display
/// The Chip-8 display is composed of 64x32 pixels, each either lit or unlit.
/// The display only gets a call to `render` when the Chip-8 FrameBuffer is updated;
/// every Chip-8 pixel is drawn as a `scale` x `scale` square.
pub struct Display {
    canvas: WindowCanvas,
}

impl Display {
    /// Creates a new display object bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `scale` the size multiplier for each pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, String> {
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                "vm8",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;
        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;

        let mut display = Display { canvas };
        display.render(&FrameBuffer::new())?;
        Ok(display)
    }

    /// Formats the Chip-8 FrameBuffer as an SDL2 RGB24 texture and renders it.
    ///
    /// # Arguments
    /// * `frame` a Chip-8 FrameBuffer
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(|e| e.to_string())?;

        let pixels = frame_to_texture(frame);
        let row_bytes = DISPLAY_WIDTH * BYTES_PER_PIXEL;
        // rows of the locked texture may be padded past the end of each row
        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            for (y, row) in pixels.chunks(row_bytes).enumerate() {
                let offset = y * pitch;
                buffer[offset..offset + row_bytes].copy_from_slice(row);
            }
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}

/// Formats a Chip-8 FrameBuffer as tightly packed RGB24 rows.
///
/// Each pixel becomes three bytes, `FOREGROUND` when lit and `BACKGROUND` when not,
/// in the same row-major order as the FrameBuffer.
///
/// # Arguments
/// * `frame` a Chip-8 FrameBuffer
pub fn frame_to_texture(frame: &FrameBuffer) -> Vec<u8> {
    frame
        .pixels()
        .iter()
        .flat_map(|&lit| {
            let colour = if lit { FOREGROUND } else { BACKGROUND };
            colour.to_vec()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_to_texture() {
        let mut frame = FrameBuffer::new();
        // (1, 0) and (0, 1)
        frame.draw_sprite(1, 0, &[0x80]);
        frame.draw_sprite(0, 1, &[0x80]);
        let texture = frame_to_texture(&frame);

        assert_eq!(texture.len(), 6144);
        assert_eq!(texture[0..6], [41, 50, 95, 175, 129, 220]);
        assert_eq!(texture[192..198], [175, 129, 220, 41, 50, 95]);
        assert_eq!(texture[6141..], BACKGROUND);
    }

    #[test]
    fn test_blank_frame_is_background() {
        let texture = frame_to_texture(&FrameBuffer::new());
        assert!(texture.chunks(3).all(|pixel| pixel == BACKGROUND));
    }
}
