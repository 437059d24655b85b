use crate::constants::{DISPLAY_HEIGHT, DISPLAY_SIZE, DISPLAY_WIDTH};

/// # FrameBuffer
/// The Chip-8 display is a 64x32 grid of black/white pixels.
///
/// Pixels are stored row-major, so the pixel at `(x, y)` lives at index `y * 64 + x`.
/// Horizontally the grid wraps: `x` is always taken modulo 64.
/// Vertically it doesn't: a `y` outside `0..32` is simply off the screen.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pixels: [bool; DISPLAY_SIZE],
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            pixels: [false; DISPLAY_SIZE],
        }
    }

    /// Turns every pixel off
    pub fn clear(&mut self) {
        self.pixels = [false; DISPLAY_SIZE];
    }

    /// XORs a sprite onto the grid with its top left corner at `(x, y)`.
    ///
    /// Each byte of `sprite` is one row, drawn most significant bit first.
    /// Rows stop at the bottom edge rather than wrapping to the top; bits wrap
    /// around the right edge independently of one another.
    ///
    /// Returns true if any lit pixel was switched off.
    ///
    /// # Arguments
    /// * `x` the column of the sprite's left edge
    /// * `y` the row of the sprite's top edge
    /// * `sprite` the rows of the sprite
    pub fn draw_sprite(&mut self, x: usize, y: usize, sprite: &[u8]) -> bool {
        let mut collision = false;
        for (row, byte) in sprite.iter().enumerate() {
            let target_y = y + row;
            if target_y >= DISPLAY_HEIGHT {
                break;
            }
            collision |= self.draw_byte(x, target_y, *byte);
        }
        collision
    }

    /// returns a collision flag
    fn draw_byte(&mut self, x: usize, y: usize, byte: u8) -> bool {
        let mut collision = false;
        for bit in 0..8 {
            if (byte >> (7 - bit)) & 0x1 == 0 {
                continue;
            }
            let index = y * DISPLAY_WIDTH + (x + bit) % DISPLAY_WIDTH;
            collision |= self.pixels[index];
            self.pixels[index] = !self.pixels[index];
        }
        collision
    }

    /// The pixel at `(x, y)`; `x` wraps, a `y` off the screen has no pixel
    pub fn pixel(&self, x: usize, y: usize) -> Option<bool> {
        Self::coords_to_index(x, y).map(|index| self.pixels[index])
    }

    /// The pixel at a row-major linear index
    pub fn pixel_at(&self, index: usize) -> Option<bool> {
        self.pixels.get(index).copied()
    }

    pub fn coords_to_index(x: usize, y: usize) -> Option<usize> {
        if y >= DISPLAY_HEIGHT {
            return None;
        }
        Some(y * DISPLAY_WIDTH + x % DISPLAY_WIDTH)
    }

    pub fn index_to_coords(index: usize) -> Option<(usize, usize)> {
        if index >= DISPLAY_SIZE {
            return None;
        }
        Some((index % DISPLAY_WIDTH, index / DISPLAY_WIDTH))
    }

    pub fn pixels(&self) -> &[bool; DISPLAY_SIZE] {
        &self.pixels
    }

    /// Rows of pixels, top to bottom
    pub fn rows(&self) -> std::slice::Chunks<'_, bool> {
        self.pixels.chunks(DISPLAY_WIDTH)
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|&on| if on { '#' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZERO: [u8; 5] = [0xF0, 0x90, 0x90, 0x90, 0xF0];

    fn lit(frame: &FrameBuffer) -> Vec<usize> {
        (0..DISPLAY_SIZE)
            .filter(|&i| frame.pixel_at(i) == Some(true))
            .collect()
    }

    #[test]
    fn test_index_to_coords() {
        assert_eq!(FrameBuffer::index_to_coords(67), Some((3, 1)));
        assert_eq!(FrameBuffer::index_to_coords(0), Some((0, 0)));
        assert_eq!(FrameBuffer::index_to_coords(2047), Some((63, 31)));
        assert_eq!(FrameBuffer::index_to_coords(5000), None);
    }

    #[test]
    fn test_coords_to_index() {
        assert_eq!(FrameBuffer::coords_to_index(5, 3), Some(197));
        assert_eq!(FrameBuffer::coords_to_index(0, 0), Some(0));
        assert_eq!(FrameBuffer::coords_to_index(63, 31), Some(2047));
        assert_eq!(FrameBuffer::coords_to_index(0, 32), None);
    }

    #[test]
    fn test_coords_to_index_wraps_x() {
        assert_eq!(FrameBuffer::coords_to_index(65, 0), Some(1));
    }

    #[test]
    fn test_coordinate_and_index_lookups_agree() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(10, 4, &ZERO);
        for index in 0..DISPLAY_SIZE {
            let (x, y) = FrameBuffer::index_to_coords(index).unwrap();
            assert_eq!(frame.pixel(x, y), frame.pixel_at(index));
        }
    }

    #[test]
    fn test_draws_sprite_at_origin() {
        let mut frame = FrameBuffer::new();
        let collision = frame.draw_sprite(0, 0, &ZERO);
        assert!(!collision);
        assert_eq!(
            lit(&frame),
            vec![0, 1, 2, 3, 64, 67, 128, 131, 192, 195, 256, 257, 258, 259]
        );
    }

    #[test]
    fn test_draws_sprite_wrapping_right_edge() {
        let mut frame = FrameBuffer::new();
        let collision = frame.draw_sprite(61, 1, &ZERO);
        assert!(!collision);
        // top row: 61, 62, 63 then column 0 of the same row
        assert_eq!(frame.pixel(61, 1), Some(true));
        assert_eq!(frame.pixel(63, 1), Some(true));
        assert_eq!(frame.pixel(0, 1), Some(true));
        assert_eq!(frame.pixel(1, 1), Some(false));
        // middle rows: 61 and column 0
        assert_eq!(frame.pixel(61, 2), Some(true));
        assert_eq!(frame.pixel(62, 2), Some(false));
        assert_eq!(frame.pixel(0, 2), Some(true));
        // nothing leaks onto the row below its own
        assert_eq!(frame.pixel(0, 0), Some(false));
        assert_eq!(frame.pixel(0, 6), Some(false));
        assert_eq!(lit(&frame).len(), 14);
    }

    #[test]
    fn test_draws_wide_sprite_onto_columns_0_and_1() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(61, 1, &[0xFF; 5]);
        for y in 1..6 {
            for x in [61, 62, 63, 0, 1, 2, 3, 4].iter() {
                assert_eq!(frame.pixel(*x, y), Some(true));
            }
            assert_eq!(frame.pixel(5, y), Some(false));
        }
    }

    #[test]
    fn test_clips_sprite_at_bottom_edge() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(0, 29, &[0xFF; 5]);
        // only rows 29, 30 and 31 are drawn
        assert_eq!(lit(&frame).len(), 24);
        assert!(lit(&frame).iter().all(|&i| i >= 29 * 64 && i <= 2047));
        assert_eq!(frame.pixel(0, 0), Some(false));
    }

    #[test]
    fn test_sprite_below_screen_draws_nothing() {
        let mut frame = FrameBuffer::new();
        let collision = frame.draw_sprite(0, 40, &ZERO);
        assert!(!collision);
        assert!(lit(&frame).is_empty());
    }

    #[test]
    fn test_draw_xors_existing_pixels() {
        let mut frame = FrameBuffer::new();
        // 0 1 0 1 already set, 1 1 0 0 drawn over it
        frame.draw_sprite(3, 0, &[0b1010_0000]);
        frame.draw_sprite(2, 0, &[0b1100_0000]);
        assert_eq!(frame.pixel(2, 0), Some(true));
        assert_eq!(frame.pixel(3, 0), Some(false));
        assert_eq!(frame.pixel(4, 0), Some(false));
        assert_eq!(frame.pixel(5, 0), Some(true));
    }

    #[test]
    fn test_collision_on_first_row_is_kept() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(0, 0, &[0x80]);
        // later rows don't collide, the first one does
        assert!(frame.draw_sprite(0, 0, &[0x80, 0x01, 0x01]));
    }

    #[test]
    fn test_double_draw_restores_frame() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(20, 10, &[0b0011_1100]);
        let before = frame;

        let first = frame.draw_sprite(18, 9, &ZERO);
        let second = frame.draw_sprite(18, 9, &ZERO);

        assert!(!first);
        assert!(second);
        assert_eq!(frame, before);
    }

    #[test]
    fn test_double_draw_on_empty_frame() {
        let mut frame = FrameBuffer::new();
        assert!(!frame.draw_sprite(7, 7, &ZERO));
        assert!(frame.draw_sprite(7, 7, &ZERO));
        assert!(lit(&frame).is_empty());
    }

    #[test]
    fn test_clear() {
        let mut frame = FrameBuffer::new();
        frame.draw_sprite(0, 0, &ZERO);
        frame.clear();
        assert!(lit(&frame).is_empty());
    }
}
