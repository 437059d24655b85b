use sdl2::keyboard::Keycode;

/// Physical keys and the Chip-8 keys they stand for
const KEYMAP: [(Keycode, u8); 16] = [
    (Keycode::Num1, 0x1),
    (Keycode::Num2, 0x2),
    (Keycode::Num3, 0x3),
    (Keycode::Num4, 0xC),
    (Keycode::Q, 0x4),
    (Keycode::W, 0x5),
    (Keycode::E, 0x6),
    (Keycode::R, 0xD),
    (Keycode::A, 0x7),
    (Keycode::S, 0x8),
    (Keycode::D, 0x9),
    (Keycode::F, 0xE),
    (Keycode::Z, 0xA),
    (Keycode::X, 0x0),
    (Keycode::C, 0xB),
    (Keycode::V, 0xF),
];

/// # Keymap
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// The hex layout is mapped to the left 4 alphanumeric columns.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
pub fn keymap(key: Keycode) -> Option<u8> {
    KEYMAP
        .iter()
        .find(|(physical, _)| *physical == key)
        .map(|(_, chip8_key)| *chip8_key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_every_chip8_key_once() {
        let mut seen = [false; 16];
        for (_, key) in KEYMAP.iter() {
            assert!(!seen[*key as usize]);
            seen[*key as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_keymap() {
        assert_eq!(keymap(Keycode::X), Some(0x0));
        assert_eq!(keymap(Keycode::Num4), Some(0xC));
        assert_eq!(keymap(Keycode::V), Some(0xF));
        assert_eq!(keymap(Keycode::Space), None);
    }
}
