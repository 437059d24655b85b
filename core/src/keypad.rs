use std::sync::atomic::{AtomicU8, Ordering};

use crate::constants::KEY_COUNT;

/// Whatever reports the key currently held on the hexadecimal keypad.
/// Keys are `0x0..=0xF`; `None` means nothing is pressed.
pub trait InputSource: Send + Sync {
    fn current_key(&self) -> Option<u8>;
}

const NO_KEY: u8 = 0xFF;

/// # Keypad
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// Only the most recently pressed key is tracked, in a single atomic slot, so a
/// UI thread can press and release keys while the CPU thread reads them.
pub struct Keypad {
    current: AtomicU8,
}

impl Keypad {
    pub fn new() -> Self {
        Keypad {
            current: AtomicU8::new(NO_KEY),
        }
    }

    /// Set the pressed key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed; ignored above 0xF
    pub fn press(&self, key: u8) {
        if key < KEY_COUNT {
            self.current.store(key, Ordering::SeqCst);
        }
    }

    /// Unset the pressed key, unless another key was pressed since
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn release(&self, key: u8) {
        let _ = self
            .current
            .compare_exchange(key, NO_KEY, Ordering::SeqCst, Ordering::SeqCst);
    }

    pub fn clear(&self) {
        self.current.store(NO_KEY, Ordering::SeqCst);
    }
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for Keypad {
    fn current_key(&self) -> Option<u8> {
        match self.current.load(Ordering::SeqCst) {
            NO_KEY => None,
            key => Some(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_no_key() {
        assert_eq!(Keypad::new().current_key(), None);
    }

    #[test]
    fn test_press_and_release() {
        let keypad = Keypad::new();
        keypad.press(0xE);
        assert_eq!(keypad.current_key(), Some(0xE));
        keypad.release(0xE);
        assert_eq!(keypad.current_key(), None);
    }

    #[test]
    fn test_release_of_older_key_keeps_newer() {
        let keypad = Keypad::new();
        keypad.press(0x1);
        keypad.press(0x2);
        keypad.release(0x1);
        assert_eq!(keypad.current_key(), Some(0x2));
    }

    #[test]
    fn test_ignores_keys_outside_keypad() {
        let keypad = Keypad::new();
        keypad.press(0x10);
        assert_eq!(keypad.current_key(), None);
    }

    #[test]
    fn test_clear() {
        let keypad = Keypad::new();
        keypad.press(0x0);
        keypad.clear();
        assert_eq!(keypad.current_key(), None);
    }
}
