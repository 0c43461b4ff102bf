//! Continuous-Stream Debounce
//!
//! A stream consumer feeding consecutive capture blocks through the detector
//! sees the same key many blocks in a row, then a run of `None` as the tone
//! ends. This small state machine (idle/pressed) turns that stream into
//! discrete press events: a key fires once when first seen or when it
//! changes, and the pressed state releases only after a configurable run of
//! silent blocks.
//!
//! This is caller-side bookkeeping, kept deliberately separate from the
//! stateless detection calls it wraps.

/// Debounce state machine for a stream of per-block detection results
#[derive(Debug, Clone)]
pub struct KeyDebounce {
    last_key: Option<char>,
    consecutive_silence: u32,
    is_pressed: bool,
    silence_release: u32,
}

impl Default for KeyDebounce {
    /// Release after 2 silent blocks (200 ms at the reference 100 ms block)
    fn default() -> Self {
        Self::new(2)
    }
}

impl KeyDebounce {
    /// Create a debouncer that releases after `silence_release` silent blocks
    pub fn new(silence_release: u32) -> Self {
        Self {
            last_key: None,
            consecutive_silence: 0,
            is_pressed: false,
            silence_release,
        }
    }

    /// Feed one detection result; returns the key when a new press fires
    pub fn update(&mut self, detection: Option<char>) -> Option<char> {
        match detection {
            Some(key) => {
                self.consecutive_silence = 0;
                if !self.is_pressed || self.last_key != Some(key) {
                    self.is_pressed = true;
                    self.last_key = Some(key);
                    return Some(key);
                }
                None
            }
            None => {
                self.consecutive_silence += 1;
                if self.consecutive_silence >= self.silence_release {
                    self.is_pressed = false;
                    self.last_key = None;
                }
                None
            }
        }
    }

    /// Whether a key is currently held
    pub fn is_pressed(&self) -> bool {
        self.is_pressed
    }
}
