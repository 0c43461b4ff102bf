//! DTMF Key and Frequency Tables
//!
//! The 16-key DTMF alphabet is a 4x4 grid: each key is the intersection of
//! one row (low-group) frequency and one column (high-group) frequency.
//!
//! **Frequency Plan** (ITU Q.23):
//! - Low group (rows): 697, 770, 852, 941 Hz
//! - High group (columns): 1209, 1336, 1477, 1633 Hz
//!
//! The key table and both frequency groups are fixed module-level constants;
//! tunable detection parameters live in [`DetectorConfig`].

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::error::DtmfError;

/// Reference sample rate in Hz
pub const SAMPLE_RATE: f32 = 8000.0;

/// Default tone duration in seconds used by the signal generator
pub const DEFAULT_DURATION: f32 = 0.2;

/// Low-group (row) frequencies in Hz
pub const LOW_FREQS: [f32; 4] = [697.0, 770.0, 852.0, 941.0];

/// High-group (column) frequencies in Hz
pub const HIGH_FREQS: [f32; 4] = [1209.0, 1336.0, 1477.0, 1633.0];

/// The 16 DTMF keys in row-major grid order
///
/// `KEYS[row * 4 + col]` is the key at (`LOW_FREQS[row]`, `HIGH_FREQS[col]`).
pub const KEYS: [char; 16] = [
    '1', '2', '3', 'A', //
    '4', '5', '6', 'B', //
    '7', '8', '9', 'C', //
    '*', '0', '#', 'D',
];

lazy_static! {
    /// Key to (low, high) frequency pair lookup
    static ref FREQ_MAP: HashMap<char, (f32, f32)> = {
        let mut map = HashMap::with_capacity(16);
        for (row, &low) in LOW_FREQS.iter().enumerate() {
            for (col, &high) in HIGH_FREQS.iter().enumerate() {
                map.insert(KEYS[row * 4 + col], (low, high));
            }
        }
        map
    };
}

/// Look up the (low, high) frequency pair for a key
///
/// Returns `None` if `key` is not one of the 16 DTMF characters.
pub fn freq_pair(key: char) -> Option<(f32, f32)> {
    FREQ_MAP.get(&key).copied()
}

/// Look up the key whose frequency pair matches exactly
///
/// The key grid is a bijection between the 16 keys and the 16 possible
/// (low, high) combinations, so any pair drawn from the two frequency
/// tables maps to exactly one key. Frequencies not in the tables yield
/// `None`.
pub fn key_for_pair(low: f32, high: f32) -> Option<char> {
    let row = LOW_FREQS.iter().position(|&f| f == low)?;
    let col = HIGH_FREQS.iter().position(|&f| f == high)?;
    Some(KEYS[row * 4 + col])
}

/// Detection parameters, fixed at construction time
///
/// The defaults reproduce the reference configuration: 8 kHz sampling, a
/// peak-dominance gate at 1.5, an energy-ratio gate at 1%, and a 600-1600 Hz
/// pre-filter passband.
#[derive(Debug, Clone, Copy)]
pub struct DetectorConfig {
    /// Sample rate of incoming blocks in Hz
    pub sample_rate: f32,
    /// Strongest bin must exceed the runner-up by this factor in each group
    pub peak_ratio_threshold: f32,
    /// Minimum share of total block energy in the two strongest bins
    pub energy_ratio_threshold: f32,
    /// Pre-filter passband low edge in Hz
    pub filter_low_cutoff: f32,
    /// Pre-filter passband high edge in Hz
    pub filter_high_cutoff: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            peak_ratio_threshold: 1.5,
            energy_ratio_threshold: 0.01,
            filter_low_cutoff: 600.0,
            filter_high_cutoff: 1600.0,
        }
    }
}

impl DetectorConfig {
    /// Check that every parameter is usable at this sample rate
    ///
    /// Rejects non-positive sample rates and thresholds, any candidate tone
    /// at or above Nyquist, and a passband that does not fit below Nyquist.
    /// Called by the detector constructors so misuse fails loudly up front
    /// instead of surfacing as a silently wrong key.
    pub fn validate(&self) -> Result<(), DtmfError> {
        if !(self.sample_rate > 0.0) {
            return Err(DtmfError::InvalidSampleRate {
                rate: self.sample_rate,
            });
        }
        let nyquist = self.sample_rate / 2.0;
        for &freq in LOW_FREQS.iter().chain(HIGH_FREQS.iter()) {
            if freq >= nyquist {
                return Err(DtmfError::ToneAboveNyquist { freq, nyquist });
            }
        }
        if !(self.peak_ratio_threshold > 0.0) {
            return Err(DtmfError::InvalidThreshold {
                value: self.peak_ratio_threshold,
            });
        }
        if !(self.energy_ratio_threshold > 0.0) {
            return Err(DtmfError::InvalidThreshold {
                value: self.energy_ratio_threshold,
            });
        }
        if !(self.filter_low_cutoff > 0.0)
            || self.filter_low_cutoff >= self.filter_high_cutoff
            || self.filter_high_cutoff >= nyquist
        {
            return Err(DtmfError::InvalidPassband {
                low: self.filter_low_cutoff,
                high: self.filter_high_cutoff,
                rate: self.sample_rate,
            });
        }
        Ok(())
    }
}
