//! Symbol Decision and Validity Gate
//!
//! Combines eight single-bin energy measurements (4 low-group, 4 high-group)
//! into a key-or-nothing decision.
//!
//! **Decision steps**:
//! 1. Optionally band-limit the block with the zero-phase pre-filter
//! 2. Measure the power of all 8 candidate tones
//! 3. Validity gate (optional): reject when either group lacks a dominant
//!    peak, or when the two strongest bins carry too small a share of the
//!    block's total energy
//! 4. Pick the strongest low and high tones and look up the matching key
//!
//! Every rejection path returns `None`; the decision never panics and holds
//! no state between calls.

use tracing::trace;

use crate::config::{self, DetectorConfig, HIGH_FREQS, LOW_FREQS};
use crate::error::DtmfError;
use crate::filter::ZeroPhaseBandpass;
use crate::goertzel::goertzel;

/// Guard against division by zero in ratio computations
const EPSILON: f32 = 1e-10;

/// Power measurements for the eight candidate tones
///
/// Indices follow the order of [`LOW_FREQS`] and [`HIGH_FREQS`]. Recomputed
/// from scratch for every block; never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneEnergies {
    /// Power per low-group (row) tone
    pub low: [f32; 4],
    /// Power per high-group (column) tone
    pub high: [f32; 4],
}

impl ToneEnergies {
    /// Index and power of the strongest low-group tone
    pub fn peak_low(&self) -> (usize, f32) {
        let i = argmax(&self.low);
        (i, self.low[i])
    }

    /// Index and power of the strongest high-group tone
    pub fn peak_high(&self) -> (usize, f32) {
        let i = argmax(&self.high);
        (i, self.high[i])
    }

    /// Summed power over all eight tones
    pub fn total(&self) -> f32 {
        self.low.iter().sum::<f32>() + self.high.iter().sum::<f32>()
    }

    /// Strongest and second-strongest power within one group
    pub fn top_two(group: &[f32; 4]) -> (f32, f32) {
        let mut sorted = *group;
        sorted.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        (sorted[0], sorted[1])
    }
}

/// Index of the first maximum in a group
fn argmax(values: &[f32; 4]) -> usize {
    let mut best = 0;
    for i in 1..values.len() {
        if values[i] > values[best] {
            best = i;
        }
    }
    best
}

/// Stateless DTMF key detector
///
/// Construction validates the configuration and derives the pre-filter
/// coefficients; every detection call afterwards is a pure function of its
/// input block, so one detector may serve any number of concurrent callers.
#[derive(Debug, Clone)]
pub struct Detector {
    config: DetectorConfig,
    bandpass: ZeroPhaseBandpass,
}

impl Detector {
    /// Build a detector, failing loudly on a bad configuration
    pub fn new(config: DetectorConfig) -> Result<Self, DtmfError> {
        config.validate()?;
        let bandpass = ZeroPhaseBandpass::new(&config)?;
        Ok(Self { config, bandpass })
    }

    /// The configuration this detector was built with
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Measure the power of all eight candidate tones in a block
    pub fn energies(&self, samples: &[f32]) -> ToneEnergies {
        let fs = self.config.sample_rate;
        let mut low = [0.0f32; 4];
        let mut high = [0.0f32; 4];
        for (power, &freq) in low.iter_mut().zip(LOW_FREQS.iter()) {
            *power = goertzel(samples, freq, fs);
        }
        for (power, &freq) in high.iter_mut().zip(HIGH_FREQS.iter()) {
            *power = goertzel(samples, freq, fs);
        }
        ToneEnergies { low, high }
    }

    /// Decide which key, if any, is present in a block
    ///
    /// With `require_valid` set, ambiguous or low-energy blocks are rejected
    /// before the maximum-power decision; this is the expected outcome for
    /// silence and noise, not an error. Without it the strongest pair always
    /// wins, which is only meaningful for known-clean input.
    ///
    /// # Arguments
    /// * `samples` - Input block, read-only for the duration of the call
    /// * `use_filter` - Band-limit the block with the zero-phase pre-filter
    /// * `require_valid` - Apply the peak-dominance and energy-ratio gates
    pub fn identify_key(
        &self,
        samples: &[f32],
        use_filter: bool,
        require_valid: bool,
    ) -> Option<char> {
        let filtered;
        let samples = if use_filter {
            filtered = self.bandpass.apply(samples);
            filtered.as_slice()
        } else {
            samples
        };

        let energies = self.energies(samples);

        if require_valid && !self.passes_validity(samples, &energies) {
            return None;
        }

        let (low_idx, _) = energies.peak_low();
        let (high_idx, _) = energies.peak_high();
        config::key_for_pair(LOW_FREQS[low_idx], HIGH_FREQS[high_idx])
    }

    /// Apply the two statistical gates that separate tones from noise
    fn passes_validity(&self, samples: &[f32], energies: &ToneEnergies) -> bool {
        // Gate 1: each group needs one clearly dominant peak. Broadband
        // noise raises all bins roughly equally and fails here.
        let (top_low, second_low) = ToneEnergies::top_two(&energies.low);
        let (top_high, second_high) = ToneEnergies::top_two(&energies.high);

        let ratio_low = top_low / (second_low + EPSILON);
        let ratio_high = top_high / (second_high + EPSILON);

        if ratio_low < self.config.peak_ratio_threshold
            || ratio_high < self.config.peak_ratio_threshold
        {
            trace!(ratio_low, ratio_high, "peak dominance below threshold");
            return false;
        }

        // Gate 2: the two winning bins must carry a minimum share of the
        // block's total energy. Catches low-energy blocks whose lone strong
        // bin is an artifact rather than a sustained tone.
        if samples.is_empty() {
            return false;
        }
        let mean_square = samples.iter().map(|&x| x * x).sum::<f32>() / samples.len() as f32;
        if mean_square > 0.0 {
            let energy_ratio = (top_low + top_high) / (mean_square * samples.len() as f32);
            if energy_ratio < self.config.energy_ratio_threshold {
                trace!(energy_ratio, "combined tone energy below threshold");
                return false;
            }
        }

        true
    }
}
