//! Adaptive Integration-Time Controller
//!
//! Fixed-window detection wastes time when the signal is clean and
//! under-integrates when it is buried in noise. This controller sizes the
//! window per call from an online quality estimate:
//!
//! 1. **Probe**: measure tone energies over the first `min_duration` of the
//!    block (40 ms in the reference configuration)
//! 2. **Quality estimate**: SNR from the two strongest bins against the
//!    other six, plus their share of total bin energy
//! 3. **Duration decision**: close the SNR gap through added integration
//!    time using dSNR(dB) = 10 * log10(T2 / T1), clamped to the configured
//!    bounds and to the samples actually available
//! 4. **Final detection**: run the symbol decision, with pre-filter and
//!    validity gate enabled, over the chosen prefix of the block
//!
//! The controller is single-shot: one probe, one commit. It never re-probes
//! after committing; repeated refinement would change both the latency and
//! the accuracy characteristics callers depend on.

use std::fmt;

use tracing::{debug, instrument};

use crate::config::DetectorConfig;
use crate::detect::Detector;
use crate::error::DtmfError;

/// Floor for the noise-energy denominator
const EPSILON: f32 = 1e-10;

/// Duration bounds and SNR target for the controller, fixed at construction
#[derive(Debug, Clone, Copy)]
pub struct AdaptiveConfig {
    /// Probe length and shortest committed window, in seconds
    pub min_duration: f32,
    /// Longest committed window, in seconds
    pub max_duration: f32,
    /// Base duration the SNR-gap extrapolation scales from, in seconds
    pub base_duration: f32,
    /// SNR at which `min_duration` is considered enough, in dB
    pub target_snr_db: f32,
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        Self {
            min_duration: 0.04,
            max_duration: 1.0,
            base_duration: 0.04,
            target_snr_db: 5.0,
        }
    }
}

/// Signal quality measured on the probe window
#[derive(Debug, Clone, Copy)]
pub struct QualityEstimate {
    /// Two strongest bins against the remaining six, in dB
    pub snr_db: f32,
    /// Share of total bin energy held by the two strongest bins
    pub peak_ratio: f32,
}

/// Which integration-time regime the controller committed to
///
/// Purely observational; the label has no behavioral effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionMode {
    /// Committed window of at most 50 ms
    Fast { millis: u32 },
    /// Committed window of at most 250 ms
    Standard { millis: u32 },
    /// Committed window longer than 250 ms
    Deep { millis: u32 },
    /// Block was shorter than the probe window
    Insufficient,
}

impl DetectionMode {
    /// Classify a committed duration into its coarse band
    pub fn from_duration(seconds: f32) -> Self {
        let millis = (seconds * 1000.0).round() as u32;
        if millis <= 50 {
            DetectionMode::Fast { millis }
        } else if millis <= 250 {
            DetectionMode::Standard { millis }
        } else {
            DetectionMode::Deep { millis }
        }
    }
}

impl fmt::Display for DetectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionMode::Fast { millis } => write!(f, "Fast({}ms)", millis),
            DetectionMode::Standard { millis } => write!(f, "Standard({}ms)", millis),
            DetectionMode::Deep { millis } => write!(f, "Deep({}ms)", millis),
            DetectionMode::Insufficient => write!(f, "Insufficient"),
        }
    }
}

/// Detector wrapper that chooses its integration window per call
///
/// Holds no mutable state; each call to [`detect`](Self::detect) is an
/// independent probe-then-commit pass over the caller's block.
#[derive(Debug, Clone)]
pub struct AdaptiveDetector {
    detector: Detector,
    config: AdaptiveConfig,
}

impl AdaptiveDetector {
    /// Build an adaptive detector, validating both configurations
    pub fn new(
        detector_config: DetectorConfig,
        config: AdaptiveConfig,
    ) -> Result<Self, DtmfError> {
        if !(config.min_duration > 0.0)
            || config.max_duration < config.min_duration
            || !(config.base_duration > 0.0)
        {
            return Err(DtmfError::InvalidDurations {
                min: config.min_duration,
                max: config.max_duration,
                base: config.base_duration,
            });
        }
        let detector = Detector::new(detector_config)?;
        Ok(Self { detector, config })
    }

    /// Build with the reference configuration (8 kHz, 40 ms - 1 s, 5 dB target)
    pub fn with_defaults() -> Result<Self, DtmfError> {
        Self::new(DetectorConfig::default(), AdaptiveConfig::default())
    }

    /// The wrapped symbol decision
    pub fn detector(&self) -> &Detector {
        &self.detector
    }

    /// The controller configuration
    pub fn config(&self) -> &AdaptiveConfig {
        &self.config
    }

    /// Estimate signal quality from the eight candidate tone energies
    ///
    /// Signal energy is the strongest low-group bin plus the strongest
    /// high-group bin; the remaining six bins count as noise. The noise
    /// term is floored at a small epsilon so a dead-quiet probe cannot
    /// divide by zero.
    pub fn estimate_quality(&self, samples: &[f32]) -> QualityEstimate {
        let energies = self.detector.energies(samples);
        let (_, peak_low) = energies.peak_low();
        let (_, peak_high) = energies.peak_high();

        let signal_energy = peak_low + peak_high;
        let total_energy = energies.total();
        let noise_energy = (total_energy - signal_energy).max(EPSILON);

        QualityEstimate {
            snr_db: 10.0 * (signal_energy / noise_energy).log10(),
            peak_ratio: signal_energy / (total_energy + EPSILON),
        }
    }

    /// Window length needed to reach the target SNR, in seconds
    ///
    /// Integrating for T2 instead of T1 buys 10 * log10(T2 / T1) dB, so the
    /// gap to the target translates to a duration of
    /// `base_duration * 10^((target - estimate) / 10)`. At or above the
    /// target the minimum duration is enough. The result is always clamped
    /// into `[min_duration, max_duration]` and is non-increasing in the
    /// SNR estimate.
    pub fn required_duration(&self, snr_db: f32) -> f32 {
        let required = if snr_db >= self.config.target_snr_db {
            self.config.min_duration
        } else {
            let snr_gap_db = self.config.target_snr_db - snr_db;
            let time_ratio = 10.0f32.powf(snr_gap_db / 10.0);
            (self.config.base_duration * time_ratio).min(self.config.max_duration)
        };
        required.clamp(self.config.min_duration, self.config.max_duration)
    }

    /// Probe the block, commit to a window length, and detect
    ///
    /// A block shorter than the probe window is decided directly on whatever
    /// is available (no filter, no gates) and tagged
    /// [`DetectionMode::Insufficient`] so the caller can wait for more
    /// samples. Otherwise the committed window never exceeds the available
    /// signal, and the final decision runs with pre-filter and validity
    /// gate enabled.
    #[instrument(skip(self, samples), fields(available = samples.len()))]
    pub fn detect(&self, samples: &[f32]) -> (Option<char>, DetectionMode) {
        let fs = self.detector.config().sample_rate;
        let probe_len = (self.config.min_duration * fs) as usize;

        if samples.len() < probe_len {
            debug!(needed = probe_len, "block shorter than probe window");
            return (
                self.detector.identify_key(samples, false, false),
                DetectionMode::Insufficient,
            );
        }

        let quality = self.estimate_quality(&samples[..probe_len]);
        debug!(
            snr_db = quality.snr_db,
            peak_ratio = quality.peak_ratio,
            "probe quality"
        );

        let available = samples.len() as f32 / fs;
        let required = self.required_duration(quality.snr_db).min(available);

        let final_len = ((required * fs) as usize).min(samples.len());
        let key = self.detector.identify_key(&samples[..final_len], true, true);
        let mode = DetectionMode::from_duration(required);
        debug!(?key, %mode, "committed detection");

        (key, mode)
    }
}
