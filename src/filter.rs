//! Zero-Phase Band-Pass Pre-Filter
//!
//! Attenuates energy outside the DTMF band (600-1600 Hz in the reference
//! configuration) before tone estimation. The filter is a Butterworth
//! high-pass/low-pass cascade (4th order overall) applied forward and then
//! backward over the block, so the net group delay is zero and filtering
//! introduces no time shift into the block handed to the estimator.
//!
//! Applying the filter is optional per detection call; callers chasing the
//! lowest latency may skip it and accept more out-of-band noise.

use biquad::*;

use crate::config::DetectorConfig;
use crate::error::DtmfError;

/// Forward-backward Butterworth band-pass filter
///
/// Coefficients are derived once from a validated [`DetectorConfig`]; the
/// per-block state lives on the stack of [`apply`](Self::apply), so one
/// instance is safe to share across any number of concurrent callers.
#[derive(Debug, Clone, Copy)]
pub struct ZeroPhaseBandpass {
    highpass: Coefficients<f32>,
    lowpass: Coefficients<f32>,
}

impl ZeroPhaseBandpass {
    /// Build filter coefficients for the configured passband
    ///
    /// Fails with [`DtmfError::InvalidPassband`] when the cutoffs cannot be
    /// realized at the configured sample rate. Checked here as well as in
    /// [`DetectorConfig::validate`] since this constructor is public.
    pub fn new(config: &DetectorConfig) -> Result<Self, DtmfError> {
        let invalid = || DtmfError::InvalidPassband {
            low: config.filter_low_cutoff,
            high: config.filter_high_cutoff,
            rate: config.sample_rate,
        };

        if !(config.filter_low_cutoff > 0.0)
            || config.filter_low_cutoff >= config.filter_high_cutoff
            || config.filter_high_cutoff >= config.sample_rate / 2.0
        {
            return Err(invalid());
        }

        // biquad's from_params normalizes f0 by 2*fs and then takes
        // omega = pi * normalized_f0, which puts the realized corner at a
        // quarter of the requested cutoff. Passing 2*f0/fs through
        // from_normalized_params yields the standard omega = 2*pi*f0/fs.
        let highpass = Coefficients::<f32>::from_normalized_params(
            Type::HighPass,
            2.0 * config.filter_low_cutoff / config.sample_rate,
            Q_BUTTERWORTH_F32,
        )
        .map_err(|_| invalid())?;

        let lowpass = Coefficients::<f32>::from_normalized_params(
            Type::LowPass,
            2.0 * config.filter_high_cutoff / config.sample_rate,
            Q_BUTTERWORTH_F32,
        )
        .map_err(|_| invalid())?;

        Ok(Self { highpass, lowpass })
    }

    /// Band-limit a block without shifting it in time
    ///
    /// Runs the high-pass/low-pass cascade over the block, reverses it, runs
    /// a fresh cascade over the reversed block, and reverses again. The
    /// output has the same length as the input; phase distortion from the
    /// forward pass is cancelled by the backward pass.
    pub fn apply(&self, samples: &[f32]) -> Vec<f32> {
        let mut block = self.run_cascade(samples.iter().copied());
        block.reverse();
        let mut block = self.run_cascade(block.into_iter());
        block.reverse();
        block
    }

    fn run_cascade(&self, samples: impl Iterator<Item = f32>) -> Vec<f32> {
        let mut highpass = DirectForm2Transposed::<f32>::new(self.highpass);
        let mut lowpass = DirectForm2Transposed::<f32>::new(self.lowpass);
        samples.map(|x| lowpass.run(highpass.run(x))).collect()
    }
}
