//! DTMF Signal Synthesis
//!
//! Generates reference tone blocks for tests, demos, and WAV export: two
//! unit-amplitude sinusoids at a key's (low, high) pair, optionally buried
//! in white Gaussian noise at a requested SNR.

use std::f32::consts::PI;

use rand::Rng;
use rand_distr::StandardNormal;

use crate::config;
use crate::error::DtmfError;

/// Generate a DTMF tone block for a key
///
/// The clean signal is `sin(2*pi*fL*t) + sin(2*pi*fH*t)`. When `snr_db` is
/// given, white Gaussian noise is added with its power scaled so that
/// `10 * log10(signal_power / noise_power)` equals the requested value.
///
/// # Arguments
/// * `key` - One of the 16 DTMF characters
/// * `snr_db` - Signal-to-noise ratio in dB, or `None` for a clean signal
/// * `duration` - Block length in seconds
/// * `sample_rate` - Sample rate in Hz
///
/// # Errors
/// [`DtmfError::UnknownKey`] when `key` is not in the DTMF alphabet.
pub fn generate_dtmf(
    key: char,
    snr_db: Option<f32>,
    duration: f32,
    sample_rate: f32,
) -> Result<Vec<f32>, DtmfError> {
    let (low, high) = config::freq_pair(key).ok_or(DtmfError::UnknownKey { key })?;

    let num_samples = (sample_rate * duration) as usize;
    let mut signal: Vec<f32> = (0..num_samples)
        .map(|i| {
            let t = i as f32 / sample_rate;
            (2.0 * PI * low * t).sin() + (2.0 * PI * high * t).sin()
        })
        .collect();

    if let Some(snr) = snr_db {
        if !signal.is_empty() {
            let signal_power =
                signal.iter().map(|&x| x * x).sum::<f32>() / signal.len() as f32;
            let noise_power = signal_power / 10.0f32.powf(snr / 10.0);
            let sigma = noise_power.sqrt();

            let mut rng = rand::rng();
            for sample in signal.iter_mut() {
                let noise: f32 = rng.sample(StandardNormal);
                *sample += noise * sigma;
            }
        }
    }

    Ok(signal)
}

/// Generate white Gaussian noise with the given standard deviation
pub fn white_noise(num_samples: usize, sigma: f32) -> Vec<f32> {
    let mut rng = rand::rng();
    (0..num_samples)
        .map(|_| {
            let sample: f32 = rng.sample(StandardNormal);
            sample * sigma
        })
        .collect()
}
