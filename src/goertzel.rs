//! Single-Bin Frequency Energy Estimation
//!
//! Implements the Goertzel algorithm: a second-order recursion that measures
//! the power of one frequency component in O(N) time with O(1) state.
//!
//! **Why not an FFT**: the detector only ever needs 8 fixed bins (4 low-group
//! and 4 high-group tones), so running the recursion 8 times is cheaper and
//! simpler than computing and discarding a full spectrum.
//!
//! **Recursion**: for bin k = round(N * f / fs) and coefficient
//! c = 2 * cos(2 * pi * k / N), each sample updates
//! `s = x + c * s1 - s2`, then shifts the two state scalars. The final
//! power is `s1^2 + s2^2 - c * s1 * s2`.

use std::f32::consts::PI;

/// Estimate the power of a single frequency component in a sample block
///
/// The estimate is proportional to the energy of the `target_freq` component
/// and accumulates with block length: a sustained tone yields more power from
/// a longer block, which is what lets the adaptive controller trade
/// integration time for signal-to-noise ratio.
///
/// `target_freq` must lie below the Nyquist rate; [`crate::detect::Detector`]
/// guarantees this for the fixed tone tables by validating its configuration
/// at construction.
///
/// # Arguments
/// * `samples` - Input block; an empty block yields power 0
/// * `target_freq` - Frequency of interest in Hz
/// * `sample_rate` - Sample rate of the block in Hz
///
/// # Returns
/// Non-negative power estimate for the target frequency
pub fn goertzel(samples: &[f32], target_freq: f32, sample_rate: f32) -> f32 {
    let n = samples.len();
    if n == 0 {
        return 0.0;
    }
    debug_assert!(
        target_freq < sample_rate / 2.0,
        "target frequency must be below Nyquist"
    );

    let k = (0.5 + n as f32 * target_freq / sample_rate).floor();
    let omega = 2.0 * PI * k / n as f32;
    let coeff = 2.0 * omega.cos();

    let mut s_prev1 = 0.0f32;
    let mut s_prev2 = 0.0f32;
    for &x in samples {
        let s = x + coeff * s_prev1 - s_prev2;
        s_prev2 = s_prev1;
        s_prev1 = s;
    }

    s_prev1 * s_prev1 + s_prev2 * s_prev2 - coeff * s_prev1 * s_prev2
}
