use snafu::Snafu;

/// Errors reported for caller misuse or I/O failures.
///
/// Per-call rejections (noise, ambiguity, silence) are *not* errors; the
/// detection functions report those as `None`. Everything here indicates a
/// misconfigured detector or a failed file operation and fails loudly.
#[derive(Debug, Snafu)]
pub enum DtmfError {
    /// Sample rate must be a positive number of samples per second
    #[snafu(display("sample rate must be positive, got {rate} Hz"))]
    InvalidSampleRate { rate: f32 },

    /// A candidate tone frequency is at or above the Nyquist rate
    #[snafu(display("tone {freq} Hz is not representable below the Nyquist rate {nyquist} Hz"))]
    ToneAboveNyquist { freq: f32, nyquist: f32 },

    /// Pre-filter passband does not fit the sample rate
    #[snafu(display("passband {low}-{high} Hz is invalid for sample rate {rate} Hz"))]
    InvalidPassband { low: f32, high: f32, rate: f32 },

    /// Controller duration bounds are inconsistent
    #[snafu(display(
        "invalid duration bounds: min {min} s, max {max} s, base {base} s"
    ))]
    InvalidDurations { min: f32, max: f32, base: f32 },

    /// A validity threshold must be positive
    #[snafu(display("threshold must be positive, got {value}"))]
    InvalidThreshold { value: f32 },

    /// Character is not part of the 16-key DTMF alphabet
    #[snafu(display("'{key}' is not a DTMF key"))]
    UnknownKey { key: char },

    /// WAV file could not be written
    #[snafu(context(false), display("WAV write failed: {source}"))]
    WavWrite { source: hound::Error },
}
