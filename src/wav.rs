//! WAV Export
//!
//! Writes synthesized blocks to 16-bit PCM mono WAV files, mainly so
//! generated test and demo tones can be listened to or fed to external
//! tools. Capture-side audio I/O stays out of the crate.

use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::error::DtmfError;

/// Write samples as a 16-bit PCM mono WAV file
///
/// Blocks with peaks above full scale (noisy synthesis easily exceeds unit
/// amplitude) are normalized by their peak before quantization; quieter
/// blocks are written as-is.
pub fn write_wav_file(
    path: impl AsRef<Path>,
    samples: &[f32],
    sample_rate: u32,
) -> Result<(), DtmfError> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let peak = samples
        .iter()
        .fold(0.0f32, |max, &x| max.max(x.abs()))
        .max(1.0);

    let mut writer = WavWriter::create(path, spec)?;
    for &sample in samples {
        let scaled = (sample / peak).clamp(-1.0, 1.0);
        writer.write_sample((scaled * i16::MAX as f32) as i16)?;
    }
    writer.finalize()?;

    Ok(())
}
