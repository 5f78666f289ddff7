use hound::{WavSpec, WavWriter};
use std::path::Path;

use crate::waveform::Waveform;

/// Write `waveform` as a mono 32-bit float WAV file
pub fn save_wav(path: impl AsRef<Path>, waveform: &Waveform) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: waveform.sample_rate(),
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = WavWriter::create(path, spec)?;

    for &sample in waveform.samples() {
        writer.write_sample(sample as f32)?;
    }

    writer.finalize()?;
    Ok(())
}
