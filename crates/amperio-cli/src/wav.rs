//! Mono WAV reading and writing.
//!
//! Amp captures are mono by nature, so multi-channel input is mixed
//! down on read and everything is written as a single channel.

use anyhow::Result;
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// Output WAV parameters.
#[derive(Debug, Clone, Copy)]
pub struct WavSpec {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample; 32 means IEEE float.
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

/// Read a WAV file as mono f32 samples.
///
/// Multi-channel files are averaged down to one channel; integer
/// formats are normalized to [-1, 1).
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, WavSpec)> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let channels = spec.channels as usize;

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            // i64 so the scale stays positive at 32 bits.
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let mono = if channels > 1 {
        samples
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    } else {
        samples
    };

    Ok((
        mono,
        WavSpec {
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        },
    ))
}

/// Write mono f32 samples to a WAV file.
///
/// 32 bits writes IEEE float; anything less writes PCM with clipping
/// at full scale.
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], spec: WavSpec) -> Result<()> {
    let hound_spec = hound::WavSpec {
        channels: 1,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        sample_format: if spec.bits_per_sample == 32 {
            SampleFormat::Float
        } else {
            SampleFormat::Int
        },
    };
    let mut writer = WavWriter::create(path, hound_spec)?;

    if spec.bits_per_sample == 32 {
        for &sample in samples {
            writer.write_sample(sample)?;
        }
    } else {
        let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
        for &sample in samples {
            let quantized = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
            writer.write_sample(quantized)?;
        }
    }

    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn float_roundtrip() {
        let samples: Vec<f32> = (0..1000).map(|i| (i as f32 / 50.0).sin()).collect();
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &samples, WavSpec::default()).unwrap();

        let (loaded, spec) = read_wav(file.path()).unwrap();
        assert_eq!(spec.sample_rate, 48000);
        assert_eq!(loaded.len(), samples.len());
        for (a, b) in samples.iter().zip(&loaded) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn pcm16_roundtrip_within_quantization() {
        let samples: Vec<f32> = (0..1000).map(|i| (i as f32 / 50.0).sin() * 0.9).collect();
        let spec = WavSpec {
            sample_rate: 44100,
            bits_per_sample: 16,
        };
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &samples, spec).unwrap();

        let (loaded, loaded_spec) = read_wav(file.path()).unwrap();
        assert_eq!(loaded_spec.sample_rate, 44100);
        for (a, b) in samples.iter().zip(&loaded) {
            assert!((a - b).abs() < 0.001);
        }
    }

    #[test]
    fn pcm32_reads_with_correct_polarity() {
        let hound_spec = hound::WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Int,
        };
        let file = NamedTempFile::new().unwrap();
        let mut writer = WavWriter::create(file.path(), hound_spec).unwrap();
        // +half scale and -quarter scale.
        writer.write_sample(1i32 << 30).unwrap();
        writer.write_sample(-(1i32 << 29)).unwrap();
        writer.finalize().unwrap();

        let (loaded, spec) = read_wav(file.path()).unwrap();
        assert_eq!(spec.bits_per_sample, 32);
        assert!((loaded[0] - 0.5).abs() < 1e-6, "got {}", loaded[0]);
        assert!((loaded[1] + 0.25).abs() < 1e-6, "got {}", loaded[1]);
    }

    #[test]
    fn stereo_mixes_down_to_mono() {
        let hound_spec = hound::WavSpec {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let file = NamedTempFile::new().unwrap();
        let mut writer = WavWriter::create(file.path(), hound_spec).unwrap();
        for _ in 0..100 {
            writer.write_sample(0.2f32).unwrap();
            writer.write_sample(0.6f32).unwrap();
        }
        writer.finalize().unwrap();

        let (mono, _) = read_wav(file.path()).unwrap();
        assert_eq!(mono.len(), 100);
        for &s in &mono {
            assert!((s - 0.4).abs() < 1e-6);
        }
    }
}
