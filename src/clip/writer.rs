//! WAV output for clipped audio.

use std::fs;
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::error::{Error, Result};

/// Write a sample slice to a mono 16-bit PCM WAV file.
///
/// Samples are clamped to [-1.0, 1.0] before conversion. Parent
/// directories are created as needed.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the file cannot
/// be written.
pub fn write_clip_wav(path: &Path, samples: &[f32], sample_rate: u32) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec).map_err(|e| Error::WavWrite {
        path: path.to_path_buf(),
        source: e,
    })?;

    for &sample in samples {
        #[allow(clippy::cast_possible_truncation)]
        let sample_i16 = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
        writer
            .write_sample(sample_i16)
            .map_err(|e| Error::WavWrite {
                path: path.to_path_buf(),
                source: e,
            })?;
    }

    writer.finalize().map_err(|e| Error::WavWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::cast_precision_loss)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_clip_wav_roundtrip_length() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clip.wav");

        let samples: Vec<f32> = (0..8_000).map(|i| (i as f32 * 0.01).sin()).collect();

        write_clip_wav(&path, &samples, 8_000).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_rate, 8_000);
        assert_eq!(reader.spec().channels, 1);
        assert_eq!(reader.len(), 8_000);
    }

    #[test]
    fn test_write_clip_wav_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("out").join("clip.wav");

        write_clip_wav(&path, &[0.0; 100], 16_000).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_write_clip_wav_clamps_overrange_samples() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hot.wav");

        write_clip_wav(&path, &[2.0, -2.0], 16_000).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        let decoded: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(decoded, vec![i16::MAX, -i16::MAX]);
    }
}
