//! Audio decoding using symphonia.

use crate::error::{Error, Result};
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::{AudioBufferRef, Signal};
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Decoded audio, immutable once loaded.
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    /// Mono samples in range [-1.0, 1.0].
    pub samples: Vec<f32>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl AudioBuffer {
    /// Total duration in seconds.
    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let n = self.samples.len() as f64;
        n / f64::from(self.sample_rate)
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the buffer holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Load an audio file into a mono f32 [`AudioBuffer`].
///
/// WAV is the primary format; FLAC and MP3 decode through the same path.
/// Multi-channel audio is mixed down to mono.
///
/// # Errors
///
/// Returns [`Error::AudioOpen`] if the file cannot be opened or probed,
/// [`Error::NoAudioTracks`] if it contains no decodable track, and
/// [`Error::AudioDecode`] for failures while decoding packets.
pub fn load_audio_file(path: &Path) -> Result<AudioBuffer> {
    let file = File::open(path).map_err(|e| Error::AudioOpen {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;

    let mss = MediaSourceStream::new(Box::new(file), MediaSourceStreamOptions::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| Error::AudioOpen {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| Error::NoAudioTracks {
            path: path.to_path_buf(),
        })?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| Error::AudioDecode {
            path: path.to_path_buf(),
            source: "missing sample rate".into(),
        })?;
    let channels = track
        .codec_params
        .channels
        .map_or(1, symphonia::core::audio::Channels::count);

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| Error::AudioDecode {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

    let mut samples = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                return Err(Error::AudioDecode {
                    path: path.to_path_buf(),
                    source: Box::new(e),
                });
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder.decode(&packet).map_err(|e| Error::AudioDecode {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;

        mix_into_mono(&decoded, channels, &mut samples);
    }

    Ok(AudioBuffer {
        samples,
        sample_rate,
    })
}

/// Append one decoded buffer to `output` as mono samples.
fn mix_into_mono(buffer: &AudioBufferRef, channels: usize, output: &mut Vec<f32>) {
    match buffer {
        AudioBufferRef::F32(buf) => {
            mix_frames(buf.frames(), channels, output, |ch, i| buf.chan(ch)[i]);
        }
        AudioBufferRef::S16(buf) => {
            const NORM: f32 = 32768.0;
            mix_frames(buf.frames(), channels, output, |ch, i| {
                f32::from(buf.chan(ch)[i]) / NORM
            });
        }
        AudioBufferRef::S32(buf) => {
            const NORM: f32 = 2_147_483_648.0;
            mix_frames(buf.frames(), channels, output, |ch, i| {
                #[allow(clippy::cast_precision_loss)]
                let sample = buf.chan(ch)[i] as f32;
                sample / NORM
            });
        }
        _ => {
            // Other sample formats do not occur in the files this tool reads.
        }
    }
}

/// Average `channels` interleaved planes into mono via a sample accessor.
fn mix_frames<F>(frames: usize, channels: usize, output: &mut Vec<f32>, sample_at: F)
where
    F: Fn(usize, usize) -> f32,
{
    output.reserve(frames);

    if channels == 1 {
        for i in 0..frames {
            output.push(sample_at(0, i));
        }
        return;
    }

    #[allow(clippy::cast_precision_loss)]
    let scale = 1.0 / channels as f32;
    for i in 0..frames {
        let mut sum = 0.0f32;
        for ch in 0..channels {
            sum += sample_at(ch, i);
        }
        output.push(sum * scale);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use hound::{SampleFormat, WavSpec, WavWriter};
    use tempfile::TempDir;

    fn write_test_wav(dir: &TempDir, name: &str, samples: &[i16], sample_rate: u32) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let spec = WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
        path
    }

    #[test]
    fn test_load_wav_length_and_rate() {
        let dir = TempDir::new().unwrap();
        let samples: Vec<i16> = vec![0; 16_000];
        let path = write_test_wav(&dir, "one_second.wav", &samples, 16_000);

        let audio = load_audio_file(&path).unwrap();
        assert_eq!(audio.sample_rate, 16_000);
        assert_eq!(audio.len(), 16_000);
        assert!((audio.duration_secs() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_load_wav_normalizes_to_unit_range() {
        let dir = TempDir::new().unwrap();
        let samples: Vec<i16> = vec![i16::MAX, i16::MIN, 0, 16384];
        let path = write_test_wav(&dir, "range.wav", &samples, 8_000);

        let audio = load_audio_file(&path).unwrap();
        assert_eq!(audio.len(), 4);
        for &s in &audio.samples {
            assert!((-1.0..=1.0).contains(&s));
        }
        assert!(audio.samples[0] > 0.99);
        assert!(audio.samples[1] < -0.99);
        assert_eq!(audio.samples[2], 0.0);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_audio_file(Path::new("/nonexistent/audio.wav")).unwrap_err();
        assert!(matches!(err, Error::AudioOpen { .. }));
    }

    #[test]
    fn test_duration_empty_buffer() {
        let audio = AudioBuffer {
            samples: Vec::new(),
            sample_rate: 44_100,
        };
        assert!(audio.is_empty());
        assert_eq!(audio.duration_secs(), 0.0);
    }
}
