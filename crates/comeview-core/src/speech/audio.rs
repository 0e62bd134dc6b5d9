//! Audio returned by the synthesis stage.

use crate::error::{ComeviewError, ComeviewResult};
use std::io::Cursor;
use std::time::Duration;

/// Format details read from a WAV header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSummary {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of interleaved channels
    pub channels: u16,
    /// Bits per sample
    pub bits_per_sample: u16,
    /// Number of frames (samples per channel)
    pub frames: u32,
}

impl WavSummary {
    /// Playback length
    #[must_use]
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(f64::from(self.frames) / f64::from(self.sample_rate))
    }
}

/// Encoded WAV audio ready to hand to a player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedAudio {
    bytes: Vec<u8>,
    summary: WavSummary,
}

impl SynthesizedAudio {
    /// Wrap WAV bytes after checking the header
    ///
    /// # Errors
    ///
    /// Returns `MalformedResponse` if the payload is empty or not a readable WAV stream.
    pub fn from_wav_bytes(bytes: Vec<u8>) -> ComeviewResult<Self> {
        if bytes.is_empty() {
            return Err(ComeviewError::malformed("Synthesis returned no audio"));
        }

        let summary = {
            let reader = hound::WavReader::new(Cursor::new(bytes.as_slice()))?;
            let spec = reader.spec();
            WavSummary {
                sample_rate: spec.sample_rate,
                channels: spec.channels,
                bits_per_sample: spec.bits_per_sample,
                frames: reader.duration(),
            }
        };

        Ok(Self { bytes, summary })
    }

    /// Raw WAV bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Take the raw WAV bytes
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Header details
    #[must_use]
    pub const fn summary(&self) -> WavSummary {
        self.summary
    }

    /// Playback length
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.summary.duration()
    }
}

#[cfg(test)]
pub(crate) fn test_wav(sample_rate: u32, frames: u32) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut bytes = Vec::new();
    {
        let mut writer = hound::WavWriter::new(Cursor::new(&mut bytes), spec).unwrap();
        for i in 0..frames {
            let sample = ((i % 64) as i16 - 32) * 256;
            writer.write_sample(sample).unwrap();
        }
        writer.finalize().unwrap();
    }
    bytes
}
