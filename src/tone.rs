//! Decaying sine tone synthesis
//!
//! This module renders a sine wave with a linear decay envelope into 16-bit
//! PCM samples and writes them out as a mono WAV file.

use crate::utils::save_audio;
use crate::Result;
use log::{debug, info};
use ndarray::{s, Array1};
use ndarray_stats::QuantileExt;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Frame rate of every generated cue, in Hz
pub const SAMPLE_RATE: u32 = 44100;

/// Generated cues are mono
pub const CHANNELS: u16 = 1;

/// Sample width of the container, in bits
pub const BITS_PER_SAMPLE: u16 = 16;

/// Largest positive 16-bit sample value, used to scale the sine wave
pub const FULL_SCALE: f64 = 32767.0;

/// Volume used when a request does not set one
pub const DEFAULT_VOLUME: f64 = 0.5;

/// Parameters of a single tone
///
/// No validation is applied: a zero duration renders an empty buffer and a
/// volume above 1.0 saturates at the 16-bit limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneRequest {
    /// Output WAV path
    pub path: PathBuf,
    /// Tone frequency in Hz
    pub frequency: f64,
    /// Tone duration in milliseconds
    pub duration_ms: u64,
    /// Peak amplitude as a fraction of full scale
    pub volume: f64,
}

impl ToneRequest {
    /// Create a request at the default volume
    pub fn new<P: Into<PathBuf>>(path: P, frequency: f64, duration_ms: u64) -> Self {
        Self {
            path: path.into(),
            frequency,
            duration_ms,
            volume: DEFAULT_VOLUME,
        }
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }
}

/// Rendered 16-bit samples of a tone, in playback order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleBuffer {
    samples: Array1<i16>,
}

impl SampleBuffer {
    pub fn new(samples: Array1<i16>) -> Self {
        Self { samples }
    }

    /// Number of frames (one sample per frame, mono)
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &Array1<i16> {
        &self.samples
    }

    /// Samples as a slice, `None` if the array is not in standard layout
    pub fn as_slice(&self) -> Option<&[i16]> {
        self.samples.as_slice()
    }

    /// Raw PCM payload as signed little-endian 16-bit integers
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.samples.iter().flat_map(|s| s.to_le_bytes()).collect()
    }

    /// Largest absolute sample value within `range`
    ///
    /// The range is clamped to the buffer. Returns `None` when nothing is left.
    pub fn peak(&self, range: Range<usize>) -> Option<u16> {
        let end = range.end.min(self.len());
        let start = range.start.min(end);
        self.samples
            .slice(s![start..end])
            .mapv(i16::unsigned_abs)
            .max()
            .ok()
            .copied()
    }
}

/// Renders tones and writes them as WAV files
///
/// # Example
///
/// ```no_run
/// use tone_cues::{ToneGenerator, ToneRequest};
///
/// let generator = ToneGenerator::default();
/// let request = ToneRequest::new("assets/audio/start.wav", 440.0, 1000);
/// generator.generate(&request)?;
/// # Ok::<(), tone_cues::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ToneGenerator {
    sample_rate: u32,
}

impl Default for ToneGenerator {
    fn default() -> Self {
        Self::new(SAMPLE_RATE)
    }
}

impl ToneGenerator {
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of frames a tone of `duration_ms` occupies, truncated
    pub fn frame_count(&self, duration_ms: u64) -> usize {
        (self.sample_rate as f64 * (duration_ms as f64 / 1000.0)) as usize
    }

    /// Render a tone into memory
    ///
    /// Each sample is quantized twice: the raw sine value is truncated to an
    /// integer, then scaled by the decay factor `1 - i/n` and truncated again.
    /// Fusing the two steps changes some sample values.
    pub fn render(&self, request: &ToneRequest) -> SampleBuffer {
        let rate = self.sample_rate as f64;
        let n = self.frame_count(request.duration_ms);
        debug!(
            "Rendering {} Hz tone: {} frames at volume {}",
            request.frequency, n, request.volume
        );

        let samples = Array1::from_shape_fn(n, |i| {
            let t = i as f64 / rate;
            let raw = (request.volume * FULL_SCALE * (2.0 * PI * request.frequency * t).sin()).trunc();
            let decay = 1.0 - (i as f64 / n as f64);
            // Float-to-int casts truncate toward zero and saturate at the i16 bounds.
            (raw * decay) as i16
        });

        SampleBuffer::new(samples)
    }

    /// Render a tone and write it to `request.path`, replacing any existing file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// * The parent directory does not exist or is not writable
    /// * The samples cannot be written or the header cannot be finalized
    pub fn generate(&self, request: &ToneRequest) -> Result<()> {
        let buffer = self.render(request);
        save_audio(&request.path, &buffer, self.sample_rate)?;
        info!(
            "Wrote {} frames to {}",
            buffer.len(),
            request.path.display()
        );
        Ok(())
    }
}

/// Generate a single tone at the default sample rate
///
/// Pass [`DEFAULT_VOLUME`] for the usual cue loudness.
pub fn generate_tone<P: AsRef<Path>>(
    path: P,
    frequency: f64,
    duration_ms: u64,
    volume: f64,
) -> Result<()> {
    let request = ToneRequest::new(path.as_ref(), frequency, duration_ms).with_volume(volume);
    ToneGenerator::default().generate(&request)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(frequency: f64, duration_ms: u64) -> SampleBuffer {
        ToneGenerator::default().render(&ToneRequest::new("unused.wav", frequency, duration_ms))
    }

    #[test]
    fn frame_count_truncates() {
        let generator = ToneGenerator::default();
        assert_eq!(generator.frame_count(1000), 44100);
        assert_eq!(generator.frame_count(100), 4410);
        assert_eq!(generator.frame_count(1), 44);
        assert_eq!(generator.frame_count(0), 0);
    }

    #[test]
    fn first_samples_follow_double_truncation() {
        let start = render(440.0, 1000);
        assert_eq!(&start.as_slice().unwrap()[..6], &[0, 1025, 2047, 3062, 4064, 5050]);

        let tick = render(880.0, 100);
        assert_eq!(&tick.as_slice().unwrap()[..6], &[0, 2047, 4063, 6013, 7868, 9600]);
    }

    #[test]
    fn zero_duration_renders_nothing() {
        let buffer = render(440.0, 0);
        assert!(buffer.is_empty());
        assert_eq!(buffer.peak(0..10), None);
    }

    #[test]
    fn loud_volume_saturates() {
        let request = ToneRequest::new("unused.wav", 440.0, 100).with_volume(4.0);
        let buffer = ToneGenerator::default().render(&request);
        assert!(buffer.as_slice().unwrap().contains(&i16::MAX));
        assert!(buffer.as_slice().unwrap().contains(&i16::MIN));
    }

    #[test]
    fn peak_clamps_range() {
        let buffer = SampleBuffer::new(Array1::from_vec(vec![3, -7, 5]));
        assert_eq!(buffer.peak(0..100), Some(7));
        assert_eq!(buffer.peak(2..3), Some(5));
        assert_eq!(buffer.peak(5..9), None);
    }

    #[test]
    fn le_bytes_layout() {
        let buffer = SampleBuffer::new(Array1::from_vec(vec![1, -2]));
        assert_eq!(buffer.to_le_bytes(), vec![0x01, 0x00, 0xfe, 0xff]);
    }
}
