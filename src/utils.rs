//! WAV container utilities for the tone cue library
//!
//! This module provides functions for writing rendered tones to disk and
//! reading them back in the same mono 16-bit PCM format.

use crate::tone::{SampleBuffer, BITS_PER_SAMPLE, CHANNELS};
use crate::{Error, Result};
use ndarray::Array1;
use std::path::Path;

/// Container format for a cue at `sample_rate`: mono, 16-bit signed integers
pub fn wav_spec(sample_rate: u32) -> hound::WavSpec {
    hound::WavSpec {
        channels: CHANNELS,
        sample_rate,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: hound::SampleFormat::Int,
    }
}

/// Read a cue back from a WAV file
///
/// # Arguments
///
/// * `path` - Path to the WAV file
/// * `sampling_rate` - Expected sampling rate of the audio
///
/// # Errors
///
/// Returns an error if:
/// * The file cannot be opened
/// * The file is not mono 16-bit integer PCM
/// * The sampling rate doesn't match
pub fn read_audio<P: AsRef<Path>>(path: P, sampling_rate: u32) -> Result<SampleBuffer> {
    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    if spec.sample_rate != sampling_rate {
        return Err(Error::AudioProcessing(format!(
            "Audio file has sampling rate {}, but {} was requested",
            spec.sample_rate, sampling_rate
        )));
    }
    if spec.channels != CHANNELS
        || spec.bits_per_sample != BITS_PER_SAMPLE
        || spec.sample_format != hound::SampleFormat::Int
    {
        return Err(Error::AudioProcessing(format!(
            "Expected mono {}-bit integer PCM, found {} channel(s) of {}-bit {:?}",
            BITS_PER_SAMPLE, spec.channels, spec.bits_per_sample, spec.sample_format
        )));
    }

    let samples = reader
        .samples::<i16>()
        .map(|s| s.map_err(Error::from))
        .collect::<Result<Vec<i16>>>()?;

    Ok(SampleBuffer::new(Array1::from_vec(samples)))
}

/// Save a cue to a WAV file, replacing any existing file
///
/// The header is only complete once the writer is finalized; a failure
/// part-way through leaves a truncated file behind.
///
/// # Errors
///
/// Returns an error if:
/// * The file cannot be created
/// * The samples cannot be written
/// * The WAV file cannot be finalized
pub fn save_audio<P: AsRef<Path>>(path: P, buffer: &SampleBuffer, sampling_rate: u32) -> Result<()> {
    let mut writer = hound::WavWriter::create(path, wav_spec(sampling_rate))?;

    for &sample in buffer.samples().iter() {
        writer.write_sample(sample)?;
    }

    writer.finalize()?;

    Ok(())
}
