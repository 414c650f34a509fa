//! Input validation utilities for codec operations

use crate::codecs::aptx::fixed_point::{SAMPLE_MAX, SAMPLE_MIN};
use crate::codecs::aptx::{CHANNELS, SAMPLES_PER_BLOCK};
use crate::error::{AptxError, Result};
use crate::types::Variant;

/// Interleaved samples in one stereo block
const INTERLEAVED_BLOCK: usize = SAMPLES_PER_BLOCK * CHANNELS;

/// Check that `actual` is a whole multiple of `expected`
pub fn validate_frame_length(actual: usize, expected: usize) -> Result<()> {
    if actual % expected != 0 {
        return Err(AptxError::InvalidFrameSize { expected, actual });
    }
    Ok(())
}

/// Validate interleaved stereo PCM for block encoding
///
/// Samples must be Q23 and form whole blocks.
pub fn validate_pcm(samples: &[i32]) -> Result<()> {
    validate_frame_length(samples.len(), INTERLEAVED_BLOCK)?;

    if let Some((i, &sample)) = samples
        .iter()
        .enumerate()
        .find(|(_, s)| !(SAMPLE_MIN..=SAMPLE_MAX).contains(*s))
    {
        return Err(AptxError::invalid_format(format!(
            "Sample at index {} out of 24-bit range: {}",
            i, sample
        )));
    }

    Ok(())
}

/// Validate a codeword byte stream for `variant`
pub fn validate_encoded_data(data: &[u8], variant: Variant) -> Result<()> {
    validate_frame_length(data.len(), CHANNELS * variant.codeword_bytes())
}

/// Validate that an output buffer can hold `needed` bytes
pub fn validate_buffer_size(needed: usize, actual: usize) -> Result<()> {
    if actual < needed {
        return Err(AptxError::BufferTooSmall { needed, actual });
    }
    Ok(())
}
