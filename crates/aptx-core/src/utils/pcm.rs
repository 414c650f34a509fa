//! PCM sample format conversion
//!
//! The codec works on Q23 samples: a signed 24-bit value in the low bits of
//! an `i32`. 16-bit sources are scaled up by 8 bits; 24-bit sources are
//! sign-extended unchanged.

use crate::error::{AptxError, Result};
use crate::types::Variant;
use bytes::{Buf, BufMut, BytesMut};
use std::path::Path;

/// Raw little-endian PCM layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PcmFormat {
    /// Signed 16-bit little-endian
    S16Le,
    /// Signed 24-bit packed little-endian
    S24Le,
}

impl PcmFormat {
    /// Native source format of a codec variant
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Aptx => Self::S16Le,
            Variant::AptxHd => Self::S24Le,
        }
    }

    /// Bytes per sample
    pub fn bytes_per_sample(self) -> usize {
        match self {
            Self::S16Le => 2,
            Self::S24Le => 3,
        }
    }

    /// Convert raw bytes to Q23 samples
    pub fn decode_bytes(self, bytes: &[u8]) -> Result<Vec<i32>> {
        match self {
            Self::S16Le => s16le_to_q23(bytes),
            Self::S24Le => s24le_to_q23(bytes),
        }
    }

    /// Convert Q23 samples to raw bytes
    pub fn encode_samples(self, samples: &[i32]) -> Vec<u8> {
        match self {
            Self::S16Le => q23_to_s16le(samples),
            Self::S24Le => q23_to_s24le(samples),
        }
    }
}

fn check_width(len: usize, width: usize) -> Result<()> {
    if len % width != 0 {
        return Err(AptxError::invalid_format(format!(
            "{} bytes is not a whole number of {}-byte samples",
            len, width
        )));
    }
    Ok(())
}

/// Signed 16-bit little-endian bytes to Q23
pub fn s16le_to_q23(bytes: &[u8]) -> Result<Vec<i32>> {
    check_width(bytes.len(), 2)?;
    let mut buf = bytes;
    let mut samples = Vec::with_capacity(bytes.len() / 2);
    while buf.has_remaining() {
        samples.push(i32::from(buf.get_i16_le()) << 8);
    }
    Ok(samples)
}

/// Signed 24-bit packed little-endian bytes to Q23
pub fn s24le_to_q23(bytes: &[u8]) -> Result<Vec<i32>> {
    check_width(bytes.len(), 3)?;
    let mut buf = bytes;
    let mut samples = Vec::with_capacity(bytes.len() / 3);
    while buf.has_remaining() {
        samples.push(buf.get_int_le(3) as i32);
    }
    Ok(samples)
}

/// Q23 samples to signed 16-bit little-endian bytes, dropping the low 8 bits
pub fn q23_to_s16le(samples: &[i32]) -> Vec<u8> {
    let mut buf = BytesMut::with_capacity(samples.len() * 2);
    for &s in samples {
        buf.put_i16_le((s >> 8) as i16);
    }
    buf.to_vec()
}

/// Q23 samples to signed 24-bit packed little-endian bytes
pub fn q23_to_s24le(samples: &[i32]) -> Vec<u8> {
    let mut buf = BytesMut::with_capacity(samples.len() * 3);
    for &s in samples {
        buf.put_int_le(i64::from(s), 3);
    }
    buf.to_vec()
}

/// Read a raw PCM file into Q23 samples
pub fn read_pcm_file(path: impl AsRef<Path>, format: PcmFormat) -> Result<Vec<i32>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), ?format, "read PCM file");
    format.decode_bytes(&bytes)
}

/// Write Q23 samples to a raw PCM file
pub fn write_pcm_file(path: impl AsRef<Path>, format: PcmFormat, samples: &[i32]) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, format.encode_samples(samples))?;
    tracing::debug!(path = %path.display(), samples = samples.len(), ?format, "wrote PCM file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use temp_dir::TempDir;

    #[test]
    fn test_s16le_conversion() {
        let bytes = [0x30, 0x31, 0xFF, 0xFF, 0x00, 0x80, 0xFF, 0x7F];
        let samples = s16le_to_q23(&bytes).unwrap();
        assert_eq!(samples, vec![0x3130 << 8, -256, -(1 << 23), 0x7FFF << 8]);
        assert_eq!(q23_to_s16le(&samples), bytes.to_vec());
    }

    #[test]
    fn test_s24le_conversion() {
        let bytes = [0x30, 0x31, 0x32, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x80];
        let samples = s24le_to_q23(&bytes).unwrap();
        assert_eq!(samples, vec![0x32_3130, -1, -(1 << 23)]);
        assert_eq!(q23_to_s24le(&samples), bytes.to_vec());
    }

    #[test]
    fn test_partial_samples_rejected() {
        assert!(matches!(s16le_to_q23(&[0; 3]), Err(AptxError::InvalidFormat { .. })));
        assert!(matches!(s24le_to_q23(&[0; 4]), Err(AptxError::InvalidFormat { .. })));
    }

    #[test]
    fn test_16bit_output_truncates() {
        // Q23 values between 16-bit steps round toward negative infinity
        assert_eq!(q23_to_s16le(&[0x1FF, -1]), vec![0x01, 0x00, 0xFF, 0xFF]);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.child("tone.s24le");
        let samples: Vec<i32> = (0..64).map(|n| (n - 32) * 100_003).collect();

        write_pcm_file(&path, PcmFormat::S24Le, &samples).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 64 * 3);
        assert_eq!(read_pcm_file(&path, PcmFormat::S24Le).unwrap(), samples);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = read_pcm_file(dir.child("absent.raw"), PcmFormat::S16Le).unwrap_err();
        assert!(matches!(err, AptxError::IoError { .. }));
    }
}
