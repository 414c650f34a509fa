//! Core types and traits for the codec library
//!
//! This module defines the configuration vocabulary shared by the encoder,
//! the decoder and the stream codec: codec variant, output byte order,
//! sync mode and the fixed sub-band ordering.

use crate::error::{AptxError, Result};
use bytes::Bytes;
use std::fmt;
use std::str::FromStr;

/// Primary trait for stream-level audio codecs
///
/// PCM is exchanged as interleaved stereo Q23 samples (`L, R, L, R, ...`),
/// each holding a signed 24-bit value in the low bits of an `i32`.
pub trait AudioCodec: Send + Sync {
    /// Encode interleaved PCM to a codeword byte stream
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a whole number of blocks
    fn encode(&mut self, pcm: &[i32]) -> Result<Bytes>;

    /// Decode a codeword byte stream to interleaved PCM
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a whole number of codeword pairs
    fn decode(&mut self, data: &[u8]) -> Result<Vec<i32>>;

    /// Get codec information
    fn info(&self) -> CodecInfo;

    /// Reset codec state
    ///
    /// Equivalent to a fresh `init` with the same configuration.
    fn reset(&mut self) -> Result<()>;

    /// Get the block size in samples per channel
    fn frame_size(&self) -> usize;
}

/// aptX codec variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// aptX "classic": 16-bit codewords, 4 bits per sample
    Aptx,
    /// aptX-HD: 24-bit codewords, 6 bits per sample
    AptxHd,
}

impl Variant {
    /// Codec name
    pub fn name(self) -> &'static str {
        match self {
            Self::Aptx => "aptX",
            Self::AptxHd => "aptX-HD",
        }
    }

    /// Bits per packed codeword (one channel, one block)
    pub fn codeword_bits(self) -> u32 {
        match self {
            Self::Aptx => 16,
            Self::AptxHd => 24,
        }
    }

    /// Bytes per packed codeword on the wire
    pub fn codeword_bytes(self) -> usize {
        self.codeword_bits() as usize / 8
    }

    /// Width of the PCM samples this variant is normally fed
    pub fn pcm_bits(self) -> u32 {
        match self {
            Self::Aptx => 16,
            Self::AptxHd => 24,
        }
    }

    /// Bit widths of the LL, LH, HL and HH code fields
    pub fn code_widths(self) -> [u32; 4] {
        match self {
            Self::Aptx => [7, 4, 2, 3],
            Self::AptxHd => [9, 6, 4, 5],
        }
    }

    /// Byte size of the reference implementation's opaque state block
    pub fn reference_state_size(self) -> usize {
        match self {
            Self::Aptx => 5008,
            Self::AptxHd => 5256,
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Variant {
    type Err = AptxError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "aptx" => Ok(Self::Aptx),
            "aptx-hd" | "aptxhd" | "aptx_hd" => Ok(Self::AptxHd),
            _ => Err(AptxError::invalid_config(format!("Unknown codec variant: {}", s))),
        }
    }
}

/// Byte order of the 16-bit aptX codewords returned by the block encoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endianness {
    /// Codeword returned as packed
    #[default]
    Little,
    /// Codeword bytes swapped
    Big,
}

impl Endianness {
    /// Build from the `endianLittle` flag of the init contract
    pub fn from_little_flag(little: bool) -> Self {
        if little {
            Self::Little
        } else {
            Self::Big
        }
    }

    /// Rotation applied to each 16-bit codeword (0 or 8)
    pub fn swap_shift(self) -> u32 {
        match self {
            Self::Little => 0,
            Self::Big => 8,
        }
    }
}

/// Sync insertion mode
///
/// Stored verbatim: any raw value is accepted. Only [`SyncMode::STEREO`],
/// [`SyncMode::DUAL_MONO`] and [`SyncMode::NO_SYNC`] have a defined meaning.
/// Any other value currently packs codewords like `NO_SYNC` but inserts sync
/// like `STEREO`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SyncMode(i32);

impl SyncMode {
    /// Joint parity across the left/right pair
    pub const STEREO: Self = Self(0);
    /// Independent parity per channel
    pub const DUAL_MONO: Self = Self(1);
    /// No sync insertion, HH code transmitted unchanged
    pub const NO_SYNC: Self = Self(2);

    /// Wrap a raw mode value without validation
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Raw mode value
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Whether this is one of the three documented modes
    pub fn is_known(self) -> bool {
        matches!(self, Self::STEREO | Self::DUAL_MONO | Self::NO_SYNC)
    }

    /// Whether the packer folds the sync parity into the HH field
    pub(crate) fn folds_parity(self) -> bool {
        self == Self::STEREO || self == Self::DUAL_MONO
    }
}

impl Default for SyncMode {
    fn default() -> Self {
        Self::STEREO
    }
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::STEREO => write!(f, "stereo"),
            Self::DUAL_MONO => write!(f, "dual-mono"),
            Self::NO_SYNC => write!(f, "no-sync"),
            Self(raw) => write!(f, "unknown({raw})"),
        }
    }
}

/// Sub-band produced by the two-stage QMF tree
///
/// The ordinal selects tables, predictor order and codeword bit offsets and
/// must never be permuted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subband {
    /// Low-low band
    LL = 0,
    /// Low-high band
    LH = 1,
    /// High-low band
    HL = 2,
    /// High-high band
    HH = 3,
}

impl Subband {
    /// All bands in ordinal order
    pub const ALL: [Subband; 4] = [Subband::LL, Subband::LH, Subband::HL, Subband::HH];

    /// Fixed ordinal of the band
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Codec configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AptxConfig {
    /// Codec variant
    pub variant: Variant,
    /// Byte order of 16-bit block codewords
    pub endianness: Endianness,
    /// Sync insertion mode
    pub sync_mode: SyncMode,
}

impl AptxConfig {
    /// Create a new configuration with stereo sync and little-endian output
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            endianness: Endianness::Little,
            sync_mode: SyncMode::STEREO,
        }
    }

    /// Create aptX configuration
    pub fn aptx() -> Self {
        Self::new(Variant::Aptx)
    }

    /// Create aptX-HD configuration
    pub fn aptx_hd() -> Self {
        Self::new(Variant::AptxHd)
    }

    /// Set codeword byte order
    pub fn with_endianness(mut self, endianness: Endianness) -> Self {
        self.endianness = endianness;
        self
    }

    /// Set sync mode
    pub fn with_sync_mode(mut self, sync_mode: SyncMode) -> Self {
        self.sync_mode = sync_mode;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.variant == Variant::AptxHd && self.sync_mode != SyncMode::STEREO {
            return Err(AptxError::invalid_config(format!(
                "aptX-HD always uses stereo sync, got {}",
                self.sync_mode
            )));
        }
        Ok(())
    }
}

impl Default for AptxConfig {
    fn default() -> Self {
        Self::aptx()
    }
}

/// Audio codec information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecInfo {
    /// Codec name
    pub name: &'static str,
    /// Number of channels
    pub channels: u8,
    /// Bits per packed codeword
    pub codeword_bits: u32,
    /// Samples per channel in one block
    pub frame_size: usize,
    /// Input bits per sample divided by coded bits per sample
    pub compression_ratio: u32,
    /// Encoder plus decoder delay in samples
    pub latency_samples: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_properties() {
        assert_eq!(Variant::Aptx.codeword_bytes(), 2);
        assert_eq!(Variant::AptxHd.codeword_bytes(), 3);
        assert_eq!(Variant::Aptx.code_widths().iter().sum::<u32>(), 16);
        assert_eq!(Variant::AptxHd.code_widths().iter().sum::<u32>(), 24);
        assert_eq!(Variant::AptxHd.to_string(), "aptX-HD");
    }

    #[test]
    fn test_variant_from_str() {
        assert_eq!("aptX".parse::<Variant>(), Ok(Variant::Aptx));
        assert_eq!("APTX-HD".parse::<Variant>(), Ok(Variant::AptxHd));
        assert_eq!("aptxhd".parse::<Variant>(), Ok(Variant::AptxHd));
        assert!(matches!("sbc".parse::<Variant>(), Err(AptxError::InvalidConfig { .. })));
    }

    #[test]
    fn test_sync_mode_is_permissive() {
        let odd = SyncMode::from_raw(42);
        assert_eq!(odd.raw(), 42);
        assert!(!odd.is_known());
        assert!(!odd.folds_parity());
        assert!(SyncMode::DUAL_MONO.folds_parity());
        assert!(!SyncMode::NO_SYNC.folds_parity());
        assert_eq!(odd.to_string(), "unknown(42)");
        assert_eq!(SyncMode::default(), SyncMode::STEREO);
    }

    #[test]
    fn test_endianness_shift() {
        assert_eq!(Endianness::from_little_flag(true).swap_shift(), 0);
        assert_eq!(Endianness::from_little_flag(false).swap_shift(), 8);
    }

    #[test]
    fn test_subband_ordinals() {
        let ordinals: Vec<usize> = Subband::ALL.iter().map(|b| b.index()).collect();
        assert_eq!(ordinals, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_config_validation() {
        assert!(AptxConfig::aptx()
            .with_sync_mode(SyncMode::DUAL_MONO)
            .validate()
            .is_ok());
        assert!(AptxConfig::aptx_hd().validate().is_ok());
        let err = AptxConfig::aptx_hd()
            .with_sync_mode(SyncMode::NO_SYNC)
            .validate()
            .unwrap_err();
        assert!(matches!(err, AptxError::InvalidConfig { .. }));
    }
}
