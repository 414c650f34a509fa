//! # aptX-Core: Bit-exact aptX and aptX-HD Codec Library
//!
//! This library implements the aptX family of sub-band audio codecs used
//! over Bluetooth A2DP. The encoder is a deterministic fixed-point pipeline
//! whose output matches the reference bitstream bit for bit; a matching
//! decoder is included for verification and round trips.
//!
//! ## Features
//!
//! - **aptX**: 16-bit PCM in, one 16-bit codeword per channel per 4 samples
//! - **aptX-HD**: 24-bit PCM in, one 24-bit codeword per channel per 4 samples
//! - **Sync modes**: stereo, dual-mono and no-sync parity insertion
//! - **Stream codec**: byte-stream encode/decode with latency flushing
//!
//! ## Usage
//!
//! ```rust
//! use aptx_core::{AptxConfig, AudioCodec, CodecFactory};
//!
//! // Create an aptX codec
//! let mut codec = CodecFactory::create(AptxConfig::aptx())?;
//!
//! // Encode 10 blocks of interleaved stereo Q23 samples
//! let pcm = vec![0i32; 80];
//! let encoded = codec.encode(&pcm)?;
//! assert_eq!(encoded.len(), 40);
//!
//! // Decode back to samples
//! let decoded = codec.decode(&encoded)?;
//! assert_eq!(decoded.len(), 80);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! For block-at-a-time use see [`codecs::aptx::AptxEncoder`] and the
//! [`api`] module.
//!
//! ## Feature Flags
//!
//! - `aptx`: aptX through the factory (enabled by default)
//! - `aptx-hd`: aptX-HD through the factory (enabled by default)

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod codecs;
pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use codecs::CodecFactory;
pub use error::{AptxError, Result};
pub use types::{AptxConfig, AudioCodec, CodecInfo, Endianness, Subband, SyncMode, Variant};

/// Version information for the codec library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Supported codec names
pub const SUPPORTED_CODECS: &[&str] = &[
    #[cfg(feature = "aptx")]
    "aptX",
    #[cfg(feature = "aptx-hd")]
    "aptX-HD",
];

/// Initialize the codec library
///
/// Installs a default `tracing` subscriber unless one is already set. The
/// codec tables are compile-time constants, so nothing else needs setting
/// up. Safe to call multiple times.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps room for future setup steps.
pub fn init() -> Result<()> {
    let _ = tracing_subscriber::fmt::try_init();

    tracing::info!("aptX-Core v{} initialized", VERSION);
    tracing::info!("Supported codecs: {:?}", SUPPORTED_CODECS);

    Ok(())
}

/// Get library information
pub fn info() -> LibraryInfo {
    LibraryInfo {
        version: VERSION,
        supported_codecs: SUPPORTED_CODECS.to_vec(),
        latency_samples: codecs::aptx::LATENCY_SAMPLES,
    }
}

/// Library information structure
#[derive(Debug, Clone)]
pub struct LibraryInfo {
    /// Library version
    pub version: &'static str,
    /// List of supported codec names
    pub supported_codecs: Vec<&'static str>,
    /// Codec delay in samples per channel
    pub latency_samples: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init() {
        assert!(init().is_ok());
        // Second call finds the subscriber already installed
        assert!(init().is_ok());
    }

    #[test]
    fn test_info() {
        let info = info();
        assert_eq!(info.version, VERSION);
        assert_eq!(info.latency_samples, 90);
    }

    #[test]
    fn test_supported_codecs() {
        #[cfg(feature = "aptx")]
        assert!(SUPPORTED_CODECS.contains(&"aptX"));

        #[cfg(feature = "aptx-hd")]
        assert!(SUPPORTED_CODECS.contains(&"aptX-HD"));
    }
}
