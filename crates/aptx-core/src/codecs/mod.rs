//! Codec implementations and factory

use crate::error::{AptxError, Result};
use crate::types::{AptxConfig, AudioCodec, Variant};

pub mod aptx;

/// Codec factory for creating codec instances
pub struct CodecFactory;

impl CodecFactory {
    /// Create a codec instance from configuration
    pub fn create(config: AptxConfig) -> Result<Box<dyn AudioCodec>> {
        if !Self::variant_enabled(config.variant) {
            return Err(AptxError::invalid_config(format!(
                "Codec {} not enabled in build features",
                config.variant
            )));
        }
        let codec = aptx::AptxCodec::new(config)?;
        Ok(Box::new(codec))
    }

    /// Create a codec by name, keeping the rest of `config`
    pub fn create_by_name(name: &str, config: AptxConfig) -> Result<Box<dyn AudioCodec>> {
        let variant: Variant = name.parse()?;
        Self::create(AptxConfig { variant, ..config })
    }

    /// Get all supported codec names
    pub fn supported_codecs() -> Vec<&'static str> {
        crate::SUPPORTED_CODECS.to_vec()
    }

    /// Check if a codec name is supported in this build
    pub fn is_supported(name: &str) -> bool {
        name.parse::<Variant>()
            .map(Self::variant_enabled)
            .unwrap_or(false)
    }

    fn variant_enabled(variant: Variant) -> bool {
        match variant {
            Variant::Aptx => cfg!(feature = "aptx"),
            Variant::AptxHd => cfg!(feature = "aptx-hd"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SyncMode;

    #[test]
    fn test_codec_factory_supported_codecs() {
        let supported = CodecFactory::supported_codecs();
        assert!(!supported.is_empty());

        #[cfg(feature = "aptx")]
        assert!(supported.contains(&"aptX"));
        #[cfg(feature = "aptx-hd")]
        assert!(supported.contains(&"aptX-HD"));
    }

    #[test]
    fn test_codec_factory_is_supported() {
        #[cfg(feature = "aptx")]
        {
            assert!(CodecFactory::is_supported("aptx"));
            assert!(CodecFactory::is_supported("aptX"));
        }
        #[cfg(feature = "aptx-hd")]
        assert!(CodecFactory::is_supported("aptx-hd"));

        assert!(!CodecFactory::is_supported("UNSUPPORTED"));
    }

    #[test]
    #[cfg(feature = "aptx-hd")]
    fn test_codec_creation_by_name() {
        let codec = CodecFactory::create_by_name("aptx-hd", AptxConfig::aptx()).unwrap();
        let info = codec.info();
        assert_eq!(info.name, "aptX-HD");
        assert_eq!(info.codeword_bits, 24);

        assert!(CodecFactory::create_by_name("sbc", AptxConfig::aptx()).is_err());
    }

    #[test]
    #[cfg(feature = "aptx")]
    fn test_codec_creation() {
        let config = AptxConfig::aptx().with_sync_mode(SyncMode::NO_SYNC);
        let mut codec = CodecFactory::create(config).unwrap();
        assert_eq!(codec.frame_size(), 4);
        assert_eq!(codec.encode(&[0; 16]).unwrap().len(), 8);
        assert!(codec.reset().is_ok());
    }

    #[test]
    #[cfg(feature = "aptx-hd")]
    fn test_invalid_hd_config_rejected() {
        let config = AptxConfig::aptx_hd().with_sync_mode(SyncMode::NO_SYNC);
        assert!(CodecFactory::create(config).is_err());
    }
}
