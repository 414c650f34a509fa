//! aptX stream codec
//!
//! Wraps the block encoder and decoder behind [`AudioCodec`]: interleaved
//! stereo PCM in, a flat codeword byte stream out, and back.
//!
//! Each block produces one codeword per channel, left first, written most
//! significant byte first. aptX codewords take 2 bytes; with
//! [`Endianness::Big`] the two bytes are swapped. aptX-HD codewords take 3.

use super::decoder::StereoDecoder;
use super::encoder::StereoEncoder;
use super::{CHANNELS, LATENCY_SAMPLES, SAMPLES_PER_BLOCK};
use crate::error::{AptxError, Result};
use crate::types::{AptxConfig, AudioCodec, CodecInfo, Variant};
use crate::utils::validation::{validate_buffer_size, validate_frame_length};
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Interleaved PCM samples in one block
pub const PCM_BLOCK_SAMPLES: usize = SAMPLES_PER_BLOCK * CHANNELS;

/// Silent blocks needed to push the codec latency through
pub const FLUSH_BLOCKS: usize = (LATENCY_SAMPLES + SAMPLES_PER_BLOCK - 1) / SAMPLES_PER_BLOCK;

/// aptX / aptX-HD codec over byte streams
///
/// # Example
/// ```
/// use aptx_core::codecs::aptx::AptxCodec;
/// use aptx_core::types::{AptxConfig, AudioCodec};
///
/// let mut codec = AptxCodec::new(AptxConfig::aptx())?;
///
/// // 8 blocks of interleaved stereo silence
/// let pcm = vec![0i32; 64];
/// let encoded = codec.encode(&pcm)?;
/// assert_eq!(encoded.len(), 32);
///
/// let decoded = codec.decode(&encoded)?;
/// assert_eq!(decoded.len(), 64);
/// # Ok::<(), aptx_core::AptxError>(())
/// ```
#[derive(Debug, Clone)]
pub struct AptxCodec {
    config: AptxConfig,
    encoder: StereoEncoder,
    decoder: StereoDecoder,
    skip_latency: bool,
    pending_skip: usize,
    strict_sync: bool,
    in_sync: bool,
    carry: Vec<i32>,
}

impl AptxCodec {
    /// Create a codec from a validated configuration
    pub fn new(config: AptxConfig) -> Result<Self> {
        config.validate()?;

        let mut encoder = StereoEncoder::new(config.variant, config.endianness);
        let mut decoder = StereoDecoder::new(config.variant);
        if config.variant == Variant::Aptx {
            encoder.set_sync_mode(config.sync_mode);
            decoder.set_sync_mode(config.sync_mode);
        }

        tracing::debug!(
            variant = %config.variant,
            sync_mode = %config.sync_mode,
            "created aptX stream codec"
        );

        Ok(Self {
            config,
            encoder,
            decoder,
            skip_latency: false,
            pending_skip: 0,
            strict_sync: false,
            in_sync: true,
            carry: Vec::new(),
        })
    }

    /// Drop the first [`LATENCY_SAMPLES`] decoded samples of each channel
    ///
    /// With this set, decoded sample `n` lines up with encoded sample `n`.
    pub fn with_latency_compensation(mut self, enabled: bool) -> Self {
        self.skip_latency = enabled;
        self.pending_skip = if enabled { LATENCY_SAMPLES } else { 0 };
        self
    }

    /// Fail decoding with [`AptxError::SyncLost`] on a parity mismatch
    ///
    /// Samples decoded up to and including the failing block are kept:
    /// [`AudioCodec::decode`] returns them ahead of the next call's output,
    /// and [`AptxCodec::decode_into`] leaves them in the caller's buffer.
    pub fn with_strict_sync(mut self, enabled: bool) -> Self {
        self.strict_sync = enabled;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &AptxConfig {
        &self.config
    }

    /// Encoded bytes per block, both channels
    pub fn block_bytes(&self) -> usize {
        CHANNELS * self.config.variant.codeword_bytes()
    }

    /// Bytes produced for `samples` interleaved PCM samples
    pub fn encoded_len(&self, samples: usize) -> usize {
        samples / PCM_BLOCK_SAMPLES * self.block_bytes()
    }

    /// Blocks whose parity check failed since the last reset
    pub fn sync_errors(&self) -> u64 {
        self.decoder.sync_errors()
    }

    fn put_codeword<B: BufMut>(&self, buf: &mut B, word: u32) {
        match self.config.variant {
            Variant::Aptx => {
                let shift = self.config.endianness.swap_shift();
                buf.put_u16((((word >> shift) | (word << shift)) & 0xFFFF) as u16);
            }
            Variant::AptxHd => buf.put_uint(u64::from(word), 3),
        }
    }

    fn get_codeword<B: Buf>(&self, buf: &mut B) -> u32 {
        match self.config.variant {
            Variant::Aptx => {
                let shift = self.config.endianness.swap_shift();
                let word = u32::from(buf.get_u16());
                ((word >> shift) | (word << shift)) & 0xFFFF
            }
            Variant::AptxHd => buf.get_uint(3) as u32,
        }
    }

    fn encode_blocks<B: BufMut>(&mut self, pcm: &[i32], buf: &mut B) {
        for chunk in pcm.chunks_exact(PCM_BLOCK_SAMPLES) {
            let left = std::array::from_fn(|i| chunk[2 * i]);
            let right = std::array::from_fn(|i| chunk[2 * i + 1]);
            let words = self.encoder.encode_block(&left, &right);
            for word in words {
                self.put_codeword(buf, word);
            }
        }
    }

    /// Encode into a caller-provided buffer, returning the bytes written
    pub fn encode_into(&mut self, pcm: &[i32], output: &mut [u8]) -> Result<usize> {
        validate_frame_length(pcm.len(), PCM_BLOCK_SAMPLES)?;
        let needed = self.encoded_len(pcm.len());
        validate_buffer_size(needed, output.len())?;

        let mut cursor = &mut output[..needed];
        self.encode_blocks(pcm, &mut cursor);
        Ok(needed)
    }

    /// Encode enough silence to push every buffered sample out
    pub fn flush(&mut self) -> Bytes {
        let silence = [0i32; PCM_BLOCK_SAMPLES * FLUSH_BLOCKS];
        let mut buf = BytesMut::with_capacity(FLUSH_BLOCKS * self.block_bytes());
        self.encode_blocks(&silence, &mut buf);
        buf.freeze()
    }

    /// Decode `data`, appending interleaved PCM to `output`
    ///
    /// Returns the number of samples appended. On [`AptxError::SyncLost`]
    /// `output` already holds every sample up to and including the failing
    /// block, and the rest of `data` is left undecoded.
    pub fn decode_into(&mut self, data: &[u8], output: &mut Vec<i32>) -> Result<usize> {
        let block_bytes = self.block_bytes();
        validate_frame_length(data.len(), block_bytes)?;

        let start = output.len();
        output.reserve(data.len() / block_bytes * PCM_BLOCK_SAMPLES);
        let mut buf = data;
        while buf.has_remaining() {
            let words = [self.get_codeword(&mut buf), self.get_codeword(&mut buf)];
            let block = self.decoder.decode_block(words);

            let [left, right] = block.samples;
            for (l, r) in left.into_iter().zip(right) {
                if self.pending_skip > 0 {
                    self.pending_skip -= 1;
                    continue;
                }
                output.push(l);
                output.push(r);
            }
            self.note_sync(block.in_sync)?;
        }
        Ok(output.len() - start)
    }

    fn note_sync(&mut self, in_sync: bool) -> Result<()> {
        let block = self.decoder.blocks_decoded().saturating_sub(1);
        if !in_sync && self.strict_sync {
            return Err(AptxError::SyncLost { block });
        }
        if in_sync != self.in_sync {
            if in_sync {
                tracing::debug!(block, "sync regained");
            } else {
                tracing::warn!(block, "sync lost");
            }
            self.in_sync = in_sync;
        }
        Ok(())
    }
}

impl AudioCodec for AptxCodec {
    fn encode(&mut self, pcm: &[i32]) -> Result<Bytes> {
        validate_frame_length(pcm.len(), PCM_BLOCK_SAMPLES)?;
        let mut buf = BytesMut::with_capacity(self.encoded_len(pcm.len()));
        self.encode_blocks(pcm, &mut buf);
        Ok(buf.freeze())
    }

    fn decode(&mut self, data: &[u8]) -> Result<Vec<i32>> {
        let mut pcm = std::mem::take(&mut self.carry);
        match self.decode_into(data, &mut pcm) {
            Ok(_) => Ok(pcm),
            Err(e) => {
                // Hand these back on the next call
                self.carry = pcm;
                Err(e)
            }
        }
    }

    fn info(&self) -> CodecInfo {
        let variant = self.config.variant;
        CodecInfo {
            name: variant.name(),
            channels: CHANNELS as u8,
            codeword_bits: variant.codeword_bits(),
            frame_size: SAMPLES_PER_BLOCK,
            compression_ratio: variant.pcm_bits() * SAMPLES_PER_BLOCK as u32 / variant.codeword_bits(),
            latency_samples: LATENCY_SAMPLES,
        }
    }

    fn reset(&mut self) -> Result<()> {
        self.encoder.init(self.config.endianness);
        self.decoder.reset();
        if self.config.variant == Variant::Aptx {
            self.encoder.set_sync_mode(self.config.sync_mode);
            self.decoder.set_sync_mode(self.config.sync_mode);
        }
        self.pending_skip = if self.skip_latency { LATENCY_SAMPLES } else { 0 };
        self.in_sync = true;
        self.carry.clear();
        tracing::debug!(variant = %self.config.variant, "codec reset");
        Ok(())
    }

    fn frame_size(&self) -> usize {
        SAMPLES_PER_BLOCK
    }
}
