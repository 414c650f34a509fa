//! aptX block decoder
//!
//! Mirrors the encoder's local decoder: the adaptive state is driven only by
//! received codes, then the QMF tree is run in reverse. The HH low bit
//! carried on the wire is the sync parity, so the original bit is recovered
//! from the other fields before inverse quantisation.

use super::packer::unpack_codeword;
use super::qmf::QmfSynthesis;
use super::state::ChannelState;
use super::sync::SyncPhase;
use crate::types::{SyncMode, Subband, Variant};

/// Output of one decoded block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedBlock {
    /// Four Q23 samples per channel, left then right
    pub samples: [[i32; 4]; 2],
    /// Whether the block carried the expected sync parity
    pub in_sync: bool,
}

/// Variant-generic two-channel decoder consuming raw packed codewords
#[derive(Debug, Clone)]
pub struct StereoDecoder {
    variant: Variant,
    sync_mode: SyncMode,
    phase: SyncPhase,
    qmf: [QmfSynthesis; 2],
    channels: [ChannelState; 2],
    blocks: u64,
    sync_errors: u64,
}

impl StereoDecoder {
    /// Create a decoder expecting stereo sync
    pub fn new(variant: Variant) -> Self {
        tracing::debug!(%variant, "creating aptX decoder");
        Self {
            variant,
            sync_mode: SyncMode::STEREO,
            phase: SyncPhase::new(),
            qmf: [QmfSynthesis::new(); 2],
            channels: [ChannelState::new(variant); 2],
            blocks: 0,
            sync_errors: 0,
        }
    }

    /// Return to the freshly constructed state
    pub fn reset(&mut self) {
        *self = Self::new(self.variant);
    }

    /// Codec variant
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Sync mode the stream is expected to carry
    pub fn sync_mode(&self) -> SyncMode {
        self.sync_mode
    }

    /// Set the expected sync mode; aptX-HD stays stereo
    pub fn set_sync_mode(&mut self, mode: SyncMode) {
        if self.variant == Variant::AptxHd {
            tracing::warn!(%mode, "aptX-HD ignores sync mode changes");
            return;
        }
        tracing::debug!(%mode, "decoder sync mode set");
        self.sync_mode = mode;
    }

    /// Channel state, 0 = left, 1 = right
    pub fn channel(&self, index: usize) -> &ChannelState {
        &self.channels[index]
    }

    /// Blocks decoded since reset
    pub fn blocks_decoded(&self) -> u64 {
        self.blocks
    }

    /// Blocks whose parity check failed since reset
    pub fn sync_errors(&self) -> u64 {
        self.sync_errors
    }

    fn receive(&mut self, words: [u32; 2]) {
        let folds_parity = self.sync_mode.folds_parity();
        for (channel, word) in self.channels.iter_mut().zip(words) {
            channel.next_dither();
            let codes = unpack_codeword(self.variant, word);
            for (band, code) in channel.subbands.iter_mut().zip(codes) {
                band.quantiser.code = code;
            }
            if folds_parity {
                let hh = channel.band(Subband::HH).code();
                let restored = (hh & !1) | channel.parity();
                channel.band_mut(Subband::HH).quantiser.code = restored;
            }
            channel.reconstruct();
        }
    }

    fn check_sync(&mut self) -> bool {
        match self.sync_mode {
            SyncMode::NO_SYNC => true,
            SyncMode::DUAL_MONO => {
                let target = self.phase.advance();
                self.channels.iter().all(|channel| channel.parity() == target)
            }
            _ => {
                let target = self.phase.advance();
                self.channels[0].parity() ^ self.channels[1].parity() == target
            }
        }
    }

    /// Decode one block of packed codewords
    pub fn decode_block(&mut self, words: [u32; 2]) -> DecodedBlock {
        self.receive(words);
        let in_sync = self.check_sync();
        if !in_sync {
            self.sync_errors += 1;
            tracing::trace!(block = self.blocks, "sync parity mismatch");
        }
        self.blocks += 1;

        let samples = [
            self.qmf[0].synthesise(&self.channels[0].reconstructed()),
            self.qmf[1].synthesise(&self.channels[1].reconstructed()),
        ];
        DecodedBlock { samples, in_sync }
    }
}

/// aptX "classic" decoder taking 16-bit codewords
#[derive(Debug, Clone)]
pub struct AptxDecoder {
    inner: StereoDecoder,
    swap_shift: u32,
}

impl AptxDecoder {
    /// Create a decoder for codewords in the given byte order
    pub fn new(endianness: crate::types::Endianness) -> Self {
        Self {
            inner: StereoDecoder::new(Variant::Aptx),
            swap_shift: endianness.swap_shift(),
        }
    }

    /// Set the expected sync mode
    pub fn set_sync_mode(&mut self, mode: SyncMode) {
        self.inner.set_sync_mode(mode);
    }

    /// Underlying variant-generic decoder
    pub fn inner(&self) -> &StereoDecoder {
        &self.inner
    }

    /// Decode one block
    pub fn decode_stereo(&mut self, words: [u16; 2]) -> DecodedBlock {
        let shift = self.swap_shift;
        let words = words.map(|w| {
            let w = u32::from(w);
            ((w >> shift) | (w << shift)) & 0xFFFF
        });
        self.inner.decode_block(words)
    }
}

/// aptX-HD decoder taking 24-bit codewords
#[derive(Debug, Clone)]
pub struct AptxHdDecoder {
    inner: StereoDecoder,
}

impl AptxHdDecoder {
    /// Create a decoder
    pub fn new() -> Self {
        Self {
            inner: StereoDecoder::new(Variant::AptxHd),
        }
    }

    /// Underlying variant-generic decoder
    pub fn inner(&self) -> &StereoDecoder {
        &self.inner
    }

    /// Decode one block
    pub fn decode_stereo(&mut self, words: [u32; 2]) -> DecodedBlock {
        self.inner.decode_block(words.map(|w| w & 0xFF_FFFF))
    }
}

impl Default for AptxHdDecoder {
    fn default() -> Self {
        Self::new()
    }
}
