//! aptX block encoder
//!
//! [`StereoEncoder`] runs one 4-sample block per channel through the full
//! pipeline:
//!
//! 1. QMF analysis minus the previous block's predictions
//! 2. dither generation from the previously transmitted codes
//! 3. per-band quantisation
//! 4. sync insertion, which may swap one code for its alternate
//! 5. inverse quantisation and predictor update on the codes actually sent
//! 6. codeword packing
//!
//! Step 5 must follow step 4 so the encoder's local decoder sees exactly
//! what the remote decoder will see.

use super::packer::pack_codeword;
use super::qmf::QmfAnalysis;
use super::state::ChannelState;
use super::sync::{insert_dual_mono_sync, insert_stereo_sync, SyncPhase};
use crate::types::{Endianness, SyncMode, Variant};

/// Common contract of the per-block encoders
pub trait BlockEncoder {
    /// Output type of one channel's codeword
    type Codeword: Copy;

    /// Codec variant produced
    const VARIANT: Variant;

    /// Reset all adaptive state, as a freshly constructed encoder
    fn init(&mut self, endianness: Endianness);

    /// Encode one block of four Q23 samples per channel
    fn encode_stereo(&mut self, left: &[i32; 4], right: &[i32; 4]) -> [Self::Codeword; 2];
}

/// Variant-generic two-channel encoder producing raw packed codewords
#[derive(Debug, Clone)]
pub struct StereoEncoder {
    variant: Variant,
    endianness: Endianness,
    sync_mode: SyncMode,
    phase: SyncPhase,
    qmf: [QmfAnalysis; 2],
    channels: [ChannelState; 2],
    blocks: u64,
}

impl StereoEncoder {
    /// Create an encoder in stereo sync mode
    pub fn new(variant: Variant, endianness: Endianness) -> Self {
        tracing::debug!(%variant, ?endianness, "creating aptX encoder");
        Self {
            variant,
            endianness,
            sync_mode: SyncMode::STEREO,
            phase: SyncPhase::new(),
            qmf: [QmfAnalysis::new(); 2],
            channels: [ChannelState::new(variant); 2],
            blocks: 0,
        }
    }

    /// Return to the freshly constructed state
    ///
    /// Sync mode goes back to stereo.
    pub fn init(&mut self, endianness: Endianness) {
        *self = Self::new(self.variant, endianness);
    }

    /// Codec variant
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Codeword byte order requested at init
    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Stored sync mode
    pub fn sync_mode(&self) -> SyncMode {
        self.sync_mode
    }

    /// Store a sync mode verbatim
    ///
    /// aptX-HD always runs stereo sync, so the call is ignored there.
    pub fn set_sync_mode(&mut self, mode: SyncMode) {
        if self.variant == Variant::AptxHd {
            tracing::warn!(%mode, "aptX-HD ignores sync mode changes");
            return;
        }
        if !mode.is_known() {
            tracing::warn!(raw = mode.raw(), "storing undefined sync mode");
        }
        tracing::debug!(%mode, "sync mode set");
        self.sync_mode = mode;
    }

    /// Current sync phase
    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// Channel state, 0 = left, 1 = right
    pub fn channel(&self, index: usize) -> &ChannelState {
        &self.channels[index]
    }

    /// Blocks encoded since init
    pub fn blocks_encoded(&self) -> u64 {
        self.blocks
    }

    /// Encode one block and return the packed codewords, unswapped
    ///
    /// aptX words occupy the low 16 bits, aptX-HD words the low 24.
    pub fn encode_block(&mut self, left: &[i32; 4], right: &[i32; 4]) -> [u32; 2] {
        for ((qmf, channel), samples) in self.qmf.iter_mut().zip(self.channels.iter_mut()).zip([left, right]) {
            let diffs = qmf.residuals(samples, &channel.predictions());
            channel.next_dither();
            channel.quantise(&diffs);
        }

        match self.sync_mode {
            SyncMode::NO_SYNC => {}
            SyncMode::DUAL_MONO => {
                insert_dual_mono_sync(&mut self.channels, &mut self.phase);
            }
            _ => {
                insert_stereo_sync(&mut self.channels, &mut self.phase);
            }
        }

        for channel in &mut self.channels {
            channel.reconstruct();
        }

        self.blocks += 1;
        [
            pack_codeword(&self.channels[0], self.sync_mode),
            pack_codeword(&self.channels[1], self.sync_mode),
        ]
    }
}

/// aptX "classic" encoder: two 16-bit codewords per block
#[derive(Debug, Clone)]
pub struct AptxEncoder {
    inner: StereoEncoder,
}

impl AptxEncoder {
    /// Create an encoder; `endianness` selects the codeword byte order
    pub fn new(endianness: Endianness) -> Self {
        Self {
            inner: StereoEncoder::new(Variant::Aptx, endianness),
        }
    }

    /// Store a sync mode verbatim
    pub fn set_sync_mode(&mut self, mode: SyncMode) {
        self.inner.set_sync_mode(mode);
    }

    /// Stored sync mode
    pub fn sync_mode(&self) -> SyncMode {
        self.inner.sync_mode()
    }

    /// Underlying variant-generic encoder
    pub fn inner(&self) -> &StereoEncoder {
        &self.inner
    }
}

impl BlockEncoder for AptxEncoder {
    type Codeword = u16;
    const VARIANT: Variant = Variant::Aptx;

    fn init(&mut self, endianness: Endianness) {
        self.inner.init(endianness);
    }

    fn encode_stereo(&mut self, left: &[i32; 4], right: &[i32; 4]) -> [u16; 2] {
        let shift = self.inner.endianness().swap_shift();
        self.inner
            .encode_block(left, right)
            .map(|word| (((word >> shift) | (word << shift)) & 0xFFFF) as u16)
    }
}

impl Default for AptxEncoder {
    fn default() -> Self {
        Self::new(Endianness::Little)
    }
}

/// aptX-HD encoder: two 24-bit codewords per block, always stereo sync
#[derive(Debug, Clone)]
pub struct AptxHdEncoder {
    inner: StereoEncoder,
}

impl AptxHdEncoder {
    /// Create an encoder
    pub fn new(endianness: Endianness) -> Self {
        Self {
            inner: StereoEncoder::new(Variant::AptxHd, endianness),
        }
    }

    /// Underlying variant-generic encoder
    pub fn inner(&self) -> &StereoEncoder {
        &self.inner
    }
}

impl BlockEncoder for AptxHdEncoder {
    type Codeword = u32;
    const VARIANT: Variant = Variant::AptxHd;

    fn init(&mut self, endianness: Endianness) {
        self.inner.init(endianness);
    }

    fn encode_stereo(&mut self, left: &[i32; 4], right: &[i32; 4]) -> [u32; 2] {
        self.inner.encode_block(left, right)
    }
}

impl Default for AptxHdEncoder {
    fn default() -> Self {
        Self::new(Endianness::Little)
    }
}
