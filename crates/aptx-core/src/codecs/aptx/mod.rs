//! aptX and aptX-HD Sub-band Codec Implementation
//!
//! Bit-exact fixed-point implementation of the aptX family. Four PCM samples
//! per channel are split into four sub-bands by a two-stage QMF tree; each
//! band is coded ADPCM-style against an adaptive pole/zero prediction with
//! a dithered, adaptively scaled quantiser. One packed codeword per channel
//! comes out of every block: 16 bits for aptX, 24 bits for aptX-HD.
//!
//! # Architecture
//!
//! - `tables`: quantisation, dither and step-size tables per variant and band
//! - `fixed_point`: rounding shifts and saturation helpers
//! - `qmf`: QMF analysis and synthesis trees
//! - `dither`: codeword-history dither generator
//! - `quantiser` / `inverse_quantiser`: forward coding and step adaptation
//! - `predictor`: 2-pole, N-zero adaptive predictor
//! - `state`: per-band and per-channel state bundles
//! - `sync`: parity-based sync insertion
//! - `packer`: codeword packing and unpacking
//! - `encoder` / `decoder`: block pipelines
//! - `codec`: byte-stream codec implementing [`AudioCodec`](crate::types::AudioCodec)
//!
//! All arithmetic is integer. Saturation, rounding and wrap-around behaviour
//! are part of the bitstream, so none of it may be "fixed".

pub mod codec;
pub mod decoder;
pub mod dither;
pub mod encoder;
pub mod fixed_point;
pub mod inverse_quantiser;
pub mod packer;
pub mod predictor;
pub mod qmf;
pub mod quantiser;
pub mod state;
pub mod sync;
pub mod tables;

#[cfg(test)]
mod tests;

/// PCM samples per channel in one block
pub const SAMPLES_PER_BLOCK: usize = 4;

/// Channels per block
pub const CHANNELS: usize = 2;

/// Delay in samples from encoder input to decoder output
pub const LATENCY_SAMPLES: usize = 90;

pub use codec::AptxCodec;
pub use decoder::{AptxDecoder, AptxHdDecoder, DecodedBlock, StereoDecoder};
pub use encoder::{AptxEncoder, AptxHdEncoder, BlockEncoder, StereoEncoder};
pub use state::{ChannelState, SubbandState};
pub use sync::SyncPhase;
