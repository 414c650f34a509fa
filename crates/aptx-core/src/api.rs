//! Encoder contract facade
//!
//! A thin, function-style surface over the block encoders for callers that
//! manage encoder state themselves: query the state size, initialise a
//! state, choose a sync mode, then encode one block at a time.
//!
//! ```
//! use aptx_core::api;
//! use aptx_core::codecs::aptx::AptxEncoder;
//!
//! let mut state = AptxEncoder::default();
//! api::init(Some(&mut state), true)?;
//! api::set_sync_mode(&mut state, 1);
//! let words = api::encode_stereo(&mut state, &[0; 4], &[0; 4]);
//! assert_eq!(words.len(), 2);
//! # Ok::<(), aptx_core::AptxError>(())
//! ```

use crate::codecs::aptx::{AptxEncoder, BlockEncoder};
use crate::error::{AptxError, Result};
use crate::types::{Endianness, SyncMode, Variant};

/// Size in bytes of the reference encoder state block for `variant`
///
/// Callers that allocate opaque state storage size it with this value; the
/// Rust encoders themselves are ordinary values.
pub fn state_size(variant: Variant) -> usize {
    variant.reference_state_size()
}

/// Library version string
pub fn version() -> &'static str {
    crate::VERSION
}

/// Reset `state` to the freshly initialised encoder state
///
/// `endian_little` selects little-endian codewords; false byte-swaps aptX
/// output. Sync mode returns to stereo.
///
/// # Errors
///
/// Returns [`AptxError::NullState`] when no state is supplied.
pub fn init<E: BlockEncoder>(state: Option<&mut E>, endian_little: bool) -> Result<()> {
    let state = state.ok_or(AptxError::NullState)?;
    let endianness = Endianness::from_little_flag(endian_little);
    state.init(endianness);
    tracing::debug!(variant = %E::VARIANT, ?endianness, "encoder state initialised");
    Ok(())
}

/// Store the raw sync mode on an aptX encoder
///
/// Values other than 0, 1 and 2 are stored as given.
pub fn set_sync_mode(state: &mut AptxEncoder, sync_mode: i32) {
    state.set_sync_mode(SyncMode::from_raw(sync_mode));
}

/// Encode one block of four Q23 samples per channel
pub fn encode_stereo<E: BlockEncoder>(state: &mut E, left: &[i32; 4], right: &[i32; 4]) -> [E::Codeword; 2] {
    state.encode_stereo(left, right)
}
