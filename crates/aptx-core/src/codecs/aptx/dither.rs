//! Codeword-history dither generator
//!
//! The decoder regenerates the same sequence from the codes it receives, so
//! every step here is part of the bitstream contract.

use super::tables::DITHER_MULTIPLIER;

/// Fold the low bits of a block's codes into the history
///
/// LL contributes bits 0-1, LH bit 1 and HL bit 0. The history keeps the
/// last 24 code bits left-justified above an 8-bit gap.
#[inline]
pub fn update_codeword_history(codes: &[i32; 4], history: i32) -> i32 {
    let cw = (codes[0] & 3) + ((codes[1] & 2) << 1) + ((codes[2] & 1) << 3);
    (cw << 8).wrapping_add(history << 4)
}

/// Derive the sync random bit and the four band dither samples
#[inline]
pub fn generate_dither(history: i32) -> (i32, [i32; 4]) {
    let m = DITHER_MULTIPLIER * i64::from(history >> 7);
    let d = (m * 4 + (m >> 22)) as i32;
    let outputs = std::array::from_fn(|band| d << (23 - 5 * band as u32));
    ((d >> 25) & 1, outputs)
}

/// Per-channel dither state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DitherGenerator {
    codeword_history: i32,
    sync_rand_bit: i32,
    outputs: [i32; 4],
}

impl DitherGenerator {
    /// Create a generator with empty history
    pub const fn new() -> Self {
        Self {
            codeword_history: 0,
            sync_rand_bit: 0,
            outputs: [0; 4],
        }
    }

    /// Consume the previous block's transmitted codes and produce this
    /// block's dither
    pub fn advance(&mut self, previous_codes: &[i32; 4]) -> [i32; 4] {
        self.codeword_history = update_codeword_history(previous_codes, self.codeword_history);
        let (bit, outputs) = generate_dither(self.codeword_history);
        self.sync_rand_bit = bit;
        self.outputs = outputs;
        outputs
    }

    /// Current codeword history
    pub fn history(&self) -> i32 {
        self.codeword_history
    }

    /// Sync random bit of the current block
    pub fn sync_rand_bit(&self) -> i32 {
        self.sync_rand_bit
    }

    /// Dither samples of the current block
    pub fn outputs(&self) -> &[i32; 4] {
        &self.outputs
    }
}
