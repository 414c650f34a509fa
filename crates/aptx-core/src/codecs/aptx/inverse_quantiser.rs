//! Inverse quantiser and step-size adaptation
//!
//! Shared by the encoder's local decoder loop and by the decoder. The
//! adaptation law is a leaky integrator on `log_delta`; `delta` is its
//! log-to-linear image.

use super::fixed_point::{rshift32, rshift64, rshift64_clip24};
use super::tables::{BandTables, DELTA_MANTISSAS, LOG_DELTA_LEAK};

/// Right shift applied to `delta * level`
const RECONSTRUCTION_SHIFT: u32 = 23 - 4;

/// Map a signed code to its table index
///
/// Negative codes are complemented; the `+ 1` skips the phantom negative
/// entry at index 0.
#[inline]
pub fn code_to_index(code: i32) -> usize {
    ((code ^ -((code < 0) as i32)) + 1) as usize
}

/// Log-to-linear step size
#[inline]
pub fn delta_from_log(log_delta: i32, max_log_delta: i32) -> i32 {
    let mantissa = DELTA_MANTISSAS[((log_delta & 0xFF) >> 3) as usize];
    (mantissa << 11) >> ((max_log_delta - log_delta) >> 8)
}

/// Adaptive step-size state for one band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InverseQuantiser {
    delta: i32,
    log_delta: i32,
    reconstructed_difference: i32,
}

impl InverseQuantiser {
    /// Create an inverse quantiser at the zero step size
    pub const fn new() -> Self {
        Self {
            delta: 0,
            log_delta: 0,
            reconstructed_difference: 0,
        }
    }

    /// Current step size
    pub fn delta(&self) -> i32 {
        self.delta
    }

    /// Current log step size, always in `0..=max_log_delta`
    pub fn log_delta(&self) -> i32 {
        self.log_delta
    }

    /// Reconstructed difference from the last call
    pub fn reconstructed_difference(&self) -> i32 {
        self.reconstructed_difference
    }

    /// Reconstruct the difference signal for `code` and adapt the step size
    ///
    /// The reconstruction uses the step size in force before this call.
    pub fn invert_quantisation(&mut self, code: i32, dither: i32, tables: &BandTables) -> i32 {
        let idx = code_to_index(code);

        let mut level = tables.thresholds[idx] / 2;
        if code < 0 {
            level = -level;
        }
        let dithered = (i64::from(level) << 32) + i64::from(dither) * i64::from(tables.inverse_dither[idx]);
        let level = if tables.saturate_dequantised {
            rshift64_clip24(dithered, 32)
        } else {
            rshift64(dithered, 32) as i32
        };
        self.reconstructed_difference = ((i64::from(self.delta) * i64::from(level)) >> RECONSTRUCTION_SHIFT) as i32;

        let leaked = LOG_DELTA_LEAK * self.log_delta + tables.log_delta_increments[idx] * (1 << 15);
        self.log_delta = rshift32(leaked, 15).clamp(0, tables.max_log_delta);
        self.delta = delta_from_log(self.log_delta, tables.max_log_delta);

        self.reconstructed_difference
    }
}
