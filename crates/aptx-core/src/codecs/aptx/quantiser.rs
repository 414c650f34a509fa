//! Forward quantiser
//!
//! One generic routine serves every band of both variants. The band only
//! changes the tables, and through their length the depth of the binary
//! search.

use super::fixed_point::{rshift32_clip24, rshift64, rshift64_clip24, ssat24, SAMPLE_MAX};
use super::tables::BandTables;

/// Difference signals are compared against `delta * threshold` at this
/// extra scale
pub const DELTA_SCALE: u32 = 4;

/// Largest index `i` with `delta * thresholds[i] <= value << 24`
///
/// The thresholds have an odd length `2^n + 1`; the search makes `n`
/// comparisons and never returns the last index.
///
/// `value << 24` stays below 2^55 and `delta * threshold` below 2^47, so a
/// plain `i64` comparison gives the same result as a sign test on the
/// 64-bit difference.
pub fn bin_search(value: i32, delta: i32, thresholds: &[i32]) -> usize {
    let target = i64::from(value) << 24;
    let mut idx = 0;
    let mut step = thresholds.len() >> 1;
    while step > 0 {
        if i64::from(delta) * i64::from(thresholds[idx + step]) <= target {
            idx += step;
        }
        step >>= 1;
    }
    idx
}

/// Quantiser output for one band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Quantiser {
    /// Code to transmit
    pub code: i32,
    /// Neighbouring code with the opposite LSB
    pub parity_change_code: i32,
    /// Cost of transmitting `parity_change_code` instead
    pub distance_penalty: i32,
}

impl Quantiser {
    /// Create a quantiser with zeroed outputs
    pub const fn new() -> Self {
        Self {
            code: 0,
            parity_change_code: 0,
            distance_penalty: 0,
        }
    }

    /// Quantise a saturated Q23 difference signal
    ///
    /// Negative inputs produce the bitwise complement of the magnitude code,
    /// so the tables only ever cover non-negative magnitudes.
    pub fn quantise_difference(&mut self, diff: i32, dither: i32, delta: i32, tables: &BandTables) {
        let thresholds = tables.thresholds;
        let abs_diff = diff.unsigned_abs().min(SAMPLE_MAX as u32) as i32;

        let idx = bin_search(abs_diff >> DELTA_SCALE, delta, thresholds);

        let dither_sq = ((i64::from(dither) * i64::from(dither)) >> 32) as i32;
        let offset = rshift32_clip24(dither_sq, 7) - (1 << 23);
        let offset = rshift64(i64::from(offset) * i64::from(tables.dither[idx]), 23) as i32;

        let lower = thresholds[idx];
        let upper = thresholds[idx + 1];
        let mean = (upper + lower) / 2;
        let interval = if diff < 0 { lower - upper } else { upper - lower };

        let dithered = rshift64_clip24(
            i64::from(dither) * i64::from(interval) + (i64::from(ssat24(mean + offset)) << 32),
            32,
        );
        let error = (i64::from(abs_diff) << 20) - i64::from(dithered) * i64::from(delta);
        self.distance_penalty = (rshift64(error, 23) as i32).wrapping_abs();

        let mut code = idx as i32;
        let mut parity_change = code;
        if error < 0 {
            code -= 1;
        } else {
            parity_change -= 1;
        }

        let sign = -((diff < 0) as i32);
        self.code = code ^ sign;
        self.parity_change_code = parity_change ^ sign;
    }

    /// Transmit the alternate code
    pub fn flip_parity(&mut self) {
        self.code = self.parity_change_code;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codecs::aptx::tables::{APTX_BANDS, APTX_HD_BANDS, THRESHOLDS_LL};

    fn quantise(diff: i32, dither: i32, delta: i32, tables: &BandTables) -> Quantiser {
        let mut q = Quantiser::new();
        q.quantise_difference(diff, dither, delta, tables);
        q
    }

    #[test]
    fn test_bin_search() {
        assert_eq!(bin_search(1000, 4096 * 8, &THRESHOLDS_LL), 23);
        // A zero delta puts every threshold below the target
        assert_eq!(bin_search(0, 0, &THRESHOLDS_LL), 63);
        assert_eq!(bin_search(500000 >> 4, 2048 << 11, &THRESHOLDS_LL), 6);
    }

    #[test]
    fn test_reference_outputs() {
        let q = quantise(1000, 0, 4096, &APTX_BANDS[0]);
        assert_eq!((q.code, q.parity_change_code, q.distance_penalty), (12, 11, 5));

        let q = quantise(-250000, -427819008, 524288, &APTX_BANDS[0]);
        assert_eq!((q.code, q.parity_change_code, q.distance_penalty), (-23, -24, 736));

        let q = quantise(300000, 925368320, 285824, &APTX_BANDS[1]);
        assert_eq!((q.code, q.parity_change_code, q.distance_penalty), (4, 3, 3380));

        let q = quantise(70000, -1044824064, 66976, &APTX_BANDS[2]);
        assert_eq!((q.code, q.parity_change_code, q.distance_penalty), (1, 0, 6243));

        let q = quantise(-8388608, 352308480, 8208384, &APTX_BANDS[3]);
        assert_eq!((q.code, q.parity_change_code, q.distance_penalty), (-3, -2, 315580));

        let q = quantise(123456, -13369344, 185344, &APTX_HD_BANDS[0]);
        assert_eq!((q.code, q.parity_change_code, q.distance_penalty), (120, 121, 82));
    }

    #[test]
    fn test_alternate_differs_by_one() {
        for diff in [-8388608, -70000, -1, 0, 1, 4242, 8388607] {
            for (band, tables) in APTX_BANDS.iter().enumerate() {
                let q = quantise(diff, 0x1234_5678, 1 << (12 + band), tables);
                assert_eq!((q.code - q.parity_change_code).abs(), 1);
                assert_ne!(q.code & 1, q.parity_change_code & 1);
                assert!(q.distance_penalty >= 0);
            }
        }
    }

    #[test]
    fn test_negative_uses_complement() {
        let pos = quantise(54321, 0, 1 << 13, &APTX_BANDS[0]);
        let neg = quantise(-54321, 0, 1 << 13, &APTX_BANDS[0]);
        assert_eq!(neg.code, !pos.code);
        assert_eq!(neg.parity_change_code, !pos.parity_change_code);
    }

    #[test]
    fn test_flip_parity() {
        let mut q = quantise(300000, 925368320, 285824, &APTX_BANDS[1]);
        q.flip_parity();
        assert_eq!(q.code, 3);
    }
}
