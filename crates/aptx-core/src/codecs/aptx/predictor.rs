//! Adaptive pole/zero predictor
//!
//! Each band runs a 2-pole, N-zero ARMA predictor (N = 24, 12, 6, 12 for
//! LL, LH, HL, HH). Both filters adapt with sign-correlation rules, so the
//! decoder tracks the encoder exactly from the transmitted codes alone.

use super::fixed_point::{clamp_symmetric, diff_sign, rshift32, ssat24};

/// Largest zero-filter order of any band
pub const MAX_ZEROS: usize = 24;

/// Bound on the first pole coefficient
const POLE0_BOUND: i32 = 0x30_0000;
/// `|a1| + a0` may not exceed this
const POLE_SUM_BOUND: i32 = 0x3C_0000;
/// Bound on the cross term fed into the first pole update
const POLE_CROSS_BOUND: i32 = 0x10_0000;

/// Zero-filter delay line with double-mapped storage
///
/// For a filter of order `n`, the `n + 1` most recent reconstructed
/// differences are always readable as one contiguous window, so the
/// convolution never has to wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeroDelayLine {
    buffer: [i32; 2 * MAX_ZEROS],
    pos: usize,
    order: usize,
}

impl ZeroDelayLine {
    /// Create an empty delay line for a filter of `order` taps
    pub const fn new(order: usize) -> Self {
        Self {
            buffer: [0; 2 * MAX_ZEROS],
            pos: 0,
            order,
        }
    }

    /// Filter order
    pub fn order(&self) -> usize {
        self.order
    }

    /// Store a new value
    #[inline]
    pub fn push(&mut self, value: i32) {
        self.buffer[self.pos] = self.buffer[self.pos + self.order];
        self.pos = (self.pos + 1) % self.order;
        self.buffer[self.pos + self.order] = value;
    }

    /// The `order + 1` most recent values, oldest first
    #[inline]
    pub fn window(&self) -> &[i32] {
        &self.buffer[self.pos..=self.pos + self.order]
    }
}

/// Predictor state for one band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Predictor {
    zero_coeffs: [i32; MAX_ZEROS],
    delay_line: ZeroDelayLine,
    pole_coeffs: [i32; 2],
    sign_history: [i32; 2],
    previous_reconstructed: i32,
    zero_output: i32,
    predicted: i32,
}

impl Predictor {
    /// Create a predictor with `num_zeros` zero taps
    ///
    /// The pole sign history starts at `+1`.
    pub const fn new(num_zeros: usize) -> Self {
        Self {
            zero_coeffs: [0; MAX_ZEROS],
            delay_line: ZeroDelayLine::new(num_zeros),
            pole_coeffs: [0; 2],
            sign_history: [1, 1],
            previous_reconstructed: 0,
            zero_output: 0,
            predicted: 0,
        }
    }

    /// Zero-filter tap count
    pub fn num_zeros(&self) -> usize {
        self.delay_line.order()
    }

    /// Predicted band sample for the next block
    pub fn predicted(&self) -> i32 {
        self.predicted
    }

    /// Last reconstructed band sample
    pub fn previous_reconstructed(&self) -> i32 {
        self.previous_reconstructed
    }

    /// Last zero-filter output
    pub fn zero_output(&self) -> i32 {
        self.zero_output
    }

    /// Pole coefficients `[a0, a1]`
    pub fn pole_coeffs(&self) -> [i32; 2] {
        self.pole_coeffs
    }

    /// Active zero coefficients
    pub fn zero_coeffs(&self) -> &[i32] {
        &self.zero_coeffs[..self.num_zeros()]
    }

    /// Adapt the two pole coefficients
    pub fn update_pole_coefficients(&mut self, reconstructed_difference: i32) {
        let sign = diff_sign(reconstructed_difference, -self.zero_output);
        let same_sign = [sign * self.sign_history[0], sign * self.sign_history[1]];
        self.sign_history[0] = self.sign_history[1];
        self.sign_history[1] = sign | 1;

        let cross = rshift32(-same_sign[1] * self.pole_coeffs[1], 1);
        let cross = (clamp_symmetric(cross, POLE_CROSS_BOUND) & !0xF) * 16;

        let a0 = 254 * self.pole_coeffs[0] + 0x80_0000 * same_sign[0] + cross;
        self.pole_coeffs[0] = clamp_symmetric(rshift32(a0, 8), POLE0_BOUND);

        let a1 = 255 * self.pole_coeffs[1] + 0xC0_0000 * same_sign[1];
        let bound = POLE_SUM_BOUND - self.pole_coeffs[0];
        self.pole_coeffs[1] = clamp_symmetric(rshift32(a1, 8), bound);
    }

    /// Run the pole and zero filters and adapt the zero coefficients
    pub fn perform_prediction_filtering(&mut self, reconstructed_difference: i32) {
        let reconstructed = ssat24(reconstructed_difference + self.predicted);
        let pole_acc = i64::from(self.pole_coeffs[0]) * i64::from(self.previous_reconstructed)
            + i64::from(self.pole_coeffs[1]) * i64::from(reconstructed);
        let pole_output = ssat24((pole_acc >> 22) as i32);
        self.previous_reconstructed = reconstructed;

        self.delay_line.push(reconstructed_difference);
        let order = self.delay_line.order();
        let window = self.delay_line.window();

        let input_sign = diff_sign(reconstructed_difference, 0) << 23;
        let mut acc = 0i64;
        for (i, coeff) in self.zero_coeffs[..order].iter_mut().enumerate() {
            let newer = window[order - i];
            let older_sign = (window[order - i - 1] >> 31) | 1;
            *coeff -= rshift32(*coeff - older_sign * input_sign, 8);
            acc += i64::from(newer) * i64::from(*coeff);
        }

        self.zero_output = ssat24((acc >> 22) as i32);
        self.predicted = ssat24(pole_output + self.zero_output);
    }

    /// Full per-block update from a reconstructed difference
    pub fn process(&mut self, reconstructed_difference: i32) -> i32 {
        self.update_pole_coefficients(reconstructed_difference);
        self.perform_prediction_filtering(reconstructed_difference);
        self.predicted
    }
}
