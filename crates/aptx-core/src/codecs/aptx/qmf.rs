//! aptX QMF (Quadrature Mirror Filter) tree
//!
//! Two cascaded polyphase QMF stages split every 4-sample PCM block into one
//! sample for each of the LL, LH, HL and HH sub-bands. The outer stage splits
//! the full band into low and high halves; one inner stage per half splits
//! again. Synthesis runs the same tree backwards for the decoder.

use super::fixed_point::{rshift64_clip24, ssat24};
use super::tables::{QMF_INNER_COEFFS, QMF_OUTER_COEFFS};

/// Taps per polyphase branch
pub const FILTER_TAPS: usize = 16;

/// Analysis output shift for both stages
const ANALYSIS_SHIFT: u32 = 23;
/// Synthesis output shift of the inner stage
const SYNTHESIS_INNER_SHIFT: u32 = 22;
/// Synthesis output shift of the outer stage
const SYNTHESIS_OUTER_SHIFT: u32 = 21;

/// Delay line for one polyphase branch
///
/// Every sample is written at `pos` and `pos + 16`, so the 16 most recent
/// samples are always readable as the contiguous window `pos..pos + 16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSignal {
    buffer: [i32; 2 * FILTER_TAPS],
    pos: usize,
}

impl FilterSignal {
    /// Create an all-zero delay line
    pub const fn new() -> Self {
        Self {
            buffer: [0; 2 * FILTER_TAPS],
            pos: 0,
        }
    }

    /// Write pointer, always in `0..16`
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Store a new sample, overwriting the oldest one
    #[inline]
    pub fn push(&mut self, sample: i32) {
        self.buffer[self.pos] = sample;
        self.buffer[self.pos + FILTER_TAPS] = sample;
        self.pos = (self.pos + 1) & (FILTER_TAPS - 1);
    }

    /// Convolve the 16 most recent samples (oldest first) with `coeffs`
    #[inline]
    pub fn convolve(&self, coeffs: &[i32; FILTER_TAPS], shift: u32) -> i32 {
        let window = &self.buffer[self.pos..self.pos + FILTER_TAPS];
        let acc: i64 = window
            .iter()
            .zip(coeffs.iter())
            .map(|(&s, &c)| i64::from(s) * i64::from(c))
            .sum();
        rshift64_clip24(acc, shift)
    }
}

impl Default for FilterSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Split two consecutive samples into one low and one high band sample
fn polyphase_analysis(
    signals: &mut [FilterSignal; 2],
    coeffs: &[[i32; FILTER_TAPS]; 2],
    shift: u32,
    samples: [i32; 2],
) -> (i32, i32) {
    let mut branch = [0i32; 2];
    for i in 0..2 {
        signals[i].push(samples[1 - i]);
        branch[i] = signals[i].convolve(&coeffs[i], shift);
    }
    (ssat24(branch[0] + branch[1]), ssat24(branch[0] - branch[1]))
}

/// Merge one low and one high band sample into two consecutive samples
fn polyphase_synthesis(
    signals: &mut [FilterSignal; 2],
    coeffs: &[[i32; FILTER_TAPS]; 2],
    shift: u32,
    low: i32,
    high: i32,
) -> [i32; 2] {
    let branch = [low + high, low - high];
    let mut samples = [0i32; 2];
    for i in 0..2 {
        signals[i].push(branch[1 - i]);
        samples[i] = signals[i].convolve(&coeffs[i], shift);
    }
    samples
}

/// Encoder-side QMF tree for one channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QmfAnalysis {
    outer: [FilterSignal; 2],
    inner: [[FilterSignal; 2]; 2],
}

impl QmfAnalysis {
    /// Create a tree with zeroed delay lines
    pub const fn new() -> Self {
        Self {
            outer: [FilterSignal::new(); 2],
            inner: [[FilterSignal::new(); 2]; 2],
        }
    }

    /// Split one block of PCM into `[LL, LH, HL, HH]`
    pub fn analyse(&mut self, samples: &[i32; 4]) -> [i32; 4] {
        let mut intermediate = [0i32; 4];
        for i in 0..2 {
            let (low, high) = polyphase_analysis(
                &mut self.outer,
                &QMF_OUTER_COEFFS,
                ANALYSIS_SHIFT,
                [samples[2 * i], samples[2 * i + 1]],
            );
            intermediate[i] = low;
            intermediate[2 + i] = high;
        }

        let mut subbands = [0i32; 4];
        for i in 0..2 {
            let (low, high) = polyphase_analysis(
                &mut self.inner[i],
                &QMF_INNER_COEFFS,
                ANALYSIS_SHIFT,
                [intermediate[2 * i], intermediate[2 * i + 1]],
            );
            subbands[2 * i] = low;
            subbands[2 * i + 1] = high;
        }
        subbands
    }

    /// Split one block and subtract each band's predicted value
    ///
    /// Returns the saturated per-band difference signals fed to the
    /// quantisers.
    pub fn residuals(&mut self, samples: &[i32; 4], predicted: &[i32; 4]) -> [i32; 4] {
        let subbands = self.analyse(samples);
        let mut diff = [0i32; 4];
        for ((d, s), p) in diff.iter_mut().zip(subbands).zip(predicted) {
            *d = ssat24(s - p);
        }
        diff
    }

    /// Outer and inner write pointers
    pub fn positions(&self) -> (usize, usize) {
        (self.outer[0].position(), self.inner[0][0].position())
    }
}

/// Decoder-side QMF tree for one channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QmfSynthesis {
    outer: [FilterSignal; 2],
    inner: [[FilterSignal; 2]; 2],
}

impl QmfSynthesis {
    /// Create a tree with zeroed delay lines
    pub const fn new() -> Self {
        Self {
            outer: [FilterSignal::new(); 2],
            inner: [[FilterSignal::new(); 2]; 2],
        }
    }

    /// Rebuild one block of PCM from `[LL, LH, HL, HH]`
    pub fn synthesise(&mut self, subbands: &[i32; 4]) -> [i32; 4] {
        let mut intermediate = [0i32; 4];
        for i in 0..2 {
            let pair = polyphase_synthesis(
                &mut self.inner[i],
                &QMF_INNER_COEFFS,
                SYNTHESIS_INNER_SHIFT,
                subbands[2 * i],
                subbands[2 * i + 1],
            );
            intermediate[2 * i..2 * i + 2].copy_from_slice(&pair);
        }

        let mut samples = [0i32; 4];
        for i in 0..2 {
            let pair = polyphase_synthesis(
                &mut self.outer,
                &QMF_OUTER_COEFFS,
                SYNTHESIS_OUTER_SHIFT,
                intermediate[i],
                intermediate[2 + i],
            );
            samples[2 * i..2 * i + 2].copy_from_slice(&pair);
        }
        samples
    }
}
