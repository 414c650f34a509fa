//! aptX Test Modules
//!
//! Cross-component tests for the aptX codec: reference bitstreams, sync
//! behaviour, round trips through the decoder and state invariants.

mod roundtrip_tests;
mod sync_tests;

/// Shared signal generators
pub mod utils {
    /// The ASCII digits `0123456789` repeated to `len` bytes
    pub fn digit_pattern(len: usize) -> Vec<u8> {
        b"0123456789".iter().copied().cycle().take(len).collect()
    }

    /// Split interleaved stereo into per-block `(left, right)` pairs
    pub fn blocks(interleaved: &[i32]) -> Vec<([i32; 4], [i32; 4])> {
        interleaved
            .chunks_exact(8)
            .map(|c| ([c[0], c[2], c[4], c[6]], [c[1], c[3], c[5], c[7]]))
            .collect()
    }

    /// Interleaved stereo sine pair in Q23
    ///
    /// Left is `amplitude` of full scale at `frequency`; right is 0.7 of
    /// that amplitude at 1.5 times the frequency. With `bits16`, samples are
    /// truncated to 16-bit precision as an aptX source would be.
    pub fn stereo_sine(samples: usize, frequency: f64, amplitude: f64, bits16: bool) -> Vec<i32> {
        let full_scale = f64::from((1 << 23) - 1);
        let step = 2.0 * std::f64::consts::PI * frequency / 44_100.0;
        let mut out = Vec::with_capacity(samples * 2);
        for n in 0..samples {
            let t = n as f64 * step;
            let mut l = (amplitude * full_scale * t.sin()) as i32;
            let mut r = (amplitude * 0.7 * full_scale * (1.5 * t).sin()) as i32;
            if bits16 {
                l = (l >> 8) << 8;
                r = (r >> 8) << 8;
            }
            out.push(l);
            out.push(r);
        }
        out
    }

    /// Signal-to-noise ratio in dB of `decoded` against `reference`
    pub fn snr_db(reference: &[i32], decoded: &[i32]) -> f64 {
        let signal: f64 = reference.iter().map(|&x| f64::from(x).powi(2)).sum();
        let noise: f64 = reference
            .iter()
            .zip(decoded)
            .map(|(&x, &y)| (f64::from(x) - f64::from(y)).powi(2))
            .sum();
        10.0 * (signal / noise.max(1.0)).log10()
    }
}
