//! Encode/decode round trips

use super::utils::{blocks, snr_db, stereo_sine};
use crate::codecs::aptx::{AptxCodec, StereoDecoder, StereoEncoder, LATENCY_SAMPLES};
use crate::types::{AptxConfig, AudioCodec, Endianness, SyncMode, Variant};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Skip the filter start-up transient
const SETTLE: usize = 400;

fn deinterleave(pcm: &[i32], channel: usize) -> Vec<i32> {
    pcm.iter().skip(channel).step_by(2).copied().collect()
}

fn block_roundtrip(variant: Variant, input: &[i32]) -> (Vec<i32>, Vec<i32>) {
    let mut encoder = StereoEncoder::new(variant, Endianness::Little);
    let mut decoder = StereoDecoder::new(variant);
    let mut left = Vec::new();
    let mut right = Vec::new();
    for (l, r) in blocks(input) {
        let block = decoder.decode_block(encoder.encode_block(&l, &r));
        assert!(block.in_sync);
        left.extend_from_slice(&block.samples[0]);
        right.extend_from_slice(&block.samples[1]);
    }
    (left, right)
}

fn aligned_snr(reference: &[i32], decoded: &[i32], lag: usize) -> f64 {
    let end = reference.len() - lag;
    snr_db(&reference[SETTLE..end], &decoded[SETTLE + lag..])
}

#[test]
fn test_aptx_sine_roundtrip() {
    let input = stereo_sine(8000, 1_000.0, 0.5, true);
    let (left, right) = block_roundtrip(Variant::Aptx, &input);
    let snr_l = aligned_snr(&deinterleave(&input, 0), &left, LATENCY_SAMPLES);
    let snr_r = aligned_snr(&deinterleave(&input, 1), &right, LATENCY_SAMPLES);
    assert!(snr_l > 45.0, "left SNR {snr_l:.1} dB");
    assert!(snr_r > 45.0, "right SNR {snr_r:.1} dB");
}

#[test]
fn test_aptx_hd_sine_roundtrip() {
    let input = stereo_sine(8000, 1_000.0, 0.5, false);
    let (left, right) = block_roundtrip(Variant::AptxHd, &input);
    let snr_l = aligned_snr(&deinterleave(&input, 0), &left, LATENCY_SAMPLES);
    let snr_r = aligned_snr(&deinterleave(&input, 1), &right, LATENCY_SAMPLES);
    assert!(snr_l > 55.0, "left SNR {snr_l:.1} dB");
    assert!(snr_r > 55.0, "right SNR {snr_r:.1} dB");
}

#[test]
fn test_latency_is_ninety_samples() {
    let input = stereo_sine(8000, 1_000.0, 0.5, true);
    let reference = deinterleave(&input, 0);
    let (left, _) = block_roundtrip(Variant::Aptx, &input);
    let best = (80..100)
        .max_by(|&a, &b| {
            aligned_snr(&reference, &left, a)
                .partial_cmp(&aligned_snr(&reference, &left, b))
                .unwrap()
        })
        .unwrap();
    assert_eq!(best, LATENCY_SAMPLES);
}

#[test]
fn test_stream_codec_roundtrip_with_flush() {
    for (config, bits16, threshold) in [
        (AptxConfig::aptx(), true, 45.0),
        (AptxConfig::aptx().with_sync_mode(SyncMode::DUAL_MONO), true, 45.0),
        (AptxConfig::aptx_hd(), false, 55.0),
    ] {
        let input = stereo_sine(6000, 1_000.0, 0.5, bits16);
        let mut codec = AptxCodec::new(config).unwrap().with_latency_compensation(true);

        let mut stream = codec.encode(&input).unwrap().to_vec();
        stream.extend_from_slice(&codec.flush());
        let output = codec.decode(&stream).unwrap();
        assert!(output.len() >= input.len());

        let output = &output[..input.len()];
        let snr = snr_db(&input[2 * SETTLE..], &output[2 * SETTLE..]);
        assert!(snr > threshold, "{:?}: SNR {snr:.1} dB", config.variant);
        assert_eq!(codec.sync_errors(), 0);
    }
}

#[test]
fn test_white_noise_roundtrip() {
    let mut rng = StdRng::seed_from_u64(0x0A97_C0DE);
    for (variant, bits16, threshold) in [(Variant::Aptx, true, 6.0), (Variant::AptxHd, false, 15.0)] {
        let input: Vec<i32> = (0..12_000)
            .map(|_| {
                let v = rng.gen_range(-2_000_000..=2_000_000);
                if bits16 { (v >> 8) << 8 } else { v }
            })
            .collect();
        let (left, right) = block_roundtrip(variant, &input);
        let snr_l = aligned_snr(&deinterleave(&input, 0), &left, LATENCY_SAMPLES);
        let snr_r = aligned_snr(&deinterleave(&input, 1), &right, LATENCY_SAMPLES);
        assert!(snr_l > threshold && snr_r > threshold, "{variant}: {snr_l:.1} / {snr_r:.1} dB");
    }
}

#[test]
fn test_full_scale_square_stays_in_range() {
    let max = (1 << 23) - 1;
    let input: Vec<i32> = (0..4000)
        .map(|n| if (n / 40) % 2 == 0 { max } else { -max - 1 })
        .collect();
    for variant in [Variant::Aptx, Variant::AptxHd] {
        let (left, right) = block_roundtrip(variant, &input);
        assert!(left.iter().chain(&right).all(|s| (-max - 1..=max).contains(s)));
    }
}
