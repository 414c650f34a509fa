//! Sync insertion over whole streams

use super::utils::{blocks, stereo_sine};
use crate::codecs::aptx::packer::{field_offsets, unpack_codeword};
use crate::codecs::aptx::{StereoDecoder, StereoEncoder};
use crate::types::{Endianness, SyncMode, Variant};

fn hh_lsb(variant: Variant, word: u32) -> i32 {
    ((word >> field_offsets(variant)[3]) & 1) as i32
}

fn encode_with(variant: Variant, mode: SyncMode, blocks_in: &[([i32; 4], [i32; 4])]) -> (StereoEncoder, Vec<[u32; 2]>) {
    let mut encoder = StereoEncoder::new(variant, Endianness::Little);
    encoder.set_sync_mode(mode);
    let words = blocks_in.iter().map(|(l, r)| encoder.encode_block(l, r)).collect();
    (encoder, words)
}

#[test]
fn test_stereo_parity_pattern() {
    let input = blocks(&stereo_sine(4 * 256, 997.0, 0.6, false));
    for variant in [Variant::Aptx, Variant::AptxHd] {
        let mut encoder = StereoEncoder::new(variant, Endianness::Little);
        for (b, (l, r)) in input.iter().enumerate() {
            let words = encoder.encode_block(l, r);
            let expected = i32::from(b % 8 == 7);
            let state_parity = encoder.channel(0).parity() ^ encoder.channel(1).parity();
            assert_eq!(state_parity, expected, "{variant} block {b}");
            assert_eq!(hh_lsb(variant, words[0]) ^ hh_lsb(variant, words[1]), expected);
        }
    }
}

#[test]
fn test_one_marker_per_eight_blocks() {
    let input = blocks(&stereo_sine(4 * 128, 3_000.0, 0.3, true));
    let (_, words) = encode_with(Variant::Aptx, SyncMode::STEREO, &input);
    let markers: Vec<i32> = words
        .iter()
        .map(|w| hh_lsb(Variant::Aptx, w[0]) ^ hh_lsb(Variant::Aptx, w[1]))
        .collect();
    for window in markers.chunks_exact(8) {
        assert_eq!(window.iter().sum::<i32>(), 1);
        assert_eq!(window[7], 1);
    }
}

#[test]
fn test_dual_mono_parity_per_channel() {
    let input = blocks(&stereo_sine(4 * 200, 440.0, 0.8, true));
    let mut encoder = StereoEncoder::new(Variant::Aptx, Endianness::Little);
    encoder.set_sync_mode(SyncMode::DUAL_MONO);
    for (b, (l, r)) in input.iter().enumerate() {
        let words = encoder.encode_block(l, r);
        let expected = i32::from(b % 8 == 7);
        for ch in 0..2 {
            assert_eq!(encoder.channel(ch).parity(), expected, "channel {ch} block {b}");
            assert_eq!(hh_lsb(Variant::Aptx, words[ch]), expected);
        }
    }
}

#[test]
fn test_no_sync_sends_raw_codes() {
    let input = blocks(&stereo_sine(4 * 100, 1_200.0, 0.5, true));
    let mut encoder = StereoEncoder::new(Variant::Aptx, Endianness::Little);
    encoder.set_sync_mode(SyncMode::NO_SYNC);
    for (l, r) in &input {
        let words = encoder.encode_block(l, r);
        for ch in 0..2 {
            assert_eq!(unpack_codeword(Variant::Aptx, words[ch]), encoder.channel(ch).codes());
        }
    }
}

#[test]
fn test_undefined_mode_syncs_but_packs_raw() {
    let input = blocks(&stereo_sine(4 * 64, 700.0, 0.5, true));
    let mut encoder = StereoEncoder::new(Variant::Aptx, Endianness::Little);
    encoder.set_sync_mode(SyncMode::from_raw(42));
    for (b, (l, r)) in input.iter().enumerate() {
        let words = encoder.encode_block(l, r);
        let parity = encoder.channel(0).parity() ^ encoder.channel(1).parity();
        assert_eq!(parity, i32::from(b % 8 == 7));
        for ch in 0..2 {
            assert_eq!(unpack_codeword(Variant::Aptx, words[ch]), encoder.channel(ch).codes());
        }
    }
}

#[test]
fn test_decoder_confirms_sync_in_every_mode() {
    let input = blocks(&stereo_sine(4 * 300, 1_000.0, 0.5, true));
    for mode in [SyncMode::STEREO, SyncMode::DUAL_MONO, SyncMode::NO_SYNC] {
        let (_, words) = encode_with(Variant::Aptx, mode, &input);
        let mut decoder = StereoDecoder::new(Variant::Aptx);
        decoder.set_sync_mode(mode);
        for w in words {
            assert!(decoder.decode_block(w).in_sync, "{mode}");
        }
        assert_eq!(decoder.sync_errors(), 0);
    }
}

#[test]
fn test_misaligned_stream_is_detected() {
    let input = blocks(&stereo_sine(4 * 64, 1_000.0, 0.5, true));
    let (_, words) = encode_with(Variant::Aptx, SyncMode::STEREO, &input);
    let mut decoder = StereoDecoder::new(Variant::Aptx);
    // Starting three blocks late puts the marker on the wrong phase
    for w in &words[3..] {
        decoder.decode_block(*w);
    }
    assert!(decoder.sync_errors() > 0);
}

#[test]
fn test_sync_substitutions_alter_stream() {
    let input = blocks(&stereo_sine(4 * 400, 1_000.0, 0.5, true));
    let (_, synced) = encode_with(Variant::Aptx, SyncMode::STEREO, &input);
    let (_, raw) = encode_with(Variant::Aptx, SyncMode::NO_SYNC, &input);
    // Substitutions feed back into the adaptive state
    let differing = synced.iter().zip(&raw).filter(|(a, b)| a != b).count();
    assert!(differing > 0);
    // First block only differs in the parity bit
    assert_eq!(synced[0][0] & !(1 << 13), raw[0][0] & !(1 << 13));
}
