//! Codeword packing
//!
//! Band codes are concatenated LSB first: LL at bit 0, then LH, HL, HH. The
//! HH field's lowest bit is replaced by the sync parity when sync is on.

use super::fixed_point::sign_extend;
use super::state::ChannelState;
use crate::types::{SyncMode, Variant};

/// Bit offset of each band field
pub fn field_offsets(variant: Variant) -> [u32; 4] {
    let widths = variant.code_widths();
    let mut offsets = [0u32; 4];
    for band in 1..4 {
        offsets[band] = offsets[band - 1] + widths[band - 1];
    }
    offsets
}

/// Pack four codes, placing `lsb` in the low bit of the HH field
pub fn pack_codes(variant: Variant, codes: &[i32; 4], lsb: i32) -> u32 {
    let widths = variant.code_widths();
    let offsets = field_offsets(variant);
    let mut fields = *codes;
    fields[3] = (fields[3] & !1) | (lsb & 1);

    fields
        .iter()
        .zip(widths.iter().zip(offsets))
        .fold(0u32, |word, (&code, (&width, offset))| {
            word | (((code as u32) & ((1 << width) - 1)) << offset)
        })
}

/// Pack one channel's current block
pub fn pack_codeword(channel: &ChannelState, sync_mode: SyncMode) -> u32 {
    let codes = channel.codes();
    let lsb = if sync_mode.folds_parity() {
        channel.parity()
    } else {
        codes[3] & 1
    };
    pack_codes(channel.variant(), &codes, lsb)
}

/// Split a codeword into sign-extended band codes
///
/// The HH code keeps the transmitted low bit; callers restore the original
/// bit from parity when sync is on.
pub fn unpack_codeword(variant: Variant, word: u32) -> [i32; 4] {
    let widths = variant.code_widths();
    let offsets = field_offsets(variant);
    std::array::from_fn(|band| sign_extend((word >> offsets[band]) as i32, widths[band]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Subband;

    #[test]
    fn test_field_offsets() {
        assert_eq!(field_offsets(Variant::Aptx), [0, 7, 11, 13]);
        assert_eq!(field_offsets(Variant::AptxHd), [0, 9, 15, 19]);
    }

    #[test]
    fn test_pack_masks() {
        assert_eq!(pack_codes(Variant::Aptx, &[-1, -1, -1, -1], 0), 0xDFFF);
        assert_eq!(pack_codes(Variant::Aptx, &[-1, -1, -1, -1], 1), 0xFFFF);
        assert_eq!(pack_codes(Variant::AptxHd, &[-1, -1, -1, -1], 0), 0xF7_FFFF);
        assert_eq!(pack_codes(Variant::Aptx, &[0x3F, 0, 0, 0], 0), 0x3F);
        assert_eq!(pack_codes(Variant::Aptx, &[0, 1, 1, 2], 1), (3 << 13) | (1 << 11) | (1 << 7));
        assert_eq!(pack_codes(Variant::AptxHd, &[0, 0, 0, 0], 1), 1 << 19);
    }

    #[test]
    fn test_unpack_sign_extends() {
        let word = pack_codes(Variant::Aptx, &[-64, 7, -2, 3], 1);
        assert_eq!(unpack_codeword(Variant::Aptx, word), [-64, 7, -2, 3]);
        let word = pack_codes(Variant::AptxHd, &[255, -32, 7, -16], 0);
        assert_eq!(unpack_codeword(Variant::AptxHd, word), [255, -32, 7, -16]);
    }

    #[test]
    fn test_pack_codeword_sync_modes() {
        let mut channel = ChannelState::new(Variant::Aptx);
        channel.band_mut(Subband::LL).quantiser.code = 1;
        channel.band_mut(Subband::HH).quantiser.code = 2;
        // parity = 1 ^ 2 = odd
        assert_eq!(pack_codeword(&channel, SyncMode::STEREO), 1 | (3 << 13));
        assert_eq!(pack_codeword(&channel, SyncMode::DUAL_MONO), 1 | (3 << 13));
        assert_eq!(pack_codeword(&channel, SyncMode::NO_SYNC), 1 | (2 << 13));
        assert_eq!(pack_codeword(&channel, SyncMode::from_raw(9)), 1 | (2 << 13));
    }
}
