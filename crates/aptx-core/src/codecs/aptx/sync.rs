//! Sync insertion
//!
//! A decoder finds block alignment by watching a parity bit that the
//! encoder forces to follow a period-8 pattern: set on one block in eight,
//! clear on the other seven. When the natural parity disagrees with the
//! pattern, the encoder transmits the alternate code of whichever band makes
//! the cheapest substitution.

use super::state::ChannelState;
use crate::types::Subband;

/// Bands in the order candidates are considered; ties keep the earliest
pub const SYNC_SEARCH_ORDER: [Subband; 4] = [Subband::LH, Subband::HL, Subband::LL, Subband::HH];

/// Three-bit phase counter, 7 down to 0 then wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncPhase(u8);

impl SyncPhase {
    /// Phase of a freshly initialised encoder
    pub const fn new() -> Self {
        Self(7)
    }

    /// Current phase
    pub fn value(self) -> u8 {
        self.0
    }

    /// Parity the current block must carry, then step to the next phase
    pub fn advance(&mut self) -> i32 {
        let target = (self.0 == 0) as i32;
        self.0 = self.0.wrapping_sub(1) & 7;
        target
    }
}

impl Default for SyncPhase {
    fn default() -> Self {
        Self::new()
    }
}

/// Cheapest band of one channel to flip
fn cheapest_band(channel: &ChannelState) -> (Subband, i32) {
    SYNC_SEARCH_ORDER
        .iter()
        .map(|&band| (band, channel.band(band).quantiser.distance_penalty))
        .min_by_key(|&(_, penalty)| penalty)
        .unwrap_or((Subband::LH, 0))
}

/// Force `parity(left) ^ parity(right)` to follow the phase pattern
///
/// Candidates are searched right channel first. Returns the substituted
/// `(channel index, band)` if one was made.
pub fn insert_stereo_sync(channels: &mut [ChannelState; 2], phase: &mut SyncPhase) -> Option<(usize, Subband)> {
    let parity = channels[0].parity() ^ channels[1].parity();
    let target = phase.advance();
    if parity == target {
        return None;
    }

    let (right_band, right_penalty) = cheapest_band(&channels[1]);
    let (left_band, left_penalty) = cheapest_band(&channels[0]);
    let (index, band) = if left_penalty < right_penalty {
        (0, left_band)
    } else {
        (1, right_band)
    };

    channels[index].band_mut(band).quantiser.flip_parity();
    tracing::trace!(channel = index, ?band, "stereo sync substitution");
    Some((index, band))
}

/// Force each channel's own parity to follow the phase pattern
///
/// The phase advances once per call, shared by both channels.
pub fn insert_dual_mono_sync(channels: &mut [ChannelState; 2], phase: &mut SyncPhase) -> [Option<Subband>; 2] {
    let target = phase.advance();
    let mut substituted = [None; 2];
    for (index, channel) in channels.iter_mut().enumerate() {
        if channel.parity() == target {
            continue;
        }
        let (band, _) = cheapest_band(channel);
        channel.band_mut(band).quantiser.flip_parity();
        tracing::trace!(channel = index, ?band, "dual-mono sync substitution");
        substituted[index] = Some(band);
    }
    substituted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Variant;

    fn channel(penalties: [i32; 4], codes: [i32; 4]) -> ChannelState {
        let mut ch = ChannelState::new(Variant::Aptx);
        for (i, band) in ch.subbands.iter_mut().enumerate() {
            band.quantiser.code = codes[i];
            band.quantiser.parity_change_code = codes[i] - 1;
            band.quantiser.distance_penalty = penalties[i];
        }
        ch
    }

    #[test]
    fn test_phase_sequence() {
        let mut phase = SyncPhase::new();
        let targets: Vec<i32> = (0..16).map(|_| phase.advance()).collect();
        assert_eq!(targets, vec![0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(phase.value(), 7);
    }

    #[test]
    fn test_no_substitution_when_parity_matches() {
        let mut channels = [channel([5; 4], [0; 4]), channel([5; 4], [0; 4])];
        let mut phase = SyncPhase::new();
        assert_eq!(insert_stereo_sync(&mut channels, &mut phase), None);
        assert_eq!(phase.value(), 6);
    }

    #[test]
    fn test_stereo_picks_cheapest_band() {
        let mut channels = [
            channel([10, 10, 3, 10], [1, 0, 0, 0]),
            channel([10, 9, 10, 10], [0; 4]),
        ];
        let mut phase = SyncPhase::new();
        let flipped = insert_stereo_sync(&mut channels, &mut phase);
        assert_eq!(flipped, Some((0, Subband::HL)));
        assert_eq!(channels[0].band(Subband::HL).code(), -1);
        assert_eq!(channels[0].parity() ^ channels[1].parity(), 0);
    }

    #[test]
    fn test_stereo_ties_prefer_right_lh() {
        let mut channels = [channel([4; 4], [1, 0, 0, 0]), channel([4; 4], [0; 4])];
        let mut phase = SyncPhase::new();
        let flipped = insert_stereo_sync(&mut channels, &mut phase);
        assert_eq!(flipped, Some((1, Subband::LH)));
    }

    #[test]
    fn test_dual_mono_is_per_channel() {
        let mut channels = [
            channel([7, 2, 9, 1], [1, 0, 0, 0]),
            channel([5; 4], [0; 4]),
        ];
        let mut phase = SyncPhase::new();
        let flipped = insert_dual_mono_sync(&mut channels, &mut phase);
        assert_eq!(flipped, [Some(Subband::HH), None]);
        assert_eq!(channels[0].parity(), 0);
        assert_eq!(channels[1].parity(), 0);
    }
}
