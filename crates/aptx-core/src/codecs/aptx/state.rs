//! aptX per-band and per-channel state
//!
//! The adaptive state is identical on both sides of the link: the encoder
//! runs it as a local decoder, the decoder runs it from received codes.

use super::dither::DitherGenerator;
use super::inverse_quantiser::InverseQuantiser;
use super::predictor::Predictor;
use super::quantiser::Quantiser;
use super::tables::{variant_tables, BandTables};
use crate::types::{Subband, Variant};

/// Everything one sub-band carries from block to block
#[derive(Debug, Clone, Copy)]
pub struct SubbandState {
    tables: &'static BandTables,
    /// Forward quantiser outputs of the current block
    pub quantiser: Quantiser,
    /// Step size adaptation
    pub inverse_quantiser: InverseQuantiser,
    /// Pole/zero predictor
    pub predictor: Predictor,
}

impl SubbandState {
    /// Fresh state bound to one band's tables
    pub fn new(tables: &'static BandTables) -> Self {
        Self {
            tables,
            quantiser: Quantiser::new(),
            inverse_quantiser: InverseQuantiser::new(),
            predictor: Predictor::new(tables.num_zeros),
        }
    }

    /// Constant tables of this band
    pub fn tables(&self) -> &'static BandTables {
        self.tables
    }

    /// Code of the current block
    pub fn code(&self) -> i32 {
        self.quantiser.code
    }

    /// Quantise a difference signal with the current step size
    pub fn quantise(&mut self, diff: i32, dither: i32) {
        let delta = self.inverse_quantiser.delta();
        self.quantiser.quantise_difference(diff, dither, delta, self.tables);
    }

    /// Reconstruct the current code and advance the predictor
    pub fn process(&mut self, dither: i32) {
        let rdiff = self
            .inverse_quantiser
            .invert_quantisation(self.quantiser.code, dither, self.tables);
        self.predictor.process(rdiff);
    }
}

/// Adaptive state of one channel: dither generator plus four bands
#[derive(Debug, Clone, Copy)]
pub struct ChannelState {
    variant: Variant,
    /// Dither generator fed by the transmitted codes
    pub dither: DitherGenerator,
    /// Bands in LL, LH, HL, HH order
    pub subbands: [SubbandState; 4],
}

impl ChannelState {
    /// Fresh state for `variant`
    pub fn new(variant: Variant) -> Self {
        let tables = variant_tables(variant);
        Self {
            variant,
            dither: DitherGenerator::new(),
            subbands: std::array::from_fn(|band| SubbandState::new(&tables[band])),
        }
    }

    /// Codec variant
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// One band's state
    pub fn band(&self, band: Subband) -> &SubbandState {
        &self.subbands[band.index()]
    }

    /// Mutable access to one band's state
    pub fn band_mut(&mut self, band: Subband) -> &mut SubbandState {
        &mut self.subbands[band.index()]
    }

    /// Codes of the current block
    pub fn codes(&self) -> [i32; 4] {
        std::array::from_fn(|band| self.subbands[band].code())
    }

    /// Predicted band samples for the next block
    pub fn predictions(&self) -> [i32; 4] {
        std::array::from_fn(|band| self.subbands[band].predictor.predicted())
    }

    /// Last reconstructed band samples
    pub fn reconstructed(&self) -> [i32; 4] {
        std::array::from_fn(|band| self.subbands[band].predictor.previous_reconstructed())
    }

    /// Advance the dither generator past the previous block's codes
    pub fn next_dither(&mut self) -> [i32; 4] {
        let codes = self.codes();
        self.dither.advance(&codes)
    }

    /// Quantise one block of difference signals
    pub fn quantise(&mut self, diffs: &[i32; 4]) {
        let dither = *self.dither.outputs();
        for ((band, &diff), d) in self.subbands.iter_mut().zip(diffs).zip(dither) {
            band.quantise(diff, d);
        }
    }

    /// Sync parity: dither random bit XOR every code LSB
    pub fn parity(&self) -> i32 {
        self.subbands
            .iter()
            .fold(self.dither.sync_rand_bit(), |acc, band| acc ^ band.code())
            & 1
    }

    /// Inverse-quantise every band and update the predictors
    pub fn reconstruct(&mut self) {
        let dither = *self.dither.outputs();
        for (band, d) in self.subbands.iter_mut().zip(dither) {
            band.process(d);
        }
    }
}
