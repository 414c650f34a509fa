//! Utility functions shared by the codec, the CLI and the tests

pub mod pcm;
pub mod validation;

pub use pcm::PcmFormat;
