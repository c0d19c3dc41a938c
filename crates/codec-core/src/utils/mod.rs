//! Sample-level helpers shared by codec implementations and transcoders

pub mod resample;

pub use resample::resample_linear;
