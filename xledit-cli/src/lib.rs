//! CLI library for testing purposes

pub mod validation;

pub use xledit::Codec;
