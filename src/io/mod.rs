//! Readers and writers for textual and binary geometry encodings.
//!
//! All codecs implement the [`Encoder`] and [`Decoder`] traits from [`codec`].

pub mod codec;
pub mod geo;
pub mod mysql;
pub mod sqlserver;
pub mod wkb;
pub mod wkt;

pub use codec::{Decoder, Encoder};
