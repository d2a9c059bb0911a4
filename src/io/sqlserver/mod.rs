//! Reader and writer for the SQL Server native geometry serialization.
//!
//! A payload is a little-endian header (SRID, version, property flags) followed by three flat
//! arrays: points, figures (runs of points) and shapes (geometry nodes). See
//! [`NativeGeometry`] for the model and [`NativeEncoder`] / [`NativeDecoder`] for the codecs.

mod api;
mod common;
mod decoder;
mod encoder;
mod reader;
mod writer;

pub use api::{from_native, to_native, NativeDecoder, NativeEncoder};
pub use common::{
    Figure, FigureAttribute, NativeGeometry, SerializationProps, Shape, SUPPORTED_VERSION,
};
