//! Read and write geometries as Well-Known Text, with PostGIS `SRID=` prefixes.

mod api;
mod reader;
mod writer;

pub use api::{from_wkt, to_wkt, WktDecoder, WktDialect, WktEncoder};
