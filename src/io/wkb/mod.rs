//! Reading and writing OGC/ISO WKB and PostGIS EWKB in either byte order.

mod api;
mod common;
mod reader;
mod writer;

pub use api::{from_wkb, to_wkb, WkbDecoder, WkbEncoder};
pub use common::{Endianness, WkbDialect, WkbType};
pub(crate) use reader::read_wkb_with_srid;
