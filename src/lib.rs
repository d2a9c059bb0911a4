//! Immutable, CRS-aware geometries and codecs for the binary and text formats databases use to
//! store them.
//!
//! The central format is the SQL Server native geometry serialization (see [`io::sqlserver`]),
//! which flattens a geometry tree into arrays of points, figures and shapes. WKB/EWKB, WKT/EWKT,
//! the MySQL internal format and [`geo`] interop are provided alongside it. Every codec
//! implements the [`Encoder`] and [`Decoder`] traits.
//!
//! ```
//! use geocodec::crs::Crs;
//! use geocodec::geometry::{Geometry, Point};
//! use geocodec::io::sqlserver::{from_native, to_native};
//! use geocodec::position::Position;
//!
//! let point = Point::new(Position::xy(4.35, 50.85), Crs::wgs84()).unwrap();
//! let geometry = Geometry::from(point);
//! let buf = to_native(&geometry).unwrap();
//! assert_eq!(from_native(&buf).unwrap(), geometry);
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![cfg_attr(not(test), deny(unused_crate_dependencies))]

pub use error::{GeoCodecError, Result};
pub use geometry::{Geometry, GeometryType};
pub use io::{Decoder, Encoder};

pub mod algorithm;
pub mod crs;
pub mod error;
pub mod geometry;
pub mod io;
pub mod position;
#[cfg(test)]
pub(crate) mod test;
