//! Geospatial command objects, value types and the reactive command trait.
//!
//! [`hash`] implements the 52-bit geohash encoding and the distance formula
//! Redis uses, so locally computed positions and distances agree with the
//! server's.

mod commands;
pub mod hash;
mod traits;
mod types;

pub use commands::{GeoAddCommand, GeoDistCommand, GeoHashCommand, GeoPosCommand};
pub use traits::ReactiveGeoCommands;
pub use types::{Distance, GeoLocation, Metric, Point};
