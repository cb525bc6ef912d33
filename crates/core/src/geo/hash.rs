//! 52-bit geohash encoding as stored by Redis.
//!
//! A geo member is a sorted-set entry whose score is the interleaved
//! latitude/longitude cell index. Latitude bits occupy the even positions and
//! longitude bits the odd ones. Decoding yields the centre of the cell, which
//! is why `GEOPOS` never returns the exact coordinates that were added.

use super::Point;

/// Bits per coordinate.
pub const STEP: u32 = 26;

pub const LAT_MIN: f64 = -85.05112878;
pub const LAT_MAX: f64 = 85.05112878;
pub const LON_MIN: f64 = -180.0;
pub const LON_MAX: f64 = 180.0;

/// Earth radius used by Redis for distance computations, in meters.
pub const EARTH_RADIUS_METERS: f64 = 6372797.560856;

const ALPHABET: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Returns true when Redis accepts the point in `GEOADD`.
pub fn is_valid(point: &Point) -> bool {
    (LON_MIN..=LON_MAX).contains(&point.x) && (LAT_MIN..=LAT_MAX).contains(&point.y)
}

/// Encodes a point into the sorted-set score Redis would store.
///
/// The caller must check [`is_valid`] first.
pub fn encode(point: &Point) -> u64 {
    encode_within(point, LAT_MIN, LAT_MAX)
}

fn encode_within(point: &Point, lat_min: f64, lat_max: f64) -> u64 {
    let cells = (1u64 << STEP) as f64;
    // The upper edge belongs to the last cell.
    let lat_offset = ((point.y - lat_min) / (lat_max - lat_min) * cells).min(cells - 1.0);
    let lon_offset = ((point.x - LON_MIN) / (LON_MAX - LON_MIN) * cells).min(cells - 1.0);
    interleave(lat_offset as u32, lon_offset as u32)
}

/// Decodes a stored score into the centre of its cell.
pub fn decode(bits: u64) -> Point {
    let lat_cell = squash(bits) as f64;
    let lon_cell = squash(bits >> 1) as f64;
    let cells = (1u64 << STEP) as f64;

    let lat_scale = LAT_MAX - LAT_MIN;
    let lon_scale = LON_MAX - LON_MIN;
    let lat_lo = LAT_MIN + (lat_cell / cells) * lat_scale;
    let lat_hi = LAT_MIN + ((lat_cell + 1.0) / cells) * lat_scale;
    let lon_lo = LON_MIN + (lon_cell / cells) * lon_scale;
    let lon_hi = LON_MIN + ((lon_cell + 1.0) / cells) * lon_scale;

    Point::new(
        ((lon_lo + lon_hi) / 2.0).clamp(LON_MIN, LON_MAX),
        ((lat_lo + lat_hi) / 2.0).clamp(LAT_MIN, LAT_MAX),
    )
}

/// Great-circle distance between two points in meters (haversine).
pub fn distance(a: &Point, b: &Point) -> f64 {
    let lat1 = a.y.to_radians();
    let lat2 = b.y.to_radians();
    let u = ((lat2 - lat1) / 2.0).sin();
    let v = ((b.x.to_radians() - a.x.to_radians()) / 2.0).sin();
    2.0 * EARTH_RADIUS_METERS * (u * u + lat1.cos() * lat2.cos() * v * v).sqrt().asin()
}

/// The 11-character base32 geohash `GEOHASH` reports for a stored score.
///
/// Redis re-encodes the cell centre over the standard `[-90, 90]` latitude
/// range so the string is compatible with geohash.org. Only 52 bits are
/// available, so the last character is always `0`.
pub fn to_geohash_string(bits: u64) -> String {
    let bits = encode_within(&decode(bits), -90.0, 90.0);
    (0..11)
        .map(|i| {
            let index = if i == 10 {
                0
            } else {
                ((bits >> (52 - (i + 1) * 5)) & 0x1f) as usize
            };
            ALPHABET[index] as char
        })
        .collect()
}

/// Interleaves latitude bits into even positions and longitude into odd ones.
fn interleave(lat: u32, lon: u32) -> u64 {
    spread(lat) | (spread(lon) << 1)
}

fn spread(value: u32) -> u64 {
    let mut x = value as u64;
    x = (x | (x << 16)) & 0x0000_FFFF_0000_FFFF;
    x = (x | (x << 8)) & 0x00FF_00FF_00FF_00FF;
    x = (x | (x << 4)) & 0x0F0F_0F0F_0F0F_0F0F;
    x = (x | (x << 2)) & 0x3333_3333_3333_3333;
    (x | (x << 1)) & 0x5555_5555_5555_5555
}

fn squash(value: u64) -> u32 {
    let mut x = value & 0x5555_5555_5555_5555;
    x = (x | (x >> 1)) & 0x3333_3333_3333_3333;
    x = (x | (x >> 2)) & 0x0F0F_0F0F_0F0F_0F0F;
    x = (x | (x >> 4)) & 0x00FF_00FF_00FF_00FF;
    x = (x | (x >> 8)) & 0x0000_FFFF_0000_FFFF;
    x = (x | (x >> 16)) & 0x0000_0000_FFFF_FFFF;
    x as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palermo() -> Point {
        Point::new(13.361389, 38.115556)
    }

    fn catania() -> Point {
        Point::new(15.087269, 37.502669)
    }

    #[test]
    fn test_spread_and_squash_are_inverse() {
        for value in [0u32, 1, 0x2AAAAAA, 0x3FFFFFF, 12345678] {
            assert_eq!(squash(spread(value)), value);
        }
    }

    #[test]
    fn test_encode_matches_redis_score() {
        assert_eq!(encode(&palermo()), 3479099956230698);
        assert_eq!(encode(&catania()), 3479447370796909);
    }

    #[test]
    fn test_decode_returns_cell_centre() {
        let decoded = decode(encode(&palermo()));
        assert!((decoded.x - 13.361389338970184).abs() < 1e-12);
        assert!((decoded.y - 38.1155563954963).abs() < 1e-12);
    }

    #[test]
    fn test_distance_between_decoded_points() {
        let a = decode(encode(&palermo()));
        let b = decode(encode(&catania()));
        assert!((distance(&a, &b) - 166274.1516).abs() < 0.005);
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        assert_eq!(distance(&palermo(), &palermo()), 0.0);
    }

    #[test]
    fn test_geohash_string() {
        assert_eq!(to_geohash_string(encode(&palermo())), "sqc8b49rny0");
        assert_eq!(to_geohash_string(encode(&catania())), "sqdtr74hyu0");
    }

    #[test]
    fn test_validity_limits() {
        assert!(is_valid(&palermo()));
        assert!(is_valid(&Point::new(180.0, LAT_MAX)));
        assert!(!is_valid(&Point::new(181.0, 0.0)));
        assert!(!is_valid(&Point::new(0.0, 86.0)));
        assert!(!is_valid(&Point::new(f64::NAN, 0.0)));
    }
}
