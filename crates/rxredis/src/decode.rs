//! Raw reply to typed output conversions.
//!
//! Decoders accept both RESP2 and RESP3 shapes: a score may arrive as a bulk
//! string or a double, a `WITHSCORES` reply as a flat array or as pairs.

use bytes::Bytes;
use redis::Value;

use rxredis_core::geo::{Distance, Metric, Point};
use rxredis_core::zset::Tuple;
use rxredis_core::{CommandError, Result};

fn unexpected(expected: &str, value: &Value) -> CommandError {
    CommandError::Decode(format!("expected {}, got {:?}", expected, value))
}

/// Integer reply.
pub fn integer(value: Value) -> Result<i64> {
    match value {
        Value::Int(n) => Ok(n),
        other => Err(unexpected("integer", &other)),
    }
}

/// Integer reply, nil for a missing member.
pub fn optional_integer(value: Value) -> Result<Option<i64>> {
    match value {
        Value::Nil => Ok(None),
        other => integer(other).map(Some),
    }
}

/// Status reply: `OK` is true, any other status false.
pub fn status(value: Value) -> Result<bool> {
    match value {
        Value::Okay => Ok(true),
        Value::SimpleString(status) => Ok(status.eq_ignore_ascii_case("OK")),
        Value::Boolean(flag) => Ok(flag),
        other => Err(unexpected("status", &other)),
    }
}

/// Parses a float as Redis prints it, including `inf`, `+inf` and `-inf`.
pub fn parse_float(text: &str) -> Option<f64> {
    match text.trim().to_ascii_lowercase().as_str() {
        "inf" | "+inf" => Some(f64::INFINITY),
        "-inf" => Some(f64::NEG_INFINITY),
        other => other.parse().ok(),
    }
}

/// Score reply.
pub fn score(value: Value) -> Result<f64> {
    let parsed = match &value {
        Value::Double(score) => Some(*score),
        Value::Int(n) => Some(*n as f64),
        Value::BulkString(bytes) => std::str::from_utf8(bytes).ok().and_then(parse_float),
        Value::SimpleString(text) => parse_float(text),
        _ => None,
    };
    parsed.ok_or_else(|| unexpected("score", &value))
}

/// Score reply, nil for a missing member.
pub fn optional_score(value: Value) -> Result<Option<f64>> {
    match value {
        Value::Nil => Ok(None),
        other => score(other).map(Some),
    }
}

fn bulk_bytes(value: Value) -> Result<Bytes> {
    match value {
        Value::BulkString(bytes) => Ok(Bytes::from(bytes)),
        Value::SimpleString(text) => Ok(Bytes::from(text)),
        other => Err(unexpected("bulk string", &other)),
    }
}

/// Array items; nil is the empty list a missing key yields.
fn items(value: Value) -> Result<Vec<Value>> {
    match value {
        Value::Array(items) | Value::Set(items) => Ok(items),
        Value::Nil => Ok(Vec::new()),
        other => Err(unexpected("array", &other)),
    }
}

/// Ordered members, in the order the server returned them.
pub fn members(value: Value) -> Result<Vec<Bytes>> {
    items(value)?.into_iter().map(bulk_bytes).collect()
}

/// `WITHSCORES` reply: flat `[member, score, ...]` or `[[member, score], ...]`.
pub fn tuples(value: Value) -> Result<Vec<Tuple>> {
    let items = match value {
        Value::Map(pairs) => {
            return pairs
                .into_iter()
                .map(|(member, score_value)| {
                    Ok(Tuple::new(bulk_bytes(member)?, score(score_value)?))
                })
                .collect();
        }
        other => items(other)?,
    };

    if items.iter().all(|item| matches!(item, Value::Array(_))) {
        return items
            .into_iter()
            .map(|pair| {
                let (member, score_value) = items_pair(pair)?;
                Ok(Tuple::new(bulk_bytes(member)?, score(score_value)?))
            })
            .collect();
    }

    if items.len() % 2 != 0 {
        return Err(CommandError::Decode(format!(
            "expected member/score pairs, got {} items",
            items.len()
        )));
    }
    let mut tuples = Vec::with_capacity(items.len() / 2);
    let mut iter = items.into_iter();
    while let (Some(member), Some(score_value)) = (iter.next(), iter.next()) {
        tuples.push(Tuple::new(bulk_bytes(member)?, score(score_value)?));
    }
    Ok(tuples)
}

fn items_pair(value: Value) -> Result<(Value, Value)> {
    let mut pair = items(value)?.into_iter();
    match (pair.next(), pair.next(), pair.next()) {
        (Some(first), Some(second), None) => Ok((first, second)),
        _ => Err(CommandError::Decode("expected a two element array".to_string())),
    }
}

/// `GEODIST` reply in the requested metric.
pub fn distance(value: Value, metric: Metric) -> Result<Option<Distance>> {
    Ok(optional_score(value)?.map(|value| Distance::new(value, metric)))
}

/// `GEOHASH` reply.
pub fn geohashes(value: Value) -> Result<Vec<Option<String>>> {
    items(value)?
        .into_iter()
        .map(|item| match item {
            Value::Nil => Ok(None),
            other => {
                let raw = bulk_bytes(other)?;
                String::from_utf8(raw.to_vec())
                    .map(Some)
                    .map_err(|_| CommandError::Decode("geohash is not UTF-8".to_string()))
            }
        })
        .collect()
}

/// `GEOPOS` reply.
pub fn positions(value: Value) -> Result<Vec<Option<Point>>> {
    items(value)?
        .into_iter()
        .map(|item| match item {
            Value::Nil => Ok(None),
            other => {
                let (longitude, latitude) = items_pair(other)?;
                Ok(Some(Point::new(score(longitude)?, score(latitude)?)))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bulk(text: &str) -> Value {
        Value::BulkString(text.as_bytes().to_vec())
    }

    #[test]
    fn test_integer() {
        assert_eq!(integer(Value::Int(3)), Ok(3));
        assert!(matches!(integer(Value::Nil), Err(CommandError::Decode(_))));
    }

    #[test]
    fn test_optional_integer() {
        assert_eq!(optional_integer(Value::Nil), Ok(None));
        assert_eq!(optional_integer(Value::Int(0)), Ok(Some(0)));
    }

    #[test]
    fn test_status() {
        assert_eq!(status(Value::Okay), Ok(true));
        assert_eq!(status(Value::SimpleString("OK".into())), Ok(true));
        assert_eq!(status(Value::SimpleString("QUEUED".into())), Ok(false));
        assert!(status(Value::Int(1)).is_err());
    }

    #[test]
    fn test_score_shapes() {
        assert_eq!(score(bulk("2.5")), Ok(2.5));
        assert_eq!(score(Value::Double(1.5)), Ok(1.5));
        assert_eq!(score(bulk("inf")), Ok(f64::INFINITY));
        assert_eq!(score(bulk("-inf")), Ok(f64::NEG_INFINITY));
        assert!(score(bulk("abc")).is_err());
        assert_eq!(optional_score(Value::Nil), Ok(None));
    }

    #[test]
    fn test_members_keep_server_order() {
        let value = Value::Array(vec![bulk("C"), bulk("A"), bulk("B")]);
        assert_eq!(
            members(value),
            Ok(vec![Bytes::from("C"), Bytes::from("A"), Bytes::from("B")])
        );
        assert_eq!(members(Value::Nil), Ok(Vec::new()));
    }

    #[test]
    fn test_flat_tuples() {
        let value = Value::Array(vec![bulk("B"), bulk("2"), bulk("C"), bulk("3")]);
        assert_eq!(
            tuples(value),
            Ok(vec![Tuple::new("B", 2.0), Tuple::new("C", 3.0)])
        );
    }

    #[test]
    fn test_paired_tuples() {
        let value = Value::Array(vec![
            Value::Array(vec![bulk("B"), Value::Double(2.0)]),
            Value::Array(vec![bulk("C"), Value::Double(3.0)]),
        ]);
        assert_eq!(
            tuples(value),
            Ok(vec![Tuple::new("B", 2.0), Tuple::new("C", 3.0)])
        );
    }

    #[test]
    fn test_odd_flat_tuples_fail() {
        let value = Value::Array(vec![bulk("B"), bulk("2"), bulk("C")]);
        assert!(tuples(value).is_err());
    }

    #[test]
    fn test_empty_tuples() {
        assert_eq!(tuples(Value::Array(Vec::new())), Ok(Vec::new()));
    }

    #[test]
    fn test_distance() {
        assert_eq!(
            distance(bulk("166.2742"), Metric::Kilometers),
            Ok(Some(Distance::new(166.2742, Metric::Kilometers)))
        );
        assert_eq!(distance(Value::Nil, Metric::Meters), Ok(None));
    }

    #[test]
    fn test_geohashes() {
        let value = Value::Array(vec![bulk("sqc8b49rny0"), Value::Nil]);
        assert_eq!(
            geohashes(value),
            Ok(vec![Some("sqc8b49rny0".to_string()), None])
        );
    }

    #[test]
    fn test_positions() {
        let value = Value::Array(vec![
            Value::Array(vec![bulk("13.361389"), bulk("38.115556")]),
            Value::Nil,
        ]);
        assert_eq!(
            positions(value),
            Ok(vec![Some(Point::new(13.361389, 38.115556)), None])
        );
    }
}
