use std::fmt;

use bytes::Bytes;

/// A position on the globe. `x` is the longitude, `y` the latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn longitude(&self) -> f64 {
        self.x
    }

    pub fn latitude(&self) -> f64 {
        self.y
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A named member at a [`Point`].
#[derive(Debug, Clone, PartialEq)]
pub struct GeoLocation {
    pub name: Bytes,
    pub point: Point,
}

impl GeoLocation {
    pub fn new(name: impl Into<Bytes>, point: Point) -> Self {
        Self {
            name: name.into(),
            point,
        }
    }
}

/// `(name, longitude, latitude)`
impl From<(&'static str, f64, f64)> for GeoLocation {
    fn from((name, longitude, latitude): (&'static str, f64, f64)) -> Self {
        GeoLocation::new(name, Point::new(longitude, latitude))
    }
}

/// Distance units understood by Redis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Metric {
    #[default]
    Meters,
    Kilometers,
    Miles,
    Feet,
}

impl Metric {
    /// The unit argument Redis expects.
    pub fn unit(self) -> &'static str {
        match self {
            Metric::Meters => "m",
            Metric::Kilometers => "km",
            Metric::Miles => "mi",
            Metric::Feet => "ft",
        }
    }

    /// Meters in one unit of this metric.
    pub fn multiplier(self) -> f64 {
        match self {
            Metric::Meters => 1.0,
            Metric::Kilometers => 1000.0,
            Metric::Miles => 1609.34,
            Metric::Feet => 0.3048,
        }
    }

    /// Parses a unit argument, case-insensitively.
    pub fn from_unit(unit: &str) -> Option<Self> {
        match unit.to_ascii_lowercase().as_str() {
            "m" => Some(Metric::Meters),
            "km" => Some(Metric::Kilometers),
            "mi" => Some(Metric::Miles),
            "ft" => Some(Metric::Feet),
            _ => None,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.unit())
    }
}

/// A distance value together with its unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distance {
    pub value: f64,
    pub metric: Metric,
}

impl Distance {
    pub fn new(value: f64, metric: Metric) -> Self {
        Self { value, metric }
    }

    pub fn meters(value: f64) -> Self {
        Self::new(value, Metric::Meters)
    }

    /// Converts this distance into another metric.
    pub fn in_metric(self, metric: Metric) -> Self {
        if metric == self.metric {
            return self;
        }
        let meters = self.value * self.metric.multiplier();
        Self::new(meters / metric.multiplier(), metric)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.metric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_units() {
        assert_eq!(Metric::Meters.unit(), "m");
        assert_eq!(Metric::Kilometers.unit(), "km");
        assert_eq!(Metric::Miles.unit(), "mi");
        assert_eq!(Metric::Feet.unit(), "ft");
    }

    #[test]
    fn test_metric_from_unit() {
        assert_eq!(Metric::from_unit("KM"), Some(Metric::Kilometers));
        assert_eq!(Metric::from_unit("ft"), Some(Metric::Feet));
        assert_eq!(Metric::from_unit("yd"), None);
    }

    #[test]
    fn test_distance_in_kilometers() {
        let distance = Distance::meters(166274.1516).in_metric(Metric::Kilometers);
        assert_eq!(distance.metric, Metric::Kilometers);
        assert!((distance.value - 166.2741516).abs() < 1e-9);
    }

    #[test]
    fn test_distance_round_trip_through_miles() {
        let distance = Distance::new(2.5, Metric::Kilometers)
            .in_metric(Metric::Miles)
            .in_metric(Metric::Kilometers);
        assert!((distance.value - 2.5).abs() < 1e-9);
    }

    #[test]
    fn test_distance_display() {
        assert_eq!(Distance::new(1.5, Metric::Kilometers).to_string(), "1.5 km");
    }

    #[test]
    fn test_point_accessors() {
        let point = Point::new(13.361389, 38.115556);
        assert_eq!(point.longitude(), 13.361389);
        assert_eq!(point.latitude(), 38.115556);
        assert!(point.is_finite());
        assert!(!Point::new(f64::NAN, 0.0).is_finite());
    }
}
