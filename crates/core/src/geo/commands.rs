use bytes::Bytes;

use crate::command::{require_non_empty, required_key, Command};
use crate::error::{CommandError, Result};

use super::{GeoLocation, Metric};

/// `GEOADD key longitude latitude member [longitude latitude member ...]`
#[derive(Debug, Clone, PartialEq)]
pub struct GeoAddCommand {
    pub key: Option<Bytes>,
    pub locations: Vec<GeoLocation>,
}

impl GeoAddCommand {
    pub fn location(location: GeoLocation) -> Self {
        Self::locations([location])
    }

    pub fn locations(locations: impl IntoIterator<Item = GeoLocation>) -> Self {
        Self {
            key: None,
            locations: locations.into_iter().collect(),
        }
    }

    pub fn to(mut self, key: impl Into<Bytes>) -> Self {
        self.key = Some(key.into());
        self
    }
}

impl Command for GeoAddCommand {
    fn name(&self) -> &'static str {
        "GEOADD"
    }

    fn validate(&self) -> Result<()> {
        required_key(self.name(), &self.key)?;
        require_non_empty(self.name(), "locations", &self.locations)?;
        match self.locations.iter().find(|l| !l.point.is_finite()) {
            Some(location) => Err(CommandError::InvalidCommand(format!(
                "GEOADD: point of {:?} must have finite coordinates",
                location.name
            ))),
            None => Ok(()),
        }
    }
}

/// `GEODIST key member1 member2 [m|km|ft|mi]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoDistCommand {
    pub key: Option<Bytes>,
    pub from: Bytes,
    pub to: Bytes,
    pub metric: Metric,
}

impl GeoDistCommand {
    /// Distance in meters between two members.
    pub fn between(from: impl Into<Bytes>, to: impl Into<Bytes>) -> Self {
        Self {
            key: None,
            from: from.into(),
            to: to.into(),
            metric: Metric::Meters,
        }
    }

    pub fn in_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    pub fn for_key(mut self, key: impl Into<Bytes>) -> Self {
        self.key = Some(key.into());
        self
    }
}

impl Command for GeoDistCommand {
    fn name(&self) -> &'static str {
        "GEODIST"
    }

    fn validate(&self) -> Result<()> {
        required_key(self.name(), &self.key).map(|_| ())
    }
}

/// `GEOHASH key member [member ...]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoHashCommand {
    pub key: Option<Bytes>,
    pub members: Vec<Bytes>,
}

impl GeoHashCommand {
    pub fn member(member: impl Into<Bytes>) -> Self {
        Self::members([member.into()])
    }

    pub fn members(members: impl IntoIterator<Item = Bytes>) -> Self {
        Self {
            key: None,
            members: members.into_iter().collect(),
        }
    }

    pub fn of(mut self, key: impl Into<Bytes>) -> Self {
        self.key = Some(key.into());
        self
    }
}

impl Command for GeoHashCommand {
    fn name(&self) -> &'static str {
        "GEOHASH"
    }

    fn validate(&self) -> Result<()> {
        required_key(self.name(), &self.key)?;
        require_non_empty(self.name(), "members", &self.members)
    }
}

/// `GEOPOS key member [member ...]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoPosCommand {
    pub key: Option<Bytes>,
    pub members: Vec<Bytes>,
}

impl GeoPosCommand {
    pub fn member(member: impl Into<Bytes>) -> Self {
        Self::members([member.into()])
    }

    pub fn members(members: impl IntoIterator<Item = Bytes>) -> Self {
        Self {
            key: None,
            members: members.into_iter().collect(),
        }
    }

    pub fn of(mut self, key: impl Into<Bytes>) -> Self {
        self.key = Some(key.into());
        self
    }
}

impl Command for GeoPosCommand {
    fn name(&self) -> &'static str {
        "GEOPOS"
    }

    fn validate(&self) -> Result<()> {
        required_key(self.name(), &self.key)?;
        require_non_empty(self.name(), "members", &self.members)
    }
}
