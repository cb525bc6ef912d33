use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;
use crate::response::{once, single_output, CommandStream, ResponseStream};

use super::{
    Distance, GeoAddCommand, GeoDistCommand, GeoHashCommand, GeoLocation, GeoPosCommand, Metric,
    Point,
};

/// Reactive geospatial commands.
#[async_trait]
pub trait ReactiveGeoCommands: Send + Sync {
    /// Adds locations. Outputs the number of members added.
    fn geo_add<'a>(
        &'a self,
        commands: CommandStream<'a, GeoAddCommand>,
    ) -> ResponseStream<'a, GeoAddCommand, i64>;

    /// Distance between two members in the command's metric, `None` when
    /// either member is missing.
    fn geo_dist<'a>(
        &'a self,
        commands: CommandStream<'a, GeoDistCommand>,
    ) -> ResponseStream<'a, GeoDistCommand, Option<Distance>>;

    /// Geohash strings, one slot per requested member.
    fn geo_hash<'a>(
        &'a self,
        commands: CommandStream<'a, GeoHashCommand>,
    ) -> ResponseStream<'a, GeoHashCommand, Vec<Option<String>>>;

    /// Positions, one slot per requested member.
    fn geo_pos<'a>(
        &'a self,
        commands: CommandStream<'a, GeoPosCommand>,
    ) -> ResponseStream<'a, GeoPosCommand, Vec<Option<Point>>>;

    async fn geo_add_one(&self, key: Bytes, point: Point, member: Bytes) -> Result<i64> {
        let command = GeoAddCommand::location(GeoLocation::new(member, point)).to(key);
        single_output(self.geo_add(once(command)), "GEOADD").await
    }

    async fn geo_add_all(&self, key: Bytes, locations: Vec<GeoLocation>) -> Result<i64> {
        single_output(self.geo_add(once(GeoAddCommand::locations(locations).to(key))), "GEOADD")
            .await
    }

    async fn geo_dist_between(
        &self,
        key: Bytes,
        from: Bytes,
        to: Bytes,
    ) -> Result<Option<Distance>> {
        self.geo_dist_between_in(key, from, to, Metric::Meters).await
    }

    async fn geo_dist_between_in(
        &self,
        key: Bytes,
        from: Bytes,
        to: Bytes,
        metric: Metric,
    ) -> Result<Option<Distance>> {
        let command = GeoDistCommand::between(from, to)
            .in_metric(metric)
            .for_key(key);
        single_output(self.geo_dist(once(command)), "GEODIST").await
    }

    async fn geo_hash_of(&self, key: Bytes, members: Vec<Bytes>) -> Result<Vec<Option<String>>> {
        single_output(self.geo_hash(once(GeoHashCommand::members(members).of(key))), "GEOHASH")
            .await
    }

    async fn geo_pos_of(&self, key: Bytes, members: Vec<Bytes>) -> Result<Vec<Option<Point>>> {
        single_output(self.geo_pos(once(GeoPosCommand::members(members).of(key))), "GEOPOS").await
    }
}
