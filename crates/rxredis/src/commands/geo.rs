use async_trait::async_trait;

use rxredis_core::geo::{
    Distance, GeoAddCommand, GeoDistCommand, GeoHashCommand, GeoLocation, GeoPosCommand, Point,
    ReactiveGeoCommands,
};
use rxredis_core::range::format_score;
use rxredis_core::{Command, CommandStream, ResponseStream, Result};

use super::{keyed, push_all};
use crate::decode;
use crate::driver::Driver;
use crate::execute::Executor;

/// Geo commands over a [`Driver`].
pub struct RedisGeoCommands<D> {
    executor: Executor<D>,
}

impl<D> RedisGeoCommands<D> {
    pub(crate) fn new(executor: Executor<D>) -> Self {
        Self { executor }
    }
}

fn geo_add(command: &GeoAddCommand) -> Result<redis::Cmd> {
    let mut cmd = keyed(command.name(), &command.key)?;
    for GeoLocation { name, point } in &command.locations {
        cmd.arg(format_score(point.longitude()))
            .arg(format_score(point.latitude()))
            .arg(&name[..]);
    }
    Ok(cmd)
}

fn geo_dist(command: &GeoDistCommand) -> Result<redis::Cmd> {
    let mut cmd = keyed(command.name(), &command.key)?;
    cmd.arg(&command.from[..])
        .arg(&command.to[..])
        .arg(command.metric.unit());
    Ok(cmd)
}

fn geo_hash(command: &GeoHashCommand) -> Result<redis::Cmd> {
    let mut cmd = keyed(command.name(), &command.key)?;
    push_all(&mut cmd, &command.members);
    Ok(cmd)
}

fn geo_pos(command: &GeoPosCommand) -> Result<redis::Cmd> {
    let mut cmd = keyed(command.name(), &command.key)?;
    push_all(&mut cmd, &command.members);
    Ok(cmd)
}

#[async_trait]
impl<D: Driver> ReactiveGeoCommands for RedisGeoCommands<D> {
    fn geo_add<'a>(
        &'a self,
        commands: CommandStream<'a, GeoAddCommand>,
    ) -> ResponseStream<'a, GeoAddCommand, i64> {
        self.executor
            .execute(commands, geo_add, |_, reply| decode::integer(reply))
    }

    fn geo_dist<'a>(
        &'a self,
        commands: CommandStream<'a, GeoDistCommand>,
    ) -> ResponseStream<'a, GeoDistCommand, Option<Distance>> {
        // The reply is already expressed in the requested unit.
        self.executor.execute(commands, geo_dist, |command, reply| {
            decode::distance(reply, command.metric)
        })
    }

    fn geo_hash<'a>(
        &'a self,
        commands: CommandStream<'a, GeoHashCommand>,
    ) -> ResponseStream<'a, GeoHashCommand, Vec<Option<String>>> {
        self.executor
            .execute(commands, geo_hash, |_, reply| decode::geohashes(reply))
    }

    fn geo_pos<'a>(
        &'a self,
        commands: CommandStream<'a, GeoPosCommand>,
    ) -> ResponseStream<'a, GeoPosCommand, Vec<Option<Point>>> {
        self.executor
            .execute(commands, geo_pos, |_, reply| decode::positions(reply))
    }
}
