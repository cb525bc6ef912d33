//! In-process keyspace holding sorted sets and HyperLogLogs.
//!
//! Replies are shaped like a RESP2 server's so the decoders see the same
//! values they would get from Redis: scores are bulk strings, `WITHSCORES`
//! replies are flat arrays and missing members are nil.
//!
//! HyperLogLogs keep the exact set of added values, so `PFCOUNT` is exact
//! where Redis would only estimate.

use std::collections::{HashMap, HashSet};

use bytes::Bytes;
use redis::Value;

use rxredis_core::geo::{hash, Metric, Point};
use rxredis_core::Result;

use super::args::{
    command_name, is_option, parse_f64, parse_i64, server_error, syntax_error, wrong_arity,
    wrong_type, ScoreBound,
};

/// A value stored under a key.
#[derive(Debug, Clone)]
enum Entry {
    SortedSet(SortedSet),
    HyperLogLog(HashSet<Bytes>),
}

/// Members and their scores.
#[derive(Debug, Clone, Default)]
struct SortedSet {
    scores: HashMap<Bytes, f64>,
}

impl SortedSet {
    /// Members ordered by score, then lexicographically.
    fn ascending(&self) -> Vec<(Bytes, f64)> {
        let mut entries: Vec<(Bytes, f64)> = self
            .scores
            .iter()
            .map(|(member, score)| (member.clone(), *score))
            .collect();
        entries.sort_by(|(a, a_score), (b, b_score)| {
            a_score.total_cmp(b_score).then_with(|| a.cmp(b))
        });
        entries
    }

    fn ordered(&self, reverse: bool) -> Vec<(Bytes, f64)> {
        let mut entries = self.ascending();
        if reverse {
            entries.reverse();
        }
        entries
    }

    fn rank(&self, member: &[u8], reverse: bool) -> Option<usize> {
        self.ordered(reverse)
            .iter()
            .position(|(candidate, _)| candidate.as_ref() == member)
    }
}

/// `ZADD`/`GEOADD` update flags.
#[derive(Debug, Clone, Copy, Default)]
struct AddOptions {
    nx: bool,
    xx: bool,
    ch: bool,
}

impl AddOptions {
    /// Consumes leading `NX`, `XX` and `CH` flags, returning the rest.
    fn parse(args: &[Bytes]) -> Result<(Self, &[Bytes])> {
        let mut options = Self::default();
        let mut rest = args;
        while let Some((arg, tail)) = rest.split_first() {
            if is_option(arg, "NX") {
                options.nx = true;
            } else if is_option(arg, "XX") {
                options.xx = true;
            } else if is_option(arg, "CH") {
                options.ch = true;
            } else {
                break;
            }
            rest = tail;
        }
        if options.nx && options.xx {
            return Err(server_error(
                "ERR XX and NX options at the same time are not compatible",
            ));
        }
        Ok((options, rest))
    }
}

/// Clamps `start`/`stop` rank indices the way Redis does.
fn rank_window(len: usize, start: i64, stop: i64) -> Option<(usize, usize)> {
    let len = len as i64;
    let start = if start < 0 { start + len } else { start }.max(0);
    let stop = if stop < 0 { stop + len } else { stop };
    if start > stop || start >= len {
        return None;
    }
    Some((start as usize, stop.min(len - 1) as usize))
}

fn in_score_range(score: f64, min: &ScoreBound, max: &ScoreBound) -> bool {
    min.admits_from_below(score) && max.admits_from_above(score)
}

fn bulk(bytes: impl Into<Vec<u8>>) -> Value {
    Value::BulkString(bytes.into())
}

fn int_reply(value: usize) -> Value {
    Value::Int(value as i64)
}

fn score_reply(score: f64) -> Value {
    if score.is_infinite() {
        let sign = if score < 0.0 { "-" } else { "" };
        return bulk(format!("{}inf", sign));
    }
    bulk(score.to_string())
}

fn members_reply(entries: impl IntoIterator<Item = (Bytes, f64)>, with_scores: bool) -> Value {
    let mut values = Vec::new();
    for (member, score) in entries {
        values.push(bulk(member.to_vec()));
        if with_scores {
            values.push(score_reply(score));
        }
    }
    Value::Array(values)
}

/// The in-memory keyspace.
#[derive(Debug, Clone, Default)]
pub struct Store {
    entries: HashMap<Bytes, Entry>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes one command given as raw arguments, name first.
    pub fn apply(&mut self, argv: &[Bytes]) -> Result<Value> {
        let name = command_name(argv);
        let args = argv.get(1..).unwrap_or_default();
        match name.as_str() {
            "PFADD" => self.pfadd(args),
            "PFCOUNT" => self.pfcount(args),
            "PFMERGE" => self.pfmerge(args),
            "ZADD" => self.zadd(args),
            "ZREM" => self.zrem(args),
            "ZINCRBY" => self.zincrby(args),
            "ZRANK" => self.zrank(args, false),
            "ZREVRANK" => self.zrank(args, true),
            "ZRANGE" => self.zrange(args, false),
            "ZREVRANGE" => self.zrange(args, true),
            "ZRANGEBYSCORE" => self.zrangebyscore(args, false),
            "ZREVRANGEBYSCORE" => self.zrangebyscore(args, true),
            "ZCOUNT" => self.zcount(args),
            "ZCARD" => self.zcard(args),
            "ZSCORE" => self.zscore(args),
            "ZREMRANGEBYRANK" => self.zremrangebyrank(args),
            "ZREMRANGEBYSCORE" => self.zremrangebyscore(args),
            "GEOADD" => self.geoadd(args),
            "GEODIST" => self.geodist(args),
            "GEOHASH" => self.geohash(args),
            "GEOPOS" => self.geopos(args),
            "DEL" => self.del(args),
            _ => Err(server_error(format!(
                "ERR unknown command '{}'",
                name.to_ascii_lowercase()
            ))),
        }
    }

    // ------------------------------------------------------------------------
    // Typed access
    // ------------------------------------------------------------------------

    fn sorted_set(&self, key: &Bytes) -> Result<Option<&SortedSet>> {
        match self.entries.get(key) {
            Some(Entry::SortedSet(set)) => Ok(Some(set)),
            Some(_) => Err(wrong_type()),
            None => Ok(None),
        }
    }

    fn sorted_set_mut(&mut self, key: &Bytes) -> Result<Option<&mut SortedSet>> {
        match self.entries.get_mut(key) {
            Some(Entry::SortedSet(set)) => Ok(Some(set)),
            Some(_) => Err(wrong_type()),
            None => Ok(None),
        }
    }

    fn hyperloglog(&self, key: &Bytes) -> Result<Option<&HashSet<Bytes>>> {
        match self.entries.get(key) {
            Some(Entry::HyperLogLog(values)) => Ok(Some(values)),
            Some(_) => Err(wrong_type()),
            None => Ok(None),
        }
    }

    /// Redis never keeps empty sorted sets around.
    fn drop_if_empty(&mut self, key: &Bytes) {
        if matches!(self.entries.get(key), Some(Entry::SortedSet(set)) if set.scores.is_empty()) {
            self.entries.remove(key);
        }
    }

    // ------------------------------------------------------------------------
    // HyperLogLog
    // ------------------------------------------------------------------------

    fn pfadd(&mut self, args: &[Bytes]) -> Result<Value> {
        let Some((key, values)) = args.split_first() else {
            return Err(wrong_arity("PFADD"));
        };
        let created = self.hyperloglog(key)?.is_none();
        let entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(|| Entry::HyperLogLog(HashSet::new()));
        let Entry::HyperLogLog(set) = entry else {
            return Err(wrong_type());
        };
        let mut changed = created;
        for value in values {
            changed |= set.insert(value.clone());
        }
        Ok(Value::Int(i64::from(changed)))
    }

    fn pfcount(&self, keys: &[Bytes]) -> Result<Value> {
        if keys.is_empty() {
            return Err(wrong_arity("PFCOUNT"));
        }
        let mut union: HashSet<&Bytes> = HashSet::new();
        for key in keys {
            if let Some(values) = self.hyperloglog(key)? {
                union.extend(values);
            }
        }
        Ok(int_reply(union.len()))
    }

    fn pfmerge(&mut self, args: &[Bytes]) -> Result<Value> {
        let Some((destination, sources)) = args.split_first() else {
            return Err(wrong_arity("PFMERGE"));
        };
        let mut merged = self
            .hyperloglog(destination)?
            .cloned()
            .unwrap_or_default();
        for source in sources {
            if let Some(values) = self.hyperloglog(source)? {
                merged.extend(values.iter().cloned());
            }
        }
        self.entries
            .insert(destination.clone(), Entry::HyperLogLog(merged));
        Ok(Value::Okay)
    }

    // ------------------------------------------------------------------------
    // Sorted sets
    // ------------------------------------------------------------------------

    fn add_members(
        &mut self,
        key: &Bytes,
        members: Vec<(f64, Bytes)>,
        options: AddOptions,
    ) -> Result<Value> {
        if self.sorted_set(key)?.is_none() {
            if options.xx {
                return Ok(Value::Int(0));
            }
            self.entries
                .insert(key.clone(), Entry::SortedSet(SortedSet::default()));
        }
        let Some(set) = self.sorted_set_mut(key)? else {
            return Ok(Value::Int(0));
        };

        let (mut added, mut changed) = (0, 0);
        for (score, member) in members {
            match set.scores.get_mut(&member) {
                Some(_) if options.nx => {}
                Some(current) => {
                    if *current != score {
                        *current = score;
                        changed += 1;
                    }
                }
                None if options.xx => {}
                None => {
                    set.scores.insert(member, score);
                    added += 1;
                }
            }
        }
        self.drop_if_empty(key);

        Ok(int_reply(if options.ch { added + changed } else { added }))
    }

    fn zadd(&mut self, args: &[Bytes]) -> Result<Value> {
        let Some((key, rest)) = args.split_first() else {
            return Err(wrong_arity("ZADD"));
        };
        let (options, pairs) = AddOptions::parse(rest)?;
        if pairs.is_empty() {
            return Err(wrong_arity("ZADD"));
        }
        if pairs.len() % 2 != 0 {
            return Err(syntax_error());
        }
        let members = pairs
            .chunks(2)
            .map(|pair| Ok((parse_f64(&pair[0])?, pair[1].clone())))
            .collect::<Result<Vec<_>>>()?;
        self.add_members(key, members, options)
    }

    fn zrem(&mut self, args: &[Bytes]) -> Result<Value> {
        let [key, members @ ..] = args else {
            return Err(wrong_arity("ZREM"));
        };
        if members.is_empty() {
            return Err(wrong_arity("ZREM"));
        }
        let Some(set) = self.sorted_set_mut(key)? else {
            return Ok(Value::Int(0));
        };
        let removed = members
            .iter()
            .filter(|member| set.scores.remove(*member).is_some())
            .count();
        self.drop_if_empty(key);
        Ok(int_reply(removed))
    }

    fn zincrby(&mut self, args: &[Bytes]) -> Result<Value> {
        let [key, increment, member] = args else {
            return Err(wrong_arity("ZINCRBY"));
        };
        let increment = parse_f64(increment)?;
        let current = self
            .sorted_set(key)?
            .and_then(|set| set.scores.get(member).copied())
            .unwrap_or(0.0);
        let score = current + increment;
        if score.is_nan() {
            return Err(server_error("ERR resulting score is not a number (NaN)"));
        }
        let entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(|| Entry::SortedSet(SortedSet::default()));
        if let Entry::SortedSet(set) = entry {
            set.scores.insert(member.clone(), score);
        }
        Ok(score_reply(score))
    }

    fn zrank(&self, args: &[Bytes], reverse: bool) -> Result<Value> {
        let [key, member] = args else {
            return Err(wrong_arity(if reverse { "ZREVRANK" } else { "ZRANK" }));
        };
        let rank = self
            .sorted_set(key)?
            .and_then(|set| set.rank(member, reverse));
        Ok(rank.map_or(Value::Nil, int_reply))
    }

    fn zrange(&self, args: &[Bytes], reverse: bool) -> Result<Value> {
        let name = if reverse { "ZREVRANGE" } else { "ZRANGE" };
        let (key, start, stop, options) = match args {
            [key, start, stop, options @ ..] => (key, start, stop, options),
            _ => return Err(wrong_arity(name)),
        };
        let with_scores = match options {
            [] => false,
            [option] if is_option(option, "WITHSCORES") => true,
            _ => return Err(syntax_error()),
        };
        let (start, stop) = (parse_i64(start)?, parse_i64(stop)?);

        let entries = self
            .sorted_set(key)?
            .map(|set| set.ordered(reverse))
            .unwrap_or_default();
        let window = rank_window(entries.len(), start, stop)
            .map(|(first, last)| entries[first..=last].to_vec())
            .unwrap_or_default();
        Ok(members_reply(window, with_scores))
    }

    fn zrangebyscore(&self, args: &[Bytes], reverse: bool) -> Result<Value> {
        let name = if reverse {
            "ZREVRANGEBYSCORE"
        } else {
            "ZRANGEBYSCORE"
        };
        let (key, first, second, mut options) = match args {
            [key, first, second, options @ ..] => (key, first, second, options),
            _ => return Err(wrong_arity(name)),
        };
        // Reverse queries take `max` before `min`.
        let (min, max) = if reverse {
            (ScoreBound::parse(second)?, ScoreBound::parse(first)?)
        } else {
            (ScoreBound::parse(first)?, ScoreBound::parse(second)?)
        };

        let mut with_scores = false;
        let mut limit: Option<(i64, i64)> = None;
        while let Some((option, rest)) = options.split_first() {
            if is_option(option, "WITHSCORES") {
                with_scores = true;
                options = rest;
            } else if is_option(option, "LIMIT") {
                let [offset, count, rest @ ..] = rest else {
                    return Err(syntax_error());
                };
                limit = Some((parse_i64(offset)?, parse_i64(count)?));
                options = rest;
            } else {
                return Err(syntax_error());
            }
        }

        let matching = self
            .sorted_set(key)?
            .map(|set| set.ordered(reverse))
            .unwrap_or_default()
            .into_iter()
            .filter(|(_, score)| in_score_range(*score, &min, &max));
        let selected: Vec<(Bytes, f64)> = match limit {
            Some((offset, _)) if offset < 0 => Vec::new(),
            Some((offset, count)) if count >= 0 => {
                matching.skip(offset as usize).take(count as usize).collect()
            }
            Some((offset, _)) => matching.skip(offset as usize).collect(),
            None => matching.collect(),
        };
        Ok(members_reply(selected, with_scores))
    }

    fn zcount(&self, args: &[Bytes]) -> Result<Value> {
        let [key, min, max] = args else {
            return Err(wrong_arity("ZCOUNT"));
        };
        let (min, max) = (ScoreBound::parse(min)?, ScoreBound::parse(max)?);
        let matching = self.sorted_set(key)?.map_or(0, |set| {
            set.scores
                .values()
                .filter(|score| in_score_range(**score, &min, &max))
                .count()
        });
        Ok(int_reply(matching))
    }

    fn zcard(&self, args: &[Bytes]) -> Result<Value> {
        let [key] = args else {
            return Err(wrong_arity("ZCARD"));
        };
        Ok(int_reply(self.sorted_set(key)?.map_or(0, |set| set.scores.len())))
    }

    fn zscore(&self, args: &[Bytes]) -> Result<Value> {
        let [key, member] = args else {
            return Err(wrong_arity("ZSCORE"));
        };
        let score = self
            .sorted_set(key)?
            .and_then(|set| set.scores.get(member).copied());
        Ok(score.map_or(Value::Nil, score_reply))
    }

    fn zremrangebyrank(&mut self, args: &[Bytes]) -> Result<Value> {
        let [key, start, stop] = args else {
            return Err(wrong_arity("ZREMRANGEBYRANK"));
        };
        let (start, stop) = (parse_i64(start)?, parse_i64(stop)?);
        let Some(set) = self.sorted_set_mut(key)? else {
            return Ok(Value::Int(0));
        };
        let entries = set.ascending();
        let removed = match rank_window(entries.len(), start, stop) {
            Some((first, last)) => {
                for (member, _) in &entries[first..=last] {
                    set.scores.remove(member);
                }
                last - first + 1
            }
            None => 0,
        };
        self.drop_if_empty(key);
        Ok(int_reply(removed))
    }

    fn zremrangebyscore(&mut self, args: &[Bytes]) -> Result<Value> {
        let [key, min, max] = args else {
            return Err(wrong_arity("ZREMRANGEBYSCORE"));
        };
        let (min, max) = (ScoreBound::parse(min)?, ScoreBound::parse(max)?);
        let Some(set) = self.sorted_set_mut(key)? else {
            return Ok(Value::Int(0));
        };
        let before = set.scores.len();
        set.scores
            .retain(|_, score| !in_score_range(*score, &min, &max));
        let removed = before - set.scores.len();
        self.drop_if_empty(key);
        Ok(int_reply(removed))
    }

    // ------------------------------------------------------------------------
    // Geo
    // ------------------------------------------------------------------------

    fn geoadd(&mut self, args: &[Bytes]) -> Result<Value> {
        let Some((key, rest)) = args.split_first() else {
            return Err(wrong_arity("GEOADD"));
        };
        let (options, triples) = AddOptions::parse(rest)?;
        if triples.is_empty() {
            return Err(wrong_arity("GEOADD"));
        }
        if triples.len() % 3 != 0 {
            return Err(server_error(
                "ERR syntax error. Try GEOADD key [x1] [y1] [name1] [x2] [y2] [name2] ... ",
            ));
        }
        let members = triples
            .chunks(3)
            .map(|triple| {
                let point = Point::new(parse_f64(&triple[0])?, parse_f64(&triple[1])?);
                if !hash::is_valid(&point) {
                    return Err(server_error(format!(
                        "ERR invalid longitude,latitude pair {:.6},{:.6}",
                        point.x, point.y
                    )));
                }
                Ok((hash::encode(&point) as f64, triple[2].clone()))
            })
            .collect::<Result<Vec<_>>>()?;
        self.add_members(key, members, options)
    }

    /// Decoded position of each requested member.
    fn positions(&self, key: &Bytes, members: &[Bytes]) -> Result<Vec<Option<Point>>> {
        let set = self.sorted_set(key)?;
        Ok(members
            .iter()
            .map(|member| {
                set.and_then(|set| set.scores.get(member))
                    .map(|score| hash::decode(*score as u64))
            })
            .collect())
    }

    fn geodist(&self, args: &[Bytes]) -> Result<Value> {
        let (key, from, to, unit) = match args {
            [key, from, to] => (key, from, to, None),
            [key, from, to, unit] => (key, from, to, Some(unit)),
            _ => return Err(wrong_arity("GEODIST")),
        };
        let metric = match unit {
            None => Metric::Meters,
            Some(unit) => std::str::from_utf8(unit)
                .ok()
                .and_then(Metric::from_unit)
                .ok_or_else(|| {
                    server_error("ERR unsupported unit provided. please use M, KM, FT, MI")
                })?,
        };
        let positions = self.positions(key, &[from.clone(), to.clone()])?;
        match positions.as_slice() {
            [Some(a), Some(b)] => {
                let meters = hash::distance(a, b);
                Ok(bulk(format!("{:.4}", meters / metric.multiplier())))
            }
            _ => Ok(Value::Nil),
        }
    }

    fn geohash(&self, args: &[Bytes]) -> Result<Value> {
        let Some((key, members)) = args.split_first() else {
            return Err(wrong_arity("GEOHASH"));
        };
        let set = self.sorted_set(key)?;
        let hashes = members
            .iter()
            .map(|member| {
                set.and_then(|set| set.scores.get(member))
                    .map_or(Value::Nil, |score| bulk(hash::to_geohash_string(*score as u64)))
            })
            .collect();
        Ok(Value::Array(hashes))
    }

    fn geopos(&self, args: &[Bytes]) -> Result<Value> {
        let Some((key, members)) = args.split_first() else {
            return Err(wrong_arity("GEOPOS"));
        };
        let positions = self
            .positions(key, members)?
            .into_iter()
            .map(|point| match point {
                Some(point) => Value::Array(vec![
                    bulk(point.x.to_string()),
                    bulk(point.y.to_string()),
                ]),
                None => Value::Nil,
            })
            .collect();
        Ok(Value::Array(positions))
    }

    // ------------------------------------------------------------------------
    // Keys
    // ------------------------------------------------------------------------

    fn del(&mut self, keys: &[Bytes]) -> Result<Value> {
        if keys.is_empty() {
            return Err(wrong_arity("DEL"));
        }
        let removed = keys
            .iter()
            .filter(|key| self.entries.remove(*key).is_some())
            .count();
        Ok(int_reply(removed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(store: &mut Store, args: &[&str]) -> Result<Value> {
        let argv: Vec<Bytes> = args
            .iter()
            .map(|arg| Bytes::copy_from_slice(arg.as_bytes()))
            .collect();
        store.apply(&argv)
    }

    fn bulks(items: &[&str]) -> Value {
        Value::Array(items.iter().map(|item| bulk(item.as_bytes())).collect())
    }

    fn abc() -> Store {
        let mut store = Store::new();
        run(&mut store, &["ZADD", "z", "1", "A", "2", "B", "3", "C"]).unwrap();
        store
    }

    #[test]
    fn test_rank_window_matches_redis_clamping() {
        assert_eq!(rank_window(3, 0, -1), Some((0, 2)));
        assert_eq!(rank_window(3, 1, 2), Some((1, 2)));
        assert_eq!(rank_window(3, -2, -1), Some((1, 2)));
        assert_eq!(rank_window(3, 1, 100), Some((1, 2)));
        assert_eq!(rank_window(3, -100, 0), Some((0, 0)));
        assert_eq!(rank_window(3, 2, 1), None);
        assert_eq!(rank_window(3, 5, 10), None);
        assert_eq!(rank_window(0, 0, -1), None);
    }

    #[test]
    fn test_zadd_counts_only_new_members() {
        let mut store = abc();
        assert_eq!(
            run(&mut store, &["ZADD", "z", "5", "A", "4", "D"]).unwrap(),
            Value::Int(1)
        );
        assert_eq!(
            run(&mut store, &["ZADD", "z", "CH", "6", "A", "5", "E"]).unwrap(),
            Value::Int(2)
        );
    }

    #[test]
    fn test_zadd_nx_and_xx() {
        let mut store = abc();
        assert_eq!(
            run(&mut store, &["ZADD", "z", "NX", "9", "A", "4", "D"]).unwrap(),
            Value::Int(1)
        );
        assert_eq!(run(&mut store, &["ZSCORE", "z", "A"]).unwrap(), bulk("1"));
        assert_eq!(
            run(&mut store, &["ZADD", "z", "XX", "9", "A", "5", "E"]).unwrap(),
            Value::Int(0)
        );
        assert_eq!(run(&mut store, &["ZSCORE", "z", "A"]).unwrap(), bulk("9"));
        assert_eq!(run(&mut store, &["ZSCORE", "z", "E"]).unwrap(), Value::Nil);
        assert!(run(&mut store, &["ZADD", "z", "NX", "XX", "1", "A"]).is_err());
    }

    #[test]
    fn test_zrange_by_rank() {
        let mut store = abc();
        assert_eq!(
            run(&mut store, &["ZRANGE", "z", "1", "2"]).unwrap(),
            bulks(&["B", "C"])
        );
        assert_eq!(
            run(&mut store, &["ZREVRANGE", "z", "0", "0", "WITHSCORES"]).unwrap(),
            bulks(&["C", "3"])
        );
    }

    #[test]
    fn test_zrange_by_score_and_reverse() {
        let mut store = abc();
        assert_eq!(
            run(&mut store, &["ZRANGEBYSCORE", "z", "2", "3"]).unwrap(),
            bulks(&["B", "C"])
        );
        assert_eq!(
            run(&mut store, &["ZREVRANGEBYSCORE", "z", "3", "2"]).unwrap(),
            bulks(&["C", "B"])
        );
        assert_eq!(
            run(&mut store, &["ZRANGEBYSCORE", "z", "(1", "+inf"]).unwrap(),
            bulks(&["B", "C"])
        );
        assert_eq!(
            run(
                &mut store,
                &["ZRANGEBYSCORE", "z", "-inf", "+inf", "LIMIT", "1", "1"]
            )
            .unwrap(),
            bulks(&["B"])
        );
    }

    #[test]
    fn test_zcount_and_zcard() {
        let mut store = abc();
        assert_eq!(
            run(&mut store, &["ZCOUNT", "z", "(1", "3"]).unwrap(),
            Value::Int(2)
        );
        assert_eq!(run(&mut store, &["ZCARD", "z"]).unwrap(), Value::Int(3));
        assert_eq!(run(&mut store, &["ZCARD", "missing"]).unwrap(), Value::Int(0));
    }

    #[test]
    fn test_zrank_and_zrevrank() {
        let mut store = abc();
        assert_eq!(run(&mut store, &["ZRANK", "z", "C"]).unwrap(), Value::Int(2));
        assert_eq!(
            run(&mut store, &["ZREVRANK", "z", "C"]).unwrap(),
            Value::Int(0)
        );
        assert_eq!(run(&mut store, &["ZRANK", "z", "X"]).unwrap(), Value::Nil);
    }

    #[test]
    fn test_zincrby_creates_and_updates() {
        let mut store = Store::new();
        assert_eq!(
            run(&mut store, &["ZINCRBY", "z", "2.5", "A"]).unwrap(),
            bulk("2.5")
        );
        assert_eq!(
            run(&mut store, &["ZINCRBY", "z", "1", "A"]).unwrap(),
            bulk("3.5")
        );
    }

    #[test]
    fn test_removals_drop_empty_sets() {
        let mut store = abc();
        assert_eq!(
            run(&mut store, &["ZREMRANGEBYRANK", "z", "0", "0"]).unwrap(),
            Value::Int(1)
        );
        assert_eq!(
            run(&mut store, &["ZREMRANGEBYSCORE", "z", "2", "2"]).unwrap(),
            Value::Int(1)
        );
        assert_eq!(
            run(&mut store, &["ZREM", "z", "C", "X"]).unwrap(),
            Value::Int(1)
        );
        assert_eq!(run(&mut store, &["DEL", "z"]).unwrap(), Value::Int(0));
    }

    #[test]
    fn test_hyperloglog_union() {
        let mut store = Store::new();
        assert_eq!(
            run(&mut store, &["PFADD", "h1", "a", "b"]).unwrap(),
            Value::Int(1)
        );
        assert_eq!(
            run(&mut store, &["PFADD", "h1", "a"]).unwrap(),
            Value::Int(0)
        );
        run(&mut store, &["PFADD", "h2", "b", "c"]).unwrap();
        assert_eq!(
            run(&mut store, &["PFCOUNT", "h1", "h2"]).unwrap(),
            Value::Int(3)
        );
        assert_eq!(
            run(&mut store, &["PFMERGE", "h3", "h1", "h2"]).unwrap(),
            Value::Okay
        );
        assert_eq!(run(&mut store, &["PFCOUNT", "h3"]).unwrap(), Value::Int(3));
    }

    #[test]
    fn test_wrong_type() {
        let mut store = abc();
        let err = run(&mut store, &["PFADD", "z", "a"]).unwrap_err();
        assert!(err.to_string().contains("WRONGTYPE"));
        run(&mut store, &["PFADD", "h", "a"]).unwrap();
        assert!(run(&mut store, &["ZCARD", "h"]).is_err());
    }

    #[test]
    fn test_geo_commands() {
        let mut store = Store::new();
        assert_eq!(
            run(
                &mut store,
                &[
                    "GEOADD",
                    "Sicily",
                    "13.361389",
                    "38.115556",
                    "Palermo",
                    "15.087269",
                    "37.502669",
                    "Catania"
                ]
            )
            .unwrap(),
            Value::Int(2)
        );
        assert_eq!(
            run(&mut store, &["GEODIST", "Sicily", "Palermo", "Catania"]).unwrap(),
            bulk("166274.1516")
        );
        assert_eq!(
            run(&mut store, &["GEODIST", "Sicily", "Palermo", "Catania", "km"]).unwrap(),
            bulk("166.2742")
        );
        assert_eq!(
            run(&mut store, &["GEODIST", "Sicily", "Palermo", "Nowhere"]).unwrap(),
            Value::Nil
        );
        assert_eq!(
            run(&mut store, &["GEOHASH", "Sicily", "Palermo", "Nowhere"]).unwrap(),
            Value::Array(vec![bulk("sqc8b49rny0"), Value::Nil])
        );
        assert!(matches!(
            run(&mut store, &["GEOPOS", "Sicily", "Palermo"]).unwrap(),
            Value::Array(ref items) if matches!(items.as_slice(), [Value::Array(_)])
        ));
    }

    #[test]
    fn test_geoadd_rejects_out_of_range_points() {
        let mut store = Store::new();
        let err = run(&mut store, &["GEOADD", "Sicily", "200", "0", "x"]).unwrap_err();
        assert!(err.to_string().contains("invalid longitude,latitude pair"));
    }

    #[test]
    fn test_unknown_command() {
        let mut store = Store::new();
        assert!(run(&mut store, &["GET", "k"]).is_err());
    }
}
