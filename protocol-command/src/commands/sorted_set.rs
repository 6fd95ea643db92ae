use bytes::Bytes;

use crate::boundary::{LexBoundary, RangeQuery, ScoreBoundary};
use crate::command::{Builder, CommandSpec, RequestType};
use crate::error::{Result, invalid_argument, unsupported_combination};
use crate::geo::ConditionalChange;
use crate::normalize::Entries;
use crate::scan::ScanOptions;
use crate::token;

// ── ZADD ────────────────────────────────────────────────────────────────

/// `GT` / `LT` for ZADD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateByScore {
    LessThan,
    GreaterThan,
}

impl UpdateByScore {
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            UpdateByScore::LessThan => b"LT",
            UpdateByScore::GreaterThan => b"GT",
        }
    }
}

/// Options for ZADD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZAddOptions {
    pub conditional_change: Option<ConditionalChange>,
    /// Only update when the new score compares as given. Cannot be combined
    /// with [`ConditionalChange::OnlyIfDoesNotExist`].
    pub update_by: Option<UpdateByScore>,
    /// Count changed members, not only added ones (`CH`).
    pub changed: bool,
}

impl ZAddOptions {
    fn encode(&self, cmd: &mut Builder) -> Result<()> {
        if self.conditional_change == Some(ConditionalChange::OnlyIfDoesNotExist)
            && self.update_by.is_some()
        {
            return Err(invalid_argument("ZADD cannot combine NX with GT or LT"));
        }
        if let Some(change) = self.conditional_change {
            cmd.keyword(change.as_bytes());
        }
        if let Some(update) = self.update_by {
            cmd.keyword(update.as_bytes());
        }
        cmd.flag(self.changed, b"CH");
        Ok(())
    }
}

/// `ZADD key [NX|XX] [GT|LT] [CH] score member [score member ...]`
///
/// Entries map members to scores; infinite scores are valid, NaN is not.
pub fn create_zadd(
    key: impl AsRef<[u8]>,
    members_scores: Entries<f64>,
    options: &ZAddOptions,
) -> Result<CommandSpec> {
    let members_scores = members_scores.normalize()?;
    super::non_empty("member/score entries", &members_scores)?;
    let mut cmd = Builder::new(RequestType::ZAdd);
    cmd.arg(key);
    options.encode(&mut cmd)?;
    for (member, score) in members_scores {
        cmd.float(score).token(member);
    }
    Ok(cmd.finish())
}

/// `ZADD key [NX|XX] [GT|LT] [CH] INCR increment member`
pub fn create_zadd_incr(
    key: impl AsRef<[u8]>,
    member: impl AsRef<[u8]>,
    increment: f64,
    options: &ZAddOptions,
) -> Result<CommandSpec> {
    let increment = token::not_nan("increment", increment)?;
    let mut cmd = Builder::new(RequestType::ZAdd);
    cmd.arg(key);
    options.encode(&mut cmd)?;
    cmd.keyword(b"INCR").float(increment).arg(member);
    Ok(cmd.finish())
}

/// `ZINCRBY key increment member`
pub fn create_zincr_by(
    key: impl AsRef<[u8]>,
    increment: f64,
    member: impl AsRef<[u8]>,
) -> Result<CommandSpec> {
    let increment = token::not_nan("increment", increment)?;
    let mut cmd = Builder::new(RequestType::ZIncrBy);
    cmd.arg(key).float(increment).arg(member);
    Ok(cmd.finish())
}

// ── Members ─────────────────────────────────────────────────────────────

pub fn create_zrem<I>(key: impl AsRef<[u8]>, members: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut cmd = Builder::new(RequestType::ZRem);
    cmd.arg(key).args(members);
    cmd.finish()
}

pub fn create_zcard(key: impl AsRef<[u8]>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::ZCard);
    cmd.arg(key);
    cmd.finish()
}

pub fn create_zscore(key: impl AsRef<[u8]>, member: impl AsRef<[u8]>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::ZScore);
    cmd.arg(key).arg(member);
    cmd.finish()
}

pub fn create_zmscore<I>(key: impl AsRef<[u8]>, members: I) -> CommandSpec
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut cmd = Builder::new(RequestType::ZMScore);
    cmd.arg(key).args(members);
    cmd.finish()
}

/// `ZRANK key member`
pub fn create_zrank(key: impl AsRef<[u8]>, member: impl AsRef<[u8]>, with_score: bool) -> CommandSpec {
    rank(RequestType::ZRank, key, member, with_score)
}

/// `ZREVRANK key member [WITHSCORE]`
pub fn create_zrevrank(
    key: impl AsRef<[u8]>,
    member: impl AsRef<[u8]>,
    with_score: bool,
) -> CommandSpec {
    rank(RequestType::ZRevRank, key, member, with_score)
}

fn rank(
    request_type: RequestType,
    key: impl AsRef<[u8]>,
    member: impl AsRef<[u8]>,
    with_score: bool,
) -> CommandSpec {
    let mut cmd = Builder::new(request_type);
    cmd.arg(key).arg(member).flag(with_score, b"WITHSCORE");
    cmd.finish()
}

// ── Ranges ──────────────────────────────────────────────────────────────

/// `ZCOUNT key min max`
pub fn create_zcount(
    key: impl AsRef<[u8]>,
    min: &ScoreBoundary,
    max: &ScoreBoundary,
) -> Result<CommandSpec> {
    let mut cmd = Builder::new(RequestType::ZCount);
    cmd.arg(key)
        .token(min.encode_score()?)
        .token(max.encode_score()?);
    Ok(cmd.finish())
}

/// `ZLEXCOUNT key min max`
pub fn create_zlexcount(key: impl AsRef<[u8]>, min: &LexBoundary, max: &LexBoundary) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::ZLexCount);
    cmd.arg(key).token(min.encode_lex()).token(max.encode_lex());
    cmd.finish()
}

/// `ZRANGE key start end [BYSCORE|BYLEX] [REV] [LIMIT o c]`
///
/// With `reverse`, pass the higher endpoint as the range's start.
pub fn create_zrange(key: impl AsRef<[u8]>, query: &RangeQuery, reverse: bool) -> Result<CommandSpec> {
    let mut cmd = Builder::new(RequestType::ZRange);
    cmd.arg(key);
    query.encode(&mut cmd, reverse)?;
    Ok(cmd.finish())
}

/// `ZRANGE ... WITHSCORES`. Lex ranges have no scores to return.
pub fn create_zrange_with_scores(
    key: impl AsRef<[u8]>,
    query: &RangeQuery,
    reverse: bool,
) -> Result<CommandSpec> {
    if matches!(query, RangeQuery::ByLex { .. }) {
        return Err(unsupported_combination(
            "WITHSCORES cannot be used with a lex range",
        ));
    }
    let mut cmd = Builder::new(RequestType::ZRange);
    cmd.arg(key);
    query.encode(&mut cmd, reverse)?;
    cmd.keyword(b"WITHSCORES");
    Ok(cmd.finish())
}

/// `ZRANGESTORE destination source start end [BYSCORE|BYLEX] [REV] [LIMIT o c]`
pub fn create_zrangestore(
    destination: impl AsRef<[u8]>,
    source: impl AsRef<[u8]>,
    query: &RangeQuery,
    reverse: bool,
) -> Result<CommandSpec> {
    let mut cmd = Builder::new(RequestType::ZRangeStore);
    cmd.arg(destination).arg(source);
    query.encode(&mut cmd, reverse)?;
    Ok(cmd.finish())
}

pub fn create_zremrangebyrank(key: impl AsRef<[u8]>, start: i64, end: i64) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::ZRemRangeByRank);
    cmd.arg(key).int(start).int(end);
    cmd.finish()
}

pub fn create_zremrangebylex(
    key: impl AsRef<[u8]>,
    min: &LexBoundary,
    max: &LexBoundary,
) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::ZRemRangeByLex);
    cmd.arg(key).token(min.encode_lex()).token(max.encode_lex());
    cmd.finish()
}

pub fn create_zremrangebyscore(
    key: impl AsRef<[u8]>,
    min: &ScoreBoundary,
    max: &ScoreBoundary,
) -> Result<CommandSpec> {
    let mut cmd = Builder::new(RequestType::ZRemRangeByScore);
    cmd.arg(key)
        .token(min.encode_score()?)
        .token(max.encode_score()?);
    Ok(cmd.finish())
}

// ── Pops ────────────────────────────────────────────────────────────────

/// Which end ZMPOP pops from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreFilter {
    Max,
    Min,
}

impl ScoreFilter {
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            ScoreFilter::Max => b"MAX",
            ScoreFilter::Min => b"MIN",
        }
    }
}

/// `ZPOPMIN key [count]`
pub fn create_zpopmin(key: impl AsRef<[u8]>, count: Option<u64>) -> CommandSpec {
    pop(RequestType::ZPopMin, key, count)
}

/// `ZPOPMAX key [count]`
pub fn create_zpopmax(key: impl AsRef<[u8]>, count: Option<u64>) -> CommandSpec {
    pop(RequestType::ZPopMax, key, count)
}

fn pop(request_type: RequestType, key: impl AsRef<[u8]>, count: Option<u64>) -> CommandSpec {
    let mut cmd = Builder::new(request_type);
    cmd.arg(key);
    if let Some(count) = count {
        cmd.int(count);
    }
    cmd.finish()
}

/// `BZPOPMIN key [key ...] timeout`
pub fn create_bzpopmin<I>(keys: I, timeout: f64) -> Result<CommandSpec>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    blocking_pop(RequestType::BZPopMin, keys, timeout)
}

/// `BZPOPMAX key [key ...] timeout`
pub fn create_bzpopmax<I>(keys: I, timeout: f64) -> Result<CommandSpec>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    blocking_pop(RequestType::BZPopMax, keys, timeout)
}

fn blocking_pop<I>(request_type: RequestType, keys: I, timeout: f64) -> Result<CommandSpec>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let timeout = super::timeout(timeout)?;
    let keys = super::collect(keys);
    super::non_empty("keys", &keys)?;
    let mut cmd = Builder::new(request_type);
    for key in keys {
        cmd.token(key);
    }
    cmd.float(timeout);
    Ok(cmd.finish())
}

/// `ZMPOP numkeys key [key ...] MIN|MAX [COUNT n]`
pub fn create_zmpop<I>(keys: I, filter: ScoreFilter, count: Option<u64>) -> Result<CommandSpec>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut cmd = Builder::new(RequestType::ZMPop);
    multi_pop(&mut cmd, keys, filter, count)?;
    Ok(cmd.finish())
}

/// `BZMPOP timeout numkeys key [key ...] MIN|MAX [COUNT n]`
pub fn create_bzmpop<I>(
    keys: I,
    filter: ScoreFilter,
    timeout: f64,
    count: Option<u64>,
) -> Result<CommandSpec>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let timeout = super::timeout(timeout)?;
    let mut cmd = Builder::new(RequestType::BZMPop);
    cmd.float(timeout);
    multi_pop(&mut cmd, keys, filter, count)?;
    Ok(cmd.finish())
}

fn multi_pop<I>(cmd: &mut Builder, keys: I, filter: ScoreFilter, count: Option<u64>) -> Result<()>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let keys = super::collect(keys);
    super::non_empty("keys", &keys)?;
    cmd.int(keys.len());
    for key in keys {
        cmd.token(key);
    }
    cmd.keyword(filter.as_bytes());
    if let Some(count) = count {
        cmd.keyword(b"COUNT").int(count);
    }
    Ok(())
}

// ── Set algebra ─────────────────────────────────────────────────────────

/// How scores of a member present in several inputs are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aggregate {
    Sum,
    Min,
    Max,
}

impl Aggregate {
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            Aggregate::Sum => b"SUM",
            Aggregate::Min => b"MIN",
            Aggregate::Max => b"MAX",
        }
    }
}

/// Input keys of ZINTER / ZUNION and their STORE variants.
#[derive(Debug, Clone, PartialEq)]
pub enum WeightedKeys {
    Keys(Vec<Bytes>),
    /// Each key paired with a score multiplier, sent as `WEIGHTS`.
    Weighted(Vec<(Bytes, f64)>),
}

impl WeightedKeys {
    pub fn keys<I>(keys: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        WeightedKeys::Keys(super::collect(keys))
    }

    pub fn weighted<K: AsRef<[u8]>>(pairs: impl IntoIterator<Item = (K, f64)>) -> Self {
        WeightedKeys::Weighted(
            pairs
                .into_iter()
                .map(|(k, w)| (token::bytes(k), w))
                .collect(),
        )
    }

    fn len(&self) -> usize {
        match self {
            WeightedKeys::Keys(keys) => keys.len(),
            WeightedKeys::Weighted(pairs) => pairs.len(),
        }
    }

    /// Append `numkeys key [key ...] [WEIGHTS w [w ...]]`.
    fn encode(&self, cmd: &mut Builder) -> Result<()> {
        if self.len() == 0 {
            return Err(invalid_argument("keys must not be empty"));
        }
        cmd.int(self.len());
        match self {
            WeightedKeys::Keys(keys) => {
                for key in keys {
                    cmd.token(key.clone());
                }
            }
            WeightedKeys::Weighted(pairs) => {
                for (key, _) in pairs {
                    cmd.token(key.clone());
                }
                cmd.keyword(b"WEIGHTS");
                for (_, weight) in pairs {
                    cmd.float(token::not_nan("weight", *weight)?);
                }
            }
        }
        Ok(())
    }
}

fn combine(
    request_type: RequestType,
    destination: Option<&[u8]>,
    keys: &WeightedKeys,
    aggregate: Option<Aggregate>,
    with_scores: bool,
) -> Result<CommandSpec> {
    let mut cmd = Builder::new(request_type);
    if let Some(destination) = destination {
        cmd.arg(destination);
    }
    keys.encode(&mut cmd)?;
    if let Some(aggregate) = aggregate {
        cmd.keyword(b"AGGREGATE").keyword(aggregate.as_bytes());
    }
    cmd.flag(with_scores, b"WITHSCORES");
    Ok(cmd.finish())
}

/// `ZINTER numkeys key ... [WEIGHTS ...] [AGGREGATE a] [WITHSCORES]`
pub fn create_zinter(
    keys: &WeightedKeys,
    aggregate: Option<Aggregate>,
    with_scores: bool,
) -> Result<CommandSpec> {
    combine(RequestType::ZInter, None, keys, aggregate, with_scores)
}

/// `ZUNION numkeys key ... [WEIGHTS ...] [AGGREGATE a] [WITHSCORES]`
pub fn create_zunion(
    keys: &WeightedKeys,
    aggregate: Option<Aggregate>,
    with_scores: bool,
) -> Result<CommandSpec> {
    combine(RequestType::ZUnion, None, keys, aggregate, with_scores)
}

/// `ZINTERSTORE destination numkeys key ... [WEIGHTS ...] [AGGREGATE a]`
pub fn create_zinterstore(
    destination: impl AsRef<[u8]>,
    keys: &WeightedKeys,
    aggregate: Option<Aggregate>,
) -> Result<CommandSpec> {
    combine(
        RequestType::ZInterStore,
        Some(destination.as_ref()),
        keys,
        aggregate,
        false,
    )
}

/// `ZUNIONSTORE destination numkeys key ... [WEIGHTS ...] [AGGREGATE a]`
pub fn create_zunionstore(
    destination: impl AsRef<[u8]>,
    keys: &WeightedKeys,
    aggregate: Option<Aggregate>,
) -> Result<CommandSpec> {
    combine(
        RequestType::ZUnionStore,
        Some(destination.as_ref()),
        keys,
        aggregate,
        false,
    )
}

/// `ZINTERCARD numkeys key [key ...] [LIMIT n]`
pub fn create_zintercard<I>(keys: I, limit: Option<u64>) -> Result<CommandSpec>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let keys = super::collect(keys);
    super::non_empty("keys", &keys)?;
    let mut cmd = Builder::new(RequestType::ZInterCard);
    cmd.int(keys.len());
    for key in keys {
        cmd.token(key);
    }
    if let Some(limit) = limit {
        cmd.keyword(b"LIMIT").int(limit);
    }
    Ok(cmd.finish())
}

/// `ZDIFF numkeys key [key ...] [WITHSCORES]`
pub fn create_zdiff<I>(keys: I, with_scores: bool) -> Result<CommandSpec>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let keys = super::collect(keys);
    super::non_empty("keys", &keys)?;
    let mut cmd = Builder::new(RequestType::ZDiff);
    cmd.int(keys.len());
    for key in keys {
        cmd.token(key);
    }
    cmd.flag(with_scores, b"WITHSCORES");
    Ok(cmd.finish())
}

/// `ZDIFFSTORE destination numkeys key [key ...]`
pub fn create_zdiffstore<I>(destination: impl AsRef<[u8]>, keys: I) -> Result<CommandSpec>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let keys = super::collect(keys);
    super::non_empty("keys", &keys)?;
    let mut cmd = Builder::new(RequestType::ZDiffStore);
    cmd.arg(destination).int(keys.len());
    for key in keys {
        cmd.token(key);
    }
    Ok(cmd.finish())
}

// ── Sampling and iteration ──────────────────────────────────────────────

/// `ZRANDMEMBER key`
pub fn create_zrandmember(key: impl AsRef<[u8]>) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::ZRandMember);
    cmd.arg(key);
    cmd.finish()
}

/// `ZRANDMEMBER key count [WITHSCORES]`; a negative count allows repeats.
pub fn create_zrandmember_count(key: impl AsRef<[u8]>, count: i64, with_scores: bool) -> CommandSpec {
    let mut cmd = Builder::new(RequestType::ZRandMember);
    cmd.arg(key).int(count).flag(with_scores, b"WITHSCORES");
    cmd.finish()
}

/// `ZSCAN key cursor [MATCH p] [COUNT n] [NOSCORES]`
pub fn create_zscan(
    key: impl AsRef<[u8]>,
    cursor: impl AsRef<[u8]>,
    options: &ScanOptions,
) -> Result<CommandSpec> {
    let mut cmd = Builder::new(RequestType::ZScan);
    cmd.arg(key).arg(cursor);
    options.encode(&mut cmd, RequestType::ZScan)?;
    Ok(cmd.finish())
}
