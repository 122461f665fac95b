use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::{PlayerId, PlayerPatch, PlayerPatches, PlayerRecord, PlayerRecords};

/// Version token of the authoritative snapshot, as sent by the feed in `ts`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Epoch(f64);

impl Epoch {
    pub fn new(value: f64) -> Option<Self> {
        value.is_finite().then_some(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// A zero `ts` does not count as an established epoch: it is never sent
    /// back and does not unlock diffs.
    pub fn is_established(self) -> bool {
        self.0 != 0.0
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Integral epochs go back on the wire without a trailing `.0`.
        if self.0.fract() == 0.0 && self.0.abs() < 9_007_199_254_740_992.0 {
            write!(f, "{}", self.0 as i64)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeedError {
    #[error("remote error: {0}")]
    Remote(String),
    #[error("invalid reply schema: {0}")]
    Schema(String),
    #[error("out-of-order reply: epoch {received} is older than {current}")]
    StaleReply { received: Epoch, current: Epoch },
    #[error("diff at epoch {received} arrived before any snapshot")]
    Sequence { received: Epoch },
    #[error("reply carries neither data nor diff")]
    MissingPayload,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeedPayload {
    Snapshot(PlayerRecords),
    Diff(PlayerPatches),
}

/// A reply that passed every check and may be committed as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedUpdate {
    pub epoch: Epoch,
    pub payload: FeedPayload,
}

/// Validates a decoded feed reply against the epoch currently held.
///
/// Checks run in a fixed order: remote error, `ts` type, staleness, then
/// payload selection (`data` wins over `diff`). Nothing is mutated here, so a
/// rejected reply can never leave a partial commit behind.
pub fn validate_reply(reply: &Value, current: Option<Epoch>) -> Result<FeedUpdate, FeedError> {
    let reply = reply
        .as_object()
        .ok_or_else(|| FeedError::Schema("reply is not an object".to_string()))?;

    match reply.get("error") {
        None | Some(Value::Null) => {}
        Some(Value::String(message)) => return Err(FeedError::Remote(message.clone())),
        Some(other) => return Err(FeedError::Remote(other.to_string())),
    }

    let epoch = reply
        .get("ts")
        .and_then(Value::as_f64)
        .and_then(Epoch::new)
        .ok_or_else(|| FeedError::Schema("ts is not a number".to_string()))?;

    if let Some(current) = current {
        if epoch < current {
            return Err(FeedError::StaleReply {
                received: epoch,
                current,
            });
        }
    }

    if let Some(entries) = payload_entries(reply.get("data"), "data")? {
        let records = parse_entries::<PlayerRecord>(entries, "data")?;
        return Ok(FeedUpdate {
            epoch,
            payload: FeedPayload::Snapshot(records),
        });
    }

    if let Some(entries) = payload_entries(reply.get("diff"), "diff")? {
        if current.is_none() {
            return Err(FeedError::Sequence { received: epoch });
        }
        let patches = parse_entries::<PlayerPatch>(entries, "diff")?;
        return Ok(FeedUpdate {
            epoch,
            payload: FeedPayload::Diff(patches),
        });
    }

    Err(FeedError::MissingPayload)
}

type Entries<'a> = Vec<(&'a str, &'a Value)>;

fn payload_entries<'a>(
    value: Option<&'a Value>,
    field: &str,
) -> Result<Option<Entries<'a>>, FeedError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(
            map.iter().map(|(key, value)| (key.as_str(), value)).collect(),
        )),
        // The game server encodes an empty table as `[]`.
        Some(Value::Array(items)) if items.is_empty() => Ok(Some(Vec::new())),
        Some(_) => Err(FeedError::Schema(format!("{field} is not an object"))),
    }
}

fn parse_entries<'a, T: Deserialize<'a>>(
    entries: Entries<'a>,
    field: &str,
) -> Result<std::collections::BTreeMap<PlayerId, T>, FeedError> {
    entries
        .into_iter()
        .map(|(key, value)| {
            let id = key.parse::<PlayerId>().map_err(|_| {
                FeedError::Schema(format!("{field}: player key {key:?} is not a numeric id"))
            })?;
            let entry = T::deserialize(value)
                .map_err(|err| FeedError::Schema(format!("{field}[{key}]: {err}")))?;
            Ok((id, entry))
        })
        .collect()
}
