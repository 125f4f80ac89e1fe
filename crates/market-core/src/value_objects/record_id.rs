//! Record identifiers
//!
//! Every persisted record (user, listing, chat, message) is keyed by a
//! [`RecordId`]: a 64-bit, time-ordered value.
//!
//! Structure:
//! - Bits 63-16: Timestamp (milliseconds since [`RecordId::EPOCH`])
//! - Bits 15-0:  Sequence within the millisecond

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

const SEQUENCE_BITS: u32 = 16;
const SEQUENCE_MASK: i64 = (1 << SEQUENCE_BITS) - 1;

/// Time-ordered record identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RecordId(i64);

impl RecordId {
    /// Custom epoch: 2024-01-01 00:00:00 UTC (milliseconds)
    pub const EPOCH: i64 = 1_704_067_200_000;

    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Check if the id is zero (never assigned)
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Milliseconds since the Unix epoch at which the id was generated
    #[inline]
    pub fn timestamp_millis(&self) -> i64 {
        (self.0 >> SEQUENCE_BITS) + Self::EPOCH
    }

    #[inline]
    pub fn sequence(&self) -> u16 {
        (self.0 & SEQUENCE_MASK) as u16
    }

    pub fn parse(s: &str) -> Result<Self, RecordIdParseError> {
        s.trim()
            .parse::<i64>()
            .map(RecordId)
            .map_err(|_| RecordIdParseError(s.to_string()))
    }
}

/// Error returned when a string is not a valid record id
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid record id: {0:?}")]
pub struct RecordIdParseError(pub String);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl std::str::FromStr for RecordId {
    type Err = RecordIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Stored as a JSON string so the persisted documents stay readable by
// JavaScript-based tooling without precision loss.
impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct RecordIdVisitor;

        impl Visitor<'_> for RecordIdVisitor {
            type Value = RecordId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer record id")
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<RecordId, E> {
                Ok(RecordId(value))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<RecordId, E> {
                i64::try_from(value)
                    .map(RecordId)
                    .map_err(|_| E::custom("record id out of range"))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<RecordId, E> {
                RecordId::parse(value).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(RecordIdVisitor)
    }
}

/// Monotonic record id generator
///
/// Ids are strictly increasing per generator. When more than 65536 ids are
/// requested within one millisecond the generator borrows from the next
/// millisecond instead of blocking.
#[derive(Debug, Default)]
pub struct IdGenerator {
    // (last timestamp offset, last sequence)
    state: Mutex<(i64, i64)>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate(&self) -> RecordId {
        let now = Self::now_offset();
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let (last_ts, last_seq) = *state;

        let (ts, seq) = if now > last_ts {
            (now, 0)
        } else if last_seq < SEQUENCE_MASK {
            (last_ts, last_seq + 1)
        } else {
            (last_ts + 1, 0)
        };

        *state = (ts, seq);
        RecordId((ts << SEQUENCE_BITS) | seq)
    }

    fn now_offset() -> i64 {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .unwrap_or(RecordId::EPOCH);
        (millis - RecordId::EPOCH).max(0)
    }
}
