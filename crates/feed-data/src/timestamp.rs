//! Post timestamp normalization.
//!
//! The document store hands back two representations for the same field:
//! freshly written documents carry a server-generated timestamp object
//! (`{ "seconds": ..., "nanos": ... }`), while older exports and client-side
//! fallbacks carry an ISO-8601 string. Both must compare as instants, so the
//! comparator never has to care which shape a post arrived in.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A post creation timestamp in either wire representation.
///
/// `#[serde(untagged)]` tries the variants in order: a JSON object matches
/// `Server`, a string parses as an RFC 3339 / ISO-8601 instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PostTimestamp {
    /// Server-generated timestamp object.
    Server {
        seconds: i64,
        #[serde(default)]
        nanos: u32,
    },
    /// ISO-8601 string, already parsed.
    Iso(DateTime<Utc>),
}

impl PostTimestamp {
    /// Normalize to a single comparable instant.
    ///
    /// Total by construction: a server timestamp whose seconds fall outside
    /// chrono's representable range degrades to the Unix epoch rather than
    /// erroring, so sorting stays a total function.
    pub fn instant(&self) -> DateTime<Utc> {
        match *self {
            PostTimestamp::Server { seconds, nanos } => {
                Utc.timestamp_opt(seconds, nanos).single().unwrap_or_else(|| {
                    warn!(seconds, nanos, "server timestamp out of range, using epoch");
                    DateTime::UNIX_EPOCH
                })
            }
            PostTimestamp::Iso(dt) => dt,
        }
    }
}

impl From<DateTime<Utc>> for PostTimestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        PostTimestamp::Iso(dt)
    }
}
