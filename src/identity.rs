//! Well identity handling for the offline-first replica.
//!
//! A well carries either a *durable* identity assigned by the remote store
//! (opaque; the server hands out integer primary keys, held as strings
//! client-side) or a *provisional* identity minted locally while offline.
//! The two namespaces are disjoint by construction: provisional identities
//! always start with [`PROVISIONAL_PREFIX`], and the remote store never
//! issues identifiers with that prefix.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Reserved prefix marking locally minted identities.
pub const PROVISIONAL_PREFIX: &str = "offline_";

/// Process-wide counter disambiguating provisional ids minted within the
/// same millisecond.
static MINT_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Identity of a well record.
///
/// Promotion from provisional to durable replaces the whole id value on the
/// owning record; a `WellId` itself is never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WellId(String);

impl WellId {
    /// Wraps a durable identity as returned by the remote store.
    pub fn durable(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mints a fresh provisional identity.
    ///
    /// The time component keeps ids roughly ordered; the counter component
    /// guarantees uniqueness across rapid successive calls.
    pub fn mint_provisional() -> Self {
        let millis = Utc::now().timestamp_millis();
        let seq = MINT_COUNTER.fetch_add(1, Ordering::Relaxed);
        Self(format!("{PROVISIONAL_PREFIX}{millis}_{seq}"))
    }

    /// Whether this identity was minted locally and is not yet confirmed by
    /// the remote store.
    pub fn is_provisional(&self) -> bool {
        self.0.starts_with(PROVISIONAL_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WellId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Serialize for WellId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for WellId {
    /// Accepts both a JSON string and a JSON integer.
    ///
    /// The remote store serializes its primary keys as numbers, while the
    /// local snapshot stores every id as a string.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct IdVisitor;

        impl serde::de::Visitor<'_> for IdVisitor {
            type Value = WellId;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a string or integer well id")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<WellId, E> {
                Ok(WellId(v.to_string()))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<WellId, E> {
                Ok(WellId(v.to_string()))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<WellId, E> {
                Ok(WellId(v.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}
