//! Entity identifiers
//!
//! Every property, party and checklist item carries an [`EntityId`]. Ids handed
//! out by the remote store are durable; ids minted while the store is
//! unreachable are local and will not survive a reload.
//!
//! The textual form of a local id always starts with [`LOCAL_MARKER`], so the
//! origin survives a trip through JSON or the command line.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Prefix carried by every local-origin id
pub const LOCAL_MARKER: &str = "loc-";

/// Length of the random part of a local id
const LOCAL_SUFFIX_LEN: usize = 9;

/// What kind of entity a local id is minted for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A land parcel under audit
    Property,
    /// A buyer or seller
    Party,
    /// A checklist item
    Item,
}

impl EntityKind {
    const fn prefix(self) -> &'static str {
        match self {
            Self::Property => "loc-",
            Self::Party => "loc-party-",
            Self::Item => "loc-item-",
        }
    }
}

/// Identifier of an entity, tagged with its origin
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityId {
    /// Assigned by the remote store
    Durable(String),
    /// Minted locally after a failed remote call
    Local(String),
}

impl EntityId {
    /// Wrap an id returned by the remote store
    #[must_use]
    pub fn durable(id: impl Into<String>) -> Self {
        Self::Durable(id.into())
    }

    /// Mint a fresh local id for an entity of the given kind
    #[must_use]
    pub fn local(kind: EntityKind) -> Self {
        let random = uuid::Uuid::new_v4().simple().to_string();
        Self::Local(format!("{}{}", kind.prefix(), &random[..LOCAL_SUFFIX_LEN]))
    }

    /// Parse an id from its textual form
    ///
    /// Anything starting with [`LOCAL_MARKER`] is local.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with(LOCAL_MARKER) {
            Self::Local(raw.to_string())
        } else {
            Self::Durable(raw.to_string())
        }
    }

    /// The textual form of the id
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Durable(id) | Self::Local(id) => id,
        }
    }

    /// Whether the id was minted locally
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }

    /// Whether the id was assigned by the remote store
    #[must_use]
    pub const fn is_durable(&self) -> bool {
        matches!(self, Self::Durable(_))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Empty id".to_string());
        }
        Ok(Self::parse(trimmed))
    }
}

impl PartialEq<str> for EntityId {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for EntityId {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}
