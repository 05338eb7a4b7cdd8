//! Entity identity - prefixed ULID identifiers
//!
//! Every record is identified by a `PREFIX-ULID` string (e.g. `CUST-01J...`).
//! The prefix encodes the entity type so IDs are self-describing in links,
//! file names and short-id references.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ulid::Ulid;

/// Entity type prefixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityPrefix {
    /// Customer account
    Cust,
    /// Partner organization
    Part,
    /// Proposal (quote sent to a customer)
    Prop,
    /// Engagement (delivery work for a customer)
    Eng,
    /// Task
    Task,
    /// Employee
    Emp,
}

impl EntityPrefix {
    /// All known prefixes, used for parsing and iteration
    pub const ALL: [EntityPrefix; 6] = [
        EntityPrefix::Cust,
        EntityPrefix::Part,
        EntityPrefix::Prop,
        EntityPrefix::Eng,
        EntityPrefix::Task,
        EntityPrefix::Emp,
    ];

    /// The string form used in IDs and file names
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityPrefix::Cust => "CUST",
            EntityPrefix::Part => "PART",
            EntityPrefix::Prop => "PROP",
            EntityPrefix::Eng => "ENG",
            EntityPrefix::Task => "TASK",
            EntityPrefix::Emp => "EMP",
        }
    }
}

impl fmt::Display for EntityPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityPrefix {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CUST" => Ok(EntityPrefix::Cust),
            "PART" => Ok(EntityPrefix::Part),
            "PROP" => Ok(EntityPrefix::Prop),
            "ENG" => Ok(EntityPrefix::Eng),
            "TASK" => Ok(EntityPrefix::Task),
            "EMP" => Ok(EntityPrefix::Emp),
            _ => Err(IdParseError::UnknownPrefix(s.to_string())),
        }
    }
}

/// Errors from parsing entity ID strings
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("unknown entity prefix: '{0}'")]
    UnknownPrefix(String),

    #[error("malformed entity ID: '{0}' (expected PREFIX-ULID)")]
    Malformed(String),

    #[error("invalid ULID in entity ID: '{0}'")]
    InvalidUlid(String),
}

/// A unique, sortable entity identifier: `PREFIX-ULID`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId {
    prefix: EntityPrefix,
    ulid: Ulid,
}

impl EntityId {
    /// Generate a fresh ID for the given entity type
    pub fn new(prefix: EntityPrefix) -> Self {
        Self {
            prefix,
            ulid: Ulid::new(),
        }
    }

    /// Parse a full `PREFIX-ULID` string
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        let (prefix, rest) = s
            .split_once('-')
            .ok_or_else(|| IdParseError::Malformed(s.to_string()))?;
        let prefix: EntityPrefix = prefix.parse()?;
        let ulid =
            Ulid::from_string(rest).map_err(|_| IdParseError::InvalidUlid(rest.to_string()))?;
        Ok(Self { prefix, ulid })
    }

    /// The entity type prefix
    pub fn prefix(&self) -> EntityPrefix {
        self.prefix
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.prefix, self.ulid)
    }
}

impl Serialize for EntityId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        EntityId::parse(&s).map_err(serde::de::Error::custom)
    }
}
