use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies a resource slot within the archives.
///
/// Families of related resources (one per level, one per message, ...) occupy
/// consecutive identifiers; use [`plus`](Self::plus) to address a member.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(transparent)]
pub struct ResourceId(u16);

impl ResourceId {
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u16 {
        self.0
    }

    /// Returns the identifier `offset` slots after this one.
    ///
    /// Wraps around at the end of the 16-bit range.
    pub const fn plus(self, offset: u16) -> Self {
        Self(self.0.wrapping_add(offset))
    }
}

impl From<u16> for ResourceId {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04X}", self.0)
    }
}

impl FromStr for ResourceId {
    type Err = Error;

    /// Accepts decimal (`2048`) or hexadecimal (`0x0800`) notation.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let parsed = match trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            Some(hex) => u16::from_str_radix(hex, 16),
            None => trimmed.parse::<u16>(),
        };
        parsed
            .map(Self)
            .map_err(|_| Error::InvalidResourceId(s.to_string()))
    }
}
