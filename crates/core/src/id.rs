//! Sequence identifiers.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Opaque, monotonically allocated identifier.
///
/// Handles are minted by whoever owns the sequence (see [`SeqId::next`]) and
/// are never reused within that owner.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeqId(u64);

impl SeqId {
    /// First identifier of a fresh sequence.
    pub const FIRST: SeqId = SeqId(1);

    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// The identifier allocated after this one.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl core::fmt::Display for SeqId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for SeqId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<SeqId> for u64 {
    fn from(value: SeqId) -> Self {
        value.0
    }
}

impl FromStr for SeqId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<u64>()
            .map_err(|e| DomainError::invalid_id(format!("SeqId: {e}")))?;
        Ok(Self(raw))
    }
}
