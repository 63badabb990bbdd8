use std::fmt;

use serde::{Deserialize, Serialize};

/// A hierarchy level of the similarity index.
///
/// Level 1 holds the most specific, highest-quality content; deeper levels are
/// consulted in ascending order. Level 0 does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Tier(u32);

/// Rejected hierarchy level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("tier levels start at 1, got {0}")]
pub struct InvalidTier(pub u32);

impl Tier {
    pub const FIRST: Tier = Tier(1);

    pub fn new(level: u32) -> Result<Self, InvalidTier> {
        if level == 0 {
            return Err(InvalidTier(level));
        }
        Ok(Self(level))
    }

    pub fn level(self) -> u32 {
        self.0
    }

    /// Levels `1..=max_level` in query order.
    pub fn up_to(max_level: u32) -> impl Iterator<Item = Tier> {
        (1..=max_level).map(Tier)
    }
}

impl TryFrom<u32> for Tier {
    type Error = InvalidTier;

    fn try_from(level: u32) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

impl From<Tier> for u32 {
    fn from(tier: Tier) -> Self {
        tier.0
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
