//! Tier policy - a pure lookup from access class to resource limits.

use serde::{Deserialize, Serialize};

/// A caller's access class.
///
/// The numeric rank exists only for policy lookups; nothing outside this
/// module branches on tier names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserTier {
    /// Unauthenticated caller.
    Anonymous,
    /// Signed-in caller without a subscription.
    Registered,
    /// Subscribed caller.
    Vip,
    /// Editorial/staff caller.
    Curator,
}

impl UserTier {
    /// Numeric rank of this tier; higher rank means looser limits.
    pub fn rank(&self) -> u8 {
        match self {
            UserTier::Anonymous => 0,
            UserTier::Registered => 1,
            UserTier::Vip => 2,
            UserTier::Curator => 3,
        }
    }

    /// Resolve a tier from a raw rank value.
    ///
    /// Ranks outside the known range resolve to [`UserTier::Anonymous`], the
    /// most restrictive tier, so a policy lookup can never fail.
    pub fn from_rank(rank: u8) -> Self {
        match rank {
            0 => UserTier::Anonymous,
            1 => UserTier::Registered,
            2 => UserTier::Vip,
            3 => UserTier::Curator,
            _ => UserTier::Anonymous,
        }
    }
}

/// Hard limits the pipeline applies for a given tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierLimits {
    /// Maximum number of memories retrieval may return.
    pub max_top_k: usize,

    /// Maximum draft length in characters.
    pub max_output_chars: usize,

    /// Whether the advisory semantic review runs after the hard gate.
    pub run_soft_review: bool,
}

impl TierLimits {
    /// The most restrictive limits; used as the conservative fallback.
    pub fn restricted() -> Self {
        Self {
            max_top_k: 2,
            max_output_chars: 400,
            run_soft_review: false,
        }
    }

    /// Look up the limits for a tier.
    ///
    /// Total over the tier enumeration; limits never decrease with rank.
    pub fn for_tier(tier: UserTier) -> Self {
        match tier {
            UserTier::Anonymous => Self::restricted(),
            UserTier::Registered => Self {
                max_top_k: 4,
                max_output_chars: 1200,
                run_soft_review: false,
            },
            UserTier::Vip => Self {
                max_top_k: 8,
                max_output_chars: 4000,
                run_soft_review: true,
            },
            UserTier::Curator => Self {
                max_top_k: 12,
                max_output_chars: 8000,
                run_soft_review: true,
            },
        }
    }
}
