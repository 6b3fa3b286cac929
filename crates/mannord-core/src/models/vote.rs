use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EvidencePair, ItemId, UserId};
use crate::errors::ModerationError;

/// Kind of action a user takes on an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteKind {
    FlagSpam,
    FlagHam,
    Upvote,
    Downvote,
}

impl VoteKind {
    /// Spam/ham signal carried by this action, if any.
    pub fn signal(self) -> Option<f64> {
        match self {
            Self::FlagSpam => Some(-1.0),
            Self::FlagHam | Self::Upvote => Some(1.0),
            Self::Downvote => None,
        }
    }

    /// Like [`VoteKind::signal`], for callers that require one.
    pub fn answer(self) -> Result<f64, ModerationError> {
        self.signal().ok_or_else(|| ModerationError::NotASpamSignal {
            kind: self.to_string(),
        })
    }
}

impl fmt::Display for VoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::FlagSpam => "flag_spam",
            Self::FlagHam => "flag_ham",
            Self::Upvote => "upvote",
            Self::Downvote => "downvote",
        };
        f.write_str(s)
    }
}

/// Largest drift at which a stored reliability still counts as untouched.
const TRAIL_TOLERANCE: f64 = 1e-12;

/// Caster reliability right before and right after a vote was applied.
///
/// Removing the vote while the caster still holds `after` puts `before`
/// back, even when `before` was a fixed default rather than derived from
/// the accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityTrail {
    pub before: f64,
    pub after: f64,
}

impl ReliabilityTrail {
    /// Whether `current` is still the reliability this vote left behind.
    pub fn is_current(&self, current: f64) -> bool {
        (current - self.after).abs() <= TRAIL_TOLERANCE
    }
}

/// Exact deltas an incremental update applied, so removal can invert it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VoteContribution {
    /// Weighted-normalized vote on an active item.
    Scalar {
        weight_delta: f64,
        raw_delta: f64,
        trail: ReliabilityTrail,
    },
    /// Dirichlet vote on an active item.
    Evidence {
        item_delta: EvidencePair,
        user_delta: EvidencePair,
    },
    /// Vote on a frozen item: base prior nudges for the caster and the author's karma.
    FrozenNudge {
        base_delta: f64,
        karma_delta: f64,
        trail: ReliabilityTrail,
    },
}

impl VoteContribution {
    pub fn trail(&self) -> Option<ReliabilityTrail> {
        match self {
            Self::Scalar { trail, .. } | Self::FrozenNudge { trail, .. } => Some(*trail),
            Self::Evidence { .. } => None,
        }
    }
}

/// One user's spam/ham judgment on one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub user: UserId,
    pub item: ItemId,
    pub kind: VoteKind,
    /// Excluded from batch runs.
    pub frozen: bool,
    /// `None` once a batch run has absorbed the vote.
    pub contribution: Option<VoteContribution>,
    pub cast_at: DateTime<Utc>,
}

impl VoteRecord {
    pub fn new(user: UserId, item: ItemId, kind: VoteKind) -> Self {
        Self {
            user,
            item,
            kind,
            frozen: false,
            contribution: None,
            cast_at: Utc::now(),
        }
    }
}
