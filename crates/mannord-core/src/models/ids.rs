use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::KARMA_KEY_PREFIX;

/// Identifier of a real user.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

/// Identifier of a moderated item.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

macro_rules! string_id {
    ($name:ident) => {
        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id!(UserId);
string_id!(ItemId);

/// Key of a user-side node in the propagation graph.
///
/// Real users and the synthetic per-author KarmaUser live in the same node
/// space but can never collide: the karma node renders as `-<author>`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKey {
    User(UserId),
    Karma(UserId),
}

impl NodeKey {
    /// The real user behind this node (the author, for a karma node).
    pub fn user_id(&self) -> &UserId {
        match self {
            Self::User(id) | Self::Karma(id) => id,
        }
    }

    pub fn is_karma(&self) -> bool {
        matches!(self, Self::Karma(_))
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(id) => write!(f, "{id}"),
            Self::Karma(id) => write!(f, "{KARMA_KEY_PREFIX}{id}"),
        }
    }
}
