//! Detached view-object identity

use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Per-instance identifier of a detached view object.
///
/// A `Uid` is unrelated to the persistent id of whatever the DTO was mapped
/// from. It is generated once when the DTO is built and carried over by
/// `Clone`, so an edit copy can always be matched back to its original.
///
/// # Example
///
/// ```
/// use governance_lib::dto::Uid;
///
/// let uid = Uid::new();
/// let parsed: Uid = uid.to_string().parse().unwrap();
/// assert_eq!(uid, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uid(Uuid);

impl Uid {
    /// Generates a fresh random uid.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for Uid {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Uid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for Uid {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Capabilities every child view object must expose to be managed by a
/// [`ParentDto`](super::ParentDto).
///
/// `Clone` must produce a structural copy that keeps the same [`Uid`]; that
/// copy is what the parent hands out as the edit copy.
pub trait BaseDto: Clone {
    /// The stable per-instance identifier.
    fn uid(&self) -> Uid;

    /// The name shown in grids and summaries, if the object has one.
    fn display_name(&self) -> Option<&str>;

    /// Returns `true` if `other` was cloned from `self` (or vice versa).
    ///
    /// Used by [`ParentDto::replace`](super::ParentDto::replace) to find the
    /// slot an edit copy supersedes.
    fn is_clone(&self, other: &Self) -> bool {
        self.uid() == other.uid()
    }
}
