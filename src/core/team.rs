//! Team and flag identity types.
//!
//! ## TeamId
//!
//! Opaque team identifier. Games define which teams exist through
//! [`RulesConfig`](crate::config::RulesConfig); the engine never assumes a
//! fixed pair of teams.
//!
//! ## BlockUri
//!
//! Block family URI. A flag's identity is the URI of its block family:
//! the block placed at the base and the item a player carries share it.
//!
//! ## MarkerKind
//!
//! Cosmetic marker shown above a flag carrier.

use serde::{Deserialize, Serialize};

/// Team identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub u16);

impl TeamId {
    /// Create a new team ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Team({})", self.0)
    }
}

/// Block family URI, e.g. `LightAndShadowResources:redFlag`.
///
/// ```
/// use rust_ctf::core::BlockUri;
///
/// let uri = BlockUri::new("LightAndShadowResources:redFlag");
/// assert_eq!(uri.module(), Some("LightAndShadowResources"));
/// assert_eq!(uri.name(), "redFlag");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockUri(String);

impl BlockUri {
    /// Create a URI from its string form.
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// The full URI string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Module part before the `:` separator, if present.
    #[must_use]
    pub fn module(&self) -> Option<&str> {
        self.0.split_once(':').map(|(module, _)| module)
    }

    /// Block name after the `:` separator (the whole URI if there is none).
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.split_once(':').map_or(self.0.as_str(), |(_, name)| name)
    }
}

impl From<String> for BlockUri {
    fn from(uri: String) -> Self {
        Self(uri)
    }
}

impl From<&str> for BlockUri {
    fn from(uri: &str) -> Self {
        Self::new(uri)
    }
}

impl std::fmt::Display for BlockUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Marker sprite attached to a carrier.
///
/// Light and Shadow uses card suits: red carries hearts, black carries
/// spades.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Hearts,
    Spades,
    Diamonds,
    Clubs,
}

impl std::fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MarkerKind::Hearts => "hearts",
            MarkerKind::Spades => "spades",
            MarkerKind::Diamonds => "diamonds",
            MarkerKind::Clubs => "clubs",
        };
        f.write_str(name)
    }
}
