use std::str::FromStr;

use uuid::Uuid;

/// Strongly typed ID for anime documents
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Copy,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct AnimeID(pub Uuid);

impl Default for AnimeID {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimeID {
    pub fn new() -> Self {
        AnimeID(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_uuid(&self) -> Uuid {
        self.0
    }
}

impl AsRef<Uuid> for AnimeID {
    fn as_ref(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for AnimeID {
    fn from(value: Uuid) -> Self {
        AnimeID(value)
    }
}

impl FromStr for AnimeID {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(AnimeID)
    }
}

impl std::fmt::Display for AnimeID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
