use std::str::FromStr;

/// Season number, unique within the owning anime
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct SeasonNumber(i64);

impl SeasonNumber {
    pub fn new(num: i64) -> Self {
        SeasonNumber(num)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for SeasonNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for SeasonNumber {
    fn from(num: i64) -> Self {
        SeasonNumber(num)
    }
}

impl FromStr for SeasonNumber {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(SeasonNumber)
    }
}

/// Episode number, unique within the owning season
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
pub struct EpisodeNumber(i64);

impl EpisodeNumber {
    pub fn new(num: i64) -> Self {
        EpisodeNumber(num)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for EpisodeNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EpisodeNumber {
    fn from(num: i64) -> Self {
        EpisodeNumber(num)
    }
}

impl FromStr for EpisodeNumber {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(EpisodeNumber)
    }
}
