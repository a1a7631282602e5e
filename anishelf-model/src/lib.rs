//! Document schema shared across Anishelf crates.
//!
//! An [`Anime`] is the aggregate root. It owns an ordered list of [`Season`]s,
//! each owning an ordered list of [`Episode`]s. Seasons and episodes have no
//! identity of their own; they are addressed by their number inside the parent
//! and stored embedded in the anime document.
#![allow(missing_docs)]

pub mod anime;
pub mod error;
pub mod ids;
pub mod keyed;
pub mod numbers;
pub mod payloads;

pub use anime::{
    Anime, AnimeDocument, AnimeSummary, Episode, EpisodeView, Season,
};
pub use error::ValidationError;
pub use ids::AnimeID;
pub use keyed::{Keyed, KeyedList, KeyedListError};
pub use numbers::{EpisodeNumber, SeasonNumber};
pub use payloads::{
    AnimePatch, EpisodePatch, NewAnime, NewEpisode, NewSeason, SeasonPatch,
};
