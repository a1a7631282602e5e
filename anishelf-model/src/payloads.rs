//! Request bodies accepted by the catalog.
//!
//! Every field is optional at the wire level so that a missing field becomes a
//! schema error with a useful message instead of a generic decode failure.
//! Unknown fields are ignored, as are server-managed ones (id, version,
//! timestamps).

use serde::{Deserialize, Deserializer};

use crate::{
    anime::{AnimeDocument, Episode, Season},
    error::ValidationError,
    keyed::KeyedList,
    numbers::{EpisodeNumber, SeasonNumber},
};

/// Body of `POST /animes`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAnime {
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub season_count: Option<i64>,
    pub episodes_per_season: Option<i64>,
    pub video_trailer_url: Option<String>,
    pub published_by: Option<String>,
    #[serde(default)]
    pub seasons: KeyedList<Season>,
}

impl NewAnime {
    pub fn into_document(self) -> Result<AnimeDocument, ValidationError> {
        let document = AnimeDocument {
            title: required("title", self.title)?,
            image_url: required("imageUrl", self.image_url)?,
            season_count: required("seasonCount", self.season_count)?,
            episodes_per_season: required(
                "episodesPerSeason",
                self.episodes_per_season,
            )?,
            video_trailer_url: self.video_trailer_url,
            published_by: required("publishedBy", self.published_by)?,
            seasons: self.seasons,
        };
        document.validate()?;
        Ok(document)
    }
}

/// Body of `PUT /animes/{id}`: any subset of the top-level fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimePatch {
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub season_count: Option<i64>,
    pub episodes_per_season: Option<i64>,
    /// `Some(None)` when the body sends `null`, which clears the trailer.
    #[serde(default, deserialize_with = "nullable")]
    pub video_trailer_url: Option<Option<String>>,
    pub published_by: Option<String>,
    pub seasons: Option<KeyedList<Season>>,
}

impl AnimePatch {
    /// Overwrite the supplied fields on a copy of `base` and validate the result.
    pub fn merge_onto(
        self,
        base: &AnimeDocument,
    ) -> Result<AnimeDocument, ValidationError> {
        let mut merged = base.clone();
        if let Some(title) = self.title {
            merged.title = title;
        }
        if let Some(image_url) = self.image_url {
            merged.image_url = image_url;
        }
        if let Some(season_count) = self.season_count {
            merged.season_count = season_count;
        }
        if let Some(episodes_per_season) = self.episodes_per_season {
            merged.episodes_per_season = episodes_per_season;
        }
        if let Some(url) = self.video_trailer_url {
            merged.video_trailer_url = url;
        }
        if let Some(published_by) = self.published_by {
            merged.published_by = published_by;
        }
        if let Some(seasons) = self.seasons {
            merged.seasons = seasons;
        }
        merged.validate()?;
        Ok(merged)
    }
}

/// Body of `POST /animes/{id}/seasons`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewSeason {
    pub number: Option<SeasonNumber>,
    #[serde(default)]
    pub episodes: KeyedList<Episode>,
}

/// Body of `PUT /animes/{id}/seasons/{season}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeasonPatch {
    pub number: Option<SeasonNumber>,
    pub episodes: Option<KeyedList<Episode>>,
}

impl SeasonPatch {
    /// Field-level overwrite of `base`; episodes are replaced wholesale when
    /// present and kept otherwise.
    pub fn merge_onto(self, base: &Season) -> Season {
        Season {
            number: self.number.unwrap_or(base.number),
            episodes: self.episodes.unwrap_or_else(|| base.episodes.clone()),
        }
    }
}

/// Body of `POST /animes/{id}/seasons/{season}/episodes`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEpisode {
    pub number: Option<EpisodeNumber>,
    pub title: Option<String>,
    pub video_url: Option<String>,
}

impl NewEpisode {
    /// `None` when any of the three fields is missing or empty.
    pub fn into_episode(self) -> Option<Episode> {
        let number = self.number?;
        let title = self.title.filter(|title| !title.is_empty())?;
        let video_url = self.video_url.filter(|url| !url.is_empty())?;
        Some(Episode {
            number,
            title,
            video_url,
        })
    }
}

/// Body of `PUT /animes/{id}/seasons/{season}/episodes/{episode}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodePatch {
    pub number: Option<EpisodeNumber>,
    pub title: Option<String>,
    pub video_url: Option<String>,
}

impl EpisodePatch {
    pub fn merge_onto(self, base: &Episode) -> Episode {
        Episode {
            number: self.number.unwrap_or(base.number),
            title: self.title.unwrap_or_else(|| base.title.clone()),
            video_url: self.video_url.unwrap_or_else(|| base.video_url.clone()),
        }
    }
}

/// Keeps an explicit `null` apart from an absent field.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn required<T>(
    field: &'static str,
    value: Option<T>,
) -> Result<T, ValidationError> {
    value.ok_or(ValidationError::Required { field })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_anime_reports_missing_field_by_wire_name() {
        let payload: NewAnime = serde_json::from_value(json!({
            "title": "X",
            "seasonCount": 1,
            "episodesPerSeason": 12,
            "publishedBy": "Y"
        }))
        .unwrap();

        assert_eq!(
            payload.into_document().unwrap_err(),
            ValidationError::Required { field: "imageUrl" }
        );
    }

    #[test]
    fn new_anime_ignores_server_managed_fields() {
        let payload: NewAnime = serde_json::from_value(json!({
            "id": "not-a-uuid",
            "version": 40,
            "title": "X",
            "imageUrl": "u",
            "seasonCount": 1,
            "episodesPerSeason": 12,
            "publishedBy": "Y"
        }))
        .unwrap();

        let document = payload.into_document().unwrap();
        assert_eq!(document.title, "X");
        assert!(document.seasons.is_empty());
    }

    #[test]
    fn anime_patch_only_touches_supplied_fields() {
        let base = NewAnime {
            title: Some("X".into()),
            image_url: Some("u".into()),
            season_count: Some(3),
            episodes_per_season: Some(12),
            video_trailer_url: None,
            published_by: Some("Y".into()),
            seasons: KeyedList::new(),
        }
        .into_document()
        .unwrap();

        let patch: AnimePatch =
            serde_json::from_value(json!({"title": "Z", "seasonCount": 5}))
                .unwrap();
        let merged = patch.merge_onto(&base).unwrap();
        assert_eq!(merged.title, "Z");
        assert_eq!(merged.season_count, 5);
        assert_eq!(merged.published_by, "Y");

        let invalid: AnimePatch =
            serde_json::from_value(json!({"seasonCount": 0})).unwrap();
        assert!(invalid.merge_onto(&base).is_err());
    }

    #[test]
    fn anime_patch_null_trailer_clears_it() {
        let mut base = NewAnime {
            title: Some("X".into()),
            image_url: Some("u".into()),
            season_count: Some(1),
            episodes_per_season: Some(12),
            video_trailer_url: Some("https://video.example/t".into()),
            published_by: Some("Y".into()),
            seasons: KeyedList::new(),
        }
        .into_document()
        .unwrap();

        let untouched: AnimePatch =
            serde_json::from_value(json!({"title": "Z"})).unwrap();
        base = untouched.merge_onto(&base).unwrap();
        assert_eq!(
            base.video_trailer_url.as_deref(),
            Some("https://video.example/t")
        );

        let cleared: AnimePatch =
            serde_json::from_value(json!({"videoTrailerUrl": null})).unwrap();
        assert_eq!(cleared.video_trailer_url, Some(None));
        assert_eq!(cleared.merge_onto(&base).unwrap().video_trailer_url, None);
    }

    #[test]
    fn season_patch_without_episodes_keeps_existing_ones() {
        let mut base = Season::new(SeasonNumber::new(1));
        base.episodes
            .insert(Episode {
                number: EpisodeNumber::new(1),
                title: "Pilot".into(),
                video_url: "v".into(),
            })
            .unwrap();

        let patch: SeasonPatch =
            serde_json::from_value(json!({"number": 2})).unwrap();
        let merged = patch.merge_onto(&base);
        assert_eq!(merged.number, SeasonNumber::new(2));
        assert_eq!(merged.episodes, base.episodes);

        let wipe: SeasonPatch =
            serde_json::from_value(json!({"episodes": []})).unwrap();
        assert!(wipe.merge_onto(&base).episodes.is_empty());
    }

    #[test]
    fn new_episode_requires_all_fields() {
        let missing: NewEpisode =
            serde_json::from_value(json!({"number": 1, "title": "Pilot"}))
                .unwrap();
        assert!(missing.into_episode().is_none());

        let empty: NewEpisode = serde_json::from_value(
            json!({"number": 1, "title": "", "videoUrl": "v"}),
        )
        .unwrap();
        assert!(empty.into_episode().is_none());

        let complete: NewEpisode = serde_json::from_value(
            json!({"number": 1, "title": "Pilot", "videoUrl": "v"}),
        )
        .unwrap();
        assert_eq!(complete.into_episode().unwrap().title, "Pilot");
    }
}
