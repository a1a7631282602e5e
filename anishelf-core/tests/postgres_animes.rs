#![cfg(feature = "pg-tests")]

use std::sync::Arc;

use anishelf_core::{
    AnimeCatalog, AnimeRepository, CatalogError, PostgresDatabase, StoreError,
};
use anishelf_model::{
    Anime, AnimeDocument, AnimePatch, KeyedList, NewEpisode, NewSeason,
    SeasonNumber,
};
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;

fn document(title: &str) -> AnimeDocument {
    AnimeDocument {
        title: title.into(),
        image_url: "https://img.example/cover.jpg".into(),
        season_count: 1,
        episodes_per_season: 12,
        video_trailer_url: Some("https://video.example/trailer".into()),
        published_by: "Studio 4C".into(),
        seasons: KeyedList::new(),
    }
}

#[sqlx::test(migrator = "anishelf_core::MIGRATOR")]
async fn insert_and_get_round_trip(pool: PgPool) -> anyhow::Result<()> {
    let repo = PostgresDatabase::from_pool(pool).animes();
    let stored = repo.insert(&Anime::new(document("Tekkonkinkreet"), Utc::now())).await?;

    let fetched = repo.get(stored.id).await?.expect("anime should exist");
    assert_eq!(fetched, stored);
    assert_eq!(fetched.version, 1);
    assert_eq!(
        fetched.document.video_trailer_url.as_deref(),
        Some("https://video.example/trailer")
    );
    Ok(())
}

#[sqlx::test(migrator = "anishelf_core::MIGRATOR")]
async fn list_strips_seasons_and_keeps_insertion_order(
    pool: PgPool,
) -> anyhow::Result<()> {
    let repo = PostgresDatabase::from_pool(pool).animes();
    let now = Utc::now();
    let mut first = Anime::new(document("First"), now);
    first
        .document
        .seasons
        .insert(anishelf_model::Season::new(SeasonNumber::new(1)))?;
    repo.insert(&first).await?;
    repo.insert(&Anime::new(document("Second"), now + chrono::Duration::seconds(1)))
        .await?;

    let titles: Vec<String> = repo
        .list_summaries()
        .await?
        .into_iter()
        .map(|summary| summary.title)
        .collect();
    assert_eq!(titles, vec!["First", "Second"]);
    Ok(())
}

#[sqlx::test(migrator = "anishelf_core::MIGRATOR")]
async fn replace_bumps_version_and_rejects_stale_writes(
    pool: PgPool,
) -> anyhow::Result<()> {
    let repo = PostgresDatabase::from_pool(pool).animes();
    let stored = repo.insert(&Anime::new(document("A"), Utc::now())).await?;

    let mut edited = stored.clone();
    edited.document.title = "B".into();
    let updated = repo.replace(&edited, stored.version).await?;
    assert_eq!(updated.version, 2);
    assert!(updated.updated_at >= stored.updated_at);

    let stale = repo.replace(&edited, stored.version).await;
    assert!(matches!(
        stale,
        Err(StoreError::StaleVersion {
            expected: 1,
            found: 2,
            ..
        })
    ));

    assert!(repo.delete(stored.id).await?);
    assert!(matches!(
        repo.replace(&edited, 2).await,
        Err(StoreError::NotFound(_))
    ));
    assert!(!repo.delete(stored.id).await?);
    Ok(())
}

#[sqlx::test(migrator = "anishelf_core::MIGRATOR")]
async fn catalog_nested_mutations_persist(pool: PgPool) -> anyhow::Result<()> {
    let repo: Arc<dyn AnimeRepository> =
        Arc::new(PostgresDatabase::from_pool(pool).animes());
    let catalog = AnimeCatalog::new(repo);

    let created = catalog
        .create_anime(serde_json::from_value(json!({
            "title": "Mind Game",
            "imageUrl": "https://img.example/mind-game.jpg",
            "seasonCount": 5,
            "episodesPerSeason": 1,
            "publishedBy": "Studio 4C"
        }))?)
        .await?;

    let season: NewSeason = serde_json::from_value(json!({"number": 1}))?;
    catalog.add_season(created.id, season).await?;
    let episode: NewEpisode = serde_json::from_value(json!({
        "number": 1,
        "title": "Nishi",
        "videoUrl": "https://video.example/1"
    }))?;
    catalog
        .add_episode(created.id, SeasonNumber::new(1), episode)
        .await?;

    let stored = catalog.get_anime(created.id).await?;
    assert_eq!(stored.document.season_count, 1);
    assert_eq!(stored.version, 3);
    assert_eq!(stored.seasons().iter().next().map(|s| s.episodes.len()), Some(1));

    let duplicate: NewSeason = serde_json::from_value(json!({"number": 1}))?;
    assert!(matches!(
        catalog.add_season(created.id, duplicate).await,
        Err(CatalogError::SeasonExists)
    ));

    let patch: AnimePatch = serde_json::from_value(json!({"title": "Mind Game (2004)"}))?;
    let updated = catalog.update_anime(created.id, patch).await?;
    assert_eq!(updated.document.title, "Mind Game (2004)");
    assert_eq!(updated.document.season_count, 1);
    Ok(())
}
