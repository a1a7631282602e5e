//! HTTP surface of the Anishelf anime catalog.
//!
//! ```text
//! GET    /                                         welcome message
//! GET    /health                                   storage probe
//! GET    /animes                                   list (seasons omitted)
//! POST   /animes                                   create
//! GET    /animes/{id}                              full document
//! PUT    /animes/{id}                              partial update
//! DELETE /animes/{id}
//! GET    /animes/{id}/seasons                      seasons in stored order
//! POST   /animes/{id}/seasons
//! GET    /animes/{id}/seasons/{n}
//! PUT    /animes/{id}/seasons/{n}
//! DELETE /animes/{id}/seasons/{n}
//! GET    /animes/{id}/seasons/{n}/episodes
//! POST   /animes/{id}/seasons/{n}/episodes
//! GET    /animes/{id}/seasons/{n}/episodes/{e}     episode with anime/season context
//! PUT    /animes/{id}/seasons/{n}/episodes/{e}
//! DELETE /animes/{id}/seasons/{n}/episodes/{e}
//! ```

pub mod app;
pub mod handlers;
pub mod infra;
pub mod routes;

pub use app::create_app;
pub use infra::app_state::AppState;
