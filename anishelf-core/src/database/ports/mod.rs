pub mod animes;
