//! # Discog Common Library
//!
//! Shared code for the discography catalog service including:
//! - Domain models and typed database rows
//! - Row-to-nested aggregation (albums with their songs, band members)
//! - Configuration loading
//! - Catalog schema contract

pub mod aggregate;
pub mod config;
#[cfg(feature = "sqlx")]
pub mod db;
pub mod error;
pub mod models;

pub use error::{Error, Result};
pub use models::{
    Album, AlbumSongRow, AlbumSummary, EndYear, Integrant, IntegrantRow, Song, SongDetail,
    SongLookupRow,
};
