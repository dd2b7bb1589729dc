//! HTTP API handlers for discog-api

pub mod albums;
pub mod buildinfo;
pub mod health;
pub mod integrants;
pub mod music;

pub use albums::{album_by_id, album_by_name, albums_by_year, list_albums, list_discography};
pub use buildinfo::get_build_info;
pub use health::{health_routes, test_route};
pub use integrants::list_integrants;
pub use music::{music_by_name, music_by_year};
