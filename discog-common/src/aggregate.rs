//! Row-to-nested aggregation
//!
//! Catalog queries return one flat row per album×song. The functions here fold
//! that row stream into albums that own their songs, keeping the order the
//! query produced.
//!
//! Rules applied to every grouping:
//! - albums are emitted in the order their key is first seen
//! - the first row for a key sets the album's name and year; later rows for the
//!   same key never overwrite them
//! - a row whose song name is `NULL` (LEFT JOIN miss) contributes no song
//!
//! All functions are pure: state lives only for the duration of one call.

use std::collections::HashMap;
use std::hash::Hash;

use crate::models::{Album, AlbumSongRow, Integrant, IntegrantRow, Song};

/// Group rows into albums, using `key` as album identity
pub fn group_albums_by<I, K, F>(rows: I, key: F) -> Vec<Album>
where
    I: IntoIterator<Item = AlbumSongRow>,
    K: Eq + Hash,
    F: Fn(&AlbumSongRow) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut albums: Vec<Album> = Vec::new();

    for row in rows {
        let slot = *index.entry(key(&row)).or_insert_with(|| {
            albums.push(Album {
                name: row.album_name.clone(),
                year: row.year,
                songs: Vec::new(),
            });
            albums.len() - 1
        });

        if let Some(name) = row.song_name {
            albums[slot].songs.push(Song {
                name,
                track_number: row.track_number,
            });
        }
    }

    albums
}

/// Group rows into albums keyed by album id
pub fn group_albums<I>(rows: I) -> Vec<Album>
where
    I: IntoIterator<Item = AlbumSongRow>,
{
    group_albums_by(rows, |row| row.album_id)
}

/// Group rows into albums keyed by album name
///
/// Distinct albums sharing a name collapse into one entity whose year is taken
/// from the first row seen.
pub fn group_albums_by_name<I>(rows: I) -> Vec<Album>
where
    I: IntoIterator<Item = AlbumSongRow>,
{
    group_albums_by(rows, |row| row.album_name.clone())
}

/// Shape the result of a single-album lookup
///
/// `None` means the lookup matched no album at all. An album that exists but
/// has no songs still comes back as `Some` with an empty song list.
pub fn single_album<I>(rows: I, merge_by_name: bool) -> Option<Album>
where
    I: IntoIterator<Item = AlbumSongRow>,
{
    let albums = if merge_by_name {
        group_albums_by_name(rows)
    } else {
        group_albums(rows)
    };

    if albums.len() > 1 {
        tracing::warn!(
            "Lookup matched {} distinct albums named '{}', returning the first",
            albums.len(),
            albums[0].name
        );
    }

    albums.into_iter().next()
}

/// Inverse of grouping: every album's songs concatenated, in album order
///
/// Flattening grouped albums yields the non-null song rows in input order, so
/// tests use it to check grouping neither drops nor reorders songs.
pub fn flatten_songs(albums: &[Album]) -> Vec<Song> {
    albums
        .iter()
        .flat_map(|album| album.songs.iter().cloned())
        .collect()
}

/// Shape integrant rows, substituting `Present` for a missing end year
pub fn shape_integrants<I>(rows: I) -> Vec<Integrant>
where
    I: IntoIterator<Item = IntegrantRow>,
{
    rows.into_iter()
        .map(|row| Integrant {
            name: row.name,
            instrument: row.instrument,
            start_year: row.start_year,
            end_year: row.end_year.into(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, album: &str, year: i64, song: Option<(&str, i64)>) -> AlbumSongRow {
        AlbumSongRow {
            album_id: id,
            album_name: album.to_string(),
            year,
            song_name: song.map(|(name, _)| name.to_string()),
            track_number: song.map(|(_, track)| track),
        }
    }

    #[test]
    fn test_first_row_wins_for_album_fields() {
        let rows = vec![
            row(1, "Ten", 1991, Some(("Once", 1))),
            row(1, "Ten (Redux)", 2009, Some(("Even Flow", 2))),
        ];

        let albums = group_albums(rows);

        assert_eq!(albums.len(), 1);
        assert_eq!(albums[0].name, "Ten");
        assert_eq!(albums[0].year, 1991);
        assert_eq!(albums[0].songs.len(), 2);
    }

    #[test]
    fn test_grouping_by_name_merges_same_named_albums() {
        let rows = vec![
            row(1, "Pearl Jam", 2006, Some(("Life Wasted", 1))),
            row(9, "Pearl Jam", 2011, Some(("Live Track", 1))),
        ];

        assert_eq!(group_albums(rows.clone()).len(), 2);

        let merged = group_albums_by_name(rows);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].year, 2006);
        assert_eq!(merged[0].songs.len(), 2);
    }

    #[test]
    fn test_single_album_distinguishes_missing_from_empty() {
        assert_eq!(single_album(Vec::new(), false), None);

        let empty = single_album(vec![row(2, "EmptyAlbum", 2000, None)], false)
            .expect("album with no songs is still found");
        assert!(empty.songs.is_empty());
    }

    #[test]
    fn test_single_album_returns_first_id_when_names_collide() {
        let rows = vec![
            row(4, "Lost Dogs", 2003, Some(("All Night", 1))),
            row(7, "Lost Dogs", 2004, Some(("Sad", 1))),
        ];

        let album = single_album(rows.clone(), false).unwrap();
        assert_eq!(album.year, 2003);
        assert_eq!(album.songs.len(), 1);

        let merged = single_album(rows, true).unwrap();
        assert_eq!(merged.songs.len(), 2);
    }
}
