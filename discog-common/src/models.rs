//! Catalog models
//!
//! Two families of types live here:
//! - **Rows**: flat records exactly as the catalog queries return them. Columns
//!   that come from the right side of a LEFT JOIN are `Option`.
//! - **Entities**: the nested shapes serialized into responses.

use serde::{Serialize, Serializer};

/// One row of an `albums LEFT JOIN songs` query
///
/// An album without songs still yields one row, with `song_name` and
/// `track_number` both `NULL`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct AlbumSongRow {
    pub album_id: i64,
    pub album_name: String,
    pub year: i64,
    pub song_name: Option<String>,
    pub track_number: Option<i64>,
}

/// One row of the song point lookup (`songs JOIN albums`)
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SongLookupRow {
    pub song_name: String,
    pub track_number: Option<i64>,
    pub album_name: String,
    pub year: i64,
}

/// One row of the `integrants` table
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct IntegrantRow {
    pub name: String,
    pub instrument: String,
    pub start_year: i64,
    pub end_year: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Song {
    pub name: String,
    pub track_number: Option<i64>,
}

/// Album with its songs in track order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Album {
    pub name: String,
    pub year: i64,
    pub songs: Vec<Song>,
}

/// Parent album as embedded in a song lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlbumSummary {
    pub name: String,
    pub year: i64,
}

/// Song with the album it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SongDetail {
    pub name: String,
    pub track_number: Option<i64>,
    pub album: AlbumSummary,
}

impl From<SongLookupRow> for SongDetail {
    fn from(row: SongLookupRow) -> Self {
        Self {
            name: row.song_name,
            track_number: row.track_number,
            album: AlbumSummary {
                name: row.album_name,
                year: row.year,
            },
        }
    }
}

/// Last year a member played with the band
///
/// Serializes as a bare integer, or as the string `"Present"` for members
/// who are still active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndYear {
    Year(i64),
    Present,
}

impl EndYear {
    /// Rendering used for members without an end year
    pub const PRESENT: &'static str = "Present";
}

impl From<Option<i64>> for EndYear {
    fn from(value: Option<i64>) -> Self {
        value.map_or(EndYear::Present, EndYear::Year)
    }
}

impl Serialize for EndYear {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            EndYear::Year(year) => serializer.serialize_i64(*year),
            EndYear::Present => serializer.serialize_str(Self::PRESENT),
        }
    }
}

/// Band member
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Integrant {
    pub name: String,
    pub instrument: String,
    pub start_year: i64,
    pub end_year: EndYear,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_end_year_serializes_as_number_or_present() {
        assert_eq!(serde_json::to_value(EndYear::Year(1998)).unwrap(), json!(1998));
        assert_eq!(serde_json::to_value(EndYear::Present).unwrap(), json!("Present"));
    }

    #[test]
    fn test_end_year_from_nullable_column() {
        assert_eq!(EndYear::from(None), EndYear::Present);
        assert_eq!(EndYear::from(Some(1994)), EndYear::Year(1994));
    }

    #[test]
    fn test_song_detail_embeds_parent_album() {
        let detail = SongDetail::from(SongLookupRow {
            song_name: "Alive".to_string(),
            track_number: Some(3),
            album_name: "Ten".to_string(),
            year: 1991,
        });

        assert_eq!(
            serde_json::to_value(&detail).unwrap(),
            json!({
                "name": "Alive",
                "track_number": 3,
                "album": { "name": "Ten", "year": 1991 }
            })
        );
    }
}
