use chrono::{NaiveDate, NaiveDateTime};

/// The type used for primary keys in the catalog.
pub type PrimaryKey = i64;

/// A single song, always part of exactly one album
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    pub id: PrimaryKey,
    pub title: String,
    pub artist: String,
    pub album_id: PrimaryKey,
}

/// An album without its songs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub id: PrimaryKey,
    pub title: String,
    pub artist: String,
    pub release_date: NaiveDate,
}

/// A playlist without its songs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub id: PrimaryKey,
    pub title: String,
    pub author: String,
}

/// An album along with its songs, in primary key order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumWithSongs {
    pub album: Album,
    pub songs: Vec<Song>,
}

/// A playlist along with its songs, in position order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistWithSongs {
    pub playlist: Playlist,
    pub songs: Vec<Song>,
}

/// A song along with the album it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongWithAlbum {
    pub song: Song,
    pub album: Album,
}

/// One row of the album listing, an album joined with one of its songs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct AlbumSongRow {
    pub album_id: PrimaryKey,
    pub album_title: String,
    pub album_artist: String,
    pub release_date: NaiveDate,
    pub song_id: PrimaryKey,
    pub song_title: String,
    pub song_artist: String,
}

/// One row of the playlist listing, a playlist joined with one of its songs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PlaylistSongRow {
    pub playlist_id: PrimaryKey,
    pub playlist_title: String,
    pub author: String,
    pub song_id: PrimaryKey,
    pub song_title: String,
    pub song_artist: String,
    pub album_id: PrimaryKey,
}

/// One row of the song listing, a song joined with its album.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SongAlbumRow {
    pub id: PrimaryKey,
    pub title: String,
    pub artist: String,
    pub album_id: PrimaryKey,
    pub album_title: String,
    pub album_artist: String,
    pub release_date: NaiveDate,
}

/// A playback event joined with the song and album that was played.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PlayingEvent {
    pub user_id: PrimaryKey,
    pub song_id: PrimaryKey,
    pub song_title: String,
    pub song_artist: String,
    pub album_id: PrimaryKey,
    pub album_title: String,
    pub album_artist: String,
    /// Seconds played
    pub time: u32,
    pub playing_at: NaiveDateTime,
}

impl From<SongAlbumRow> for SongWithAlbum {
    fn from(row: SongAlbumRow) -> Self {
        Self {
            song: Song {
                id: row.id,
                title: row.title,
                artist: row.artist,
                album_id: row.album_id,
            },
            album: Album {
                id: row.album_id,
                title: row.album_title,
                artist: row.album_artist,
                release_date: row.release_date,
            },
        }
    }
}
