//! All schemas that are exposed from endpoints are defined here
//! along with the ToSerialized impls

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use spotiskill_catalog::{PlayingData, PrimaryKey, SignupRequestData};
use spotiskill_core::{
    Album as CoreAlbum, AlbumTotal as CoreAlbumTotal, AlbumWithSongs,
    ArtistTotal as CoreArtistTotal, PlaylistWithSongs, Song as CoreSong, SongTotal as CoreSongTotal,
    SongWithAlbum, Statistics as CoreStatistics,
};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct Song {
    id: PrimaryKey,
    title: String,
    artist: String,
    album_id: PrimaryKey,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AlbumSummary {
    id: PrimaryKey,
    title: String,
    artist: String,
    release_date: NaiveDate,
}

/// A song along with the album it belongs to
#[derive(Debug, Serialize, ToSchema)]
pub struct SongDetails {
    id: PrimaryKey,
    title: String,
    artist: String,
    album: AlbumSummary,
}

/// An album along with its songs
#[derive(Debug, Serialize, ToSchema)]
pub struct Album {
    id: PrimaryKey,
    title: String,
    artist: String,
    release_date: NaiveDate,
    songs: Vec<Song>,
}

/// A playlist along with its songs, in playlist order
#[derive(Debug, Serialize, ToSchema)]
pub struct Playlist {
    id: PrimaryKey,
    title: String,
    author: String,
    songs: Vec<Song>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SignupRequest {
    id: PrimaryKey,
    email: String,
    first_name: String,
    last_name: String,
    status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Playing {
    id: PrimaryKey,
    user_id: PrimaryKey,
    song_id: PrimaryKey,
    time: u32,
    playing_at: NaiveDateTime,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ArtistTotal {
    artist: String,
    time: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AlbumTotal {
    id: PrimaryKey,
    title: String,
    artist: String,
    time: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SongTotal {
    id: PrimaryKey,
    title: String,
    artist: String,
    time: u64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlayingTime {
    /// Total seconds played
    time: u64,
}

/// A ranking of at most three entries, or the total playing time
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum Statistics {
    Artists(Vec<ArtistTotal>),
    Albums(Vec<AlbumTotal>),
    Songs(Vec<SongTotal>),
    PlayingTime(PlayingTime),
}

// Every successful response wraps its payload in `data`

#[derive(Debug, Serialize, ToSchema)]
pub struct SongList {
    data: Vec<SongDetails>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SongResponse {
    data: SongDetails,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AlbumList {
    data: Vec<Album>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AlbumResponse {
    data: Album,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlaylistList {
    data: Vec<Playlist>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlaylistResponse {
    data: Playlist,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SignupRequestList {
    data: Vec<SignupRequest>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SignupRequestResponse {
    data: SignupRequest,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlayingResponse {
    data: Playing,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatisticsResponse {
    data: Statistics,
}

/// Helper trait to convert any type into a serialized version
pub trait ToSerialized<T>
where
    T: Serialize,
{
    fn to_serialized(&self) -> T;
}

impl<I, O> ToSerialized<Vec<O>> for [I]
where
    I: ToSerialized<O>,
    O: Serialize,
{
    fn to_serialized(&self) -> Vec<O> {
        self.iter().map(|x| x.to_serialized()).collect()
    }
}

impl ToSerialized<Song> for CoreSong {
    fn to_serialized(&self) -> Song {
        Song {
            id: self.id,
            title: self.title.clone(),
            artist: self.artist.clone(),
            album_id: self.album_id,
        }
    }
}

impl ToSerialized<AlbumSummary> for CoreAlbum {
    fn to_serialized(&self) -> AlbumSummary {
        AlbumSummary {
            id: self.id,
            title: self.title.clone(),
            artist: self.artist.clone(),
            release_date: self.release_date,
        }
    }
}

impl ToSerialized<SongDetails> for SongWithAlbum {
    fn to_serialized(&self) -> SongDetails {
        SongDetails {
            id: self.song.id,
            title: self.song.title.clone(),
            artist: self.song.artist.clone(),
            album: self.album.to_serialized(),
        }
    }
}

impl ToSerialized<Album> for AlbumWithSongs {
    fn to_serialized(&self) -> Album {
        Album {
            id: self.album.id,
            title: self.album.title.clone(),
            artist: self.album.artist.clone(),
            release_date: self.album.release_date,
            songs: self.songs.to_serialized(),
        }
    }
}

impl ToSerialized<Playlist> for PlaylistWithSongs {
    fn to_serialized(&self) -> Playlist {
        Playlist {
            id: self.playlist.id,
            title: self.playlist.title.clone(),
            author: self.playlist.author.clone(),
            songs: self.songs.to_serialized(),
        }
    }
}

impl ToSerialized<SignupRequest> for SignupRequestData {
    fn to_serialized(&self) -> SignupRequest {
        SignupRequest {
            id: self.id,
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            status: self.status.clone(),
        }
    }
}

impl ToSerialized<Playing> for PlayingData {
    fn to_serialized(&self) -> Playing {
        Playing {
            id: self.id,
            user_id: self.user_id,
            song_id: self.song_id,
            time: self.time,
            playing_at: self.playing_at,
        }
    }
}

impl ToSerialized<ArtistTotal> for CoreArtistTotal {
    fn to_serialized(&self) -> ArtistTotal {
        ArtistTotal {
            artist: self.artist.clone(),
            time: self.time,
        }
    }
}

impl ToSerialized<AlbumTotal> for CoreAlbumTotal {
    fn to_serialized(&self) -> AlbumTotal {
        AlbumTotal {
            id: self.album_id,
            title: self.title.clone(),
            artist: self.artist.clone(),
            time: self.time,
        }
    }
}

impl ToSerialized<SongTotal> for CoreSongTotal {
    fn to_serialized(&self) -> SongTotal {
        SongTotal {
            id: self.song_id,
            title: self.title.clone(),
            artist: self.artist.clone(),
            time: self.time,
        }
    }
}

impl ToSerialized<Statistics> for CoreStatistics {
    fn to_serialized(&self) -> Statistics {
        match self {
            Self::Artists(artists) => Statistics::Artists(artists.to_serialized()),
            Self::Albums(albums) => Statistics::Albums(albums.to_serialized()),
            Self::Songs(songs) => Statistics::Songs(songs.to_serialized()),
            Self::PlayingTime(time) => Statistics::PlayingTime(PlayingTime { time: *time }),
        }
    }
}

impl SongList {
    pub fn new(songs: &[SongWithAlbum]) -> Self {
        Self {
            data: songs.to_serialized(),
        }
    }
}

impl SongResponse {
    pub fn new(song: &SongWithAlbum) -> Self {
        Self {
            data: song.to_serialized(),
        }
    }
}

impl AlbumList {
    pub fn new(albums: &[AlbumWithSongs]) -> Self {
        Self {
            data: albums.to_serialized(),
        }
    }
}

impl AlbumResponse {
    pub fn new(album: &AlbumWithSongs) -> Self {
        Self {
            data: album.to_serialized(),
        }
    }
}

impl PlaylistList {
    pub fn new(playlists: &[PlaylistWithSongs]) -> Self {
        Self {
            data: playlists.to_serialized(),
        }
    }
}

impl PlaylistResponse {
    pub fn new(playlist: &PlaylistWithSongs) -> Self {
        Self {
            data: playlist.to_serialized(),
        }
    }
}

impl SignupRequestList {
    pub fn new(requests: &[SignupRequestData]) -> Self {
        Self {
            data: requests.to_serialized(),
        }
    }
}

impl SignupRequestResponse {
    pub fn new(request: &SignupRequestData) -> Self {
        Self {
            data: request.to_serialized(),
        }
    }
}

impl PlayingResponse {
    pub fn new(playing: &PlayingData) -> Self {
        Self {
            data: playing.to_serialized(),
        }
    }
}

impl StatisticsResponse {
    pub fn new(statistics: &CoreStatistics) -> Self {
        Self {
            data: statistics.to_serialized(),
        }
    }
}
