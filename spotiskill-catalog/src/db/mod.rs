use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use spotiskill_core::{AlbumSongRow, PlayingEvent, PlaylistSongRow, SongAlbumRow};
use thiserror::Error;

mod data;
pub use data::*;

mod seed;

mod sqlite;
pub use sqlite::*;

pub type Result<T> = std::result::Result<T, DatabaseError>;
pub type ArcedDatabase = Arc<dyn Database>;

#[derive(Debug, Error)]
pub enum DatabaseError {
    /// An unknown or internal error happened with the database
    #[error(transparent)]
    Internal(Box<dyn std::error::Error + Send + Sync>),
    /// A resource already exists
    #[error("{resource} with {field} of value {value} already exists")]
    Conflict {
        /// The resource in question
        resource: &'static str,
        /// The field that is conflicting
        field: &'static str,
        /// The conflicting value
        value: String,
    },
    /// A resource in the database doesn't exist
    #[error("{resource}:{identifier} doesn't exist")]
    NotFound {
        resource: &'static str,
        identifier: &'static str,
    },
    /// A resource refers to another resource that doesn't exist
    #[error("{resource} refers to a {field} that doesn't exist")]
    InvalidReference {
        resource: &'static str,
        field: &'static str,
    },
}

/// Helper trait to reduce boilerplate
pub trait IntoDatabaseError {
    fn not_found_or(self, resource: &'static str, identifier: &'static str) -> DatabaseError;
    fn any(self) -> DatabaseError;
}

/// Helper trait to reduce boilerplate
pub trait DatabaseResult {
    /// Turns the Result into a conflict error if it's Ok()
    fn conflict_or_ok(self, resource: &'static str, field: &'static str, value: &str)
        -> Result<()>;
}

impl<T> DatabaseResult for Result<T> {
    fn conflict_or_ok(
        self,
        resource: &'static str,
        field: &'static str,
        value: &str,
    ) -> Result<()> {
        match self {
            Ok(_) => Err(DatabaseError::Conflict {
                resource,
                field,
                value: value.to_string(),
            }),
            Err(e) => match e {
                DatabaseError::NotFound {
                    resource: _,
                    identifier: _,
                } => Ok(()),
                e => Err(e),
            },
        }
    }
}

/// Represents a type that can fetch catalog data from a database
///
/// The row listings are returned flat, in the order the folding expects:
/// albums by release date then id, playlists by id then position.
#[async_trait]
pub trait Database: Send + Sync {
    async fn album_rows(&self) -> Result<Vec<AlbumSongRow>>;
    async fn album_rows_by_id(&self, album_id: PrimaryKey) -> Result<Vec<AlbumSongRow>>;
    async fn playlist_rows(&self) -> Result<Vec<PlaylistSongRow>>;
    async fn playlist_rows_by_id(&self, playlist_id: PrimaryKey) -> Result<Vec<PlaylistSongRow>>;

    async fn songs(&self) -> Result<Vec<SongAlbumRow>>;
    async fn song_by_id(&self, song_id: PrimaryKey) -> Result<SongAlbumRow>;

    async fn user_by_id(&self, user_id: PrimaryKey) -> Result<UserData>;

    /// Returns the playing events joined with their song and album, narrowed to a user if given.
    async fn playing_events(&self, user_id: Option<PrimaryKey>) -> Result<Vec<PlayingEvent>>;
    async fn record_playing(&self, new_playing: NewPlaying) -> Result<PlayingData>;

    async fn signup_requests(&self) -> Result<Vec<SignupRequestData>>;
    async fn create_signup_request(
        &self,
        new_request: NewSignupRequest,
    ) -> Result<SignupRequestData>;
}

#[derive(Debug)]
pub struct NewPlaying {
    pub user_id: PrimaryKey,
    pub song_id: PrimaryKey,
    pub time: u32,
    /// When the song was played, defaults to now
    pub playing_at: Option<NaiveDateTime>,
}

#[derive(Debug)]
pub struct NewSignupRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}
