use std::str::FromStr;

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use log::info;
use sqlx::{
    query_as,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Error as SqlxError, SqlitePool,
};
use spotiskill_core::{AlbumSongRow, PlayingEvent, PlaylistSongRow, SongAlbumRow};

use crate::{
    Database, DatabaseError, DatabaseResult, IntoDatabaseError, NewPlaying, NewSignupRequest,
    PlayingData, PrimaryKey, Result, SignupRequestData, UserData,
};

const ALBUM_ROWS: &str = "
    SELECT
        A.id AS album_id,
        A.title AS album_title,
        A.artist AS album_artist,
        A.release_date,
        S.id AS song_id,
        S.title AS song_title,
        S.artist AS song_artist
    FROM Album AS A
        INNER JOIN Song AS S ON S.album_id = A.id";

const PLAYLIST_ROWS: &str = "
    SELECT
        P.id AS playlist_id,
        P.title AS playlist_title,
        P.author,
        S.id AS song_id,
        S.title AS song_title,
        S.artist AS song_artist,
        S.album_id
    FROM Playlist AS P
        INNER JOIN PlaylistSong AS PS ON PS.playlist_id = P.id
        INNER JOIN Song AS S ON S.id = PS.song_id";

const SONG_ROWS: &str = "
    SELECT
        S.id,
        S.title,
        S.artist,
        A.id AS album_id,
        A.title AS album_title,
        A.artist AS album_artist,
        A.release_date
    FROM Song AS S
        INNER JOIN Album AS A ON S.album_id = A.id";

/// A SQLite database implementation for spotiskill
pub struct SqliteDatabase {
    pub(crate) pool: SqlitePool,
}

impl SqliteDatabase {
    /// Connects to the database at `url`, creating the file if it doesn't exist.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| e.any())?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| e.any())?;

        Ok(Self { pool })
    }

    /// Opens a fresh in-memory database, mostly useful for tests.
    /// The pool holds a single connection that is never recycled, since closing it drops the data.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| e.any())?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| e.any())?;

        Ok(Self { pool })
    }

    /// Creates or updates the schema
    pub async fn migrate(&self) -> Result<()> {
        info!("Running database migrations...");

        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DatabaseError::Internal(Box::new(e)))
    }

    async fn signup_request_by_email(&self, email: &str) -> Result<SignupRequestData> {
        query_as("SELECT * FROM SignupRequest WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| e.not_found_or("signup request", "email"))
    }

    async fn playing_by_id(&self, playing_id: PrimaryKey) -> Result<PlayingData> {
        query_as("SELECT * FROM Playing WHERE id = ?")
            .bind(playing_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| e.not_found_or("playing", "id"))
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn album_rows(&self) -> Result<Vec<AlbumSongRow>> {
        query_as(&format!(
            "{ALBUM_ROWS} ORDER BY A.release_date, A.id, S.id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| e.any())
    }

    async fn album_rows_by_id(&self, album_id: PrimaryKey) -> Result<Vec<AlbumSongRow>> {
        query_as(&format!("{ALBUM_ROWS} WHERE A.id = ? ORDER BY S.id"))
            .bind(album_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| e.any())
    }

    async fn playlist_rows(&self) -> Result<Vec<PlaylistSongRow>> {
        query_as(&format!(
            "{PLAYLIST_ROWS} ORDER BY P.id, PS.position, S.id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| e.any())
    }

    async fn playlist_rows_by_id(&self, playlist_id: PrimaryKey) -> Result<Vec<PlaylistSongRow>> {
        query_as(&format!(
            "{PLAYLIST_ROWS} WHERE P.id = ? ORDER BY PS.position, S.id"
        ))
        .bind(playlist_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| e.any())
    }

    async fn songs(&self) -> Result<Vec<SongAlbumRow>> {
        query_as(&format!("{SONG_ROWS} ORDER BY S.id"))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| e.any())
    }

    async fn song_by_id(&self, song_id: PrimaryKey) -> Result<SongAlbumRow> {
        query_as(&format!("{SONG_ROWS} WHERE S.id = ?"))
            .bind(song_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| e.not_found_or("song", "id"))
    }

    async fn user_by_id(&self, user_id: PrimaryKey) -> Result<UserData> {
        query_as("SELECT * FROM User WHERE id = ?")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| e.not_found_or("user", "id"))
    }

    async fn playing_events(&self, user_id: Option<PrimaryKey>) -> Result<Vec<PlayingEvent>> {
        query_as(
            "
            SELECT
                P.user_id,
                P.song_id,
                S.title AS song_title,
                S.artist AS song_artist,
                A.id AS album_id,
                A.title AS album_title,
                A.artist AS album_artist,
                P.time,
                P.playing_at
            FROM Playing AS P
                INNER JOIN Song AS S ON S.id = P.song_id
                INNER JOIN Album AS A ON A.id = S.album_id
            WHERE ? IS NULL OR P.user_id = ?
            ORDER BY P.playing_at, P.id",
        )
        .bind(user_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| e.any())
    }

    async fn record_playing(&self, new_playing: NewPlaying) -> Result<PlayingData> {
        // Ensure both references exist
        self.user_by_id(new_playing.user_id)
            .await
            .map_err(|e| e.reference_or("playing", "user_id"))?;
        self.song_by_id(new_playing.song_id)
            .await
            .map_err(|e| e.reference_or("playing", "song_id"))?;

        let playing_at = new_playing
            .playing_at
            .unwrap_or_else(|| Utc::now().naive_utc().trunc_subsecs(0));

        let record: (PrimaryKey,) = query_as(
            "INSERT INTO Playing (user_id, song_id, time, playing_at) VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(new_playing.user_id)
        .bind(new_playing.song_id)
        .bind(new_playing.time)
        .bind(playing_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            SqlxError::Database(ref db) if db.is_foreign_key_violation() => {
                DatabaseError::InvalidReference {
                    resource: "playing",
                    field: "user_id or song_id",
                }
            }
            e => e.any(),
        })?;

        self.playing_by_id(record.0).await
    }

    async fn signup_requests(&self) -> Result<Vec<SignupRequestData>> {
        query_as("SELECT * FROM SignupRequest ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| e.any())
    }

    async fn create_signup_request(
        &self,
        new_request: NewSignupRequest,
    ) -> Result<SignupRequestData> {
        self.signup_request_by_email(&new_request.email)
            .await
            .conflict_or_ok("signup request", "email", &new_request.email)?;

        query_as(
            "
            INSERT INTO SignupRequest (email, password, first_name, last_name)
            VALUES (?, ?, ?, ?)
            RETURNING *",
        )
        .bind(&new_request.email)
        .bind(new_request.password)
        .bind(new_request.first_name)
        .bind(new_request.last_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            // Another request with this email was inserted since the check above
            SqlxError::Database(ref db) if db.is_unique_violation() => DatabaseError::Conflict {
                resource: "signup request",
                field: "email",
                value: new_request.email.clone(),
            },
            e => e.any(),
        })
    }
}

impl IntoDatabaseError for SqlxError {
    fn any(self) -> DatabaseError {
        DatabaseError::Internal(Box::new(self))
    }

    fn not_found_or(self, resource: &'static str, identifier: &'static str) -> DatabaseError {
        match self {
            SqlxError::RowNotFound => DatabaseError::NotFound {
                resource,
                identifier,
            },
            e => Self::any(e),
        }
    }
}

/// Helper trait to turn a missing referenced resource into an invalid reference
trait ReferenceError {
    fn reference_or(self, resource: &'static str, field: &'static str) -> DatabaseError;
}

impl ReferenceError for DatabaseError {
    fn reference_or(self, resource: &'static str, field: &'static str) -> DatabaseError {
        match self {
            DatabaseError::NotFound {
                resource: _,
                identifier: _,
            } => DatabaseError::InvalidReference { resource, field },
            e => e,
        }
    }
}

#[cfg(test)]
mod test {
    use chrono::NaiveDateTime;
    use spotiskill_core::{fold_albums, fold_playlists};

    use super::*;

    async fn seeded() -> SqliteDatabase {
        let db = SqliteDatabase::in_memory().await.unwrap();
        db.migrate().await.unwrap();
        db.seed().await.unwrap();
        db
    }

    #[tokio::test]
    async fn test_album_rows_fold_in_release_order() {
        let db = seeded().await;

        let albums = fold_albums(db.album_rows().await.unwrap());
        let titles: Vec<_> = albums.iter().map(|a| a.album.title.as_str()).collect();

        assert_eq!(
            titles,
            vec!["A Night at the Opera", "Led Zeppelin IV", "Thriller"]
        );

        let song_ids: Vec<_> = albums[0].songs.iter().map(|s| s.id).collect();
        assert_eq!(song_ids, vec![1, 2, 3]);
        assert!(albums[1].songs.iter().all(|s| s.artist == "Led Zeppelin"));
    }

    #[tokio::test]
    async fn test_playlist_rows_follow_position() {
        let db = seeded().await;

        let playlists = fold_playlists(db.playlist_rows().await.unwrap());

        assert_eq!(playlists.len(), 2);
        assert_eq!(playlists[0].playlist.title, "Rock Classics");

        let first: Vec<_> = playlists[0].songs.iter().map(|s| s.id).collect();
        let second: Vec<_> = playlists[1].songs.iter().map(|s| s.id).collect();

        assert_eq!(first, vec![3, 6, 4]);
        assert_eq!(second, vec![2, 9, 3]);
    }

    #[tokio::test]
    async fn test_missing_rows() {
        let db = seeded().await;

        assert!(db.album_rows_by_id(42).await.unwrap().is_empty());
        assert!(matches!(
            db.song_by_id(42).await,
            Err(DatabaseError::NotFound {
                resource: "song",
                identifier: "id"
            })
        ));
    }

    #[tokio::test]
    async fn test_playing_events_by_user() {
        let db = seeded().await;

        let all = db.playing_events(None).await.unwrap();
        let first_user = db.playing_events(Some(1)).await.unwrap();

        assert_eq!(all.len(), 11);
        assert_eq!(first_user.len(), 7);
        assert!(first_user.iter().all(|e| e.user_id == 1));
    }

    #[tokio::test]
    async fn test_record_playing_rejects_missing_references() {
        let db = seeded().await;

        let result = db
            .record_playing(NewPlaying {
                user_id: 1,
                song_id: 42,
                time: 120,
                playing_at: None,
            })
            .await;

        assert!(matches!(
            result,
            Err(DatabaseError::InvalidReference {
                resource: "playing",
                field: "song_id"
            })
        ));

        let result = db
            .record_playing(NewPlaying {
                user_id: 42,
                song_id: 1,
                time: 120,
                playing_at: None,
            })
            .await;

        assert!(matches!(
            result,
            Err(DatabaseError::InvalidReference {
                resource: "playing",
                field: "user_id"
            })
        ));
    }

    #[tokio::test]
    async fn test_record_playing() {
        let db = seeded().await;
        let playing_at =
            NaiveDateTime::parse_from_str("2024-01-05 10:30:00", "%Y-%m-%d %H:%M:%S").unwrap();

        let playing = db
            .record_playing(NewPlaying {
                user_id: 2,
                song_id: 9,
                time: 294,
                playing_at: Some(playing_at),
            })
            .await
            .unwrap();

        assert_eq!(playing.user_id, 2);
        assert_eq!(playing.song_id, 9);
        assert_eq!(playing.time, 294);
        assert_eq!(playing.playing_at, playing_at);

        let events = db.playing_events(Some(2)).await.unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].song_title, "Billie Jean");
    }

    #[tokio::test]
    async fn test_signup_requests() {
        let db = seeded().await;

        let request = db
            .create_signup_request(NewSignupRequest {
                email: "jane.doe@email.com".to_string(),
                password: "password".to_string(),
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(request.status, "pending");
        assert_eq!(db.signup_requests().await.unwrap().len(), 3);

        let duplicate = db
            .create_signup_request(NewSignupRequest {
                email: "jane.doe@email.com".to_string(),
                password: "password".to_string(),
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
            })
            .await;

        assert!(matches!(
            duplicate,
            Err(DatabaseError::Conflict {
                resource: "signup request",
                field: "email",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_concurrent_signup_requests_conflict() {
        let db = seeded().await;
        let request = || NewSignupRequest {
            email: "jane.doe@email.com".to_string(),
            password: "password".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
        };

        let (first, second) = tokio::join!(
            db.create_signup_request(request()),
            db.create_signup_request(request())
        );

        let created = [&first, &second].iter().filter(|r| r.is_ok()).count();
        assert_eq!(created, 1);
        assert!([first, second].into_iter().any(|r| matches!(
            r,
            Err(DatabaseError::Conflict {
                resource: "signup request",
                field: "email",
                ..
            })
        )));
        assert_eq!(db.signup_requests().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected_by_schema() {
        let db = seeded().await;

        let result = sqlx::query(
            "INSERT INTO SignupRequest (email, password, first_name, last_name) VALUES (?, 'password', 'John', 'Doe')",
        )
        .bind("john.doe@email.com")
        .execute(&db.pool)
        .await;

        assert!(matches!(
            result,
            Err(SqlxError::Database(ref e)) if e.is_unique_violation()
        ));
    }

    #[tokio::test]
    async fn test_deleting_played_song_is_restricted() {
        let db = seeded().await;

        // Song 5 is played but in no playlist, so only the playing log holds it
        let played = sqlx::query("DELETE FROM Song WHERE id = 5")
            .execute(&db.pool)
            .await;
        assert!(played.is_err());

        let unplayed = sqlx::query("DELETE FROM Song WHERE id = 8")
            .execute(&db.pool)
            .await
            .unwrap();
        assert_eq!(unplayed.rows_affected(), 1);
    }

    #[tokio::test]
    async fn test_deleting_user_with_playings_is_restricted() {
        let db = seeded().await;

        let result = sqlx::query("DELETE FROM User WHERE id = 1")
            .execute(&db.pool)
            .await;

        assert!(result.is_err());
        assert!(db.user_by_id(1).await.is_ok());
    }
}
