mod db;

use std::sync::Arc;

pub use db::*;

use log::debug;
use spotiskill_core::{
    compute_statistics, fold_albums, fold_playlists, AlbumWithSongs, PlaylistWithSongs,
    SongWithAlbum, StatisticKind, Statistics, StatsFilter,
};

/// The spotiskill catalog, turning database rows into albums, playlists and listening statistics.
pub struct Catalog {
    database: ArcedDatabase,
}

impl Catalog {
    pub fn new<Db>(database: Db) -> Self
    where
        Db: Database + 'static,
    {
        Self {
            database: Arc::new(database),
        }
    }

    /// All albums that have at least one song, by release date
    pub async fn albums(&self) -> Result<Vec<AlbumWithSongs>> {
        let rows = self.database.album_rows().await?;
        debug!("Folding {} album rows", rows.len());

        Ok(fold_albums(rows))
    }

    pub async fn album(&self, album_id: PrimaryKey) -> Result<AlbumWithSongs> {
        let rows = self.database.album_rows_by_id(album_id).await?;

        fold_albums(rows)
            .into_iter()
            .next()
            .ok_or(DatabaseError::NotFound {
                resource: "album",
                identifier: "id",
            })
    }

    /// All playlists that have at least one song, with their songs in position order
    pub async fn playlists(&self) -> Result<Vec<PlaylistWithSongs>> {
        let rows = self.database.playlist_rows().await?;
        debug!("Folding {} playlist rows", rows.len());

        Ok(fold_playlists(rows))
    }

    pub async fn playlist(&self, playlist_id: PrimaryKey) -> Result<PlaylistWithSongs> {
        let rows = self.database.playlist_rows_by_id(playlist_id).await?;

        fold_playlists(rows)
            .into_iter()
            .next()
            .ok_or(DatabaseError::NotFound {
                resource: "playlist",
                identifier: "id",
            })
    }

    pub async fn songs(&self) -> Result<Vec<SongWithAlbum>> {
        let rows = self.database.songs().await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn song(&self, song_id: PrimaryKey) -> Result<SongWithAlbum> {
        self.database.song_by_id(song_id).await.map(Into::into)
    }

    /// Computes listening statistics over the playing events matching the filter
    pub async fn statistics(
        &self,
        kind: StatisticKind,
        filter: &StatsFilter,
    ) -> Result<Statistics> {
        // An inverted range can't match anything, so skip the query entirely
        let events = if filter.is_empty_range() {
            vec![]
        } else {
            self.database.playing_events(filter.user_id).await?
        };

        debug!("Computing {} statistic over {} events", kind, events.len());

        Ok(compute_statistics(&events, kind, filter))
    }

    /// Appends a playing event to the log
    pub async fn record_playing(&self, new_playing: NewPlaying) -> Result<PlayingData> {
        self.database.record_playing(new_playing).await
    }

    pub async fn signup_requests(&self) -> Result<Vec<SignupRequestData>> {
        self.database.signup_requests().await
    }

    /// Files a new signup request, pending approval
    pub async fn request_signup(
        &self,
        new_request: NewSignupRequest,
    ) -> Result<SignupRequestData> {
        self.database.create_signup_request(new_request).await
    }
}

#[cfg(test)]
mod test {
    use chrono::{Duration, Utc};

    use super::*;

    async fn catalog() -> Catalog {
        let database = SqliteDatabase::in_memory().await.unwrap();
        database.migrate().await.unwrap();
        database.seed().await.unwrap();

        Catalog::new(database)
    }

    #[tokio::test]
    async fn test_album_by_id() {
        let catalog = catalog().await;

        let album = catalog.album(3).await.unwrap();
        assert_eq!(album.album.title, "Thriller");
        assert_eq!(album.songs.len(), 3);

        assert!(matches!(
            catalog.album(42).await,
            Err(DatabaseError::NotFound {
                resource: "album",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_playlist_by_id() {
        let catalog = catalog().await;

        let playlist = catalog.playlist(2).await.unwrap();
        let titles: Vec<_> = playlist.songs.iter().map(|s| s.title.as_str()).collect();

        assert_eq!(titles, vec!["You're My Best Friend", "Billie Jean", "Love of My Life"]);
    }

    #[tokio::test]
    async fn test_song_carries_its_album() {
        let catalog = catalog().await;

        let song = catalog.song(6).await.unwrap();

        assert_eq!(song.song.title, "Stairway to Heaven");
        assert_eq!(song.album.title, "Led Zeppelin IV");
        assert_eq!(song.album.artist, "Led Zeppelin");
        assert_eq!(catalog.songs().await.unwrap().len(), 9);
    }

    #[tokio::test]
    async fn test_top_songs_for_user() {
        let catalog = catalog().await;

        let filter = StatsFilter {
            user_id: Some(1),
            from: Some((Utc::now() - Duration::days(1)).date_naive()),
            to: None,
        };

        let statistics = catalog
            .statistics(StatisticKind::Songs, &filter)
            .await
            .unwrap();

        match statistics {
            Statistics::Songs(songs) => {
                let ranking: Vec<_> = songs.iter().map(|s| (s.song_id, s.time)).collect();
                assert_eq!(ranking, vec![(4, 1820), (5, 455), (6, 455)]);
            }
            other => panic!("expected songs, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_total_playing_time() {
        let catalog = catalog().await;

        let total = catalog
            .statistics(StatisticKind::PlayingTime, &StatsFilter::default())
            .await
            .unwrap();

        assert_eq!(total, Statistics::PlayingTime(455 * 8 + 234 + 567 * 2));
    }

    #[tokio::test]
    async fn test_inverted_range_is_empty() {
        let catalog = catalog().await;
        let today = Utc::now().date_naive();

        let filter = StatsFilter {
            user_id: None,
            from: Some(today),
            to: Some(today - Duration::days(1)),
        };

        let artists = catalog
            .statistics(StatisticKind::Artists, &filter)
            .await
            .unwrap();

        assert_eq!(artists, Statistics::Artists(vec![]));
    }
}
