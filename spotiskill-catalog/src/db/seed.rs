use chrono::{Duration, SubsecRound, Utc};
use log::info;
use sqlx::query;

use crate::{IntoDatabaseError, Result, SqliteDatabase};

const ALBUMS: [(i64, &str, &str, &str); 3] = [
    (1, "A Night at the Opera", "Queen", "1975-07-16"),
    (2, "Led Zeppelin IV", "Led Zeppelin", "1982-07-14"),
    (3, "Thriller", "Michael Jackson", "1984-07-11"),
];

const SONGS: [(i64, &str, &str, i64); 9] = [
    (1, "Bohemian Rhapsody", "Queen", 1),
    (2, "You're My Best Friend", "Queen", 1),
    (3, "Love of My Life", "Queen", 1),
    (4, "Black Dog", "Led Zeppelin", 2),
    (5, "Rock and Roll", "Led Zeppelin", 2),
    (6, "Stairway to Heaven", "Led Zeppelin", 2),
    (7, "Thriller", "Michael Jackson", 3),
    (8, "Beat It", "Michael Jackson", 3),
    (9, "Billie Jean", "Michael Jackson", 3),
];

const USERS: [(i64, &str, &str); 3] = [
    (1, "admin@email.com", "Admin"),
    (2, "user1@email.com", "User1"),
    (3, "user2@email.com", "User2"),
];

const SIGNUP_REQUESTS: [(i64, &str); 2] = [(1, "john.doe@email.com"), (2, "john.doe2@email.com")];

/// Playlists with their songs, in position order
const PLAYLISTS: [(i64, &str, &str, [i64; 3]); 2] = [
    (1, "Rock Classics", "John Doe", [3, 6, 4]),
    (2, "80s Pop", "John Doe", [2, 9, 3]),
];

/// (id, user, song, seconds played, minutes ago)
const PLAYINGS: [(i64, i64, i64, u32, i64); 11] = [
    (1, 1, 4, 455, 2 * 60),
    (2, 1, 4, 455, 60),
    (3, 1, 4, 455, 30),
    (4, 1, 4, 455, 15),
    (5, 1, 6, 455, 10),
    (6, 1, 5, 455, 5),
    (7, 2, 4, 455, 2 * 60),
    (8, 2, 7, 234, 60),
    (9, 3, 2, 567, 30),
    (10, 3, 1, 567, 2 * 30 * 24 * 60),
    (11, 1, 1, 455, 4 * 30 * 24 * 60),
];

impl SqliteDatabase {
    /// Replaces the content of every table with the demo dataset.
    /// Playing events are timestamped relative to now.
    pub async fn seed(&self) -> Result<()> {
        info!("Seeding database with demo data...");

        let mut tx = self.pool.begin().await.map_err(|e| e.any())?;

        // Children first, because of the restricting foreign keys
        for table in [
            "Playing",
            "PlaylistSong",
            "Playlist",
            "Song",
            "Album",
            "SignupRequest",
            "User",
        ] {
            query(&format!("DELETE FROM {table}"))
                .execute(&mut *tx)
                .await
                .map_err(|e| e.any())?;
        }

        for (id, title, artist, release_date) in ALBUMS {
            query("INSERT INTO Album (id, title, artist, release_date) VALUES (?, ?, ?, ?)")
                .bind(id)
                .bind(title)
                .bind(artist)
                .bind(release_date)
                .execute(&mut *tx)
                .await
                .map_err(|e| e.any())?;
        }

        for (id, title, artist, album_id) in SONGS {
            query("INSERT INTO Song (id, title, artist, album_id) VALUES (?, ?, ?, ?)")
                .bind(id)
                .bind(title)
                .bind(artist)
                .bind(album_id)
                .execute(&mut *tx)
                .await
                .map_err(|e| e.any())?;
        }

        for (id, email, name) in USERS {
            query(
                "INSERT INTO User (id, email, password, first_name, last_name) VALUES (?, ?, 'password', ?, ?)",
            )
            .bind(id)
            .bind(email)
            .bind(name)
            .bind(name)
            .execute(&mut *tx)
            .await
            .map_err(|e| e.any())?;
        }

        for (id, email) in SIGNUP_REQUESTS {
            query(
                "INSERT INTO SignupRequest (id, email, password, first_name, last_name, status) VALUES (?, ?, 'password', 'John', 'Doe', 'pending')",
            )
            .bind(id)
            .bind(email)
            .execute(&mut *tx)
            .await
            .map_err(|e| e.any())?;
        }

        for (id, title, author, songs) in PLAYLISTS {
            query("INSERT INTO Playlist (id, title, author) VALUES (?, ?, ?)")
                .bind(id)
                .bind(title)
                .bind(author)
                .execute(&mut *tx)
                .await
                .map_err(|e| e.any())?;

            for (position, song_id) in songs.into_iter().enumerate() {
                query("INSERT INTO PlaylistSong (playlist_id, song_id, position) VALUES (?, ?, ?)")
                    .bind(id)
                    .bind(song_id)
                    .bind(position as i64)
                    .execute(&mut *tx)
                    .await
                    .map_err(|e| e.any())?;
            }
        }

        let now = Utc::now().naive_utc().trunc_subsecs(0);

        for (id, user_id, song_id, time, minutes_ago) in PLAYINGS {
            query("INSERT INTO Playing (id, user_id, song_id, time, playing_at) VALUES (?, ?, ?, ?, ?)")
                .bind(id)
                .bind(user_id)
                .bind(song_id)
                .bind(time)
                .bind(now - Duration::minutes(minutes_ago))
                .execute(&mut *tx)
                .await
                .map_err(|e| e.any())?;
        }

        tx.commit().await.map_err(|e| e.any())
    }
}
