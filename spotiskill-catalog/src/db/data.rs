pub use spotiskill_core::PrimaryKey;

/// A spotiskill account
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserData {
    pub id: PrimaryKey,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// A request to create an account, waiting for approval
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SignupRequestData {
    pub id: PrimaryKey,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    /// One of `pending`, `accepted` or `rejected`
    pub status: String,
}

/// A single playback event, as stored
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PlayingData {
    pub id: PrimaryKey,
    pub user_id: PrimaryKey,
    pub song_id: PrimaryKey,
    /// Seconds played
    pub time: u32,
    pub playing_at: chrono::NaiveDateTime,
}
