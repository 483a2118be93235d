use axum::{response::IntoResponse, Json};
use utoipa::OpenApi;

use crate::{catalog, schemas, serialized, signup, stats};

#[derive(OpenApi)]
#[openapi(
    paths(
        catalog::list_songs,
        catalog::song,
        catalog::list_albums,
        catalog::album,
        catalog::list_playlists,
        catalog::playlist,
        stats::statistics,
        stats::record_playing,
        signup::list_signup_requests,
        signup::request_signup,
    ),
    components(schemas(
        schemas::SignupSchema,
        schemas::NewPlayingSchema,
        serialized::Song,
        serialized::AlbumSummary,
        serialized::SongDetails,
        serialized::Album,
        serialized::Playlist,
        serialized::SignupRequest,
        serialized::Playing,
        serialized::ArtistTotal,
        serialized::AlbumTotal,
        serialized::SongTotal,
        serialized::PlayingTime,
        serialized::Statistics,
        serialized::SongList,
        serialized::SongResponse,
        serialized::AlbumList,
        serialized::AlbumResponse,
        serialized::PlaylistList,
        serialized::PlaylistResponse,
        serialized::SignupRequestList,
        serialized::SignupRequestResponse,
        serialized::PlayingResponse,
        serialized::StatisticsResponse,
    )),
    tags(
        (name = "songs"),
        (name = "albums"),
        (name = "playlists"),
        (name = "stats", description = "Listening statistics and playing events"),
        (name = "signup", description = "Signup requests awaiting review"),
    ),
    info(
        title = "Spotiskill API",
        description = "spotiskill-server exposes the music catalog and listening statistics"
    )
)]
pub struct ApiDoc;

pub async fn docs() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
