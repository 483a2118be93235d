use axum::{
    extract::{Path, State},
    routing::get,
    Json,
};
use spotiskill_catalog::PrimaryKey;

use crate::{
    context::ServerContext,
    errors::ServerResult,
    serialized::{AlbumList, AlbumResponse, PlaylistList, PlaylistResponse, SongList, SongResponse},
    Router,
};

#[utoipa::path(
    get,
    path = "/api/songs",
    tag = "songs",
    responses(
        (status = 200, body = SongList)
    )
)]
async fn list_songs(State(context): State<ServerContext>) -> ServerResult<Json<SongList>> {
    let songs = context.catalog.songs().await?;

    Ok(Json(SongList::new(&songs)))
}

#[utoipa::path(
    get,
    path = "/api/songs/{id}",
    tag = "songs",
    params(
        ("id" = i64, Path, description = "The id of the song")
    ),
    responses(
        (status = 200, body = SongResponse),
        (status = 404, description = "The song doesn't exist")
    )
)]
async fn song(
    State(context): State<ServerContext>,
    Path(song_id): Path<PrimaryKey>,
) -> ServerResult<Json<SongResponse>> {
    let song = context.catalog.song(song_id).await?;

    Ok(Json(SongResponse::new(&song)))
}

#[utoipa::path(
    get,
    path = "/api/albums",
    tag = "albums",
    responses(
        (status = 200, description = "Albums by release date, with their songs", body = AlbumList)
    )
)]
async fn list_albums(State(context): State<ServerContext>) -> ServerResult<Json<AlbumList>> {
    let albums = context.catalog.albums().await?;

    Ok(Json(AlbumList::new(&albums)))
}

#[utoipa::path(
    get,
    path = "/api/albums/{id}",
    tag = "albums",
    params(
        ("id" = i64, Path, description = "The id of the album")
    ),
    responses(
        (status = 200, body = AlbumResponse),
        (status = 404, description = "The album doesn't exist or has no songs")
    )
)]
async fn album(
    State(context): State<ServerContext>,
    Path(album_id): Path<PrimaryKey>,
) -> ServerResult<Json<AlbumResponse>> {
    let album = context.catalog.album(album_id).await?;

    Ok(Json(AlbumResponse::new(&album)))
}

#[utoipa::path(
    get,
    path = "/api/playlists",
    tag = "playlists",
    responses(
        (status = 200, description = "Playlists with their songs in playlist order", body = PlaylistList)
    )
)]
async fn list_playlists(State(context): State<ServerContext>) -> ServerResult<Json<PlaylistList>> {
    let playlists = context.catalog.playlists().await?;

    Ok(Json(PlaylistList::new(&playlists)))
}

#[utoipa::path(
    get,
    path = "/api/playlists/{id}",
    tag = "playlists",
    params(
        ("id" = i64, Path, description = "The id of the playlist")
    ),
    responses(
        (status = 200, body = PlaylistResponse),
        (status = 404, description = "The playlist doesn't exist or is empty")
    )
)]
async fn playlist(
    State(context): State<ServerContext>,
    Path(playlist_id): Path<PrimaryKey>,
) -> ServerResult<Json<PlaylistResponse>> {
    let playlist = context.catalog.playlist(playlist_id).await?;

    Ok(Json(PlaylistResponse::new(&playlist)))
}

pub fn router() -> Router {
    Router::new()
        .route("/songs", get(list_songs))
        .route("/songs/:id", get(song))
        .route("/albums", get(list_albums))
        .route("/albums/:id", get(album))
        .route("/playlists", get(list_playlists))
        .route("/playlists/:id", get(playlist))
}
