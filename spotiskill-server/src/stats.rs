use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json,
};
use spotiskill_core::StatisticKind;

use crate::{
    context::ServerContext,
    errors::ServerResult,
    schemas::{NewPlayingSchema, StatsQuerySchema, ValidatedJson, ValidatedQuery},
    serialized::{PlayingResponse, StatisticsResponse},
    Router,
};

#[utoipa::path(
    get,
    path = "/api/stats",
    tag = "stats",
    params(StatsQuerySchema),
    responses(
        (status = 200, description = "The top three entries, or the total playing time in seconds", body = StatisticsResponse),
        (status = 400, description = "The statistic kind or a filter is invalid")
    )
)]
async fn statistics(
    State(context): State<ServerContext>,
    ValidatedQuery(query): ValidatedQuery<StatsQuerySchema>,
) -> ServerResult<Json<StatisticsResponse>> {
    let kind: StatisticKind = query.kind.parse()?;
    let statistics = context.catalog.statistics(kind, &query.filter()).await?;

    Ok(Json(StatisticsResponse::new(&statistics)))
}

#[utoipa::path(
    post,
    path = "/api/playings",
    tag = "stats",
    request_body = NewPlayingSchema,
    responses(
        (status = 201, body = PlayingResponse),
        (status = 422, description = "The user or the song doesn't exist")
    )
)]
async fn record_playing(
    State(context): State<ServerContext>,
    ValidatedJson(body): ValidatedJson<NewPlayingSchema>,
) -> ServerResult<(StatusCode, Json<PlayingResponse>)> {
    let playing = context.catalog.record_playing(body.into()).await?;

    Ok((StatusCode::CREATED, Json(PlayingResponse::new(&playing))))
}

pub fn router() -> Router {
    Router::new()
        .route("/stats", get(statistics))
        .route("/playings", post(record_playing))
}
