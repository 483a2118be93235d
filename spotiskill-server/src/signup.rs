use axum::{extract::State, http::StatusCode, routing::get, Json};

use crate::{
    context::ServerContext,
    errors::ServerResult,
    schemas::{SignupSchema, ValidatedJson},
    serialized::{SignupRequestList, SignupRequestResponse},
    Router,
};

#[utoipa::path(
    get,
    path = "/api/signup",
    tag = "signup",
    responses(
        (status = 200, body = SignupRequestList)
    )
)]
async fn list_signup_requests(
    State(context): State<ServerContext>,
) -> ServerResult<Json<SignupRequestList>> {
    let requests = context.catalog.signup_requests().await?;

    Ok(Json(SignupRequestList::new(&requests)))
}

#[utoipa::path(
    post,
    path = "/api/signup",
    tag = "signup",
    request_body = SignupSchema,
    responses(
        (status = 201, description = "The request was filed and is pending", body = SignupRequestResponse),
        (status = 400, description = "The request body is invalid"),
        (status = 409, description = "A request with this email already exists")
    )
)]
async fn request_signup(
    State(context): State<ServerContext>,
    ValidatedJson(body): ValidatedJson<SignupSchema>,
) -> ServerResult<(StatusCode, Json<SignupRequestResponse>)> {
    let request = context.catalog.request_signup(body.into()).await?;

    Ok((StatusCode::CREATED, Json(SignupRequestResponse::new(&request))))
}

pub fn router() -> Router {
    Router::new().route("/signup", get(list_signup_requests).post(request_signup))
}
