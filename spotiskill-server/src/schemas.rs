use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{request::Parts, StatusCode},
    Json,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{de::DeserializeOwned, Deserialize};
use spotiskill_catalog::{NewPlaying, NewSignupRequest, PrimaryKey};
use spotiskill_core::StatsFilter;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, ToSchema, Validate, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignupSchema {
    #[validate(email, length(max = 128))]
    pub email: String,
    #[validate(length(min = 8, max = 64))]
    pub password: String,
    #[validate(length(min = 1, max = 128))]
    pub first_name: String,
    #[validate(length(min = 1, max = 128))]
    pub last_name: String,
}

#[derive(Debug, ToSchema, Validate, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewPlayingSchema {
    #[validate(range(min = 1))]
    pub user_id: PrimaryKey,
    #[validate(range(min = 1))]
    pub song_id: PrimaryKey,
    /// Seconds played
    pub time: u32,
    /// Defaults to now
    pub playing_at: Option<NaiveDateTime>,
}

#[derive(Debug, IntoParams, Validate, Deserialize)]
#[into_params(parameter_in = Query)]
pub struct StatsQuerySchema {
    /// One of `artists`, `albums`, `songs` or `playing_time`
    pub kind: String,
    /// Only count playing events of this user
    #[validate(range(min = 1))]
    pub user_id: Option<PrimaryKey>,
    /// First day included
    pub from: Option<NaiveDate>,
    /// Last day included
    pub to: Option<NaiveDate>,
}

impl From<SignupSchema> for NewSignupRequest {
    fn from(body: SignupSchema) -> Self {
        Self {
            email: body.email,
            password: body.password,
            first_name: body.first_name,
            last_name: body.last_name,
        }
    }
}

impl From<NewPlayingSchema> for NewPlaying {
    fn from(body: NewPlayingSchema) -> Self {
        Self {
            user_id: body.user_id,
            song_id: body.song_id,
            time: body.time,
            playing_at: body.playing_at,
        }
    }
}

impl StatsQuerySchema {
    pub fn filter(&self) -> StatsFilter {
        StatsFilter {
            user_id: self.user_id,
            from: self.from,
            to: self.to,
        }
    }
}

pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let extracted_json: Json<T> = Json::from_request(req, state)
            .await
            .map_err(|_| (StatusCode::BAD_REQUEST, "JSON parse failed"))?;

        extracted_json
            .0
            .validate()
            .map_err(|_| (StatusCode::BAD_REQUEST, "Request body is invalid"))?;

        Ok(Self(extracted_json.0))
    }
}

pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|_| (StatusCode::BAD_REQUEST, "Query string parse failed"))?;

        query
            .validate()
            .map_err(|_| (StatusCode::BAD_REQUEST, "Query string is invalid"))?;

        Ok(Self(query))
    }
}
