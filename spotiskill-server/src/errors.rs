use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::warn;
use spotiskill_catalog::DatabaseError;
use spotiskill_core::StatsError;
use thiserror::Error;

pub type ServerResult<T> = Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{resource}:{identifier} not found")]
    NotFound {
        resource: &'static str,
        identifier: &'static str,
    },
    #[error("{resource} with {field} of value {value} already exists")]
    Conflict {
        resource: &'static str,
        field: &'static str,
        value: String,
    },
    #[error("{resource} refers to a {field} that doesn't exist")]
    InvalidReference {
        resource: &'static str,
        field: &'static str,
    },
    #[error("Unknown statistic {0}, expected one of artists, albums, songs, playing_time")]
    InvalidStatistic(String),
    #[error("Unknown internal error: {0}")]
    Unknown(String),
}

impl ServerError {
    fn as_status_code(&self) -> StatusCode {
        match self {
            Self::InvalidStatistic(_) => StatusCode::BAD_REQUEST,
            Self::InvalidReference {
                resource: _,
                field: _,
            } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Conflict {
                resource: _,
                field: _,
                value: _,
            } => StatusCode::CONFLICT,
            Self::NotFound {
                resource: _,
                identifier: _,
            } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.as_status_code();

        if status.is_server_error() {
            warn!("Request failed: {}", self);
        }

        (status, self.to_string()).into_response()
    }
}

impl From<DatabaseError> for ServerError {
    fn from(value: DatabaseError) -> Self {
        match value {
            DatabaseError::NotFound {
                resource,
                identifier,
            } => Self::NotFound {
                resource,
                identifier,
            },
            DatabaseError::Conflict {
                resource,
                field,
                value,
            } => Self::Conflict {
                resource,
                field,
                value,
            },
            DatabaseError::InvalidReference { resource, field } => {
                Self::InvalidReference { resource, field }
            }
            e => Self::Unknown(e.to_string()),
        }
    }
}

impl From<StatsError> for ServerError {
    fn from(value: StatsError) -> Self {
        match value {
            StatsError::UnknownKind(kind) => Self::InvalidStatistic(kind),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_status_codes() {
        let not_found: ServerError = DatabaseError::NotFound {
            resource: "song",
            identifier: "id",
        }
        .into();
        assert_eq!(not_found.as_status_code(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.to_string(), "song:id not found");

        let invalid: ServerError = StatsError::UnknownKind("genres".to_string()).into();
        assert_eq!(invalid.as_status_code(), StatusCode::BAD_REQUEST);

        let reference: ServerError = DatabaseError::InvalidReference {
            resource: "playing",
            field: "song_id",
        }
        .into();
        assert_eq!(reference.as_status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let internal: ServerError = DatabaseError::Internal("disk on fire".into()).into();
        assert_eq!(
            internal.as_status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
