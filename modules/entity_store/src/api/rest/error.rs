//! HTTP status mapping for response envelopes

use crate::api::dispatch::Envelope;
use crate::contract::{ErrorKind, StoreError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Status code for an error kind
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound | ErrorKind::RouteNotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::FailedPrecondition => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Envelope sent as the HTTP body, with the status derived from its error kind
pub struct EnvelopeResponse {
    status: StatusCode,
    envelope: Envelope,
}

impl EnvelopeResponse {
    pub fn from_error(error: &StoreError) -> Self {
        Self {
            status: status_for(error.kind()),
            envelope: Envelope::failure(error),
        }
    }
}

impl From<Envelope> for EnvelopeResponse {
    fn from(envelope: Envelope) -> Self {
        let status = match &envelope.error {
            None => StatusCode::OK,
            Some(error) => kind_from_str(&error.kind)
                .map(status_for)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        };
        Self { status, envelope }
    }
}

impl IntoResponse for EnvelopeResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}

fn kind_from_str(kind: &str) -> Option<ErrorKind> {
    [
        ErrorKind::InvalidArgument,
        ErrorKind::NotFound,
        ErrorKind::RouteNotFound,
        ErrorKind::Conflict,
        ErrorKind::FailedPrecondition,
        ErrorKind::Internal,
    ]
    .into_iter()
    .find(|k| k.as_str() == kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_status_follows_error_kind() {
        let conflict = EnvelopeResponse::from(Envelope::failure(&StoreError::conflict("dup")));
        assert_eq!(conflict.status, StatusCode::CONFLICT);

        let stock = EnvelopeResponse::from(Envelope::failure(&StoreError::precondition("empty")));
        assert_eq!(stock.status, StatusCode::UNPROCESSABLE_ENTITY);

        let ok = EnvelopeResponse::from(Envelope::success(serde_json::json!([])));
        assert_eq!(ok.status, StatusCode::OK);
    }
}
