//! Room directory REST surface
//!
//! Small HTTP API for room creation/listing and the identity picker,
//! served by the same binary as the WebSocket route and protected by the
//! same bearer-token verifier.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use huddle_common::{AppError, ErrorResponse};
use huddle_core::Snowflake;
use huddle_service::{CreateRoomRequest, IdentityResponse, RoomDirectory, RoomResponse};

use crate::server::GatewayState;

/// `GET /api/rooms` - rooms visible to the caller, newest first
pub async fn list_rooms(
    State(state): State<GatewayState>,
    headers: HeaderMap,
) -> Result<Json<Vec<RoomResponse>>, ApiError> {
    let identity_id = authenticate(&state, &headers).await?;

    let directory = RoomDirectory::new(state.services());
    let rooms = directory.list_rooms(identity_id).await.map_err(AppError::from)?;
    Ok(Json(rooms))
}

/// `POST /api/rooms` - create a room owned by the caller
pub async fn create_room(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    Json(request): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<RoomResponse>), ApiError> {
    let identity_id = authenticate(&state, &headers).await?;

    let directory = RoomDirectory::new(state.services());
    let room = directory
        .create_room(identity_id, request)
        .await
        .map_err(AppError::from)?;
    Ok((StatusCode::CREATED, Json(room)))
}

/// `GET /api/identities` - every identity, for participant pickers
pub async fn list_identities(
    State(state): State<GatewayState>,
    headers: HeaderMap,
) -> Result<Json<Vec<IdentityResponse>>, ApiError> {
    authenticate(&state, &headers).await?;

    let directory = RoomDirectory::new(state.services());
    let identities = directory.list_identities().await.map_err(AppError::from)?;
    Ok(Json(identities))
}

/// Resolve the caller's identity from the `Authorization` header
async fn authenticate(state: &GatewayState, headers: &HeaderMap) -> Result<Snowflake, ApiError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(AppError::MissingAuth)?;

    let identity_id = state
        .services()
        .verifier()
        .verify(token)
        .await
        .map_err(|_| AppError::InvalidToken)?;

    Ok(identity_id)
}

/// Wrapper making `AppError` an axum response
#[derive(Debug)]
pub struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if !self.0.is_client_error() {
            tracing::error!(error = %self.0, "Directory request failed");
        }

        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorResponse::from(&self.0);

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_status_mapping() {
        let response = ApiError(AppError::MissingAuth).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = ApiError(AppError::NotFound("room 1".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
