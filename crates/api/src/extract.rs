//! Request extractors whose rejections are [`AppError`]s.
//!
//! Axum's stock `Json`, `Query` and `Path` reject with plain-text bodies.
//! These wrappers keep every failure inside the `{ error, code }` JSON shape.

use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use nawy_core::error::CoreError;
use nawy_core::types::DbId;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON request body. Syntax errors, a missing `Content-Type` and bodies of
/// the wrong shape become `400 BAD_REQUEST`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(ApiJson(value))
    }
}

/// Query string. Only structural problems (a repeated key) are rejected here;
/// per-parameter checks belong to the handler's validator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(ApiQuery(value))
    }
}

/// The `{id}` segment of `/apartments/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApartmentId(pub DbId);

impl<S> FromRequestParts<S> for ApartmentId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<DbId>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(error = %rejection, "Unparsable apartment id");
                AppError::Core(CoreError::InvalidParameter {
                    field: "id",
                    expected: "an integer",
                })
            })?;
        Ok(ApartmentId(id))
    }
}
