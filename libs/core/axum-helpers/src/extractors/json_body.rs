//! JSON body extractor with uniform error responses.

use crate::errors::AppError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Json, OptionalFromRequest, Request},
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// `axum::Json` whose rejections use the standard [`crate::ErrorResponse`] body.
///
/// Every rejection (missing content type, syntax error, wrong field types)
/// becomes a 400 with a `message`, so clients see a single error shape.
/// Field presence rules belong to the domain, which is why request DTOs
/// usually declare their fields as `Option<_>`.
///
/// As `Option<JsonBody<T>>` the extractor yields `None` when the request has
/// no JSON content type or an empty body, so the handler can apply the same
/// field rules it applies to `{}`.
///
/// # Example
/// ```ignore
/// use axum_helpers::extractors::JsonBody;
///
/// async fn create(JsonBody(input): JsonBody<CreateThing>) -> StatusCode {
///     StatusCode::CREATED
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match <Json<T> as FromRequest<S>>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(AppError::from(rejection).into_response()),
        }
    }
}

impl<T, S> OptionalFromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Option<Self>, Self::Rejection> {
        if !has_json_content_type(&req) {
            return Ok(None);
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()).into_response())?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        match Json::<T>::from_bytes(&bytes) {
            Ok(Json(value)) => Ok(Some(JsonBody(value))),
            Err(rejection) => Err(AppError::from(rejection).into_response()),
        }
    }
}

/// `application/json` or any `+json` media type, parameters ignored
fn has_json_content_type(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}
