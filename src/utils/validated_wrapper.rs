use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::{Validate, ValidationErrors};

use crate::utils::api_response::{ResponseBuilder, ValidationErrorDetail};

/// JSON extractor that also runs `validator` rules and rejects with a
/// structured 400 listing every failing field.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: serde::de::DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = axum::response::Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state).await.map_err(|err| {
            ResponseBuilder::error::<()>(
                StatusCode::BAD_REQUEST,
                "INVALID_JSON",
                &format!("Invalid JSON body: {}", err.body_text()),
            )
            .into_response()
        })?;

        if let Err(errors) = payload.validate() {
            return Err(ResponseBuilder::fail_with_data(
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                "Validation failed",
                flatten_errors(errors),
            )
            .into_response());
        }

        Ok(ValidatedJson(payload))
    }
}

fn flatten_errors(errors: ValidationErrors) -> Vec<ValidationErrorDetail> {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, kinds)| {
            kinds.iter().map(move |err| ValidationErrorDetail {
                field: field.to_string(),
                title: err.code.to_string(),
                message: err
                    .message
                    .clone()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Invalid value".to_string()),
            })
        })
        .collect()
}
