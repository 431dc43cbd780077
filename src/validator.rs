use anyhow::anyhow;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use emqam_core::AppError;
use emqam_models::{FormRecord, parse_payload};
use validator::{Validate, ValidationErrors};

fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

/// Request body parsed as `&`-separated `key=value` pairs.
///
/// A body that is not text, or that contains a malformed pair or an
/// unknown value for an enumerated key, is rejected with 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormPayload<T>(pub T);

impl<T, S> FromRequest<S> for FormPayload<T>
where
    T: FormRecord + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|_| AppError::bad_request(anyhow!("Invalid request body")))?;

        parse_payload::<T>(&body)
            .map(FormPayload)
            .map_err(AppError::bad_request)
    }
}

/// [`FormPayload`] whose record must also pass its `validator` rules
/// (422 otherwise).
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedForm<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedForm<T>
where
    T: FormRecord + Validate + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let FormPayload(value) = FormPayload::<T>::from_request(req, state).await?;

        value.validate().map_err(|errors| {
            AppError::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                anyhow!("{}", format_errors(&errors)),
            )
        })?;

        Ok(ValidatedForm(value))
    }
}
