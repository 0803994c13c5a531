//! Validated JSON extractor for Axum
//!
//! `ValidatedJson<T>` deserializes a request body like `axum::Json<T>` and
//! then runs `validator::Validate::validate()` on it, so handlers only ever
//! see request DTOs that satisfy their field rules. Rejections carry the
//! `ApiResponse` error envelope used by the rest of the API: 400 for a body
//! that does not parse, 422 with per-field messages when validation fails.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use super::ApiResponse;

pub struct ValidatedJson<T>(pub T);

/// Extraction failure, already shaped as an API error response.
pub struct ValidatedJsonRejection {
    status: StatusCode,
    message: String,
}

impl ValidatedJsonRejection {
    fn malformed(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: format!("Invalid JSON: {}", rejection),
        }
    }

    fn invalid(errors: ValidationErrors) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: field_error_summary(&errors),
        }
    }
}

/// Flatten field errors into one "field: message" list, sorted by field
/// name so the summary is stable across runs.
fn field_error_summary(errors: &ValidationErrors) -> String {
    let mut lines: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                match &e.message {
                    Some(message) => format!("{}: {}", field, message),
                    None => format!("{}: {:?}", field, e.code),
                }
            })
        })
        .collect();

    if lines.is_empty() {
        return "Validation failed".to_string();
    }
    lines.sort();
    lines.join("; ")
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        let body = ApiResponse::<()>::error(self.message);
        (self.status, Json(body)).into_response()
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(
        req: axum::extract::Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::malformed)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::invalid)?;

        Ok(ValidatedJson(value))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::post;
    use axum::Router;
    use tower::ServiceExt;

    use crate::interfaces::http::modules::reservations::dto::MakeReservationRequest;

    async fn handler(
        ValidatedJson(body): ValidatedJson<MakeReservationRequest>,
    ) -> String {
        body.email
    }

    fn app() -> Router {
        Router::new().route("/reservations", post(handler))
    }

    fn request(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/reservations")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    fn booking_json(guest_num: i32, email: &str) -> String {
        serde_json::json!({
            "location_id": 1,
            "table_id": null,
            "guest_num": guest_num,
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": email,
            "telephone": "+100000000",
            "reserve_at": "2030-06-01T19:00:00Z",
        })
        .to_string()
    }

    #[tokio::test]
    async fn valid_booking_reaches_the_handler() {
        let resp = app()
            .oneshot(request(booking_json(4, "ada@example.com")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unparseable_body_is_a_400() {
        let resp = app().oneshot(request("not json".to_string())).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn field_rule_violations_are_a_422() {
        // zero guests and a bad email address
        let resp = app()
            .oneshot(request(booking_json(0, "not-an-email")))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn summary_lists_fields_in_stable_order() {
        #[derive(serde::Deserialize, Validate)]
        struct TwoFields {
            #[validate(length(min = 1, message = "must not be empty"))]
            name: String,
            #[validate(range(min = 1, message = "must be positive"))]
            count: i32,
        }

        let errors = TwoFields {
            name: String::new(),
            count: 0,
        }
        .validate()
        .unwrap_err();

        assert_eq!(
            field_error_summary(&errors),
            "count: must be positive; name: must not be empty"
        );
    }
}
