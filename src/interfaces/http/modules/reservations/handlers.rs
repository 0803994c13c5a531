//! Reservation API handlers
//!
//! The account page handlers mirror the page lifecycle: `my_reservations`
//! builds the full render context (listing, hash lookup, flash messages),
//! `cancel_reservation` performs the cancel transition and redirects back
//! to the page the form was submitted from.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};

use super::dto::{
    CancelReservationRequest, MakeReservationRequest, ReservationDto, ReservationsPageDto,
};
use crate::application::booking::{BookingLookup, BookingManager};
use crate::application::flash::{FlashLevel, FlashStore};
use crate::application::reservations::{CancelOutcome, PageRequest, Reservations};
use crate::domain::customer::CustomerIdentity;
use crate::domain::reservation::NewReservation;
use crate::domain::DomainError;
use crate::interfaces::http::common::{ApiResponse, PaginatedResponse, ValidatedJson};
use crate::shared::lang;

/// Reservation routes state
#[derive(Clone)]
pub struct ReservationAppState {
    pub component: Arc<Reservations>,
    pub booking: Arc<BookingManager>,
    pub flash: FlashStore,
}

fn domain_error_response<T>(error: DomainError) -> (StatusCode, Json<ApiResponse<T>>) {
    let status = match &error {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
    };
    (status, Json(ApiResponse::error(error.to_string())))
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    tag = "Reservations",
    request_body = MakeReservationRequest,
    responses(
        (status = 201, description = "Reservation created", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Unknown location"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn make_reservation(
    State(state): State<ReservationAppState>,
    identity: Option<Extension<CustomerIdentity>>,
    ValidatedJson(request): ValidatedJson<MakeReservationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReservationDto>>), (StatusCode, Json<ApiResponse<ReservationDto>>)>
{
    let reservation = state
        .booking
        .make_reservation(NewReservation {
            customer_id: identity.as_ref().map(|i| i.id),
            location_id: request.location_id,
            table_id: request.table_id,
            guest_num: request.guest_num,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            telephone: request.telephone,
            reserve_at: request.reserve_at,
        })
        .await
        .map_err(domain_error_response)?;

    // Reload with relations so the response carries the location name
    // and a correct cancel-button flag.
    let dto = match state
        .booking
        .find_by_hash(&reservation.hash, None)
        .await
        .map_err(domain_error_response)?
    {
        Some(related) => {
            let can_cancel = state.component.show_cancel_button(&related);
            ReservationDto::from_related(&related, can_cancel)
        }
        None => ReservationDto::from_reservation(&reservation, true),
    };

    Ok((StatusCode::CREATED, Json(ApiResponse::success(dto))))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations/{hash}",
    tag = "Reservations",
    params(
        ("hash" = String, Path, description = "Reservation lookup hash")
    ),
    responses(
        (status = 200, description = "Reservation found", body = ApiResponse<ReservationDto>),
        (status = 404, description = "No reservation with this hash")
    )
)]
pub async fn get_reservation(
    State(state): State<ReservationAppState>,
    identity: Option<Extension<CustomerIdentity>>,
    Path(hash): Path<String>,
) -> Result<Json<ApiResponse<ReservationDto>>, (StatusCode, Json<ApiResponse<ReservationDto>>)> {
    let related = state
        .booking
        .find_by_hash(&hash, identity.as_deref())
        .await
        .map_err(domain_error_response)?;

    let Some(related) = related else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Reservation not found")),
        ));
    };

    let can_cancel = state.component.show_cancel_button(&related);
    Ok(Json(ApiResponse::success(ReservationDto::from_related(
        &related, can_cancel,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/account/reservations",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<u32>, Query, description = "Page number, 1-based"),
        ("hash" = Option<String>, Query, description = "Lookup hash of a single reservation (parameter name is configurable)")
    ),
    responses(
        (status = 200, description = "Account reservations page", body = ApiResponse<ReservationsPageDto>)
    )
)]
pub async fn my_reservations(
    State(state): State<ReservationAppState>,
    identity: Option<Extension<CustomerIdentity>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ApiResponse<ReservationsPageDto>>, (StatusCode, Json<ApiResponse<ReservationsPageDto>>)>
{
    let page = params.get("page").and_then(|p| p.parse().ok());
    let request = PageRequest { page, params };
    let customer = identity.as_deref();

    let context = state
        .component
        .render_context(&request, customer)
        .await
        .map_err(domain_error_response)?;

    let reservations = PaginatedResponse::from_result(context.customer_reservations, |r| {
        let can_cancel = state.component.show_cancel_button(&r);
        ReservationDto::from_related(&r, can_cancel)
    });
    let selected = context.customer_reservation.map(|r| {
        let can_cancel = state.component.show_cancel_button(&r);
        ReservationDto::from_related(&r, can_cancel)
    });
    let flash = match customer {
        Some(customer) => state.flash.drain(customer.id),
        None => Vec::new(),
    };

    Ok(Json(ApiResponse::success(ReservationsPageDto {
        reservations_page: context.reservations_page,
        date_time_format: context.date_time_format,
        reservations,
        selected,
        flash,
    })))
}

#[utoipa::path(
    post,
    path = "/api/v1/account/reservations/cancel",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    request_body = CancelReservationRequest,
    responses(
        (status = 204, description = "Nothing to cancel: malformed or unknown id"),
        (status = 303, description = "Reservation canceled, redirect back to the page"),
        (status = 422, description = "Reservation can no longer be canceled")
    )
)]
pub async fn cancel_reservation(
    State(state): State<ReservationAppState>,
    identity: Option<Extension<CustomerIdentity>>,
    headers: HeaderMap,
    ValidatedJson(request): ValidatedJson<CancelReservationRequest>,
) -> Response {
    let outcome = match state.component.cancel(&request.reservation_id).await {
        Ok(outcome) => outcome,
        Err(error) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<()>::error(error.to_string())),
            )
                .into_response();
        }
    };

    match outcome {
        CancelOutcome::Ignored => StatusCode::NO_CONTENT.into_response(),
        CancelOutcome::Rejected => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiResponse::<()>::error(lang("reservations.cancel_failed"))),
        )
            .into_response(),
        CancelOutcome::Canceled(_) => {
            if let Some(identity) = identity.as_deref() {
                state.flash.queue(
                    identity.id,
                    FlashLevel::Success,
                    lang("reservations.cancel_success"),
                );
            }

            // Back to the page the form was submitted from.
            let back = headers
                .get(header::REFERER)
                .and_then(|h| h.to_str().ok())
                .map(String::from)
                .unwrap_or_else(|| format!("/{}", state.component.reservations_page()));

            (StatusCode::SEE_OTHER, [(header::LOCATION, back)]).into_response()
        }
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
    use chrono::{Duration, Utc};
    use tower::ServiceExt;

    use crate::application::flash::FlashLevel;
    use crate::config::ReservationsConfig;
    use crate::infrastructure::memory::InMemoryRepositoryProvider;

    struct Fixture {
        state: ReservationAppState,
        booking: Arc<BookingManager>,
        location_id: i32,
    }

    fn fixture() -> Fixture {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let location = repos.seed_location("Main Hall", 0);
        let booking = Arc::new(BookingManager::new(repos.clone()));
        let component = Arc::new(Reservations::new(
            repos,
            booking.clone(),
            ReservationsConfig::default(),
        ));
        Fixture {
            state: ReservationAppState {
                component,
                booking: booking.clone(),
                flash: FlashStore::new(),
            },
            booking,
            location_id: location.id,
        }
    }

    /// Cancel route with the given customer already authenticated,
    /// the way the optional-auth middleware would leave it.
    fn cancel_app(fixture: &Fixture, customer: Option<CustomerIdentity>) -> Router {
        let mut app = Router::new()
            .route("/api/v1/account/reservations/cancel", post(cancel_reservation))
            .with_state(fixture.state.clone());
        if let Some(customer) = customer {
            app = app.layer(Extension(customer));
        }
        app
    }

    fn identity(id: i32) -> CustomerIdentity {
        CustomerIdentity {
            id,
            email: format!("customer{id}@example.com"),
            name: format!("Customer {id}"),
        }
    }

    async fn book(fixture: &Fixture, customer_id: i32) -> crate::domain::reservation::Reservation {
        fixture
            .booking
            .make_reservation(NewReservation {
                customer_id: Some(customer_id),
                location_id: fixture.location_id,
                table_id: None,
                guest_num: 2,
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                telephone: "+100000000".to_string(),
                reserve_at: Utc::now() + Duration::hours(4),
            })
            .await
            .unwrap()
    }

    fn cancel_request(reservation_id: &str, referer: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/v1/account/reservations/cancel")
            .header("content-type", "application/json");
        if let Some(referer) = referer {
            builder = builder.header("referer", referer);
        }
        builder
            .body(Body::from(
                serde_json::json!({ "reservation_id": reservation_id }).to_string(),
            ))
            .unwrap()
    }

    #[tokio::test]
    async fn successful_cancel_redirects_back_and_queues_one_flash() {
        let fixture = fixture();
        let reservation = book(&fixture, 1).await;
        let app = cancel_app(&fixture, Some(identity(1)));

        let referer = "/account/reservations?page=2";
        let resp = app
            .oneshot(cancel_request(&reservation.id.to_string(), Some(referer)))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            referer
        );

        // exactly one success message awaits the next page render
        assert_eq!(fixture.state.flash.pending(1), 1);
        let messages = fixture.state.flash.drain(1);
        assert_eq!(messages[0].level, FlashLevel::Success);
        assert_eq!(messages[0].message, lang("reservations.cancel_success"));
    }

    #[tokio::test]
    async fn cancel_without_referer_falls_back_to_reservations_page() {
        let fixture = fixture();
        let reservation = book(&fixture, 1).await;
        let app = cancel_app(&fixture, Some(identity(1)));

        let resp = app
            .oneshot(cancel_request(&reservation.id.to_string(), None))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/account/reservations"
        );
    }

    #[tokio::test]
    async fn empty_id_is_acknowledged_without_effect() {
        let fixture = fixture();
        let reservation = book(&fixture, 1).await;
        let app = cancel_app(&fixture, Some(identity(1)));

        let resp = app.oneshot(cancel_request("", None)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert_eq!(fixture.state.flash.pending(1), 0);

        let current = fixture
            .booking
            .find_by_hash(&reservation.hash, None)
            .await
            .unwrap()
            .unwrap();
        assert!(!current.reservation.is_canceled());
    }

    #[tokio::test]
    async fn second_cancel_attempt_is_rejected() {
        let fixture = fixture();
        let reservation = book(&fixture, 1).await;
        let id = reservation.id.to_string();

        let resp = cancel_app(&fixture, Some(identity(1)))
            .oneshot(cancel_request(&id, None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let resp = cancel_app(&fixture, Some(identity(1)))
            .oneshot(cancel_request(&id, None))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        // the first cancel's flash is still the only one queued
        assert_eq!(fixture.state.flash.pending(1), 1);
    }
}
