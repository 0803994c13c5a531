//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::booking::BookingManager;
use crate::application::flash::FlashStore;
use crate::application::reservations::Reservations;
use crate::auth::jwt::JwtConfig;
use crate::auth::middleware::{auth_middleware, optional_auth_middleware, AuthState};
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::{ApiResponse, PaginatedResponse};
use crate::interfaces::http::modules::metrics::{
    http_metrics_middleware, prometheus_metrics, MetricsState,
};
use crate::interfaces::http::modules::{auth, health, reservations};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Auth
        auth::handlers::register,
        auth::handlers::login,
        auth::handlers::get_current_customer,
        // Reservations
        reservations::handlers::make_reservation,
        reservations::handlers::get_reservation,
        reservations::handlers::my_reservations,
        reservations::handlers::cancel_reservation,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            PaginatedResponse<reservations::ReservationDto>,
            // Health
            health::HealthResponse,
            health::ComponentHealth,
            // Auth
            auth::RegisterRequest,
            auth::LoginRequest,
            auth::LoginResponse,
            auth::CustomerInfo,
            // Reservations
            reservations::MakeReservationRequest,
            reservations::CancelReservationRequest,
            reservations::ReservationDto,
            reservations::ReservationsPageDto,
            crate::application::flash::FlashMessage,
            crate::application::flash::FlashLevel,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "Customer accounts: registration, login (JWT), current account"),
        (name = "Reservations", description = "Table bookings: create, hash lookup, account listing, cancel"),
    ),
    info(
        title = "Tablebook API",
        version = "1.0.0",
        description = "REST API for restaurant table reservations",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    db: DatabaseConnection,
    jwt_config: JwtConfig,
    booking: Arc<BookingManager>,
    component: Arc<Reservations>,
    flash: FlashStore,
    metrics_handle: PrometheusHandle,
) -> Router {
    let middleware_state = AuthState {
        jwt_config: jwt_config.clone(),
    };

    let auth_state = auth::AuthHandlerState {
        repos: repos.clone(),
        jwt_config,
    };

    let reservation_state = reservations::ReservationAppState {
        component,
        booking,
        flash,
    };

    let health_state = health::HealthState {
        db,
        started_at: Arc::new(Instant::now()),
    };

    let metrics_state = MetricsState {
        handle: metrics_handle,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Auth routes (public)
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .with_state(auth_state.clone());

    // Auth routes (protected)
    let auth_protected_routes = Router::new()
        .route("/me", get(auth::get_current_customer))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            auth_middleware,
        ))
        .with_state(auth_state);

    // Booking routes: anonymous bookings are allowed, a valid token
    // attaches the owner.
    let booking_routes = Router::new()
        .route("/", post(reservations::make_reservation))
        .route("/{hash}", get(reservations::get_reservation))
        .layer(middleware::from_fn_with_state(
            middleware_state.clone(),
            optional_auth_middleware,
        ))
        .with_state(reservation_state.clone());

    // Account reservations page routes. Also optional: an anonymous
    // request renders an empty page rather than failing.
    let account_routes = Router::new()
        .route("/reservations", get(reservations::my_reservations))
        .route("/reservations/cancel", post(reservations::cancel_reservation))
        .layer(middleware::from_fn_with_state(
            middleware_state,
            optional_auth_middleware,
        ))
        .with_state(reservation_state);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .route("/health", get(health::health_check).with_state(health_state))
        .route(
            "/metrics",
            get(prometheus_metrics).with_state(metrics_state),
        )
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1/auth", auth_protected_routes)
        .nest("/api/v1/reservations", booking_routes)
        .nest("/api/v1/account", account_routes)
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
