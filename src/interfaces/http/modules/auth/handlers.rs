//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Extension, Json};

use super::dto::{CustomerInfo, LoginRequest, LoginResponse, RegisterRequest};
use crate::auth::jwt::{create_token, JwtConfig};
use crate::auth::password::{hash_password, verify_password};
use crate::domain::customer::{CustomerIdentity, NewCustomer};
use crate::domain::RepositoryProvider;
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};
use crate::shared::lang;

/// Auth state
#[derive(Clone)]
pub struct AuthHandlerState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub jwt_config: JwtConfig,
}

fn internal_error<T>(message: impl ToString) -> (StatusCode, Json<ApiResponse<T>>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiResponse::error(message.to_string())),
    )
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = ApiResponse<CustomerInfo>),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn register(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CustomerInfo>>), (StatusCode, Json<ApiResponse<CustomerInfo>>)>
{
    let existing = state
        .repos
        .customers()
        .find_by_email(&request.email)
        .await
        .map_err(internal_error)?;

    if existing.is_some() {
        return Err((
            StatusCode::CONFLICT,
            Json(ApiResponse::error(lang("auth.email_taken"))),
        ));
    }

    let password_hash = hash_password(&request.password).map_err(internal_error)?;

    let customer = state
        .repos
        .customers()
        .create(NewCustomer {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            telephone: request.telephone,
            password_hash,
        })
        .await
        .map_err(internal_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(CustomerInfo::from(&customer))),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, (StatusCode, Json<ApiResponse<LoginResponse>>)> {
    let customer = state
        .repos
        .customers()
        .find_by_email(&request.email)
        .await
        .map_err(internal_error)?;

    let Some(customer) = customer else {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error(lang("auth.invalid_credentials"))),
        ));
    };

    if !customer.is_active {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error(lang("auth.account_disabled"))),
        ));
    }

    let password_valid =
        verify_password(&request.password, &customer.password_hash).unwrap_or(false);
    if !password_valid {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error(lang("auth.invalid_credentials"))),
        ));
    }

    let identity = CustomerIdentity::from(&customer);
    let token = create_token(&identity, &state.jwt_config).map_err(internal_error)?;

    let response = LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_config.expiration_hours * 3600,
        customer: CustomerInfo::from(&customer),
    };

    Ok(Json(ApiResponse::success(response)))
}

#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current account info", body = ApiResponse<CustomerInfo>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_current_customer(
    State(state): State<AuthHandlerState>,
    Extension(identity): Extension<CustomerIdentity>,
) -> Result<Json<ApiResponse<CustomerInfo>>, (StatusCode, Json<ApiResponse<CustomerInfo>>)> {
    let customer = state
        .repos
        .customers()
        .find_by_id(identity.id)
        .await
        .map_err(internal_error)?;

    let Some(customer) = customer else {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error("Account not found")),
        ));
    };

    Ok(Json(ApiResponse::success(CustomerInfo::from(&customer))))
}
