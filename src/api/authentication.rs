//! Registration and token issuance endpoints

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    error::{AppError, AppResult},
    models::user::{AuthenticateUser, RegisterUser, TokenResponse, UserInfo},
};

use super::ValidatedJson;

/// Register a new user with existing roles
#[utoipa::path(
    post,
    path = "/authentication/register",
    tag = "authentication",
    request_body = RegisterUser,
    responses(
        (status = 201, description = "User registered", body = UserInfo),
        (status = 400, description = "Invalid input, weak password or duplicate identity"),
        (status = 404, description = "A requested role does not exist")
    )
)]
pub async fn register(
    State(state): State<crate::AppState>,
    ValidatedJson(request): ValidatedJson<RegisterUser>,
) -> AppResult<(StatusCode, Json<UserInfo>)> {
    let user = state.services.auth.register(request).await?;
    let roles = state.services.auth.roles_of(&user).await?;
    Ok((StatusCode::CREATED, Json(UserInfo::new(user, roles))))
}

/// Exchange credentials for a bearer token
#[utoipa::path(
    post,
    path = "/authentication/auth",
    tag = "authentication",
    request_body = AuthenticateUser,
    responses(
        (status = 200, description = "Authenticated", body = TokenResponse),
        (status = 401, description = "Wrong user name or password")
    )
)]
pub async fn authenticate(
    State(state): State<crate::AppState>,
    ValidatedJson(request): ValidatedJson<AuthenticateUser>,
) -> AppResult<Json<TokenResponse>> {
    let user = state
        .services
        .auth
        .validate_user(&request.user_name, &request.password)
        .await?
        .ok_or_else(|| {
            AppError::Authentication("Authentication failed. Wrong user name or password".to_string())
        })?;

    let token = state.services.auth.create_token(&user).await?;
    Ok(Json(TokenResponse { token }))
}
