use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::user::User;
use crate::presentation::AppState;
use crate::presentation::http::app_error::AppResult;
use crate::presentation::http::envelope::Envelope;
use crate::presentation::http::extract::{AppPath, ValidJson};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreateUserDto {
    pub(crate) nickname: String,
    #[validate(email)]
    pub(crate) email: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdateUserDto {
    pub(crate) nickname: String,
    #[validate(email)]
    pub(crate) email: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UserDto {
    pub(crate) id: i64,
    pub(crate) nickname: String,
    pub(crate) email: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            nickname: user.nickname,
            email: user.email,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "users",
    request_body = CreateUserDto,
    responses(
        (status = 200, description = "User created", body = UserDto),
        (status = 400, description = "Validation error")
    )
)]
pub(crate) async fn create_user(
    State(state): State<AppState>,
    ValidJson(dto): ValidJson<CreateUserDto>,
) -> AppResult<(StatusCode, Json<Envelope<UserDto>>)> {
    let user = state
        .ad_service
        .create_user(dto.nickname, dto.email)
        .await?;

    Ok((StatusCode::OK, Json(Envelope::data(UserDto::from(user)))))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User found", body = UserDto),
        (status = 404, description = "User not found")
    )
)]
pub(crate) async fn get_user(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<i64>,
) -> AppResult<(StatusCode, Json<Envelope<UserDto>>)> {
    let user = state.ad_service.get_user(user_id).await?;

    Ok((StatusCode::OK, Json(Envelope::data(UserDto::from(user)))))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = i64, Path, description = "User id")
    ),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = UserDto),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User not found")
    )
)]
pub(crate) async fn update_user(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<i64>,
    ValidJson(dto): ValidJson<UpdateUserDto>,
) -> AppResult<(StatusCode, Json<Envelope<UserDto>>)> {
    let user = state
        .ad_service
        .update_user(user_id, dto.nickname, dto.email)
        .await?;

    Ok((StatusCode::OK, Json(Envelope::data(UserDto::from(user)))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}",
    tag = "users",
    params(
        ("user_id" = i64, Path, description = "User id")
    ),
    responses(
        (status = 200, description = "User and their ads deleted"),
        (status = 404, description = "User not found")
    )
)]
pub(crate) async fn delete_user(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<i64>,
) -> AppResult<(StatusCode, Json<Envelope<()>>)> {
    state.ad_service.delete_user(user_id).await?;

    Ok((StatusCode::OK, Json(Envelope::empty())))
}
