//! User handlers - sign-up-or-in and user info.

use actix_web::{HttpResponse, web};

use ppobbi_shared::dto::{SignUpOrInRequest, SignUpOrInResponse};
use ppobbi_shared::{ApiResponse, UserResponseMessage};

use crate::middleware::access_token::AccessToken;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/user
///
/// The service outcome is not part of the response; callers always get an
/// empty acknowledgment.
pub async fn sign_up_or_in(
    state: web::Data<AppState>,
    body: web::Json<SignUpOrInRequest>,
) -> AppResult<HttpResponse> {
    state.user_service.sign_up_or_in(body.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(
        UserResponseMessage::SignInSuccess,
        SignUpOrInResponse::default(),
    )))
}

/// GET /api/user
pub async fn get_user_info(
    state: web::Data<AppState>,
    access_token: AccessToken,
) -> AppResult<HttpResponse> {
    let user_info = state.user_service.get_user_info(access_token.as_str()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::new(
        UserResponseMessage::GetUserInfoSuccess,
        user_info,
    )))
}
