//! Account handlers - registration, login and profile.

use actix_web::{HttpResponse, web};

use delivery_core::domain::{Gender, LoginCredentials, NewUser, User, UserEdit};
use delivery_shared::dto::{
    EditUserRequest, GenderDto, LoginRequest, RegisterUserRequest, TokenResponse,
    UserProfileResponse,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn gender_from_dto(gender: GenderDto) -> Gender {
    match gender {
        GenderDto::Male => Gender::Male,
        GenderDto::Female => Gender::Female,
    }
}

fn gender_to_dto(gender: Gender) -> GenderDto {
    match gender {
        Gender::Male => GenderDto::Male,
        Gender::Female => GenderDto::Female,
    }
}

fn profile_response(user: User) -> UserProfileResponse {
    UserProfileResponse {
        id: user.id.to_string(),
        full_name: user.full_name,
        birth_date: user.birth_date,
        gender: gender_to_dto(user.gender),
        address: user.address,
        email: user.email,
        phone_number: user.phone_number,
    }
}

/// POST /api/account/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let mut errors = Vec::new();
    if req.full_name.is_empty() {
        errors.push("fullName must be at least 1 character".to_string());
    }
    if req.email.trim().is_empty() {
        errors.push("email is required".to_string());
    }
    if req.password.is_empty() {
        errors.push("password is required".to_string());
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let token = state
        .identity
        .register_user(NewUser {
            full_name: req.full_name,
            password: req.password,
            email: req.email,
            gender: gender_from_dto(req.gender),
            birth_date: req.birth_date,
            address: req.address,
            phone_number: req.phone_number,
        })
        .await?;

    Ok(HttpResponse::Ok().json(TokenResponse { token: token.token }))
}

/// POST /api/account/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let token = state
        .identity
        .login_user(LoginCredentials {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(HttpResponse::Ok().json(TokenResponse { token: token.token }))
}

/// GET /api/account/profile - Protected route
pub async fn profile(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state.identity.profile(identity.user_id).await?;

    Ok(HttpResponse::Ok().json(profile_response(user)))
}

/// PUT /api/account/profile - Protected route
pub async fn edit_profile(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<EditUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.full_name.is_empty() {
        return Err(AppError::Validation(vec![
            "fullName must be at least 1 character".to_string(),
        ]));
    }

    let user = state
        .identity
        .edit_profile(
            identity.user_id,
            UserEdit {
                full_name: req.full_name,
                birth_date: req.birth_date,
                gender: gender_from_dto(req.gender),
                address: req.address,
                phone_number: req.phone_number,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(profile_response(user)))
}
