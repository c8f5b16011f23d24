use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::error::ApiError;
use crate::models::{
    parse_tokens, LoginRequest, PreferencesRequest, PreferencesResponse, RegisterRequest,
    TokenResponse,
};
use crate::routes::{AppState, AuthUser};
use crate::services::{hash_password, verify_password};

/// Configure user, login and preference routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/user/", web::post().to(register))
        .route("/user/login/", web::post().to(login))
        .service(
            web::resource("/user/preferences/")
                .route(web::get().to(get_preferences))
                .route(web::put().to(update_preferences)),
        );
}

/// Register a user
///
/// POST /api/user/
///
/// Creates the user and its default preferences in one transaction.
async fn register(
    state: web::Data<AppState>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let RegisterRequest { username, password } = req.into_inner();
    let password_hash = web::block(move || hash_password(&password)).await??;

    let user = state.postgres.create_user(&username, &password_hash).await?;

    Ok(HttpResponse::Created().json(user))
}

/// Exchange credentials for a bearer token
///
/// POST /api/user/login/
async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let LoginRequest { username, password } = req.into_inner();

    let (user_id, password_hash) = state
        .postgres
        .find_credentials(&username)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("invalid credentials".to_string()))?;

    let valid = web::block(move || verify_password(&password, &password_hash)).await??;
    if !valid {
        tracing::info!("Rejected login for {}", username);
        return Err(ApiError::Unauthorized("invalid credentials".to_string()));
    }

    let token = state.tokens.issue(user_id)?;

    tracing::info!("Issued token for user {}", user_id);

    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}

/// GET /api/user/preferences/
async fn get_preferences(
    state: web::Data<AppState>,
    user: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let prefs = state.postgres.get_preferences(user.user_id).await?;

    Ok(HttpResponse::Ok().json(PreferencesResponse::from(&prefs)))
}

/// Replace the caller's preferences
///
/// PUT /api/user/preferences/
///
/// Unknown tokens are dropped rather than stored, so `{"age": "b,zz"}` is
/// saved and echoed back as `"b"`. Either way they never match a dog.
///
/// Request body:
/// ```json
/// {
///   "age": "b,y,a,s",
///   "gender": "m,f",
///   "size": "s,m,l,xl"
/// }
/// ```
async fn update_preferences(
    state: web::Data<AppState>,
    user: AuthUser,
    req: web::Json<PreferencesRequest>,
) -> Result<HttpResponse, ApiError> {
    let prefs = state
        .postgres
        .update_preferences(
            user.user_id,
            &parse_tokens(&req.age),
            &parse_tokens(&req.gender),
            &parse_tokens(&req.size),
        )
        .await?;

    Ok(HttpResponse::Ok().json(PreferencesResponse::from(&prefs)))
}
