use actix_web::{web, HttpResponse};
use validator::Validate;
use crate::error::ApiError;
use crate::models::{DogChanges, DogPatchRequest, DogRequest, NewDog, SwipeFilter, SwipeResponse};
use crate::routes::{AppState, AuthUser};

/// Configure dog CRUD, swipe and next-dog routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/dog/")
            .route(web::get().to(list_dogs))
            .route(web::post().to(create_dog)),
    )
    .service(
        web::resource("/dog/{id}/")
            .route(web::get().to(get_dog))
            .route(web::put().to(update_dog))
            .route(web::patch().to(patch_dog))
            .route(web::delete().to(delete_dog)),
    )
    .route("/dog/{id}/sterilized/true/", web::put().to(sterilize_dog))
    .route("/dog/{id}/{status}/", web::put().to(set_status))
    .route("/dog/{id}/{status}/next/", web::get().to(next_dog));
}

/// GET /api/dog/
async fn list_dogs(state: web::Data<AppState>, _user: AuthUser) -> Result<HttpResponse, ApiError> {
    let dogs = state.postgres.list_dogs().await?;
    Ok(HttpResponse::Ok().json(dogs))
}

/// POST /api/dog/
async fn create_dog(
    state: web::Data<AppState>,
    _user: AuthUser,
    req: web::Json<DogRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let dog = state.postgres.create_dog(&NewDog::from(req.into_inner())).await?;
    Ok(HttpResponse::Created().json(dog))
}

/// GET /api/dog/{id}/
async fn get_dog(
    state: web::Data<AppState>,
    _user: AuthUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let dog = state.postgres.get_dog(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(dog))
}

/// PUT /api/dog/{id}/
async fn update_dog(
    state: web::Data<AppState>,
    _user: AuthUser,
    path: web::Path<i64>,
    req: web::Json<DogRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let dog = state
        .postgres
        .update_dog(path.into_inner(), &NewDog::from(req.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(dog))
}

/// PATCH /api/dog/{id}/
async fn patch_dog(
    state: web::Data<AppState>,
    _user: AuthUser,
    path: web::Path<i64>,
    req: web::Json<DogPatchRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let dog = state
        .postgres
        .patch_dog(path.into_inner(), &DogChanges::from(req.into_inner()))
        .await?;
    Ok(HttpResponse::Ok().json(dog))
}

/// DELETE /api/dog/{id}/
async fn delete_dog(
    state: web::Data<AppState>,
    _user: AuthUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    state.postgres.delete_dog(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// PUT /api/dog/{id}/sterilized/true/
async fn sterilize_dog(
    state: web::Data<AppState>,
    _user: AuthUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let dog = state.postgres.sterilize_dog(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(dog))
}

/// Set the caller's swipe status for a dog
///
/// PUT /api/dog/{id}/{liked|disliked|undecided}/
async fn set_status(
    state: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<(i64, SwipeFilter)>,
) -> Result<HttpResponse, ApiError> {
    let (dog_id, filter) = path.into_inner();

    let status = state.postgres.set_swipe(user.user_id, dog_id, filter).await?;

    tracing::info!("User {} marked dog {} as {:?}", user.user_id, dog_id, status);

    Ok(HttpResponse::Ok().json(SwipeResponse::new(status, dog_id)))
}

/// Next dog after `{id}` matching the caller's preferences and the status
///
/// GET /api/dog/{id}/{liked|disliked|undecided}/next/
///
/// Wraps around to the lowest matching id when `{id}` is at or past the end.
async fn next_dog(
    state: web::Data<AppState>,
    user: AuthUser,
    path: web::Path<(i64, SwipeFilter)>,
) -> Result<HttpResponse, ApiError> {
    let (after_id, filter) = path.into_inner();

    let preferences = state.postgres.get_preferences(user.user_id).await?;
    let candidates = state
        .postgres
        .query_candidates(&preferences.gender, &preferences.size)
        .await?;
    let swipes = state.postgres.get_swipes(user.user_id).await?;

    let next = state
        .matcher
        .next_after(&preferences, &swipes, &candidates, after_id, filter)
        .ok_or_else(|| ApiError::NotFound(format!("{:?} dog after {}", filter, after_id)))?;

    tracing::debug!(
        "Next {:?} dog for user {} after {}: {} (from {} candidates)",
        filter,
        user.user_id,
        after_id,
        next.id,
        candidates.len()
    );

    Ok(HttpResponse::Ok().json(next))
}
