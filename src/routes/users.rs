use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{
    CreateUserRequest, MessageResponse, ParticipantId, UpdateUserRequest, UserMutationResponse, UserResponse,
    UsersResponse,
};
use crate::routes::{error_response, AppState};
use crate::services::RosterError;

/// Configure participant CRUD routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/users", web::post().to(create_user))
        .route("/users", web::get().to(list_users))
        .route("/users/{id}", web::get().to(get_user))
        .route("/users/{id}", web::put().to(update_user))
        .route("/users/{id}", web::delete().to(delete_user));
}

fn roster_error(err: RosterError) -> HttpResponse {
    match err {
        RosterError::NotFound(_) => error_response(StatusCode::NOT_FOUND, "User not found", err.to_string()),
        RosterError::DuplicateEmail(_) => {
            error_response(StatusCode::CONFLICT, "User with this email already exists", err.to_string())
        }
        RosterError::Io(_) | RosterError::Json(_) => {
            tracing::error!("Roster failure: {}", err);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", err.to_string())
        }
    }
}

/// Register a participant
///
/// POST /api/v1/users
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "email": "string",
///   "phone": "string",
///   "about": "string",
///   "preferences": { "cleanliness": "Very tidy", ... }
/// }
/// ```
async fn create_user(state: web::Data<AppState>, req: web::Json<CreateUserRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for create_user request: {:?}", errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    match state.roster.create(req.into_inner()).await {
        Ok(user) => {
            tracing::info!("Registered participant {}", user.id);
            HttpResponse::Created().json(UserMutationResponse {
                message: "User created successfully".to_string(),
                user: user.into(),
            })
        }
        Err(e) => roster_error(e),
    }
}

/// GET /api/v1/users
async fn list_users(state: web::Data<AppState>) -> impl Responder {
    let users = state.roster.snapshot().await.into_iter().map(UserResponse::from).collect();
    HttpResponse::Ok().json(UsersResponse { users })
}

/// GET /api/v1/users/{id}
async fn get_user(state: web::Data<AppState>, path: web::Path<ParticipantId>) -> impl Responder {
    let id = path.into_inner();
    match state.roster.get(id).await {
        Some(user) => HttpResponse::Ok().json(UserResponse::from(user)),
        None => roster_error(RosterError::NotFound(id)),
    }
}

/// PUT /api/v1/users/{id}, partial update
async fn update_user(
    state: web::Data<AppState>,
    path: web::Path<ParticipantId>,
    req: web::Json<UpdateUserRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    match state.roster.update(path.into_inner(), req.into_inner()).await {
        Ok(user) => HttpResponse::Ok().json(UserMutationResponse {
            message: "User updated successfully".to_string(),
            user: user.into(),
        }),
        Err(e) => roster_error(e),
    }
}

/// DELETE /api/v1/users/{id}
async fn delete_user(state: web::Data<AppState>, path: web::Path<ParticipantId>) -> impl Responder {
    match state.roster.delete(path.into_inner()).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse {
            message: "User deleted successfully".to_string(),
        }),
        Err(e) => roster_error(e),
    }
}
