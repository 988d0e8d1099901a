//! v1 API endpoints

pub mod users;

use axum::{routing::get, Router};

use super::state::AppState;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(users::list_users)
                .post(users::create_user)
                .put(users::update_user),
        )
        .route(
            "/users/{user_id}",
            get(users::get_user).delete(users::delete_user),
        )
}
