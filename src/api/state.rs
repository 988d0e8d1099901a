//! Application state for shared services

use std::sync::Arc;

use crate::domain::user::UserRepository;
use crate::infrastructure::user::UserService;

/// User service over whichever storage backend was configured
pub type DynUserService = UserService<dyn UserRepository>;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<DynUserService>,
}

impl AppState {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self {
            user_service: Arc::new(UserService::new(repository)),
        }
    }
}
