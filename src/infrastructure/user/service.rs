//! User service: the rules applied between the HTTP layer and storage

use std::sync::Arc;

use tracing::debug;

use crate::domain::user::{
    NewUser, User, UserId, UserRepository, normalize_department, normalize_status,
};
use crate::domain::DomainError;

/// Request for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub status: String,
    pub department: Option<String>,
}

/// Request for replacing an existing user's fields
#[derive(Debug, Clone)]
pub struct UpdateUserRequest {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub status: String,
    pub department: Option<String>,
}

/// User service enforcing status normalization and username uniqueness
///
/// The uniqueness check is a read before the write and is not atomic with
/// it; the storage adapters reject a duplicate that slips through.
#[derive(Debug)]
pub struct UserService<R: UserRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: UserRepository + ?Sized> UserService<R> {
    /// Create a new user service
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Create a new user and return the assigned ID
    pub async fn create(&self, request: CreateUserRequest) -> Result<UserId, DomainError> {
        let status = normalize_status(&request.status)?;

        if self
            .repository
            .get_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(DomainError::already_exists(request.username));
        }

        let user = NewUser {
            username: request.username,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            status,
            department: normalize_department(request.department),
        };

        let id = self.repository.create(&user).await?;
        debug!(user_id = %id, username = %user.username, "User created");

        Ok(id)
    }

    /// Get a user by ID
    pub async fn get(&self, id: UserId) -> Result<User, DomainError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))
    }

    /// List all users
    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.repository.list().await
    }

    /// Replace every field of an existing user
    pub async fn update(
        &self,
        id: UserId,
        request: UpdateUserRequest,
    ) -> Result<UserId, DomainError> {
        let status = normalize_status(&request.status)?;

        if let Some(existing) = self.repository.get_by_username(&request.username).await? {
            if existing.id() != id {
                return Err(DomainError::username_collision(request.username));
            }
        }

        let user = User::new(
            id,
            NewUser {
                username: request.username,
                first_name: request.first_name,
                last_name: request.last_name,
                email: request.email,
                status,
                department: normalize_department(request.department),
            },
        );

        self.repository.update(&user).await
    }

    /// Delete a user
    pub async fn delete(&self, id: UserId) -> Result<(), DomainError> {
        if self.repository.delete(id).await? {
            debug!(user_id = %id, "User deleted");
            Ok(())
        } else {
            Err(DomainError::not_found(format!("User '{}' not found", id)))
        }
    }

    /// Check that storage is reachable
    pub async fn ping(&self) -> Result<(), DomainError> {
        self.repository.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{MockUserRepository, UserStatus};
    use crate::infrastructure::user::repository::InMemoryUserRepository;

    fn create_service() -> UserService<InMemoryUserRepository> {
        UserService::new(Arc::new(InMemoryUserRepository::new()))
    }

    fn create_request(username: &str, status: &str, department: Option<&str>) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: format!("{}@email.com", username),
            status: status.to_string(),
            department: department.map(String::from),
        }
    }

    fn update_request(username: &str, status: &str) -> UpdateUserRequest {
        UpdateUserRequest {
            username: username.to_string(),
            first_name: "Jane".to_string(),
            last_name: "Roe".to_string(),
            email: format!("{}@email.com", username),
            status: status.to_string(),
            department: Some("Sales".to_string()),
        }
    }

    fn stored_user(id: i64, username: &str) -> User {
        User::new(
            UserId::new(id),
            NewUser {
                username: username.to_string(),
                first_name: "Other".to_string(),
                last_name: "User".to_string(),
                email: "other@email.com".to_string(),
                status: UserStatus::Active,
                department: None,
            },
        )
    }

    #[tokio::test]
    async fn test_create_user() {
        let service = create_service();

        let id = service
            .create(create_request("jdoe", "Active", Some("")))
            .await
            .unwrap();
        assert!(id.value() > 0);

        let user = service.get(id).await.unwrap();
        assert_eq!(user.username(), "jdoe");
        assert_eq!(user.status(), UserStatus::Active);
        assert_eq!(user.department(), None);
    }

    #[tokio::test]
    async fn test_create_keeps_non_empty_department() {
        let service = create_service();

        let id = service
            .create(create_request("jdoe", "I", Some("IT")))
            .await
            .unwrap();

        let user = service.get(id).await.unwrap();
        assert_eq!(user.status(), UserStatus::Inactive);
        assert_eq!(user.department(), Some("IT"));
    }

    #[tokio::test]
    async fn test_create_duplicate_username() {
        let service = create_service();
        service
            .create(create_request("jdoe", "A", None))
            .await
            .unwrap();

        let mut other = create_request("jdoe", "terminated", Some("HR"));
        other.first_name = "Someone".to_string();
        other.email = "else@email.com".to_string();

        let result = service.create(other).await;
        assert_eq!(result, Err(DomainError::already_exists("jdoe")));
    }

    #[tokio::test]
    async fn test_create_invalid_status() {
        let service = create_service();

        let result = service.create(create_request("jdoe", "bogus", None)).await;
        assert_eq!(result, Err(DomainError::invalid_status("bogus")));
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_invalid_status_skips_lookup() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_username().never();
        repo.expect_create().never();

        let service = UserService::new(Arc::new(repo));
        let result = service.create(create_request("jdoe", "x", None)).await;

        assert!(matches!(result, Err(DomainError::InvalidStatus { .. })));
    }

    #[tokio::test]
    async fn test_create_propagates_lookup_failure() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_username()
            .returning(|_| Err(DomainError::storage("connection reset")));
        repo.expect_create().never();

        let service = UserService::new(Arc::new(repo));
        let result = service.create(create_request("jdoe", "A", None)).await;

        assert_eq!(result, Err(DomainError::storage("connection reset")));
    }

    #[tokio::test]
    async fn test_create_passes_canonical_record_to_storage() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_username()
            .withf(|username| username == "jdoe")
            .times(1)
            .returning(|_| Ok(None));
        repo.expect_create()
            .withf(|user: &NewUser| {
                user.username == "jdoe"
                    && user.status == UserStatus::Terminated
                    && user.department.is_none()
            })
            .times(1)
            .returning(|_| Ok(UserId::new(1)));

        let service = UserService::new(Arc::new(repo));
        let id = service
            .create(create_request("jdoe", "TERMINATED", Some("")))
            .await
            .unwrap();

        assert_eq!(id, UserId::new(1));
    }

    #[tokio::test]
    async fn test_update_same_user_keeps_username() {
        let service = create_service();
        let id = service
            .create(create_request("jdoe", "A", None))
            .await
            .unwrap();

        let updated = service.update(id, update_request("jdoe", "I")).await.unwrap();
        assert_eq!(updated, id);

        let user = service.get(id).await.unwrap();
        assert_eq!(user.first_name(), "Jane");
        assert_eq!(user.status(), UserStatus::Inactive);
        assert_eq!(user.department(), Some("Sales"));
    }

    #[tokio::test]
    async fn test_update_rename_to_free_username() {
        let service = create_service();
        let id = service
            .create(create_request("jdoe", "A", None))
            .await
            .unwrap();

        service
            .update(id, update_request("jroe", "A"))
            .await
            .unwrap();

        assert_eq!(service.get(id).await.unwrap().username(), "jroe");
    }

    #[tokio::test]
    async fn test_update_username_collision() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_username()
            .withf(|username| username == "jdoe")
            .returning(|_| Ok(Some(stored_user(99, "jdoe"))));
        repo.expect_update().never();

        let service = UserService::new(Arc::new(repo));
        let result = service
            .update(UserId::new(10), update_request("jdoe", "A"))
            .await;

        assert_eq!(result, Err(DomainError::username_collision("jdoe")));
    }

    #[tokio::test]
    async fn test_update_invalid_status_skips_lookup() {
        let mut repo = MockUserRepository::new();
        repo.expect_get_by_username().never();
        repo.expect_update().never();

        let service = UserService::new(Arc::new(repo));
        let result = service
            .update(UserId::new(1), update_request("jdoe", "Retired"))
            .await;

        assert_eq!(result, Err(DomainError::invalid_status("Retired")));
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let service = create_service();

        let result = service
            .update(UserId::new(42), update_request("ghost", "A"))
            .await;
        assert!(matches!(result, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_clears_department_on_empty_string() {
        let service = create_service();
        let id = service
            .create(create_request("jdoe", "A", Some("IT")))
            .await
            .unwrap();

        let mut request = update_request("jdoe", "A");
        request.department = Some(String::new());
        service.update(id, request).await.unwrap();

        assert_eq!(service.get(id).await.unwrap().department(), None);
    }

    #[tokio::test]
    async fn test_get_missing_user() {
        let service = create_service();

        let result = service.get(UserId::new(1)).await;
        assert_eq!(
            result,
            Err(DomainError::not_found("User '1' not found"))
        );
    }

    #[tokio::test]
    async fn test_list_users() {
        let service = create_service();
        service.create(create_request("a1", "A", None)).await.unwrap();
        service.create(create_request("b2", "I", None)).await.unwrap();

        let users = service.list().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].username(), "a1");
    }

    #[tokio::test]
    async fn test_delete_user() {
        let service = create_service();
        let id = service
            .create(create_request("jdoe", "A", None))
            .await
            .unwrap();

        service.delete(id).await.unwrap();

        assert!(matches!(
            service.get(id).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            service.delete(id).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_storage_errors_pass_through() {
        let mut repo = MockUserRepository::new();
        repo.expect_list()
            .returning(|| Err(DomainError::storage("boom")));
        repo.expect_get()
            .returning(|_| Err(DomainError::storage("boom")));

        let service = UserService::new(Arc::new(repo));

        assert_eq!(service.list().await, Err(DomainError::storage("boom")));
        assert_eq!(
            service.get(UserId::new(1)).await,
            Err(DomainError::storage("boom"))
        );
    }
}
