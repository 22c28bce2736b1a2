//! User directory service implementing the user driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::domain::ports::{UserRepository, UserRepositoryError, UsersCommand, UsersQuery};
use crate::domain::{Error, User};

fn map_repository_error(err: UserRepositoryError) -> Error {
    error!(error = %err, "user store operation failed");
    Error::internal(err.to_string())
}

/// User service backed by a [`UserRepository`].
pub struct UserDirectoryService<R> {
    repo: Arc<R>,
    write_lock: Mutex<()>,
}

impl<R> UserDirectoryService<R> {
    /// Create a service over `repo` with its own write lock.
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl<R> UsersQuery for UserDirectoryService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.repo.load().await.map_err(map_repository_error)
    }
}

#[async_trait]
impl<R> UsersCommand for UserDirectoryService<R>
where
    R: UserRepository,
{
    async fn add_user(&self, user: User) -> Result<Vec<User>, Error> {
        let _write = self.write_lock.lock().await;
        let mut users = self.repo.load().await.map_err(map_repository_error)?;
        info!(username = user.username(), role = %user.role(), "user added");
        users.push(user);
        self.repo.save(&users).await.map_err(map_repository_error)?;
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockUserRepository;
    use rstest::rstest;

    fn user(name: &str, role: &str) -> User {
        User::try_from_parts(Some(name), Some("pw"), Some(role)).expect("valid user")
    }

    #[rstest]
    #[tokio::test]
    async fn add_user_appends_and_returns_full_list() {
        let mut repo = MockUserRepository::new();
        repo.expect_load()
            .times(1)
            .return_once(|| Ok(vec![user("ada", "admin")]));
        repo.expect_save()
            .withf(|users| users.len() == 2 && users[1].username() == "grace")
            .times(1)
            .return_once(|_| Ok(()));
        let service = UserDirectoryService::new(Arc::new(repo));

        let users = service
            .add_user(user("grace", "user"))
            .await
            .expect("user added");

        let names: Vec<_> = users.iter().map(User::username).collect();
        assert_eq!(names, ["ada", "grace"]);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_usernames_are_allowed() {
        let mut repo = MockUserRepository::new();
        repo.expect_load()
            .return_once(|| Ok(vec![user("ada", "user")]));
        repo.expect_save().times(1).return_once(|_| Ok(()));
        let service = UserDirectoryService::new(Arc::new(repo));

        let users = service.add_user(user("ada", "user")).await.expect("added");
        assert_eq!(users.len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn read_failure_maps_to_internal_and_skips_save() {
        let mut repo = MockUserRepository::new();
        repo.expect_load()
            .return_once(|| Err(UserRepositoryError::malformed("expected array")));
        repo.expect_save().times(0);
        let service = UserDirectoryService::new(Arc::new(repo));

        let err = service
            .add_user(user("ada", "user"))
            .await
            .expect_err("malformed store");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }

    #[rstest]
    #[tokio::test]
    async fn list_users_passes_store_contents_through() {
        let mut repo = MockUserRepository::new();
        repo.expect_load()
            .return_once(|| Ok(vec![user("ada", "admin"), user("grace", "user")]));
        let service = UserDirectoryService::new(Arc::new(repo));

        let users = service.list_users().await.expect("listed");
        assert_eq!(users.len(), 2);
    }
}
