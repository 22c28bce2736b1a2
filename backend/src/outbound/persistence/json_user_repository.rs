//! JSON file adapter for [`UserRepository`].
//!
//! Reads accept either a bare list of users or a `{"users": [...]}` wrapper;
//! writes always produce the wrapper. A missing document reads as
//! `users.template.json` when present, else as an empty list, and reading
//! never creates the file.

use std::io;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::json_file::{JsonDocumentFile, run_blocking};
use crate::domain::User;
use crate::domain::ports::{UserRepository, UserRepositoryError};

pub(crate) const USERS_FILE: &str = "users.json";
pub(crate) const USERS_TEMPLATE_FILE: &str = "users.template.json";

#[derive(Deserialize)]
#[serde(untagged)]
enum UserDocument {
    Bare(Vec<User>),
    Wrapped { users: Vec<User> },
}

impl From<UserDocument> for Vec<User> {
    fn from(value: UserDocument) -> Self {
        match value {
            UserDocument::Bare(users) | UserDocument::Wrapped { users } => users,
        }
    }
}

#[derive(Serialize)]
struct UserDocumentRef<'a> {
    users: &'a [User],
}

/// User store persisted as a single JSON document.
#[derive(Debug, Clone)]
pub struct JsonUserRepository {
    file: JsonDocumentFile,
}

impl JsonUserRepository {
    /// Bind the store to `data_dir`, creating the directory when needed.
    pub fn open(data_dir: &Path) -> io::Result<Self> {
        let file = JsonDocumentFile::open(data_dir, USERS_FILE, USERS_TEMPLATE_FILE)?;
        Ok(Self { file })
    }
}

fn parse(contents: &str) -> Result<Vec<User>, UserRepositoryError> {
    serde_json::from_str::<UserDocument>(contents)
        .map(Vec::from)
        .map_err(|_| UserRepositoryError::malformed("expected a user list or a users wrapper"))
}

fn load_users(file: &JsonDocumentFile) -> Result<Vec<User>, UserRepositoryError> {
    let read = |result: io::Result<Option<String>>| {
        result.map_err(|err| UserRepositoryError::read(err.to_string()))
    };
    if let Some(contents) = read(file.read())? {
        return parse(&contents);
    }
    match read(file.read_template())? {
        Some(template) => {
            debug!(store = file.name(), "user store absent, reading template");
            parse(&template)
        }
        None => Ok(Vec::new()),
    }
}

fn save_users(file: &JsonDocumentFile, users: &[User]) -> Result<(), UserRepositoryError> {
    let contents = serde_json::to_string_pretty(&UserDocumentRef { users })
        .map_err(|err| UserRepositoryError::write(err.to_string()))?;
    file.write_atomic(&contents)
        .map_err(|err| UserRepositoryError::write(err.to_string()))
}

#[async_trait]
impl UserRepository for JsonUserRepository {
    async fn load(&self) -> Result<Vec<User>, UserRepositoryError> {
        let file = self.file.clone();
        run_blocking(move || load_users(&file), UserRepositoryError::read).await
    }

    async fn save(&self, users: &[User]) -> Result<(), UserRepositoryError> {
        let file = self.file.clone();
        let users = users.to_vec();
        run_blocking(move || save_users(&file, &users), UserRepositoryError::write).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::test_support::cap_fs::{file_exists, read_file_to_string, write_file};
    use rstest::rstest;
    use serde_json::{Value, json};

    fn open(dir: &Path) -> JsonUserRepository {
        JsonUserRepository::open(dir).expect("open store")
    }

    #[rstest]
    #[case(json!([{ "username": "ada", "password": "pw", "role": "admin" }]))]
    #[case(json!({ "users": [{ "username": "ada", "password": "pw", "role": "admin" }] }))]
    #[tokio::test]
    async fn reads_both_document_shapes(#[case] document: Value) {
        let root = tempfile::tempdir().expect("tempdir");
        write_file(root.path(), USERS_FILE, document.to_string().as_bytes()).expect("write");

        let users = open(root.path()).load().await.expect("load");

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].username(), "ada");
        assert_eq!(users[0].role(), &Role::Admin);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_store_reads_empty_without_writing() {
        let root = tempfile::tempdir().expect("tempdir");

        let users = open(root.path()).load().await.expect("load");

        assert!(users.is_empty());
        assert!(!file_exists(root.path(), USERS_FILE));
    }

    #[rstest]
    #[tokio::test]
    async fn missing_store_reads_template_without_writing() {
        let root = tempfile::tempdir().expect("tempdir");
        let template = json!([{ "username": "seed", "password": "pw" }]);
        write_file(
            root.path(),
            USERS_TEMPLATE_FILE,
            template.to_string().as_bytes(),
        )
        .expect("write template");

        let users = open(root.path()).load().await.expect("load");

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].role(), &Role::User);
        assert!(!file_exists(root.path(), USERS_FILE));
    }

    #[rstest]
    #[tokio::test]
    async fn foreign_roles_and_missing_keys_do_not_spoil_the_store() {
        let root = tempfile::tempdir().expect("tempdir");
        let document = json!([
            { "username": "a", "password": "p", "role": "guest" },
            { "username": "b", "password": "p", "role": "user" },
            { "username": "c" },
        ]);
        write_file(root.path(), USERS_FILE, document.to_string().as_bytes()).expect("write");
        let repo = open(root.path());

        let users = repo.load().await.expect("load");

        assert_eq!(users.len(), 3);
        assert_eq!(users[0].role(), &Role::Other("guest".to_owned()));
        assert_eq!(users[1].role(), &Role::User);
        assert_eq!(users[2].password(), "");
        assert_eq!(users[2].role(), &Role::User);

        repo.save(&users).await.expect("save");
        let raw = read_file_to_string(root.path(), USERS_FILE).expect("read");
        let value: Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(value["users"][0]["role"], "guest");
    }

    #[rstest]
    #[case(b"{".as_slice())]
    #[case(br#"{"people": []}"#.as_slice())]
    #[case(br#""users""#.as_slice())]
    #[tokio::test]
    async fn malformed_store_is_reported(#[case] contents: &[u8]) {
        let root = tempfile::tempdir().expect("tempdir");
        write_file(root.path(), USERS_FILE, contents).expect("write");

        let err = open(root.path()).load().await.expect_err("malformed");

        assert!(matches!(err, UserRepositoryError::Malformed { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn save_writes_wrapped_shape() {
        let root = tempfile::tempdir().expect("tempdir");
        write_file(root.path(), USERS_FILE, b"[]").expect("write");
        let repo = open(root.path());
        let user = User::try_from_parts(Some("ada"), Some("pw"), None).expect("valid user");

        repo.save(std::slice::from_ref(&user)).await.expect("save");

        let raw = read_file_to_string(root.path(), USERS_FILE).expect("read");
        let value: Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(
            value,
            json!({ "users": [{ "username": "ada", "password": "pw", "role": "user" }] })
        );
        assert_eq!(repo.load().await.expect("load"), vec![user]);
    }
}
