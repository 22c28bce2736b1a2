//! Test utilities for the backend crate.
//!
//! Shared by unit tests in `src/` and integration tests in `tests/`. Only
//! compiled for tests or with the `test-support` feature.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{
    BookRepository, BookRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::{Book, User};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Fixed instant used as the starting point for clock-driven tests.
pub fn fixture_instant() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0) {
        chrono::LocalResult::Single(instant) => instant,
        _ => panic!("fixture instant must be unambiguous"),
    }
}

/// Clock double that only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Clock frozen at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        let delta = match TimeDelta::from_std(delta) {
            Ok(delta) => delta,
            Err(error) => {
                panic!("failed to convert Duration to TimeDelta: {error}; delta={delta:?}")
            }
        };
        *lock(&self.0) += delta;
    }

    /// Move the clock forward by whole seconds.
    pub fn advance_seconds(&self, seconds: i64) {
        *lock(&self.0) += TimeDelta::seconds(seconds);
    }
}

impl Default for MutableClock {
    fn default() -> Self {
        Self::new(fixture_instant())
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *lock(&self.0)
    }
}

/// In-memory book store that counts writes.
#[derive(Default)]
pub struct InMemoryBookRepository {
    books: Mutex<Vec<Book>>,
    saves: Mutex<usize>,
}

impl InMemoryBookRepository {
    /// Store pre-filled with `books`.
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: Mutex::new(books),
            saves: Mutex::new(0),
        }
    }

    /// Current contents.
    pub fn snapshot(&self) -> Vec<Book> {
        lock(&self.books).clone()
    }

    /// Number of completed `save` calls.
    pub fn save_count(&self) -> usize {
        *lock(&self.saves)
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn load(&self) -> Result<Vec<Book>, BookRepositoryError> {
        Ok(self.snapshot())
    }

    async fn save(&self, books: &[Book]) -> Result<(), BookRepositoryError> {
        *lock(&self.books) = books.to_vec();
        *lock(&self.saves) += 1;
        Ok(())
    }
}

/// In-memory user store that counts writes.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    saves: Mutex<usize>,
}

impl InMemoryUserRepository {
    /// Store pre-filled with `users`.
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
            saves: Mutex::new(0),
        }
    }

    /// Current contents.
    pub fn snapshot(&self) -> Vec<User> {
        lock(&self.users).clone()
    }

    /// Number of completed `save` calls.
    pub fn save_count(&self) -> usize {
        *lock(&self.saves)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn load(&self) -> Result<Vec<User>, UserRepositoryError> {
        Ok(self.snapshot())
    }

    async fn save(&self, users: &[User]) -> Result<(), UserRepositoryError> {
        *lock(&self.users) = users.to_vec();
        *lock(&self.saves) += 1;
        Ok(())
    }
}

pub mod cap_fs {
    //! Capability-scoped file helpers for inspecting store documents in tests.

    use std::io;
    use std::path::Path;

    use cap_std::{ambient_authority, fs::Dir};

    /// Read `name` from `directory` as UTF-8.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use library_backend::test_support::cap_fs::{read_file_to_string, write_file};
    ///
    /// let directory = tempfile::tempdir()?;
    /// write_file(directory.path(), "books.json", br#"{"books":[]}"#)?;
    /// assert_eq!(read_file_to_string(directory.path(), "books.json")?, r#"{"books":[]}"#);
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn read_file_to_string(directory: &Path, name: &str) -> io::Result<String> {
        Dir::open_ambient_dir(directory, ambient_authority())?.read_to_string(name)
    }

    /// Write `contents` to `name` inside `directory`.
    pub fn write_file(directory: &Path, name: &str, contents: &[u8]) -> io::Result<()> {
        Dir::open_ambient_dir(directory, ambient_authority())?.write(name, contents)
    }

    /// Whether `name` exists inside `directory`.
    pub fn file_exists(directory: &Path, name: &str) -> bool {
        Dir::open_ambient_dir(directory, ambient_authority())
            .map(|dir| dir.exists(name))
            .unwrap_or(false)
    }
}

pub mod openapi {
    //! OpenAPI schema traversal helpers.

    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::{Object, Schema};

    /// Extract an `Object` schema, panicking with a diagnostic otherwise.
    pub fn unwrap_object_schema<'a>(schema: &'a RefOr<Schema>, name: &str) -> &'a Object {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj,
            RefOr::Ref(reference) => {
                panic!(
                    "schema '{name}' is a $ref to '{}'; resolve the reference first",
                    reference.ref_location
                );
            }
            RefOr::T(Schema::Array(_)) => panic!("schema '{name}' is an Array, not an Object"),
            _ => panic!("schema '{name}' is not an Object"),
        }
    }

    /// Get a property from an Object schema by name, panicking when absent.
    pub fn get_property<'a>(obj: &'a Object, field: &str) -> &'a RefOr<Schema> {
        match obj.properties.get(field) {
            Some(property) => property,
            None => panic!("property '{field}' not found"),
        }
    }
}
