//! JSON file adapter for [`BookRepository`].
//!
//! Document shape: `{"books": [Book, ...]}`. A missing document is seeded on
//! first access from `books.template.json` when present, else from an empty
//! list, and the seeded content is written back before it is returned.

use std::io;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::json_file::{JsonDocumentFile, run_blocking};
use crate::domain::Book;
use crate::domain::ports::{BookRepository, BookRepositoryError};

pub(crate) const BOOKS_FILE: &str = "books.json";
pub(crate) const BOOKS_TEMPLATE_FILE: &str = "books.template.json";
const EMPTY_DOCUMENT: &str = "{\n  \"books\": []\n}";

#[derive(Deserialize)]
struct BookDocument {
    #[serde(default)]
    books: Vec<Book>,
}

#[derive(Serialize)]
struct BookDocumentRef<'a> {
    books: &'a [Book],
}

/// Book store persisted as a single JSON document.
#[derive(Debug, Clone)]
pub struct JsonBookRepository {
    file: JsonDocumentFile,
}

impl JsonBookRepository {
    /// Bind the store to `data_dir`, creating the directory when needed.
    pub fn open(data_dir: &Path) -> io::Result<Self> {
        let file = JsonDocumentFile::open(data_dir, BOOKS_FILE, BOOKS_TEMPLATE_FILE)?;
        Ok(Self { file })
    }
}

fn seed(file: &JsonDocumentFile) -> Result<String, BookRepositoryError> {
    let template = file
        .read_template()
        .map_err(|err| BookRepositoryError::read(err.to_string()))?;
    let contents = match template {
        Some(template) => {
            info!(store = file.name(), "seeding book store from template");
            template
        }
        None => {
            warn!(store = file.name(), "no book template found, starting empty");
            EMPTY_DOCUMENT.to_owned()
        }
    };
    file.write_atomic(&contents)
        .map_err(|err| BookRepositoryError::write(err.to_string()))?;
    Ok(contents)
}

fn load_books(file: &JsonDocumentFile) -> Result<Vec<Book>, BookRepositoryError> {
    let existing = file
        .read()
        .map_err(|err| BookRepositoryError::read(err.to_string()))?;
    let contents = match existing {
        Some(contents) => contents,
        None => seed(file)?,
    };
    let document: BookDocument = serde_json::from_str(&contents)
        .map_err(|err| BookRepositoryError::malformed(err.to_string()))?;
    Ok(document.books)
}

fn save_books(file: &JsonDocumentFile, books: &[Book]) -> Result<(), BookRepositoryError> {
    let contents = serde_json::to_string_pretty(&BookDocumentRef { books })
        .map_err(|err| BookRepositoryError::write(err.to_string()))?;
    file.write_atomic(&contents)
        .map_err(|err| BookRepositoryError::write(err.to_string()))
}

#[async_trait]
impl BookRepository for JsonBookRepository {
    async fn load(&self) -> Result<Vec<Book>, BookRepositoryError> {
        let file = self.file.clone();
        run_blocking(move || load_books(&file), BookRepositoryError::read).await
    }

    async fn save(&self, books: &[Book]) -> Result<(), BookRepositoryError> {
        let file = self.file.clone();
        let books = books.to_vec();
        run_blocking(move || save_books(&file, &books), BookRepositoryError::write).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewBook;
    use crate::test_support::cap_fs::{read_file_to_string, write_file};
    use rstest::rstest;
    use serde_json::{Value, json};

    fn book(title: &str) -> Book {
        Book::from(
            NewBook::try_from_parts(Some("alice"), Some(title), Some("A"), Some("C"))
                .expect("valid draft"),
        )
    }

    fn stored(dir: &Path) -> Value {
        let raw = read_file_to_string(dir, BOOKS_FILE).expect("store exists");
        serde_json::from_str(&raw).expect("store is JSON")
    }

    #[rstest]
    #[tokio::test]
    async fn missing_store_without_template_is_seeded_empty() {
        let root = tempfile::tempdir().expect("tempdir");
        let repo = JsonBookRepository::open(root.path()).expect("open");

        let books = repo.load().await.expect("load");

        assert!(books.is_empty());
        assert_eq!(stored(root.path()), json!({ "books": [] }));
    }

    #[rstest]
    #[tokio::test]
    async fn missing_store_is_seeded_from_template() {
        let root = tempfile::tempdir().expect("tempdir");
        let template = json!({ "books": [
            { "user": "bob", "title": "Seed", "author": "S", "content": "X" }
        ] });
        write_file(
            root.path(),
            BOOKS_TEMPLATE_FILE,
            template.to_string().as_bytes(),
        )
        .expect("write template");
        let repo = JsonBookRepository::open(root.path()).expect("open");

        let books = repo.load().await.expect("load");

        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title(), "Seed");
        assert_eq!(stored(root.path()), template);
    }

    #[rstest]
    #[tokio::test]
    async fn saved_list_reads_back_identically() {
        let root = tempfile::tempdir().expect("tempdir");
        let repo = JsonBookRepository::open(root.path()).expect("open");
        let books = vec![book("T1"), book("T2")];

        repo.save(&books).await.expect("save");

        assert_eq!(repo.load().await.expect("load"), books);
        assert_eq!(stored(root.path())["books"][1]["title"], "T2");
    }

    #[rstest]
    #[case(b"not json".as_slice())]
    #[case(br#"{"books": {"title": "x"}}"#.as_slice())]
    #[tokio::test]
    async fn malformed_store_is_reported(#[case] contents: &[u8]) {
        let root = tempfile::tempdir().expect("tempdir");
        write_file(root.path(), BOOKS_FILE, contents).expect("write store");
        let repo = JsonBookRepository::open(root.path()).expect("open");

        let err = repo.load().await.expect_err("malformed");

        assert!(matches!(err, BookRepositoryError::Malformed { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn document_without_books_key_reads_empty() {
        let root = tempfile::tempdir().expect("tempdir");
        write_file(root.path(), BOOKS_FILE, b"{}").expect("write store");
        let repo = JsonBookRepository::open(root.path()).expect("open");

        assert!(repo.load().await.expect("load").is_empty());
    }
}
