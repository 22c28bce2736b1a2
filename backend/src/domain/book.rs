//! Book records and the validated inputs that create or edit them.

use serde::{Deserialize, Serialize};

/// Book fields subject to presence checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookField {
    User,
    Title,
    Author,
    Content,
}

impl BookField {
    /// Field name as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Title => "title",
            Self::Author => "author",
            Self::Content => "content",
        }
    }
}

/// Validation errors raised while building [`NewBook`] or [`BookEdit`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookValidationError {
    #[error("missing required field: {}", .0.as_str())]
    MissingField(BookField),
}

fn required(value: Option<&str>, field: BookField) -> Result<String, BookValidationError> {
    match value {
        Some(raw) if !raw.trim().is_empty() => Ok(raw.to_owned()),
        _ => Err(BookValidationError::MissingField(field)),
    }
}

/// A catalogue entry.
///
/// `title` is the case-sensitive uniqueness key within the store. `user` names
/// the owner and never changes after creation.
///
/// Serialised as `{"user", "title", "author", "content"}`. Missing keys in a
/// stored record read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Book {
    user: String,
    title: String,
    author: String,
    content: String,
}

impl Book {
    /// Owner name.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Title, unique within the store.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Author name.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Free-form book body.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Exact, case-sensitive title comparison.
    pub fn has_title(&self, title: &str) -> bool {
        self.title == title
    }

    /// Replace title, author, and content while keeping the owner.
    pub fn apply(&mut self, edit: BookEdit) {
        let BookEdit {
            title,
            author,
            content,
        } = edit;
        self.title = title;
        self.author = author;
        self.content = content;
    }
}

impl From<NewBook> for Book {
    fn from(value: NewBook) -> Self {
        let NewBook {
            user,
            title,
            author,
            content,
        } = value;
        Self {
            user,
            title,
            author,
            content,
        }
    }
}

/// Validated input for adding a book.
///
/// # Examples
/// ```
/// use library_backend::domain::{BookField, BookValidationError, NewBook};
///
/// let draft = NewBook::try_from_parts(Some("alice"), Some("T1"), Some("A"), Some("C"))
///     .expect("all fields present");
/// assert_eq!(draft.title(), "T1");
///
/// let missing = NewBook::try_from_parts(Some("alice"), None, Some("A"), Some("C"));
/// assert_eq!(missing, Err(BookValidationError::MissingField(BookField::Title)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    user: String,
    title: String,
    author: String,
    content: String,
}

impl NewBook {
    /// Build from optional parts, rejecting absent or blank fields.
    pub fn try_from_parts(
        user: Option<&str>,
        title: Option<&str>,
        author: Option<&str>,
        content: Option<&str>,
    ) -> Result<Self, BookValidationError> {
        Ok(Self {
            user: required(user, BookField::User)?,
            title: required(title, BookField::Title)?,
            author: required(author, BookField::Author)?,
            content: required(content, BookField::Content)?,
        })
    }

    /// Title of the book being added.
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Validated replacement values for an existing book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookEdit {
    title: String,
    author: String,
    content: String,
}

impl BookEdit {
    /// Build from optional parts, rejecting absent or blank fields.
    pub fn try_from_parts(
        title: Option<&str>,
        author: Option<&str>,
        content: Option<&str>,
    ) -> Result<Self, BookValidationError> {
        Ok(Self {
            title: required(title, BookField::Title)?,
            author: required(author, BookField::Author)?,
            content: required(content, BookField::Content)?,
        })
    }
}
