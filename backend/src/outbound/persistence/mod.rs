//! JSON file persistence adapters.
//!
//! Each store is a whole document in the configured data directory. Adapters
//! only translate between documents and domain types; services own the
//! read-modify-write cycle. File access goes through `cap_std` directory
//! handles and runs on Tokio's blocking pool.

mod json_book_repository;
mod json_file;
mod json_user_repository;

pub use json_book_repository::JsonBookRepository;
pub use json_user_repository::JsonUserRepository;
