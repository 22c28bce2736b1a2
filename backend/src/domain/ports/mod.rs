//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`*Query`, `*Command`) are what inbound adapters call.
//! Driven ports (`*Repository`) are what outbound adapters implement.

mod macros;
pub(crate) use macros::define_port_error;

mod book_repository;
mod books_command;
mod books_query;
mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use book_repository::MockBookRepository;
pub use book_repository::{BookRepository, BookRepositoryError};
pub use books_command::BooksCommand;
pub use books_query::BooksQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
pub use users_command::UsersCommand;
pub use users_query::UsersQuery;
