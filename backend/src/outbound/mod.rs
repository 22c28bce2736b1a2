//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: JSON document stores for books and users.
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod persistence;
