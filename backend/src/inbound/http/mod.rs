//! HTTP inbound adapter exposing REST endpoints.

pub mod books;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// JSON extractor configuration mapping body parse failures to the shared
/// error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| validation::invalid_json_error(&err).into())
}
