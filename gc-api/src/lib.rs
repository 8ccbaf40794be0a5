//! GosuCatcher API - REST surface over the service layer.
//!
//! Routes map one-to-one onto service operations. Request bodies are
//! decoded and validated by [`extract::ValidatedJson`] before a handler
//! runs, and every failure leaves through [`error::ApiError`] with the
//! `{ timestamp, code, message, errors }` body.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiResult, ErrorResponse};
pub use routes::app;
pub use server::serve;
pub use state::AppState;
