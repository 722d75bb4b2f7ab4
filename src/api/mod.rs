//! HTTP API module for the dataset corrector.
//!
//! This module provides the REST API endpoints for cleaning a dataset and
//! for checking one against the correction rules.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CleanRequest;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
