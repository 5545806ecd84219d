//! # API Route Handlers
//!
//! This module organizes all the Axum route handlers for `adlens-server`,
//! split by functionality: general service endpoints, the dataset lifecycle
//! and media byte-serving.

pub mod datasets;
pub mod general;
pub mod media;

// Re-export all handlers from the sub-modules to make them easily accessible
// to the router under a single `handlers::` path.
pub use datasets::*;
pub use general::*;
pub use media::*;

// Shared items used by multiple handler modules.
use super::{errors::AppError, state::AppState, types::ApiResponse};
use axum::Json;

/// Wraps a successful result in the standard `ApiResponse` envelope.
pub(crate) fn wrap_response<T>(result: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse { result })
}
