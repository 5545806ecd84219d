use serde::{Deserialize, Serialize};

/// The standard success envelope for every endpoint.
#[derive(Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub result: T,
}
