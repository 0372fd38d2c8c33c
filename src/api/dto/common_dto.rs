//! Shared DTO types used across multiple endpoints.

use serde::Serialize;
use utoipa::ToSchema;

/// Acknowledgement returned by deletions.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeleteResponse {
    /// Always `true`; failures are reported as errors.
    pub success: bool,
}

impl DeleteResponse {
    /// A successful acknowledgement.
    #[must_use]
    pub const fn ok() -> Self {
        Self { success: true }
    }
}
