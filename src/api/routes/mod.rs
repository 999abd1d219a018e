//! Route handlers for the REST API
//!
//! Handlers are organized by domain:
//! - [`downloads`] - Download jobs and artifact streaming
//! - [`system`] - Health and OpenAPI

mod downloads;
mod system;

// Re-export all handlers so `routes::function_name` works
pub use downloads::*;
pub use system::*;

/// Content type of every served artifact
pub const ARTIFACT_CONTENT_TYPE: &str = "video/mp4";

/// Content-Disposition of every served artifact
pub const ARTIFACT_DISPOSITION: &str = "attachment; filename=\"video.mp4\"";
