// --- File: crates/unenroll_common/src/lib.rs ---

pub mod error; // Error handling
pub mod handlers; // Health handler
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Shared data structures
pub mod routes; // Route definitions
pub mod services; // Service abstractions

pub use routes::routes;

pub use error::{
    config_error, external_service_error, not_found, Context, HttpStatusCode, UnenrollError,
    GENERIC_ERROR_MESSAGE,
};

pub use http::{client::create_client, failure_body, method_not_allowed, IntoHttpResponse};

pub use logging::{init, init_with_level, log_result};

pub use models::{HealthResponse, InvalidModeError, SequenceMode};
pub use services::{BoxFuture, SequenceService};
