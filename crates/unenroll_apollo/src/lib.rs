// --- File: crates/unenroll_apollo/src/lib.rs ---
pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod routes;

pub use error::ApolloError;
pub use logic::{
    is_valid_email, remove_contact_from_sequence, validate_request, ApolloClient,
    RemoveContactRequest, RemoveContactResponse, ValidatedRequest,
};
pub use routes::{routes, routes_with_client};
