// --- File: crates/unenroll_apollo/src/doc.rs ---
#[cfg(feature = "openapi")]
use crate::logic::{RemoveContactRequest, RemoveContactResponse};
#[cfg(feature = "openapi")]
use utoipa::OpenApi;

#[cfg(feature = "openapi")]
#[derive(OpenApi)]
#[openapi(
    paths(crate::handlers::remove_contact_handler),
    components(schemas(RemoveContactRequest, RemoveContactResponse)),
    tags(
        (name = "Apollo", description = "Apollo sequence membership")
    )
)]
pub struct ApolloApiDoc;
