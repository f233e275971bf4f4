//! Exercise tracker library: domain model, ports, adapters and middleware.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use middleware::Trace;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
