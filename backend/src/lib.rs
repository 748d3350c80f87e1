//! Storefront backend library modules.
//!
//! Hexagonal layout: [`domain`] holds entities, ports, and services;
//! [`outbound`] the in-memory store; [`inbound`] the HTTP adapter.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

pub use domain::TraceId;
pub use middleware::Trace;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
