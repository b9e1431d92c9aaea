//! Vehicle entry and departure registry for a single parking facility.
//!
//! The crate is laid out hexagonally: [`domain`] holds the parking rules and
//! the ports they depend on, [`inbound`] exposes them over HTTP, and
//! [`outbound`] provides in-memory and PostgreSQL repositories.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

#[cfg(test)]
mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
