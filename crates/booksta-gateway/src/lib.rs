//! Gateway to the Booksta REST API.
//!
//! View-models depend on the traits in [`source`]; [`HttpGateway`] is the
//! production implementation.

pub mod config;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod source;

pub use config::GatewayConfig;
pub use error::{GatewayError, Result};
pub use http::HttpGateway;
pub use source::{
    CollectionSource, DetailSource, InventoryGateway, RelationshipGateway, RelationshipKind,
    RelationshipTarget, ReportGateway,
};
