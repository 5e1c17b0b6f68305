//! Disconnected CMS layout service library.

pub mod config;
pub mod http;
pub mod layout;
pub mod lifecycle;
pub mod observability;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use layout::{LayoutDocument, LayoutResolver};
pub use lifecycle::Shutdown;
