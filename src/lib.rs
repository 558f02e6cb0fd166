//! Site front door: URL route table, upstream delegation and media serving.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod security;

pub use config::schema::SiteConfig;
pub use http::SiteServer;
pub use lifecycle::Shutdown;
pub use routing::RouteTable;
