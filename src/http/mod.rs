//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → routing::RouteTable (binding lookup)
//!     → forward.rs (delegated namespace) | files.rs (media/static)
//!     → response.rs (errors as JSON)
//!     → Send to client
//! ```

pub mod files;
pub mod forward;
pub mod request;
pub mod response;
pub mod server;

pub use request::{request_id, MakeRequestUuid, X_REQUEST_ID};
pub use response::SiteError;
pub use server::SiteServer;
