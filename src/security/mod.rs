//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → body size limit (tower-http RequestBodyLimitLayer, see http::server)
//!     → headers.rs (strip hop-by-hop, add X-Forwarded-*)
//!     → Forward to upstream
//!
//! File requests:
//!     → http::files rejects '..' segments before touching the disk
//! ```
//!
//! # Design Decisions
//! - Fail closed: rejected paths answer 404
//! - No trust in client input

pub mod headers;
