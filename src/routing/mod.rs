//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → table.rs (route lookup)
//!     → matcher.rs (evaluate prefix)
//!     → Return: matched binding + remainder, or NoMatch
//!
//! Route Compilation (at startup):
//!     SiteConfig mounts + media/static sections
//!     → statics.rs (generated file bindings, debug only)
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in hot path (prefix matching only)
//! - Deterministic: same input always matches same binding

pub mod binding;
pub mod matcher;
pub mod statics;
pub mod table;

pub use binding::{RouteBinding, Target};
pub use table::{BuildError, Resolved, RouteTable};
