//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → loader.rs (MEDIA_URL / MEDIA_ROOT / DEBUG ... environment overrides)
//!     → validation.rs (semantic checks)
//!     → SiteConfig (validated, immutable)
//!     → consumed once by the route table builder
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load, load_config, ConfigError};
pub use schema::FilesConfig;
pub use schema::ListenerConfig;
pub use schema::MountConfig;
pub use schema::SiteConfig;
