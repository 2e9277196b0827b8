//! # Dining API
//!
//! Campus dining location service.
//!
//! This crate periodically fetches dining-location data from an upstream
//! source, keeps the latest accepted result as an immutable in-memory
//! snapshot, and answers read queries against it: by name substring, and by
//! "which locations are open at this point of the week".
//!
//! ## Architecture
//!
//! ```text
//! RefreshScheduler ──▶ SnapshotSource ──▶ CacheGuard ──▶ SnapshotStore ──▶ QueryEngine
//! ```
//!
//! - [`source`]: where records come from (JSON file or upstream URL)
//! - [`guard`]: the partial-fetch heuristic deciding whether a fetch is kept
//! - [`store`]: lock-free holder of the current snapshot
//! - [`scheduler`]: startup and periodic refresh cycles, failure isolation
//! - [`query`]: name and time-window filters
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! A failed or suspicious refresh never replaces the current snapshot; queries
//! keep being answered from the last good one.

pub mod config;
pub mod error;
pub mod guard;
pub mod models;
pub mod query;
pub mod scheduler;
pub mod source;
pub mod store;

#[cfg(feature = "http-server")]
pub mod http;

pub use config::AppConfig;
pub use error::{ConfigError, QueryError, SourceError};
pub use guard::{CacheGuard, GuardDecision};
pub use models::{LocationRecord, OpenInterval, Snapshot, WeekTime};
pub use query::{QueryEngine, TimeParamPolicy};
pub use scheduler::{RefreshOutcome, RefreshScheduler};
pub use source::SnapshotSource;
pub use store::SnapshotStore;
