//! HTTP server module for the dining API.
//!
//! This module provides an axum-based HTTP server that exposes the snapshot
//! queries as a small REST API. Handlers only read; refreshing is owned by the
//! scheduler.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - Path parameter parsing and validation                  │
//! │  - JSON serialization                                     │
//! │  - CORS, compression, request tracing                     │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Query Engine (query.rs)                                  │
//! │  - Name and open-at filters over one snapshot             │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Snapshot Store (store.rs)                                │
//! │  - Written only by the refresh scheduler                  │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
