//! JSON query surface for the founding rates tracker.
//!
//! Exposes the two data products presentation layers need, plus a
//! window summary and a liveness probe:
//!
//! | Method | Path | Body |
//! |--------|------|------|
//! | `GET` | `/foundings.json` | every founding in the window, newest first |
//! | `GET` | `/regions.json` | `{ name, foundings }` per region, most active first |
//! | `GET` | `/summary.json` | sample size and covered time span |
//! | `GET` | `/health` | `{ "status": "ok" }` |
//!
//! # Architecture
//!
//! Every data request goes through one [`AppState`], which holds the
//! window aggregator behind an async mutex. Concurrent HTTP requests are
//! therefore served one at a time, keeping upstream fetches sequential
//! and inside the shared rate budget.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use config::{ApiConfig, ConfigError};
pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::{AppState, FoundingsQuery, LiveState};
