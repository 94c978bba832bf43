//! # Tally API
//!
//! HTTP service that scores receipts and serves their points.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Tally API                                       │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌──────────────────┐   ┌──────────────────────┐│
//! │  │  routes          │   │  handlers        │   │  state               ││
//! │  │                  │   │                  │   │                      ││
//! │  │ • route table    │──►│ • process_receipt│──►│ • store (dyn repo)   ││
//! │  │ • API key layer  │   │ • get_points     │   │ • auth config        ││
//! │  │ • 404 fallback   │   │                  │   │                      ││
//! │  └──────────────────┘   └──────────────────┘   └──────────────────────┘│
//! │                                                                         │
//! │  config (env) + cli (flags) ──► logging (tracing) ──► main              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Status Codes
//! - `200` - processed / points found (even if the receipt had unparsable fields)
//! - `400` - body is not a receipt document
//! - `401` - missing or unknown API key
//! - `404` - unknown receipt id or route
//! - `500` - store failure

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod routes;
pub mod state;

// Re-exports
pub use auth::{ApiKeySet, AuthConfig};
pub use config::ApiConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
