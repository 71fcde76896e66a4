//! # Frete API
//!
//! HTTP front end for the frete-core rate engine.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Frete API                                      │
//! │                                                                         │
//! │  Checkout ──► POST /shipping/quote ──► CORS ──► quote_handler          │
//! │                                                     │                   │
//! │                                                     ▼                   │
//! │                                              RateCalculator             │
//! │                                         (origin + default package       │
//! │                                          fixed at startup)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`config`] for the environment variables.

pub mod config;
pub mod error;
pub mod routes;
pub mod server;

use frete_core::types::EngineConfig;
use frete_core::RateCalculator;

// Re-exports
pub use config::{ApiConfig, ConfigError};
pub use error::ApiError;
pub use routes::build_router;
pub use server::ServerError;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub calculator: RateCalculator,
}

impl AppState {
    /// Creates the state for a validated engine configuration.
    pub fn new(engine: EngineConfig) -> Self {
        AppState {
            calculator: RateCalculator::new(engine),
        }
    }
}
