//! # frete-core: Pure Shipping Rate Logic
//!
//! This crate is the **heart** of the Frete engine. Given a destination
//! postal code and a package's physical measurements it produces the ordered
//! list of carrier quotes plus a store-pickup option, as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Frete Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Checkout frontend / ERP / other callers            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ POST /shipping/quote (JSON)           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    frete-api (axum)                             │   │
//! │  │    config, logging, CORS, JSON ⇄ types, HTTP status mapping     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ frete-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │validation │  │   rates   │  │   money   │  │   │
//! │  │   │ Request   │─►│ validate  │─►│ calculate │─►│  Money    │  │   │
//! │  │   │ Option    │  │ (collect  │  │ (cubic wt,│  │ (centavos)│  │   │
//! │  │   │ Config    │  │  all)     │  │  curves)  │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Request, option, quote and configuration types
//! - [`validation`] - Turns a raw request into a guaranteed-valid one
//! - [`rates`] - Distance factor, cubic weight and service pricing curves
//! - [`money`] - Integer-centavo prices with a single rounding step
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same request + same config = same quote
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Parse, don't re-validate**: only the validator builds a `ShippingRequest`
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use frete_core::rates::RateCalculator;
//! use frete_core::types::{EngineConfig, RawShippingRequest, ServiceCode};
//!
//! let calculator = RateCalculator::new(EngineConfig::default());
//!
//! let raw = RawShippingRequest {
//!     destination_postal_code: Some("78556100".to_string()),
//!     weight_grams: Some(500.0),
//!     length_cm: Some(30.0),
//!     height_cm: Some(20.0),
//!     width_cm: Some(20.0),
//!     format: Some(1.0),
//!     diameter_cm: None,
//! };
//!
//! let quote = calculator.quote(&raw).unwrap();
//! let codes: Vec<ServiceCode> = quote.options().iter().map(|o| o.service_code).collect();
//! assert_eq!(codes, [ServiceCode::Express, ServiceCode::Standard, ServiceCode::Pickup]);
//! assert_eq!(quote.express().unwrap().price.cents(), 3700);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod rates;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, FieldViolation, ValidationError, ValidationErrors};
pub use money::Money;
pub use rates::RateCalculator;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of digits in a postal code (CEP).
pub const POSTAL_CODE_LEN: usize = 8;

/// Lightest accepted package, in grams (inclusive).
pub const MIN_WEIGHT_GRAMS: f64 = 1.0;

/// Heaviest accepted package, in grams (inclusive).
///
/// ## Business Reason
/// Carrier limit for a single parcel on the modeled services.
pub const MAX_WEIGHT_GRAMS: f64 = 30_000.0;

/// Shortest accepted length and width, in centimeters.
pub const MIN_LENGTH_WIDTH_CM: f64 = 11.0;

/// Shortest accepted height, in centimeters.
pub const MIN_HEIGHT_CM: f64 = 2.0;

/// Longest accepted side on any axis, in centimeters.
pub const MAX_SIDE_CM: f64 = 105.0;

/// Origin postal code used when none is configured.
pub const DEFAULT_ORIGIN_POSTAL_CODE: &str = "78556100";

/// Default package weight in grams.
pub const DEFAULT_PACKAGE_WEIGHT_GRAMS: f64 = 300.0;

/// Default package length in centimeters.
pub const DEFAULT_PACKAGE_LENGTH_CM: f64 = 16.0;

/// Default package height in centimeters.
pub const DEFAULT_PACKAGE_HEIGHT_CM: f64 = 2.0;

/// Default package width in centimeters.
pub const DEFAULT_PACKAGE_WIDTH_CM: f64 = 11.0;

/// Default package format code (1 = box).
pub const DEFAULT_PACKAGE_FORMAT_CODE: i64 = 1;
