//! # Rates Module
//!
//! The rate calculator: distance factor, cubic weight and per-service
//! pricing curves.
//!
//! ## Calculation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      One Quote                                          │
//! │                                                                         │
//! │  ShippingRequest + EngineConfig.origin                                  │
//! │       │                                                                 │
//! │       ├──► distance = |dest - origin| / 10_000_000                     │
//! │       │                                                                 │
//! │       ├──► billable kg = max(grams / 1000, volume m³ × 200)            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌──────────────────────────┐   ┌──────────────────────────┐          │
//! │  │ Express                  │   │ Standard                 │          │
//! │  │ 25 + 5·kg + 50·distance  │   │ 15 + 3·kg + 30·distance  │          │
//! │  │ 2 + ⌊3·distance⌋ days    │   │ 5 + ⌊5·distance⌋ days    │          │
//! │  └────────────┬─────────────┘   └────────────┬─────────────┘          │
//! │               │ round to centavos            │                         │
//! │               ▼                              ▼                         │
//! │  [ Express, Standard, Pickup (0.00, 0 days) ]  ← fixed order          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Distance Factor
//! The distance factor is the numeric difference between the two postal
//! codes, scaled down. It is NOT a geographic distance: postal codes that
//! are numerically close can be far apart on a map. Quotes must stay
//! reproducible, so the approximation is kept exactly as is.

use crate::error::{CoreError, CoreResult, ValidationErrors};
use crate::money::Money;
use crate::types::{
    EngineConfig, PostalCode, RawShippingRequest, ServiceCode, ShippingOption, ShippingQuote,
    ShippingRequest,
};
use crate::validation;

/// Divisor applied to the postal code difference.
pub const DISTANCE_SCALE: f64 = 10_000_000.0;

/// Kilograms billed per cubic meter of package volume.
pub const CUBIC_WEIGHT_KG_PER_M3: f64 = 200.0;

// =============================================================================
// Pure Building Blocks
// =============================================================================

/// Dimensionless distance proxy between two postal codes.
///
/// ## Example
/// ```rust
/// use frete_core::rates::distance_factor;
/// use frete_core::types::PostalCode;
///
/// let origin = PostalCode::parse("78556100").unwrap();
/// let dest = PostalCode::parse("01310100").unwrap();
/// assert!((distance_factor(&origin, &dest) - 7.7246).abs() < 1e-9);
/// assert_eq!(distance_factor(&origin, &origin), 0.0);
/// ```
pub fn distance_factor(origin: &PostalCode, destination: &PostalCode) -> f64 {
    let diff = origin.as_number().abs_diff(destination.as_number());
    f64::from(diff) / DISTANCE_SCALE
}

/// Weight the carriers bill for: the greater of actual and cubic weight, in kg.
///
/// Cubic weight treats one cubic meter as 200 kg.
pub fn billable_weight_kg(request: &ShippingRequest) -> f64 {
    let cubic_kg = request.dimensions().volume_m3() * CUBIC_WEIGHT_KG_PER_M3;
    request.weight_kg().max(cubic_kg)
}

// =============================================================================
// Service Curves
// =============================================================================

/// The carrier services that are priced.
///
/// The set is closed: two linear curves and nothing else. Store pickup is
/// not a curve; it is always free and always appended last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceCurve {
    Express,
    Standard,
}

/// Coefficients of one linear pricing curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveParams {
    pub base_price: f64,
    pub price_per_kg: f64,
    pub price_per_distance: f64,
    pub base_days: u32,
    pub days_per_distance: f64,
}

impl ServiceCurve {
    /// Curves in output order.
    pub const ALL: [ServiceCurve; 2] = [ServiceCurve::Express, ServiceCurve::Standard];

    /// The curve's coefficients.
    pub const fn params(&self) -> CurveParams {
        match self {
            ServiceCurve::Express => CurveParams {
                base_price: 25.0,
                price_per_kg: 5.0,
                price_per_distance: 50.0,
                base_days: 2,
                days_per_distance: 3.0,
            },
            ServiceCurve::Standard => CurveParams {
                base_price: 15.0,
                price_per_kg: 3.0,
                price_per_distance: 30.0,
                base_days: 5,
                days_per_distance: 5.0,
            },
        }
    }

    /// The service code this curve quotes.
    pub const fn service_code(&self) -> ServiceCode {
        match self {
            ServiceCurve::Express => ServiceCode::Express,
            ServiceCurve::Standard => ServiceCode::Standard,
        }
    }

    /// Unrounded price in reais.
    pub fn price(&self, billable_kg: f64, distance: f64) -> f64 {
        let p = self.params();
        p.base_price + billable_kg * p.price_per_kg + distance * p.price_per_distance
    }

    /// Lead time in whole days, floored.
    pub fn days(&self, distance: f64) -> u32 {
        let p = self.params();
        // distance is non-negative and at most ~10, so the cast cannot wrap
        p.base_days + (distance * p.days_per_distance).floor() as u32
    }

    /// Prices one option, checking the output contract.
    ///
    /// ## Errors
    /// [`CoreError::InvalidQuote`] if the price is not a finite,
    /// non-negative amount that fits in centavos.
    pub fn quote(&self, billable_kg: f64, distance: f64) -> CoreResult<ShippingOption> {
        let service = self.service_code();
        let invalid = |reason: &str| CoreError::InvalidQuote {
            service: service.name().to_string(),
            reason: reason.to_string(),
        };

        if !billable_kg.is_finite() || !distance.is_finite() || distance < 0.0 {
            return Err(invalid("weight or distance is out of domain"));
        }

        let price = Money::from_decimal_rounded(self.price(billable_kg, distance))
            .ok_or_else(|| invalid("price is not a representable amount"))?;
        if price.is_negative() {
            return Err(invalid("price is negative"));
        }

        Ok(ShippingOption::carrier(service, price, self.days(distance)))
    }
}

// =============================================================================
// Rate Calculator
// =============================================================================

/// Computes quotes against a fixed, injected configuration.
///
/// Holds no mutable state; share one instance across threads freely.
///
/// ## Example
/// ```rust
/// use frete_core::rates::RateCalculator;
/// use frete_core::types::{EngineConfig, RawShippingRequest};
///
/// let calculator = RateCalculator::new(EngineConfig::default());
/// let raw = RawShippingRequest {
///     destination_postal_code: Some("78556100".to_string()),
///     weight_grams: Some(500.0),
///     length_cm: Some(30.0),
///     height_cm: Some(20.0),
///     width_cm: Some(20.0),
///     format: Some(1.0),
///     diameter_cm: None,
/// };
///
/// let quote = calculator.quote(&raw).unwrap();
/// assert_eq!(quote.express().unwrap().price.cents(), 3700);
/// assert_eq!(quote.standard().unwrap().price.cents(), 2220);
/// assert!(quote.pickup().unwrap().price.is_zero());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RateCalculator {
    config: EngineConfig,
}

impl RateCalculator {
    /// Creates a calculator bound to `config`.
    pub fn new(config: EngineConfig) -> Self {
        RateCalculator { config }
    }

    /// The configuration this calculator was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Validates a raw request, filling omitted measurements from the
    /// configured default package.
    pub fn validate(&self, raw: &RawShippingRequest) -> Result<ShippingRequest, ValidationErrors> {
        validation::validate(raw, self.config.default_package())
    }

    /// Prices a validated request.
    ///
    /// Always returns exactly three options: Express, Standard, Pickup.
    ///
    /// ## Errors
    /// [`CoreError::InvalidQuote`] only if the output contract is broken,
    /// which cannot happen for requests produced by the validator.
    pub fn calculate(&self, request: &ShippingRequest) -> CoreResult<ShippingQuote> {
        let distance = distance_factor(self.config.origin(), request.destination());
        let billable_kg = billable_weight_kg(request);

        let mut options = ServiceCurve::ALL
            .iter()
            .map(|curve| curve.quote(billable_kg, distance))
            .collect::<CoreResult<Vec<_>>>()?;
        options.push(ShippingOption::pickup());

        Ok(ShippingQuote::new(options))
    }

    /// Full pipeline: validate, then calculate.
    ///
    /// ## Errors
    /// - [`CoreError::Validation`] with every violation, before any pricing
    /// - [`CoreError::InvalidQuote`] on a contract violation
    pub fn quote(&self, raw: &RawShippingRequest) -> CoreResult<ShippingQuote> {
        let request = self.validate(raw)?;
        self.calculate(&request)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
