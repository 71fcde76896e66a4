//! # Validation Module
//!
//! Turns an untrusted [`RawShippingRequest`] into a [`ShippingRequest`].
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Flow                                    │
//! │                                                                         │
//! │  RawShippingRequest (JSON body)                                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  1. Fill omitted package fields from EngineConfig::default_package     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  2. Check EVERY field, collecting violations in field order            │
//! │     cepDestino → peso → comprimento → altura → largura                 │
//! │     → formato → diametro                                               │
//! │           │                                                             │
//! │           ├── any violation? → Err(ValidationErrors) (all of them)     │
//! │           │                                                             │
//! │           └── none → Ok(ShippingRequest) ──► RateCalculator            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//! | Field         | Rule                                   |
//! |---------------|----------------------------------------|
//! | `cepDestino`  | required, `^\d{8}$`                    |
//! | `peso`        | finite, in [1, 30000] grams            |
//! | `comprimento` | finite, in [11, 105] cm                |
//! | `altura`      | finite, in [2, 105] cm                 |
//! | `largura`     | finite, in [11, 105] cm                |
//! | `formato`     | integral, one of 1, 2, 3               |
//! | `diametro`    | optional; finite and not negative      |
//!
//! ## Usage
//! ```rust
//! use frete_core::types::{DefaultPackage, RawShippingRequest};
//! use frete_core::validation::validate;
//!
//! let raw = RawShippingRequest {
//!     destination_postal_code: Some("0131010".to_string()),
//!     weight_grams: Some(0.0),
//!     ..Default::default()
//! };
//!
//! let errors = validate(&raw, &DefaultPackage::default()).unwrap_err();
//! assert_eq!(errors.len(), 2);
//! assert!(errors.has_field("cepDestino"));
//! assert!(errors.has_field("peso"));
//! ```

use crate::error::{ValidationError, ValidationErrors};
use crate::types::{
    DefaultPackage, Dimensions, EngineConfig, PackageFormat, PostalCode, RawShippingRequest,
    ShippingRequest,
};
use crate::{MAX_SIDE_CM, MAX_WEIGHT_GRAMS, MIN_HEIGHT_CM, MIN_LENGTH_WIDTH_CM, MIN_WEIGHT_GRAMS};

/// Result type for single-field validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Wire names of the request fields, as they appear in violations.
pub mod fields {
    pub const DESTINATION: &str = "cepDestino";
    pub const WEIGHT: &str = "peso";
    pub const LENGTH: &str = "comprimento";
    pub const HEIGHT: &str = "altura";
    pub const WIDTH: &str = "largura";
    pub const FORMAT: &str = "formato";
    pub const DIAMETER: &str = "diametro";
    pub const ORIGIN: &str = "origin";
}

// =============================================================================
// Request Validator
// =============================================================================

/// Validates a raw request, reporting every violation at once.
///
/// Package measurements the caller omitted are taken from `defaults`;
/// `cepDestino` has no default and is required.
///
/// ## Errors
/// A [`ValidationErrors`] holding one entry per violated field, in the
/// order `cepDestino, peso, comprimento, altura, largura, formato, diametro`.
///
/// ## Example
/// ```rust
/// use frete_core::types::{DefaultPackage, PackageFormat, RawShippingRequest};
/// use frete_core::validation::validate;
///
/// // Only the destination: everything else comes from the default package
/// let raw = RawShippingRequest {
///     destination_postal_code: Some("01310100".to_string()),
///     ..Default::default()
/// };
///
/// let request = validate(&raw, &DefaultPackage::default()).unwrap();
/// assert_eq!(request.weight_grams(), 300.0);
/// assert_eq!(request.format(), PackageFormat::Box);
/// ```
pub fn validate(
    raw: &RawShippingRequest,
    defaults: &DefaultPackage,
) -> Result<ShippingRequest, ValidationErrors> {
    let mut errors = Vec::new();

    let destination = keep(
        validate_postal_code(fields::DESTINATION, raw.destination_postal_code.as_deref()),
        &mut errors,
    );
    let weight = keep(
        validate_weight_grams(raw.weight_grams.unwrap_or(defaults.weight_grams)),
        &mut errors,
    );
    let length = keep(
        validate_dimension(
            fields::LENGTH,
            raw.length_cm.unwrap_or(defaults.length_cm),
            MIN_LENGTH_WIDTH_CM,
        ),
        &mut errors,
    );
    let height = keep(
        validate_dimension(
            fields::HEIGHT,
            raw.height_cm.unwrap_or(defaults.height_cm),
            MIN_HEIGHT_CM,
        ),
        &mut errors,
    );
    let width = keep(
        validate_dimension(
            fields::WIDTH,
            raw.width_cm.unwrap_or(defaults.width_cm),
            MIN_LENGTH_WIDTH_CM,
        ),
        &mut errors,
    );
    let format = match raw.format {
        Some(code) => keep(validate_format(code), &mut errors),
        None => Some(defaults.format),
    };
    let diameter = match raw.diameter_cm {
        Some(value) => keep(validate_diameter(value), &mut errors).map(Some),
        None => Some(None),
    };

    match (destination, weight, length, height, width, format, diameter) {
        (
            Some(destination),
            Some(weight_grams),
            Some(length_cm),
            Some(height_cm),
            Some(width_cm),
            Some(format),
            Some(diameter_cm),
        ) if errors.is_empty() => Ok(ShippingRequest::new(
            destination,
            weight_grams,
            Dimensions {
                length_cm,
                height_cm,
                width_cm,
            },
            format,
            diameter_cm,
        )),
        _ => Err(ValidationErrors::collected(errors)),
    }
}

/// Validates a configured origin and default package.
///
/// Used once at startup so a misconfigured default can never reach the
/// calculator. Violations name `origin` or the request field the default
/// stands in for.
pub fn validate_engine_config(
    origin: &str,
    default_package: DefaultPackage,
) -> Result<EngineConfig, ValidationErrors> {
    let mut errors = Vec::new();

    let origin = keep(validate_postal_code(fields::ORIGIN, Some(origin)), &mut errors);
    keep(validate_weight_grams(default_package.weight_grams), &mut errors);
    keep(
        validate_dimension(fields::LENGTH, default_package.length_cm, MIN_LENGTH_WIDTH_CM),
        &mut errors,
    );
    keep(
        validate_dimension(fields::HEIGHT, default_package.height_cm, MIN_HEIGHT_CM),
        &mut errors,
    );
    keep(
        validate_dimension(fields::WIDTH, default_package.width_cm, MIN_LENGTH_WIDTH_CM),
        &mut errors,
    );

    match origin {
        Some(origin) if errors.is_empty() => Ok(EngineConfig::new(origin, default_package)),
        _ => Err(ValidationErrors::collected(errors)),
    }
}

/// Records a failed check and passes a successful one through.
fn keep<T>(result: ValidationResult<T>, errors: &mut Vec<ValidationError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            errors.push(err);
            None
        }
    }
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a postal code field.
///
/// ## Rules
/// - Must be present
/// - Exactly 8 ASCII digits; no hyphen, spaces or other formatting
///
/// ## Example
/// ```rust
/// use frete_core::validation::validate_postal_code;
///
/// assert!(validate_postal_code("cepDestino", Some("78556100")).is_ok());
/// assert!(validate_postal_code("cepDestino", Some("78556-100")).is_err());
/// assert!(validate_postal_code("cepDestino", None).is_err());
/// ```
pub fn validate_postal_code(field: &str, value: Option<&str>) -> ValidationResult<PostalCode> {
    let value = value.ok_or_else(|| ValidationError::Required {
        field: field.to_string(),
    })?;

    PostalCode::parse(value).ok_or_else(|| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be exactly 8 digits".to_string(),
    })
}

/// Validates the package weight in grams.
///
/// ## Rules
/// - Must be finite
/// - Must be within [1, 30000], both ends inclusive
pub fn validate_weight_grams(grams: f64) -> ValidationResult<f64> {
    check_range(fields::WEIGHT, grams, MIN_WEIGHT_GRAMS, MAX_WEIGHT_GRAMS)
}

/// Validates one package side in centimeters.
///
/// ## Rules
/// - Must be finite
/// - Must be within [`min_cm`, 105], both ends inclusive
///
/// Carriers set different minimums per axis: 11 cm for length and width,
/// 2 cm for height.
pub fn validate_dimension(field: &str, value_cm: f64, min_cm: f64) -> ValidationResult<f64> {
    check_range(field, value_cm, min_cm, MAX_SIDE_CM)
}

/// Validates the package format code.
///
/// ## Rules
/// - Must be a whole number
/// - Must be 1 (box), 2 (roll) or 3 (envelope)
///
/// ## Example
/// ```rust
/// use frete_core::types::PackageFormat;
/// use frete_core::validation::validate_format;
///
/// assert_eq!(validate_format(2.0).unwrap(), PackageFormat::Roll);
/// assert!(validate_format(1.5).is_err());
/// assert!(validate_format(4.0).is_err());
/// ```
pub fn validate_format(code: f64) -> ValidationResult<PackageFormat> {
    let not_allowed = || ValidationError::NotAllowed {
        field: fields::FORMAT.to_string(),
        allowed: PackageFormat::ALL
            .iter()
            .map(|format| format.code().to_string())
            .collect(),
    };

    if !code.is_finite() || code.fract() != 0.0 {
        return Err(not_allowed());
    }

    PackageFormat::from_code(code as i64).ok_or_else(not_allowed)
}

/// Validates the declared diameter.
///
/// ## Rules
/// - Must be finite
/// - Must not be negative
///
/// The diameter is accepted for any format but never affects the price.
pub fn validate_diameter(diameter_cm: f64) -> ValidationResult<f64> {
    if !diameter_cm.is_finite() {
        return Err(ValidationError::NotFinite {
            field: fields::DIAMETER.to_string(),
        });
    }

    if diameter_cm < 0.0 {
        return Err(ValidationError::Negative {
            field: fields::DIAMETER.to_string(),
        });
    }

    Ok(diameter_cm)
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> ValidationResult<f64> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min,
            max,
        });
    }

    Ok(value)
}

// =============================================================================
// Unit Tests
// =============================================================================
