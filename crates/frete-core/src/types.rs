//! # Domain Types
//!
//! Core domain types used throughout the Frete engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  INPUT                                                                  │
//! │  ┌────────────────────┐  validate   ┌────────────────────┐             │
//! │  │ RawShippingRequest │ ──────────► │  ShippingRequest   │             │
//! │  │  cepDestino?       │             │  PostalCode        │             │
//! │  │  peso? ...         │             │  weight_grams      │             │
//! │  │  (untrusted wire)  │             │  Dimensions        │             │
//! │  └────────────────────┘             │  PackageFormat     │             │
//! │                                     └─────────┬──────────┘             │
//! │  CONFIG                                       │ calculate               │
//! │  ┌────────────────────┐                       ▼                         │
//! │  │   EngineConfig     │             ┌────────────────────┐             │
//! │  │  origin PostalCode │ ──────────► │   ShippingQuote    │             │
//! │  │  DefaultPackage    │             │  [Express,         │             │
//! │  └────────────────────┘             │   Standard,        │             │
//! │                                     │   Pickup]          │             │
//! │  OUTPUT                             └────────────────────┘             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Trust Boundary
//! `RawShippingRequest` is whatever the caller sent. `ShippingRequest` has
//! private fields and can only be produced by [`crate::validation`], so any
//! value of that type already satisfies every range and format rule.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::{
    DEFAULT_ORIGIN_POSTAL_CODE, DEFAULT_PACKAGE_FORMAT_CODE, DEFAULT_PACKAGE_HEIGHT_CM,
    DEFAULT_PACKAGE_LENGTH_CM, DEFAULT_PACKAGE_WEIGHT_GRAMS, DEFAULT_PACKAGE_WIDTH_CM,
    POSTAL_CODE_LEN,
};

// =============================================================================
// Postal Code
// =============================================================================

/// A Brazilian postal code (CEP): exactly 8 ASCII digits, no hyphen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PostalCode(String);

impl PostalCode {
    /// Parses a postal code, accepting only `^\d{8}$`.
    ///
    /// ## Example
    /// ```rust
    /// use frete_core::types::PostalCode;
    ///
    /// assert!(PostalCode::parse("78556100").is_some());
    /// assert!(PostalCode::parse("78556-100").is_none());
    /// assert!(PostalCode::parse("7855610").is_none());
    /// ```
    pub fn parse(value: &str) -> Option<Self> {
        if value.len() == POSTAL_CODE_LEN && value.bytes().all(|b| b.is_ascii_digit()) {
            Some(PostalCode(value.to_string()))
        } else {
            None
        }
    }

    /// The 8-digit string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The postal code read as a decimal integer (leading zeros dropped).
    pub fn as_number(&self) -> u32 {
        // 8 digits always fit in u32 (max 99_999_999)
        self.0
            .bytes()
            .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'))
    }
}

impl std::fmt::Display for PostalCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Package Format
// =============================================================================

/// The physical shape of the package, as carriers classify it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageFormat {
    /// Box or package (code 1).
    Box,
    /// Roll or prism (code 2).
    Roll,
    /// Envelope (code 3).
    Envelope,
}

impl PackageFormat {
    /// All formats, in code order.
    pub const ALL: [PackageFormat; 3] = [
        PackageFormat::Box,
        PackageFormat::Roll,
        PackageFormat::Envelope,
    ];

    /// The numeric wire code (1, 2 or 3).
    pub const fn code(&self) -> u8 {
        match self {
            PackageFormat::Box => 1,
            PackageFormat::Roll => 2,
            PackageFormat::Envelope => 3,
        }
    }

    /// Looks up a format by wire code.
    pub fn from_code(code: i64) -> Option<Self> {
        PackageFormat::ALL
            .into_iter()
            .find(|format| i64::from(format.code()) == code)
    }

    /// Human-readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            PackageFormat::Box => "Box",
            PackageFormat::Roll => "Roll",
            PackageFormat::Envelope => "Envelope",
        }
    }
}

impl Default for PackageFormat {
    fn default() -> Self {
        PackageFormat::Box
    }
}

// =============================================================================
// Dimensions
// =============================================================================

/// Package measurements in centimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    pub length_cm: f64,
    pub height_cm: f64,
    pub width_cm: f64,
}

impl Dimensions {
    /// Volume in cubic meters: `(length × height × width) / 1_000_000`.
    #[inline]
    pub fn volume_m3(&self) -> f64 {
        (self.length_cm * self.height_cm * self.width_cm) / 1_000_000.0
    }
}

// =============================================================================
// Raw (Unvalidated) Request
// =============================================================================

/// A shipping quote request exactly as the caller sent it.
///
/// Every field is optional here; the validator decides what is missing,
/// what falls back to the configured default package, and what is invalid.
///
/// ## Wire Format
/// ```json
/// {
///   "cepDestino": "01310100",
///   "peso": 500,
///   "comprimento": 30,
///   "altura": 20,
///   "largura": 20,
///   "formato": 1,
///   "diametro": 0
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct RawShippingRequest {
    /// Destination postal code, 8 digits.
    #[serde(rename = "cepDestino")]
    #[ts(optional)]
    pub destination_postal_code: Option<String>,

    /// Actual weight in grams.
    #[serde(rename = "peso")]
    #[ts(optional)]
    pub weight_grams: Option<f64>,

    /// Length in centimeters.
    #[serde(rename = "comprimento")]
    #[ts(optional)]
    pub length_cm: Option<f64>,

    /// Height in centimeters.
    #[serde(rename = "altura")]
    #[ts(optional)]
    pub height_cm: Option<f64>,

    /// Width in centimeters.
    #[serde(rename = "largura")]
    #[ts(optional)]
    pub width_cm: Option<f64>,

    /// Package format code: 1 = box, 2 = roll, 3 = envelope.
    #[serde(rename = "formato")]
    #[ts(optional)]
    pub format: Option<f64>,

    /// Diameter in centimeters (roll packages only).
    #[serde(rename = "diametro")]
    #[ts(optional)]
    pub diameter_cm: Option<f64>,
}

// =============================================================================
// Validated Request
// =============================================================================

/// A shipping request that passed validation.
///
/// Fields are private: the only way to get one is
/// [`crate::validation::validate`], so downstream code never re-checks.
#[derive(Debug, Clone, PartialEq)]
pub struct ShippingRequest {
    destination: PostalCode,
    weight_grams: f64,
    dimensions: Dimensions,
    format: PackageFormat,
    diameter_cm: Option<f64>,
}

impl ShippingRequest {
    pub(crate) fn new(
        destination: PostalCode,
        weight_grams: f64,
        dimensions: Dimensions,
        format: PackageFormat,
        diameter_cm: Option<f64>,
    ) -> Self {
        ShippingRequest {
            destination,
            weight_grams,
            dimensions,
            format,
            diameter_cm,
        }
    }

    /// Destination postal code.
    #[inline]
    pub fn destination(&self) -> &PostalCode {
        &self.destination
    }

    /// Actual weight in grams, within [1, 30000].
    #[inline]
    pub fn weight_grams(&self) -> f64 {
        self.weight_grams
    }

    /// Actual weight in kilograms.
    #[inline]
    pub fn weight_kg(&self) -> f64 {
        self.weight_grams / 1000.0
    }

    /// Package measurements.
    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Package format.
    #[inline]
    pub fn format(&self) -> PackageFormat {
        self.format
    }

    /// Declared diameter. Carried through but never priced.
    #[inline]
    pub fn diameter_cm(&self) -> Option<f64> {
        self.diameter_cm
    }
}

// =============================================================================
// Service Code
// =============================================================================

/// Stable identifier of one quoted option.
///
/// The carrier codes are the national postal service's contract codes;
/// `PICKUP` is the sentinel for collecting the order at the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ServiceCode {
    #[serde(rename = "04014")]
    Express,
    #[serde(rename = "04510")]
    Standard,
    #[serde(rename = "PICKUP")]
    Pickup,
}

impl ServiceCode {
    /// The wire code.
    pub const fn code(&self) -> &'static str {
        match self {
            ServiceCode::Express => "04014",
            ServiceCode::Standard => "04510",
            ServiceCode::Pickup => "PICKUP",
        }
    }

    /// Human-readable service name.
    pub const fn name(&self) -> &'static str {
        match self {
            ServiceCode::Express => "Express",
            ServiceCode::Standard => "Standard",
            ServiceCode::Pickup => "Store Pickup",
        }
    }

    /// True for the store pickup sentinel.
    pub const fn is_pickup(&self) -> bool {
        matches!(self, ServiceCode::Pickup)
    }
}

impl std::fmt::Display for ServiceCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

// =============================================================================
// Shipping Option
// =============================================================================

/// One quoted way to get the package to the customer.
///
/// The three fee fields are reserved for optional carrier surcharges
/// (insurance, signature confirmation, declared value). None of those are
/// offered, so they are always present and always zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShippingOption {
    pub service_code: ServiceCode,
    pub service_name: String,
    #[ts(type = "number")]
    pub price: Money,
    pub estimated_days: u32,
    #[ts(type = "number")]
    pub insured_value_fee: Money,
    #[ts(type = "number")]
    pub signature_confirmation_fee: Money,
    #[ts(type = "number")]
    pub declared_value_fee: Money,
}

impl ShippingOption {
    /// A carrier option with no surcharges.
    pub fn carrier(service_code: ServiceCode, price: Money, estimated_days: u32) -> Self {
        ShippingOption {
            service_code,
            service_name: service_code.name().to_string(),
            price,
            estimated_days,
            insured_value_fee: Money::zero(),
            signature_confirmation_fee: Money::zero(),
            declared_value_fee: Money::zero(),
        }
    }

    /// The free, same-day store pickup option.
    pub fn pickup() -> Self {
        ShippingOption::carrier(ServiceCode::Pickup, Money::zero(), 0)
    }

    /// Price plus all surcharges.
    pub fn total(&self) -> Money {
        self.price + self.insured_value_fee + self.signature_confirmation_fee + self.declared_value_fee
    }
}

// =============================================================================
// Shipping Quote
// =============================================================================

/// The ordered result of one calculation: Express, Standard, Pickup.
///
/// The order is part of the contract. Callers that want a different order
/// must ask for it explicitly (see [`ShippingQuote::sorted_by_price`]).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ShippingQuote {
    options: Vec<ShippingOption>,
}

impl ShippingQuote {
    pub(crate) fn new(options: Vec<ShippingOption>) -> Self {
        ShippingQuote { options }
    }

    /// Options in contract order.
    pub fn options(&self) -> &[ShippingOption] {
        &self.options
    }

    /// Consumes the quote, yielding options in contract order.
    pub fn into_options(self) -> Vec<ShippingOption> {
        self.options
    }

    /// Finds the option for `code`.
    pub fn get(&self, code: ServiceCode) -> Option<&ShippingOption> {
        self.options.iter().find(|option| option.service_code == code)
    }

    pub fn express(&self) -> Option<&ShippingOption> {
        self.get(ServiceCode::Express)
    }

    pub fn standard(&self) -> Option<&ShippingOption> {
        self.get(ServiceCode::Standard)
    }

    pub fn pickup(&self) -> Option<&ShippingOption> {
        self.get(ServiceCode::Pickup)
    }

    /// The cheapest option that actually ships (pickup excluded).
    ///
    /// Ties go to the option listed first.
    pub fn cheapest_carrier(&self) -> Option<&ShippingOption> {
        self.options
            .iter()
            .filter(|option| !option.service_code.is_pickup())
            .min_by_key(|option| option.price)
    }

    /// A copy of the options sorted by ascending price.
    ///
    /// The sort is stable, so equal prices keep contract order.
    pub fn sorted_by_price(&self) -> Vec<ShippingOption> {
        let mut sorted = self.options.clone();
        sorted.sort_by_key(|option| option.price);
        sorted
    }
}

// =============================================================================
// Engine Configuration
// =============================================================================

/// Package measurements used for any field the caller leaves out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultPackage {
    pub weight_grams: f64,
    pub length_cm: f64,
    pub height_cm: f64,
    pub width_cm: f64,
    pub format: PackageFormat,
}

impl Default for DefaultPackage {
    fn default() -> Self {
        DefaultPackage {
            weight_grams: DEFAULT_PACKAGE_WEIGHT_GRAMS,
            length_cm: DEFAULT_PACKAGE_LENGTH_CM,
            height_cm: DEFAULT_PACKAGE_HEIGHT_CM,
            width_cm: DEFAULT_PACKAGE_WIDTH_CM,
            format: PackageFormat::from_code(DEFAULT_PACKAGE_FORMAT_CODE)
                .unwrap_or_default(),
        }
    }
}

/// Fixed configuration injected into the calculator at construction.
///
/// Built once at startup. [`crate::validation::validate_engine_config`]
/// checks a custom origin and default package against the same rules as a
/// request, so a bad default can never produce a quote.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    origin: PostalCode,
    default_package: DefaultPackage,
}

impl EngineConfig {
    pub(crate) fn new(origin: PostalCode, default_package: DefaultPackage) -> Self {
        EngineConfig {
            origin,
            default_package,
        }
    }

    /// Postal code every package ships from.
    #[inline]
    pub fn origin(&self) -> &PostalCode {
        &self.origin
    }

    /// Measurements used when a request omits them.
    #[inline]
    pub fn default_package(&self) -> &DefaultPackage {
        &self.default_package
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            origin: PostalCode(DEFAULT_ORIGIN_POSTAL_CODE.to_string()),
            default_package: DefaultPackage::default(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postal_code_parse() {
        assert!(PostalCode::parse("78556100").is_some());
        assert!(PostalCode::parse("00000000").is_some());

        assert!(PostalCode::parse("").is_none());
        assert!(PostalCode::parse("7855610").is_none());
        assert!(PostalCode::parse("785561000").is_none());
        assert!(PostalCode::parse("78556-10").is_none());
        assert!(PostalCode::parse("7855610a").is_none());
        assert!(PostalCode::parse(" 8556100").is_none());
        // Non-ASCII digits are not accepted
        assert!(PostalCode::parse("７８５５６１００").is_none());
    }

    #[test]
    fn test_postal_code_as_number() {
        assert_eq!(PostalCode::parse("78556100").unwrap().as_number(), 78_556_100);
        assert_eq!(PostalCode::parse("01310100").unwrap().as_number(), 1_310_100);
        assert_eq!(PostalCode::parse("99999999").unwrap().as_number(), 99_999_999);
    }

    #[test]
    fn test_package_format_codes() {
        assert_eq!(PackageFormat::from_code(1), Some(PackageFormat::Box));
        assert_eq!(PackageFormat::from_code(2), Some(PackageFormat::Roll));
        assert_eq!(PackageFormat::from_code(3), Some(PackageFormat::Envelope));
        assert_eq!(PackageFormat::from_code(0), None);
        assert_eq!(PackageFormat::from_code(4), None);
        assert_eq!(PackageFormat::default().code(), 1);
    }

    #[test]
    fn test_volume() {
        let dims = Dimensions {
            length_cm: 30.0,
            height_cm: 20.0,
            width_cm: 20.0,
        };
        assert!((dims.volume_m3() - 0.012).abs() < 1e-12);
    }

    #[test]
    fn test_raw_request_wire_keys() {
        let raw: RawShippingRequest = serde_json::from_str(
            r#"{"cepDestino":"78556100","peso":500,"comprimento":30,"altura":20,"largura":20,"formato":1}"#,
        )
        .unwrap();

        assert_eq!(raw.destination_postal_code.as_deref(), Some("78556100"));
        assert_eq!(raw.weight_grams, Some(500.0));
        assert_eq!(raw.length_cm, Some(30.0));
        assert_eq!(raw.height_cm, Some(20.0));
        assert_eq!(raw.width_cm, Some(20.0));
        assert_eq!(raw.format, Some(1.0));
        assert_eq!(raw.diameter_cm, None);
    }

    #[test]
    fn test_raw_request_accepts_empty_object() {
        let raw: RawShippingRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(raw, RawShippingRequest::default());
    }

    #[test]
    fn test_service_code_wire_format() {
        assert_eq!(serde_json::to_string(&ServiceCode::Express).unwrap(), "\"04014\"");
        assert_eq!(serde_json::to_string(&ServiceCode::Standard).unwrap(), "\"04510\"");
        assert_eq!(serde_json::to_string(&ServiceCode::Pickup).unwrap(), "\"PICKUP\"");
        assert_eq!(ServiceCode::Pickup.name(), "Store Pickup");
    }

    #[test]
    fn test_option_serializes_all_fee_fields() {
        let option = ShippingOption::carrier(ServiceCode::Express, Money::from_cents(3700), 2);
        let json = serde_json::to_value(&option).unwrap();

        assert_eq!(json["serviceCode"], "04014");
        assert_eq!(json["serviceName"], "Express");
        assert_eq!(json["price"], 37.0);
        assert_eq!(json["estimatedDays"], 2);
        assert_eq!(json["insuredValueFee"], 0.0);
        assert_eq!(json["signatureConfirmationFee"], 0.0);
        assert_eq!(json["declaredValueFee"], 0.0);
    }

    #[test]
    fn test_pickup_option() {
        let pickup = ShippingOption::pickup();
        assert!(pickup.service_code.is_pickup());
        assert!(pickup.price.is_zero());
        assert_eq!(pickup.estimated_days, 0);
        assert!(pickup.total().is_zero());
    }

    #[test]
    fn test_quote_lookup_and_sorting() {
        let quote = ShippingQuote::new(vec![
            ShippingOption::carrier(ServiceCode::Express, Money::from_cents(3700), 2),
            ShippingOption::carrier(ServiceCode::Standard, Money::from_cents(2220), 5),
            ShippingOption::pickup(),
        ]);

        assert_eq!(quote.express().unwrap().price.cents(), 3700);
        assert_eq!(quote.standard().unwrap().estimated_days, 5);
        assert!(quote.pickup().is_some());
        assert_eq!(
            quote.cheapest_carrier().unwrap().service_code,
            ServiceCode::Standard
        );

        let sorted: Vec<ServiceCode> = quote
            .sorted_by_price()
            .iter()
            .map(|option| option.service_code)
            .collect();
        assert_eq!(
            sorted,
            vec![ServiceCode::Pickup, ServiceCode::Standard, ServiceCode::Express]
        );

        // Sorting is a copy; contract order is untouched
        assert_eq!(quote.options()[0].service_code, ServiceCode::Express);
    }

    #[test]
    fn test_engine_config_default() {
        let config = EngineConfig::default();
        assert_eq!(config.origin().as_str(), DEFAULT_ORIGIN_POSTAL_CODE);
        assert_eq!(config.default_package().format, PackageFormat::Box);
        assert_eq!(config.default_package().weight_grams, 300.0);
    }
}
