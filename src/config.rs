//! Calculator configuration.

use crate::error::CraftError;
use crate::model::Quantity;
use serde::{Deserialize, Serialize};

/// Tunables for the purchase path.
///
/// # Examples
///
/// ```rust
/// use craftcalc::CalculatorConfig;
///
/// let config = CalculatorConfig::from_json(r#"{"merchantTripDuration": 30.0}"#).unwrap();
/// assert_eq!(config.inventory_slots, 24);
/// assert_eq!(config.merchant_trip_duration, 30.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculatorConfig {
    /// Units carried back per shopping trip.
    pub inventory_slots: Quantity,
    /// Time charged per shopping trip.
    pub merchant_trip_duration: f64,
}

impl CalculatorConfig {
    /// Standard inventory size.
    pub const DEFAULT_INVENTORY_SLOTS: Quantity = 24;

    /// Parse a configuration from JSON and validate it. Missing fields take
    /// their defaults.
    pub fn from_json(json: &str) -> Result<Self, CraftError> {
        let config: CalculatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every field is in range.
    pub fn validate(&self) -> Result<(), CraftError> {
        if self.inventory_slots <= 0 {
            return Err(CraftError::InvalidConfig(format!(
                "inventory_slots must be positive, got {}",
                self.inventory_slots
            )));
        }
        if self.merchant_trip_duration.is_nan() || self.merchant_trip_duration < 0.0 {
            return Err(CraftError::InvalidConfig(format!(
                "merchant_trip_duration must be non-negative, got {}",
                self.merchant_trip_duration
            )));
        }
        Ok(())
    }

    /// Shopping trips needed to carry `quantity` units.
    pub fn trips_for(&self, quantity: Quantity) -> Quantity {
        ceil_div(quantity, self.inventory_slots)
    }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            inventory_slots: Self::DEFAULT_INVENTORY_SLOTS,
            merchant_trip_duration: 0.0,
        }
    }
}

/// Ceiling division for a positive divisor. Non-positive numerators give 0.
///
/// Never overflows, even for `Quantity::MAX`.
pub(crate) fn ceil_div(numerator: Quantity, divisor: Quantity) -> Quantity {
    if numerator <= 0 {
        0
    } else {
        (numerator - 1) / divisor + 1
    }
}
