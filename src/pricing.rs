//! Purchase pricing policies.
//!
//! The resolver asks a [`PricingPolicy`] what one unit of a purchased
//! material costs. The default, [`MerchantPricing`], charges the sale
//! value for merchant goods the player is levelled for and the cost for
//! everything else.

use crate::model::Material;
use crate::profession::{Profession, ProfessionSetting};

/// Decides the unit price of a purchased material.
///
/// Returning `None` means the material cannot be purchased.
///
/// # Examples
///
/// ```rust
/// use craftcalc::{Material, PricingPolicy, ProfessionSetting};
///
/// struct HalfPrice;
///
/// impl PricingPolicy for HalfPrice {
///     fn unit_price(&self, material: &Material, _: Option<&ProfessionSetting>) -> Option<f64> {
///         material.cost.map(|c| c / 2.0)
///     }
/// }
///
/// let ore = Material::new("Ore", "Mining").with_price(4.0, 6.0);
/// assert_eq!(HalfPrice.unit_price(&ore, None), Some(2.0));
/// ```
pub trait PricingPolicy {
    /// Unit price of `material`, given the player's setting for its profession.
    fn unit_price(&self, material: &Material, setting: Option<&ProfessionSetting>) -> Option<f64>;
}

/// Charges sale value for a trading profession the player is levelled in.
///
/// A material is priced at its `value` when it belongs to the trading
/// profession, it has a level requirement, and the player's attained level
/// in that profession meets it. Otherwise it is priced at its `cost`.
/// Materials lacking either cost or value are not purchasable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantPricing {
    /// Profession whose goods trade at value.
    pub merchant: Profession,
}

impl MerchantPricing {
    /// Pricing keyed to a custom trading profession.
    pub fn new(merchant: Profession) -> Self {
        Self { merchant }
    }
}

impl Default for MerchantPricing {
    fn default() -> Self {
        Self::new(Profession::merchant())
    }
}

impl PricingPolicy for MerchantPricing {
    fn unit_price(&self, material: &Material, setting: Option<&ProfessionSetting>) -> Option<f64> {
        if !material.is_purchasable() {
            return None;
        }
        let attained = setting.map_or(0, |s| s.level);
        let at_level = matches!(
            material.level,
            Some(required) if required > 0 && attained > 0 && attained >= required
        );
        if material.profession == self.merchant && at_level {
            material.value
        } else {
            material.cost
        }
    }
}

/// Always charges cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CostPricing;

impl PricingPolicy for CostPricing {
    fn unit_price(&self, material: &Material, _setting: Option<&ProfessionSetting>) -> Option<f64> {
        if material.is_purchasable() {
            material.cost
        } else {
            None
        }
    }
}
