//! Excess ledger: material stock carried between and within resolutions.

use crate::material_id::MaterialId;
use crate::model::Quantity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Signed stock per material, owned by the caller.
///
/// The resolver reads it before producing anything and writes back what is
/// consumed or left over, so the same ledger can be passed to successive
/// resolutions to reuse surplus.
///
/// # Examples
///
/// ```rust
/// use craftcalc::ExcessLedger;
///
/// let mut ledger = ExcessLedger::new();
/// ledger.set("Iron Ore", 5);
/// ledger.consume("Iron Ore", 3);
/// assert_eq!(ledger.available("Iron Ore"), 2);
/// assert_eq!(ledger.available("Coal"), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExcessLedger {
    stock: BTreeMap<MaterialId, Quantity>,
}

impl ExcessLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Units of `material` on hand, 0 when absent.
    pub fn available(&self, material: &str) -> Quantity {
        self.stock.get(material).copied().unwrap_or(0)
    }

    /// Overwrite the stock of a material.
    pub fn set(&mut self, material: impl Into<MaterialId>, quantity: Quantity) {
        self.stock.insert(material.into(), quantity);
    }

    /// Take `quantity` units out of stock. The entry may go negative.
    pub fn consume(&mut self, material: impl Into<MaterialId>, quantity: Quantity) {
        *self.stock.entry(material.into()).or_insert(0) -= quantity;
    }

    /// Iterate over every recorded entry in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&MaterialId, Quantity)> {
        self.stock.iter().map(|(id, qty)| (id, *qty))
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.stock.len()
    }

    /// Whether no entries are recorded.
    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }
}

impl FromIterator<(MaterialId, Quantity)> for ExcessLedger {
    fn from_iter<I: IntoIterator<Item = (MaterialId, Quantity)>>(iter: I) -> Self {
        Self {
            stock: iter.into_iter().collect(),
        }
    }
}
