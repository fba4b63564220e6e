//! Resolution results.
//!
//! `CraftingMetrics` is the report a resolution returns: effort per
//! profession, a balance per material, and grand totals.

use crate::balance::{merge, MaterialBalance};
use crate::material_id::MaterialId;
use crate::profession::Profession;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::AddAssign;

/// Effort spent in one profession.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductionTotals {
    /// Total duration.
    pub duration: f64,
    /// Total experience.
    pub xp: f64,
    /// Total knowledge points.
    pub kp: f64,
}

impl ProductionTotals {
    /// Effort of `batches` runs at the given per-batch cost.
    pub fn for_batches(duration: f64, xp: f64, kp: f64, batches: i64) -> Self {
        let n = batches as f64;
        Self {
            duration: duration * n,
            xp: xp * n,
            kp: kp * n,
        }
    }
}

impl AddAssign for ProductionTotals {
    fn add_assign(&mut self, rhs: ProductionTotals) {
        self.duration += rhs.duration;
        self.xp += rhs.xp;
        self.kp += rhs.kp;
    }
}

/// Aggregated result of resolving a production tree.
///
/// Grand totals include everything recorded per profession plus any
/// merchant trip time, which belongs to no profession.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CraftingMetrics {
    /// Effort per profession.
    pub profession_totals: BTreeMap<Profession, ProductionTotals>,
    /// Balance per material.
    pub material_balances: BTreeMap<MaterialId, MaterialBalance>,
    /// Grand total duration.
    pub total_duration: f64,
    /// Grand total experience.
    pub total_xp: f64,
    /// Grand total knowledge points.
    pub total_kp: f64,
}

impl CraftingMetrics {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Charge production effort to a profession and to the grand totals.
    pub fn record_effort(&mut self, profession: &Profession, effort: ProductionTotals) {
        *self
            .profession_totals
            .entry(profession.clone())
            .or_default() += effort;
        self.total_duration += effort.duration;
        self.total_xp += effort.xp;
        self.total_kp += effort.kp;
    }

    /// Add time that belongs to no profession (shopping trips).
    pub fn record_duration(&mut self, duration: f64) {
        self.total_duration += duration;
    }

    /// Merge a balance into the entry for `material`.
    pub fn merge_balance(&mut self, material: &MaterialId, balance: MaterialBalance) {
        let merged = merge(self.material_balances.get(material), balance);
        self.material_balances.insert(material.clone(), merged);
    }

    /// Balance recorded for a material.
    pub fn balance(&self, material: &str) -> Option<&MaterialBalance> {
        self.material_balances.get(material)
    }

    /// Totals recorded for a profession.
    pub fn profession(&self, profession: &Profession) -> Option<&ProductionTotals> {
        self.profession_totals.get(profession)
    }

    /// Money spent on purchases across all materials.
    pub fn total_cost(&self) -> f64 {
        self.material_balances.values().map(|b| b.total_cost).sum()
    }

    /// Fold another report into this one.
    ///
    /// Totals add and balances merge, so absorbing reports of successive
    /// resolutions yields the report of the whole plan.
    pub fn absorb(&mut self, other: CraftingMetrics) {
        for (profession, totals) in other.profession_totals {
            *self.profession_totals.entry(profession).or_default() += totals;
        }
        for (material, balance) in other.material_balances {
            self.merge_balance(&material, balance);
        }
        self.total_duration += other.total_duration;
        self.total_xp += other.total_xp;
        self.total_kp += other.total_kp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_effort_updates_profession_and_grand_totals() {
        let mut metrics = CraftingMetrics::new();
        let mining = Profession::from_str("Mining");
        metrics.record_effort(&mining, ProductionTotals::for_batches(2.0, 5.0, 1.0, 3));
        metrics.record_effort(&mining, ProductionTotals::for_batches(1.0, 1.0, 1.0, 1));

        let totals = metrics.profession(&mining).unwrap();
        assert_eq!(totals.duration, 7.0);
        assert_eq!(totals.xp, 16.0);
        assert_eq!(totals.kp, 4.0);
        assert_eq!(metrics.total_duration, 7.0);
        assert_eq!(metrics.total_xp, 16.0);
        assert_eq!(metrics.total_kp, 4.0);
    }

    #[test]
    fn test_record_duration_only_touches_grand_total() {
        let mut metrics = CraftingMetrics::new();
        metrics.record_duration(30.0);
        assert_eq!(metrics.total_duration, 30.0);
        assert!(metrics.profession_totals.is_empty());
    }

    #[test]
    fn test_absorb_merges_balances() {
        let ore = MaterialId::from_str("Ore");
        let mut a = CraftingMetrics::new();
        a.merge_balance(&ore, MaterialBalance::covered(4));
        a.record_effort(&Profession::from_str("Mining"), ProductionTotals::for_batches(1.0, 1.0, 0.0, 2));

        let mut b = CraftingMetrics::new();
        b.merge_balance(
            &ore,
            MaterialBalance {
                required: 6,
                produced: 6,
                excess: 0,
                batches: 0,
                total_cost: 12.0,
            },
        );

        a.absorb(b);
        let balance = a.balance("Ore").unwrap();
        assert_eq!(balance.required, 10);
        assert_eq!(balance.total_cost, 12.0);
        assert_eq!(a.total_cost(), 12.0);
        assert_eq!(a.total_duration, 2.0);
    }
}
