//! Per-material balances and their merge operation.

use crate::model::Quantity;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// Aggregate of what one material needed and what it cost.
///
/// `excess` is summed across merges rather than recomputed from
/// `produced - required`, so it always reflects the per-node values the
/// resolver reported.
///
/// # Examples
///
/// ```rust
/// use craftcalc::MaterialBalance;
///
/// let a = MaterialBalance { required: 4, produced: 6, excess: 2, batches: 2, total_cost: 0.0 };
/// let b = MaterialBalance { required: 3, produced: 3, excess: 0, batches: 1, total_cost: 0.0 };
///
/// let merged = a + b;
/// assert_eq!(merged.required, 7);
/// assert_eq!(merged.batches, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialBalance {
    /// Units needed.
    pub required: Quantity,
    /// Units made or bought.
    pub produced: Quantity,
    /// Units left over.
    pub excess: Quantity,
    /// Craft or gather operations performed.
    pub batches: Quantity,
    /// Money spent purchasing.
    pub total_cost: f64,
}

impl MaterialBalance {
    /// Balance of a requirement that existing stock satisfied completely.
    pub fn covered(required: Quantity) -> Self {
        Self {
            required,
            ..Self::default()
        }
    }
}

impl Add for MaterialBalance {
    type Output = MaterialBalance;

    fn add(self, rhs: MaterialBalance) -> MaterialBalance {
        MaterialBalance {
            required: self.required + rhs.required,
            produced: self.produced + rhs.produced,
            excess: self.excess + rhs.excess,
            batches: self.batches + rhs.batches,
            total_cost: self.total_cost + rhs.total_cost,
        }
    }
}

impl AddAssign for MaterialBalance {
    fn add_assign(&mut self, rhs: MaterialBalance) {
        *self = *self + rhs;
    }
}

/// Merge `update` into an optional existing balance.
///
/// Returns `update` unchanged when there is nothing to merge with,
/// otherwise the field-wise sum.
///
/// ```rust
/// use craftcalc::{merge, MaterialBalance};
///
/// let update = MaterialBalance::covered(5);
/// assert_eq!(merge(None, update), update);
/// assert_eq!(merge(Some(&update), update).required, 10);
/// ```
pub fn merge(existing: Option<&MaterialBalance>, update: MaterialBalance) -> MaterialBalance {
    match existing {
        Some(existing) => *existing + update,
        None => update,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_balance() -> impl Strategy<Value = MaterialBalance> {
        (
            0i64..10_000,
            0i64..10_000,
            0i64..10_000,
            0i64..1_000,
            // Quarter-unit costs keep float addition exact.
            0i64..1_000_000,
        )
            .prop_map(|(required, produced, excess, batches, quarters)| MaterialBalance {
                required,
                produced,
                excess,
                batches,
                total_cost: quarters as f64 / 4.0,
            })
    }

    #[test]
    fn test_merge_none_returns_update() {
        let update = MaterialBalance {
            required: 3,
            produced: 4,
            excess: 1,
            batches: 2,
            total_cost: 0.0,
        };
        assert_eq!(merge(None, update), update);
    }

    #[test]
    fn test_merge_sums_all_fields() {
        let a = MaterialBalance {
            required: 10,
            produced: 12,
            excess: 2,
            batches: 3,
            total_cost: 1.5,
        };
        let b = MaterialBalance {
            required: 5,
            produced: 5,
            excess: 0,
            batches: 0,
            total_cost: 25.0,
        };
        let merged = merge(Some(&a), b);
        assert_eq!(
            merged,
            MaterialBalance {
                required: 15,
                produced: 17,
                excess: 2,
                batches: 3,
                total_cost: 26.5,
            }
        );
    }

    proptest! {
        #[test]
        fn merge_is_commutative(a in arb_balance(), b in arb_balance()) {
            prop_assert_eq!(merge(Some(&a), b), merge(Some(&b), a));
        }

        #[test]
        fn merge_is_associative(a in arb_balance(), b in arb_balance(), c in arb_balance()) {
            let left = merge(Some(&merge(Some(&a), b)), c);
            let right = merge(Some(&a), merge(Some(&b), c));
            prop_assert_eq!(left, right);
        }
    }
}
