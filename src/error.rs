//! Error types for crafting resolution.
//!
//! All errors that can occur while loading data or resolving a
//! production tree are represented by the `CraftError` enum.

use crate::material_id::MaterialId;
use crate::model::Quantity;
use thiserror::Error;

/// Format a cycle path as a readable string.
fn format_cycle_path(path: &[MaterialId]) -> String {
    if path.is_empty() {
        return String::from("(empty cycle)");
    }
    path.iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Errors that can occur during crafting resolution.
///
/// # Examples
///
/// ```rust
/// use craftcalc::{CraftError, MaterialId};
///
/// let err = CraftError::MissingMaterial(MaterialId::from_str("Mithril"));
/// assert_eq!(err.to_string(), "Material not found: Mithril");
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CraftError {
    /// A recipe input names a material that is not in the catalog.
    #[error("Material not found: {0}")]
    MissingMaterial(MaterialId),

    /// A material is needed but cannot be purchased, crafted or gathered.
    #[error("No recipe or activity found for {0}")]
    UnresolvableMaterial(MaterialId),

    /// The requested quantity is not positive.
    #[error("Quantity must be positive, got {0}")]
    InvalidQuantity(Quantity),

    /// A required, produced or leftover quantity does not fit in a `Quantity`.
    #[error("Quantity overflow while resolving {0}")]
    QuantityOverflow(MaterialId),

    /// A recipe or activity yields nothing per batch.
    #[error("Output quantity for {material} must be positive, got {output_quantity}")]
    InvalidOutputQuantity {
        /// The product or material whose recipe/activity is malformed.
        material: String,
        /// The offending output quantity.
        output_quantity: Quantity,
    },

    /// A material (transitively) requires itself.
    ///
    /// If A needs B, B needs C and C needs A, the path is `[A, B, C, A]`.
    #[error("Cycle detected: {}", format_cycle_path(.path))]
    Cycle { path: Vec<MaterialId> },

    /// Calculator configuration is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Input data could not be parsed.
    #[error("Failed to parse input: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for CraftError {
    fn from(err: serde_json::Error) -> Self {
        CraftError::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CraftError::UnresolvableMaterial(MaterialId::from_str("Stardust"));
        assert!(err.to_string().contains("Stardust"));
    }

    #[test]
    fn test_cycle_error_display() {
        let a = MaterialId::from_str("A");
        let b = MaterialId::from_str("B");
        let err = CraftError::Cycle {
            path: vec![a.clone(), b, a],
        };
        assert_eq!(err.to_string(), "Cycle detected: A -> B -> A");
    }

    #[test]
    fn test_parse_error_conversion() {
        let err: CraftError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, CraftError::Parse(_)));
    }
}
