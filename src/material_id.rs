//! Material identifier module.
//!
//! Provides the `MaterialId` type, an interned string name for materials.
//! Uses `Arc<str>` so the same name can be shared between the catalog,
//! the excess ledger and the resulting balances without reallocating.

use crate::interned::interned_name;

interned_name! {
    /// Interned string identifier for materials.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use craftcalc::MaterialId;
    ///
    /// let ore = MaterialId::from_str("Iron Ore");
    /// let ore2: MaterialId = "Iron Ore".into();
    /// let ore3: MaterialId = String::from("Iron Ore").into();
    ///
    /// assert_eq!(ore, ore2);
    /// assert_eq!(ore, ore3);
    /// assert_eq!(ore.as_str(), "Iron Ore");
    /// ```
    pub struct MaterialId;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_material_id_equality() {
        let a = MaterialId::from_str("Copper Ore");
        let b: MaterialId = String::from("Copper Ore").into();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "Copper Ore");
    }

    #[test]
    fn test_lookup_by_str() {
        let mut map = HashMap::new();
        map.insert(MaterialId::from_str("Coal"), 3);
        assert_eq!(map.get("Coal"), Some(&3));
    }

    #[test]
    fn test_serde_as_plain_string() {
        let id = MaterialId::from_str("Leather");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"Leather\"");
        let back: MaterialId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_display_pads() {
        assert_eq!(format!("{:<6}|", MaterialId::from_str("Ore")), "Ore   |");
    }
}
