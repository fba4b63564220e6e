//! Material catalog: every material the resolver may encounter, by name.

use crate::error::CraftError;
use crate::graph::RecipeGraph;
use crate::material_id::MaterialId;
use crate::model::{Material, Product};
use std::collections::HashMap;

/// Materials addressed by name.
///
/// The resolver treats the catalog as complete: any recipe input missing
/// from it aborts resolution with [`CraftError::MissingMaterial`].
///
/// # Examples
///
/// ```rust
/// use craftcalc::{Activity, Material, MaterialCatalog, MaterialId};
///
/// let catalog = MaterialCatalog::from_materials([
///     Material::new("Iron Ore", "Mining").with_activity(Activity::new(3)),
/// ]);
///
/// assert!(catalog.get("Iron Ore").is_some());
/// assert!(catalog.require(&MaterialId::from_str("Gold Ore")).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MaterialCatalog {
    materials: HashMap<MaterialId, Material>,
}

impl MaterialCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog; later materials replace earlier ones of the same name.
    pub fn from_materials(materials: impl IntoIterator<Item = Material>) -> Self {
        let mut catalog = Self::new();
        for material in materials {
            catalog.insert(material);
        }
        catalog
    }

    /// Parse a JSON array of materials.
    ///
    /// ```rust
    /// use craftcalc::MaterialCatalog;
    ///
    /// let catalog = MaterialCatalog::from_json(r#"[
    ///     {"name": "Flax", "profession": "Farming", "activity": {"outputQuantity": 5}},
    ///     {"name": "Linen", "profession": "Weaving",
    ///      "recipe": {"outputQuantity": 1, "materials": [{"materialName": "Flax", "quantity": 3}]}}
    /// ]"#).unwrap();
    ///
    /// assert_eq!(catalog.len(), 2);
    /// assert!(catalog.validate().is_ok());
    /// ```
    pub fn from_json(json: &str) -> Result<Self, CraftError> {
        let materials: Vec<Material> = serde_json::from_str(json)?;
        Ok(Self::from_materials(materials))
    }

    /// Add or replace a material.
    pub fn insert(&mut self, material: Material) -> Option<Material> {
        self.materials.insert(material.name.clone(), material)
    }

    /// Look up a material by name.
    pub fn get(&self, name: &str) -> Option<&Material> {
        self.materials.get(name)
    }

    /// Look up a material, failing when it is absent.
    ///
    /// # Arguments
    ///
    /// * `name` - The material to look up
    ///
    /// # Returns
    ///
    /// The catalog entry, or `CraftError::MissingMaterial` naming `name`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use craftcalc::{CraftError, Material, MaterialCatalog, MaterialId};
    ///
    /// let catalog = MaterialCatalog::from_materials([Material::new("Coal", "Mining")]);
    ///
    /// assert!(catalog.require(&MaterialId::from_str("Coal")).is_ok());
    /// assert_eq!(
    ///     catalog.require(&MaterialId::from_str("Mithril")).unwrap_err(),
    ///     CraftError::MissingMaterial(MaterialId::from_str("Mithril"))
    /// );
    /// ```
    pub fn require(&self, name: &MaterialId) -> Result<&Material, CraftError> {
        self.materials
            .get(name)
            .ok_or_else(|| CraftError::MissingMaterial(name.clone()))
    }

    /// Number of materials.
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Iterate over all materials in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Material> {
        self.materials.values()
    }

    /// Dependency graph of every recipe in the catalog.
    pub fn graph(&self) -> RecipeGraph {
        RecipeGraph::from_materials(self.materials.values())
    }

    /// Check the catalog is resolvable as a whole.
    ///
    /// Fails on the first dangling recipe input (in name order, for
    /// deterministic reporting), a non-positive output quantity, or a
    /// recipe cycle.
    ///
    /// # Returns
    ///
    /// `Ok(())` if every recipe input exists, every recipe and activity
    /// yields something, and the recipe graph is acyclic.
    ///
    /// # Errors
    ///
    /// * `InvalidOutputQuantity` for a recipe or activity yielding nothing
    /// * `MissingMaterial` for a recipe input not in the catalog
    /// * `Cycle` with the closed path if a recipe consumes its own output
    ///
    /// # Examples
    ///
    /// ```rust
    /// use craftcalc::{CraftError, Material, MaterialCatalog, MaterialId, Recipe};
    ///
    /// let mut catalog = MaterialCatalog::from_materials([
    ///     Material::new("Ingot", "Smithing").with_recipe(Recipe::new(1).with_input("Ore", 2)),
    /// ]);
    /// assert_eq!(
    ///     catalog.validate(),
    ///     Err(CraftError::MissingMaterial(MaterialId::from_str("Ore")))
    /// );
    ///
    /// catalog.insert(Material::new("Ore", "Mining"));
    /// assert!(catalog.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<(), CraftError> {
        let mut names: Vec<&MaterialId> = self.materials.keys().collect();
        names.sort();
        for name in names {
            let material = &self.materials[name];
            check_output(name.as_str(), material.method.output_quantity())?;
            for input in material.method.inputs() {
                self.require(&input.material)?;
            }
        }
        self.graph().detect_cycles()
    }

    /// Check that every input of `product`'s recipe is in the catalog.
    pub fn validate_product(&self, product: &Product) -> Result<(), CraftError> {
        check_output(&product.name, Some(product.recipe.output_quantity))?;
        for input in &product.recipe.inputs {
            self.require(&input.material)?;
        }
        Ok(())
    }
}

fn check_output(name: &str, output_quantity: Option<i64>) -> Result<(), CraftError> {
    match output_quantity {
        Some(output_quantity) if output_quantity <= 0 => Err(CraftError::InvalidOutputQuantity {
            material: name.to_string(),
            output_quantity,
        }),
        _ => Ok(()),
    }
}

impl FromIterator<Material> for MaterialCatalog {
    fn from_iter<I: IntoIterator<Item = Material>>(iter: I) -> Self {
        Self::from_materials(iter)
    }
}
