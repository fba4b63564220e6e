//! Static domain model: products, materials, recipes and activities.
//!
//! These types describe the game data the resolver reads. They are plain
//! data and can be built in code with the `with_*` builders or loaded from
//! JSON (see [`MaterialCatalog::from_json`](crate::catalog::MaterialCatalog::from_json)).

use crate::material_id::MaterialId;
use crate::profession::Profession;
use serde::{Deserialize, Serialize};

/// Signed count of material units.
pub type Quantity = i64;

/// One input line of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeInput {
    /// Name of the consumed material.
    #[serde(rename = "materialName")]
    pub material: MaterialId,
    /// Units consumed per batch.
    pub quantity: Quantity,
}

/// A crafting recipe.
///
/// # Examples
///
/// ```rust
/// use craftcalc::Recipe;
///
/// let recipe = Recipe::new(2).with_input("Iron Ingot", 3).with_input("Coal", 1);
/// assert_eq!(recipe.output_quantity, 2);
/// assert_eq!(recipe.inputs.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Units produced per batch.
    pub output_quantity: Quantity,
    /// Inputs consumed per batch, in declaration order.
    #[serde(rename = "materials", default)]
    pub inputs: Vec<RecipeInput>,
}

impl Recipe {
    /// Create a recipe with no inputs.
    pub fn new(output_quantity: Quantity) -> Self {
        Self {
            output_quantity,
            inputs: Vec::new(),
        }
    }

    /// Append an input.
    pub fn with_input(mut self, material: impl Into<MaterialId>, quantity: Quantity) -> Self {
        self.inputs.push(RecipeInput {
            material: material.into(),
            quantity,
        });
        self
    }
}

/// A gathering activity. Has no inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Units gathered per batch.
    pub output_quantity: Quantity,
}

impl Activity {
    /// Create an activity.
    pub fn new(output_quantity: Quantity) -> Self {
        Self { output_quantity }
    }
}

/// How a material is produced by the player.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ProductionMethod {
    /// Crafted from other materials.
    Craft(Recipe),
    /// Gathered directly.
    Gather(Activity),
    /// Cannot be produced; only purchasable (if priced).
    #[default]
    None,
}

impl ProductionMethod {
    /// Units produced by one batch, if the material can be produced.
    pub fn output_quantity(&self) -> Option<Quantity> {
        match self {
            ProductionMethod::Craft(recipe) => Some(recipe.output_quantity),
            ProductionMethod::Gather(activity) => Some(activity.output_quantity),
            ProductionMethod::None => None,
        }
    }

    /// Recipe inputs, empty for gathered or unproducible materials.
    pub fn inputs(&self) -> &[RecipeInput] {
        match self {
            ProductionMethod::Craft(recipe) => &recipe.inputs,
            _ => &[],
        }
    }
}

/// A node of the dependency tree.
///
/// # Examples
///
/// ```rust
/// use craftcalc::{Material, Recipe};
///
/// let ingot = Material::new("Iron Ingot", "Smithing")
///     .with_level(5)
///     .with_effort(3.0, 10.0, 1.0)
///     .with_recipe(Recipe::new(1).with_input("Iron Ore", 2));
///
/// assert!(ingot.recipe().is_some());
/// assert!(!ingot.is_purchasable());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MaterialRecord", into = "MaterialRecord")]
pub struct Material {
    /// Material name, unique within a catalog.
    pub name: MaterialId,
    /// Profession that produces it.
    pub profession: Profession,
    /// Level required to produce it (and, for merchant goods, to trade at value).
    pub level: Option<u32>,
    /// Unit purchase cost.
    pub cost: Option<f64>,
    /// Unit sale value.
    pub value: Option<f64>,
    /// Duration of one batch.
    pub duration: f64,
    /// Experience per batch.
    pub xp: f64,
    /// Knowledge points per batch.
    pub kp: f64,
    /// Production method.
    pub method: ProductionMethod,
}

impl Material {
    /// Create an unpriced, unproducible material with zero effort.
    pub fn new(name: impl Into<MaterialId>, profession: impl Into<Profession>) -> Self {
        Self {
            name: name.into(),
            profession: profession.into(),
            level: None,
            cost: None,
            value: None,
            duration: 0.0,
            xp: 0.0,
            kp: 0.0,
            method: ProductionMethod::None,
        }
    }

    /// Set the level requirement.
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = Some(level);
        self
    }

    /// Set unit cost and value.
    pub fn with_price(mut self, cost: f64, value: f64) -> Self {
        self.cost = Some(cost);
        self.value = Some(value);
        self
    }

    /// Set per-batch duration, xp and kp.
    pub fn with_effort(mut self, duration: f64, xp: f64, kp: f64) -> Self {
        self.duration = duration;
        self.xp = xp;
        self.kp = kp;
        self
    }

    /// Make the material craftable.
    pub fn with_recipe(mut self, recipe: Recipe) -> Self {
        self.method = ProductionMethod::Craft(recipe);
        self
    }

    /// Make the material gatherable.
    pub fn with_activity(mut self, activity: Activity) -> Self {
        self.method = ProductionMethod::Gather(activity);
        self
    }

    /// The recipe, if crafted.
    pub fn recipe(&self) -> Option<&Recipe> {
        match &self.method {
            ProductionMethod::Craft(recipe) => Some(recipe),
            _ => None,
        }
    }

    /// The activity, if gathered.
    pub fn activity(&self) -> Option<&Activity> {
        match &self.method {
            ProductionMethod::Gather(activity) => Some(activity),
            _ => None,
        }
    }

    /// Whether both cost and value are defined.
    pub fn is_purchasable(&self) -> bool {
        self.cost.is_some() && self.value.is_some()
    }
}

/// Flat wire shape of a material, with optional `recipe` and `activity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MaterialRecord {
    name: MaterialId,
    profession: Profession,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<f64>,
    #[serde(default)]
    duration: f64,
    #[serde(default)]
    xp: f64,
    #[serde(default)]
    kp: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    recipe: Option<Recipe>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    activity: Option<Activity>,
}

impl TryFrom<MaterialRecord> for Material {
    type Error = String;

    fn try_from(record: MaterialRecord) -> Result<Self, Self::Error> {
        let method = match (record.recipe, record.activity) {
            (Some(_), Some(_)) => {
                return Err(format!(
                    "material {} defines both a recipe and an activity",
                    record.name
                ))
            }
            (Some(recipe), None) => ProductionMethod::Craft(recipe),
            (None, Some(activity)) => ProductionMethod::Gather(activity),
            (None, None) => ProductionMethod::None,
        };
        Ok(Material {
            name: record.name,
            profession: record.profession,
            level: record.level,
            cost: record.cost,
            value: record.value,
            duration: record.duration,
            xp: record.xp,
            kp: record.kp,
            method,
        })
    }
}

impl From<Material> for MaterialRecord {
    fn from(material: Material) -> Self {
        let (recipe, activity) = match material.method {
            ProductionMethod::Craft(recipe) => (Some(recipe), None),
            ProductionMethod::Gather(activity) => (None, Some(activity)),
            ProductionMethod::None => (None, None),
        };
        MaterialRecord {
            name: material.name,
            profession: material.profession,
            level: material.level,
            cost: material.cost,
            value: material.value,
            duration: material.duration,
            xp: material.xp,
            kp: material.kp,
            recipe,
            activity,
        }
    }
}

/// The root item being produced. Always crafted, never purchased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product name.
    pub name: String,
    /// Profession that crafts it.
    pub profession: Profession,
    /// Duration of one batch.
    #[serde(default)]
    pub duration: f64,
    /// Experience per batch.
    #[serde(default)]
    pub xp: f64,
    /// Knowledge points per batch.
    #[serde(default)]
    pub kp: f64,
    /// The recipe used to craft it.
    pub recipe: Recipe,
}

impl Product {
    /// Create a product with zero effort.
    pub fn new(name: impl Into<String>, profession: impl Into<Profession>, recipe: Recipe) -> Self {
        Self {
            name: name.into(),
            profession: profession.into(),
            duration: 0.0,
            xp: 0.0,
            kp: 0.0,
            recipe,
        }
    }

    /// Set per-batch duration, xp and kp.
    pub fn with_effort(mut self, duration: f64, xp: f64, kp: f64) -> Self {
        self.duration = duration;
        self.xp = xp;
        self.kp = kp;
        self
    }
}
