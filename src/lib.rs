//! # craftcalc - Deterministic Crafting Cost Calculator
//!
//! Works out what it takes to produce a quantity of a craftable item:
//! - **Recursive** resolution of every sub-material (craft, gather or buy)
//! - **Per-profession** duration, experience and knowledge-point totals
//! - **Material balances** tracking what was needed, made, bought and left over
//! - **Excess carry-over** through a caller-owned ledger
//!
//! ## Core Concepts
//!
//! ```text
//! [Product] → [CraftingResolver] → [CraftingMetrics]
//!                   ↕
//!             [ExcessLedger]
//! ```
//!
//! 1. The **product** is always crafted from its recipe
//! 2. Each **material** is taken from stock, bought, crafted or gathered,
//!    following the player's [`ProfessionSettings`] and the catalog data
//! 3. **Metrics** aggregate the effort and a [`MaterialBalance`] per material
//!
//! Nothing here picks a cheapest path: every material follows the one
//! production method the catalog gives it.
//!
//! ## Example
//!
//! ```rust
//! use craftcalc::*;
//!
//! let catalog = MaterialCatalog::from_materials([
//!     Material::new("Iron Ore", "Mining")
//!         .with_effort(3.0, 4.0, 0.0)
//!         .with_activity(Activity::new(2)),
//!     Material::new("Iron Ingot", "Smithing")
//!         .with_effort(5.0, 10.0, 1.0)
//!         .with_recipe(Recipe::new(1).with_input("Iron Ore", 2)),
//!     Material::new("Leather", "Merchant").with_price(4.0, 6.0),
//! ]);
//! let settings = ProfessionSettings::new()
//!     .with("Mining", ProfessionSetting::enabled(10))
//!     .with("Smithing", ProfessionSetting::enabled(10));
//!
//! let sword = Product::new(
//!     "Iron Sword",
//!     "Smithing",
//!     Recipe::new(1).with_input("Iron Ingot", 3).with_input("Leather", 1),
//! )
//! .with_effort(20.0, 50.0, 5.0);
//!
//! let mut ledger = ExcessLedger::new();
//! let metrics = CraftingResolver::new(&settings, &catalog)
//!     .resolve(&sword, 1, &mut ledger)
//!     .unwrap();
//!
//! assert_eq!(metrics.balance("Iron Ingot").unwrap().batches, 3);
//! assert_eq!(metrics.balance("Iron Ore").unwrap().batches, 3);
//! assert_eq!(metrics.balance("Leather").unwrap().total_cost, 4.0);
//! // 20 (sword) + 3 * 5 (ingots) + 3 * 3 (ore)
//! assert_eq!(metrics.total_duration, 44.0);
//! ```
//!
//! ## Modules
//!
//! - [`resolver`] - The crafting resolver
//! - [`model`] - Products, materials, recipes and activities
//! - [`catalog`] - Material lookup and validation
//! - [`graph`] - Recipe dependency graph
//! - [`balance`] - Per-material balances and merging
//! - [`metrics`] - Resolution reports
//! - [`ledger`] - Excess stock carried between resolutions
//! - [`pricing`] - Purchase pricing policies
//! - [`profession`] - Professions and player settings
//! - [`config`] - Calculator configuration
//! - [`error`] - Error types

pub mod balance;
pub mod catalog;
pub mod config;
pub mod error;
pub mod graph;
mod interned;
pub mod ledger;
pub mod material_id;
pub mod metrics;
pub mod model;
pub mod pricing;
pub mod profession;
pub mod resolver;

// Re-export main types for convenience
pub use balance::{merge, MaterialBalance};
pub use catalog::MaterialCatalog;
pub use config::CalculatorConfig;
pub use error::CraftError;
pub use ledger::ExcessLedger;
pub use material_id::MaterialId;
pub use metrics::{CraftingMetrics, ProductionTotals};
pub use resolver::{calculate_crafting_metrics, CraftingResolver};

// Re-export model and policy types
pub use model::{Activity, Material, Product, ProductionMethod, Quantity, Recipe, RecipeInput};
pub use pricing::{CostPricing, MerchantPricing, PricingPolicy};
pub use profession::{Profession, ProfessionSetting, ProfessionSettings};
