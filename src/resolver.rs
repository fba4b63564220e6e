//! Crafting resolver module.
//!
//! Provides the `CraftingResolver` type, the main entry point for working
//! out what it takes to produce a product. It walks the recipe tree
//! depth-first, decides for every material whether to take it from stock,
//! buy it, craft it or gather it, and accumulates the effort and balances
//! into a [`CraftingMetrics`] report.

use crate::balance::MaterialBalance;
use crate::catalog::MaterialCatalog;
use crate::config::{ceil_div, CalculatorConfig};
use crate::error::CraftError;
use crate::ledger::ExcessLedger;
use crate::material_id::MaterialId;
use crate::metrics::{CraftingMetrics, ProductionTotals};
use crate::model::{Activity, Material, ProductionMethod, Product, Quantity, Recipe};
use crate::pricing::{MerchantPricing, PricingPolicy};
use crate::profession::ProfessionSettings;
use tracing::{debug, trace};

/// What the resolver does with a material that stock does not cover.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Disposition<'m> {
    /// Buy the shortfall at this unit price.
    Purchase(f64),
    /// Craft it, recursing into the recipe's inputs.
    Craft(&'m Recipe),
    /// Gather it.
    Gather(&'m Activity),
    /// No way to obtain it.
    Unresolvable,
}

/// Resolves production trees against a catalog and the player's professions.
///
/// The resolver borrows its lookup data and is cheap to build; every
/// [`resolve`](Self::resolve) call owns a fresh metrics accumulator and
/// mutates only the ledger it is handed.
///
/// Resolution is deterministic: recipe inputs are processed in declaration
/// order and a material reached through several branches is resolved again
/// on each occurrence, seeing whatever stock earlier branches left behind.
///
/// # Examples
///
/// ```rust
/// use craftcalc::*;
///
/// let catalog = MaterialCatalog::from_materials([
///     Material::new("Iron Ore", "Mining")
///         .with_effort(2.0, 5.0, 0.0)
///         .with_activity(Activity::new(4)),
/// ]);
/// let settings = ProfessionSettings::new()
///     .with("Mining", ProfessionSetting::enabled(1))
///     .with("Smithing", ProfessionSetting::enabled(1));
///
/// let ingot = Product::new("Iron Ingot", "Smithing", Recipe::new(1).with_input("Iron Ore", 2))
///     .with_effort(3.0, 10.0, 1.0);
///
/// let resolver = CraftingResolver::new(&settings, &catalog);
/// let mut ledger = ExcessLedger::new();
/// let metrics = resolver.resolve(&ingot, 5, &mut ledger).unwrap();
///
/// // 10 ore needed, 4 per gather: 3 batches, 2 left over.
/// let ore = metrics.balance("Iron Ore").unwrap();
/// assert_eq!(ore.batches, 3);
/// assert_eq!(ore.excess, 2);
/// assert_eq!(ledger.available("Iron Ore"), 2);
/// assert_eq!(metrics.total_duration, 5.0 * 3.0 + 3.0 * 2.0);
/// ```
pub struct CraftingResolver<'a, P = MerchantPricing> {
    settings: &'a ProfessionSettings,
    catalog: &'a MaterialCatalog,
    pricing: P,
    config: CalculatorConfig,
}

impl<'a> CraftingResolver<'a> {
    /// Create a resolver with default configuration and merchant pricing.
    ///
    /// # Arguments
    ///
    /// * `settings` - The player's profession settings
    /// * `catalog` - Every material that may appear in a recipe
    pub fn new(settings: &'a ProfessionSettings, catalog: &'a MaterialCatalog) -> Self {
        Self {
            settings,
            catalog,
            pricing: MerchantPricing::default(),
            config: CalculatorConfig::default(),
        }
    }
}

impl<'a, P: PricingPolicy> CraftingResolver<'a, P> {
    /// Replace the pricing policy.
    pub fn with_pricing<Q: PricingPolicy>(self, pricing: Q) -> CraftingResolver<'a, Q> {
        CraftingResolver {
            settings: self.settings,
            catalog: self.catalog,
            pricing,
            config: self.config,
        }
    }

    /// Replace the configuration. It is validated when resolving.
    pub fn with_config(mut self, config: CalculatorConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Resolve `quantity` units of `product`.
    ///
    /// The root is always crafted: its effort is charged for
    /// `ceil(quantity / output)` batches and each recipe input is resolved
    /// for that many batches.
    ///
    /// `ledger` is read for existing stock and updated with what was
    /// consumed or left over. On error no metrics are returned, but ledger
    /// updates made before the failure remain; use
    /// [`resolve_atomic`](Self::resolve_atomic) to discard them.
    ///
    /// # Arguments
    ///
    /// * `product` - The product to make; it is always crafted
    /// * `quantity` - How many units of `product` are wanted
    /// * `ledger` - Stock on hand, updated in place
    ///
    /// # Returns
    ///
    /// The effort per profession, the balance of every material reached,
    /// and the grand totals.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use craftcalc::*;
    ///
    /// let catalog = MaterialCatalog::from_materials([
    ///     Material::new("Plank", "Woodcutting")
    ///         .with_effort(1.0, 1.0, 0.0)
    ///         .with_activity(Activity::new(5)),
    /// ]);
    /// let settings = ProfessionSettings::new()
    ///     .with("Woodcutting", ProfessionSetting::enabled(1));
    /// let crate_ = Product::new("Crate", "Carpentry", Recipe::new(2).with_input("Plank", 4))
    ///     .with_effort(10.0, 0.0, 0.0);
    ///
    /// let mut ledger = ExcessLedger::new();
    /// ledger.set("Plank", 3);
    ///
    /// let metrics = CraftingResolver::new(&settings, &catalog)
    ///     .resolve(&crate_, 3, &mut ledger)
    ///     .unwrap();
    ///
    /// // 2 crate batches need 8 planks; 3 in stock, 5 gathered in one batch.
    /// let plank = metrics.balance("Plank").unwrap();
    /// assert_eq!((plank.required, plank.produced, plank.batches), (8, 5, 1));
    /// assert_eq!(ledger.available("Plank"), 0);
    /// assert_eq!(metrics.total_duration, 2.0 * 10.0 + 1.0);
    /// ```
    ///
    /// # Errors
    ///
    /// * `InvalidQuantity` if `quantity <= 0`
    /// * `QuantityOverflow` if a scaled-up requirement exceeds `Quantity::MAX`
    /// * `InvalidOutputQuantity` if a recipe or activity yields nothing
    /// * `MissingMaterial` if an input is not in the catalog
    /// * `UnresolvableMaterial` if a needed material can be neither bought nor produced
    /// * `Cycle` if a recipe transitively consumes its own output
    /// * `InvalidConfig` if the configuration is out of range
    pub fn resolve(
        &self,
        product: &Product,
        quantity: Quantity,
        ledger: &mut ExcessLedger,
    ) -> Result<CraftingMetrics, CraftError> {
        self.config.validate()?;
        if quantity <= 0 {
            return Err(CraftError::InvalidQuantity(quantity));
        }
        let output = positive_output(&product.name, product.recipe.output_quantity)?;

        let mut metrics = CraftingMetrics::new();
        let batches = ceil_div(quantity, output);
        metrics.record_effort(
            &product.profession,
            ProductionTotals::for_batches(product.duration, product.xp, product.kp, batches),
        );
        debug!(product = %product.name, quantity, batches, "resolving product");

        let mut chain = Vec::new();
        for input in &product.recipe.inputs {
            let material = self.catalog.require(&input.material)?;
            let balance = self.process(
                material,
                scaled(&input.material, input.quantity, batches)?,
                ledger,
                &mut metrics,
                &mut chain,
            )?;
            metrics.merge_balance(&input.material, balance);
        }

        debug!(
            product = %product.name,
            total_duration = metrics.total_duration,
            total_xp = metrics.total_xp,
            total_kp = metrics.total_kp,
            "finished resolving product"
        );
        Ok(metrics)
    }

    /// Like [`resolve`](Self::resolve), but leaves `ledger` untouched on error.
    pub fn resolve_atomic(
        &self,
        product: &Product,
        quantity: Quantity,
        ledger: &mut ExcessLedger,
    ) -> Result<CraftingMetrics, CraftError> {
        let mut scratch = ledger.clone();
        let metrics = self.resolve(product, quantity, &mut scratch)?;
        *ledger = scratch;
        Ok(metrics)
    }

    /// Resolve several orders in sequence against one ledger.
    ///
    /// Surplus from earlier orders is available to later ones. The returned
    /// report is the sum of the per-order reports.
    pub fn resolve_all(
        &self,
        orders: &[(&Product, Quantity)],
        ledger: &mut ExcessLedger,
    ) -> Result<CraftingMetrics, CraftError> {
        let mut combined = CraftingMetrics::new();
        for &(product, quantity) in orders {
            combined.absorb(self.resolve(product, quantity, ledger)?);
        }
        Ok(combined)
    }

    /// Resolve `required` units of one material.
    fn process(
        &self,
        material: &Material,
        required: Quantity,
        ledger: &mut ExcessLedger,
        metrics: &mut CraftingMetrics,
        chain: &mut Vec<MaterialId>,
    ) -> Result<MaterialBalance, CraftError> {
        let available = ledger.available(material.name.as_str());
        let remaining = required
            .checked_sub(available)
            .ok_or_else(|| CraftError::QuantityOverflow(material.name.clone()))?
            .max(0);
        trace!(material = %material.name, required, available, remaining, "processing material");

        if remaining == 0 {
            ledger.consume(material.name.clone(), required);
            return Ok(MaterialBalance::covered(required));
        }

        match self.dispose(material) {
            Disposition::Purchase(unit_price) => {
                let trips = self.config.trips_for(remaining);
                metrics.record_duration(trips as f64 * self.config.merchant_trip_duration);
                ledger.set(material.name.clone(), 0);
                debug!(material = %material.name, remaining, unit_price, trips, "purchasing");
                Ok(MaterialBalance {
                    required,
                    produced: remaining,
                    excess: available,
                    batches: 0,
                    total_cost: unit_price * remaining as f64,
                })
            }
            Disposition::Craft(recipe) => {
                if let Some(start) = chain.iter().position(|id| id == &material.name) {
                    let mut path = chain[start..].to_vec();
                    path.push(material.name.clone());
                    return Err(CraftError::Cycle { path });
                }

                let balance = self.produce(
                    material,
                    recipe.output_quantity,
                    required,
                    available,
                    ledger,
                    metrics,
                )?;

                chain.push(material.name.clone());
                for input in &recipe.inputs {
                    let input_material = self.catalog.require(&input.material)?;
                    let input_balance = self.process(
                        input_material,
                        scaled(&input.material, input.quantity, balance.batches)?,
                        ledger,
                        metrics,
                        chain,
                    )?;
                    metrics.merge_balance(&input.material, input_balance);
                }
                chain.pop();

                Ok(balance)
            }
            Disposition::Gather(activity) => self.produce(
                material,
                activity.output_quantity,
                required,
                available,
                ledger,
                metrics,
            ),
            Disposition::Unresolvable => {
                Err(CraftError::UnresolvableMaterial(material.name.clone()))
            }
        }
    }

    /// Charge the batches needed to cover the shortfall and record the surplus.
    fn produce(
        &self,
        material: &Material,
        output_quantity: Quantity,
        required: Quantity,
        available: Quantity,
        ledger: &mut ExcessLedger,
        metrics: &mut CraftingMetrics,
    ) -> Result<MaterialBalance, CraftError> {
        let output = positive_output(material.name.as_str(), output_quantity)?;
        let overflow = || CraftError::QuantityOverflow(material.name.clone());
        let batches = ceil_div(required - available, output);
        let produced = batches.checked_mul(output).ok_or_else(overflow)?;
        let excess = produced
            .checked_add(available)
            .and_then(|stock| stock.checked_sub(required))
            .ok_or_else(overflow)?;

        metrics.record_effort(
            &material.profession,
            ProductionTotals::for_batches(material.duration, material.xp, material.kp, batches),
        );
        ledger.set(material.name.clone(), excess);
        debug!(
            material = %material.name,
            profession = %material.profession,
            batches,
            produced,
            excess,
            "producing"
        );

        Ok(MaterialBalance {
            required,
            produced,
            excess,
            batches,
            total_cost: 0.0,
        })
    }

    /// Decide how to obtain a material that stock does not cover.
    ///
    /// A material is bought when the player cannot produce it (no setting,
    /// disabled, under-levelled, or no recipe or activity) and the pricing
    /// policy prices it. Otherwise it is crafted or gathered if it can be.
    fn dispose<'m>(&self, material: &'m Material) -> Disposition<'m> {
        let producible = self
            .settings
            .can_produce(&material.profession, material.level)
            && !matches!(material.method, ProductionMethod::None);

        if !producible {
            let setting = self.settings.get(&material.profession);
            if let Some(price) = self.pricing.unit_price(material, setting) {
                return Disposition::Purchase(price);
            }
        }

        match &material.method {
            ProductionMethod::Craft(recipe) => Disposition::Craft(recipe),
            ProductionMethod::Gather(activity) => Disposition::Gather(activity),
            ProductionMethod::None => Disposition::Unresolvable,
        }
    }
}

fn positive_output(name: &str, output_quantity: Quantity) -> Result<Quantity, CraftError> {
    if output_quantity <= 0 {
        return Err(CraftError::InvalidOutputQuantity {
            material: name.to_string(),
            output_quantity,
        });
    }
    Ok(output_quantity)
}

/// Units of `material` needed for `batches` batches of a recipe using
/// `per_batch` each.
fn scaled(
    material: &MaterialId,
    per_batch: Quantity,
    batches: Quantity,
) -> Result<Quantity, CraftError> {
    per_batch
        .checked_mul(batches)
        .ok_or_else(|| CraftError::QuantityOverflow(material.clone()))
}

/// Resolve `quantity` units of `product` with default configuration and
/// merchant pricing.
///
/// ```rust
/// use craftcalc::*;
///
/// let catalog = MaterialCatalog::from_materials([
///     Material::new("Thread", "Tailoring").with_price(2.0, 3.0),
/// ]);
/// let cloak = Product::new("Cloak", "Tailoring", Recipe::new(1).with_input("Thread", 5));
///
/// let mut ledger = ExcessLedger::new();
/// let metrics = calculate_crafting_metrics(
///     &cloak, 2, &ProfessionSettings::new(), &catalog, &mut ledger,
/// ).unwrap();
///
/// assert_eq!(metrics.balance("Thread").unwrap().total_cost, 20.0);
/// ```
pub fn calculate_crafting_metrics(
    product: &Product,
    quantity: Quantity,
    settings: &ProfessionSettings,
    catalog: &MaterialCatalog,
    ledger: &mut ExcessLedger,
) -> Result<CraftingMetrics, CraftError> {
    CraftingResolver::new(settings, catalog).resolve(product, quantity, ledger)
}
