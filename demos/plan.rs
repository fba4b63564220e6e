//! Planning example: resolving two orders that share leftover stock
//!
//! This example demonstrates:
//! - Loading a catalog from JSON and validating it
//! - Resolving a product with mixed crafted, gathered and bought materials
//! - Carrying surplus into a second order through the ledger
//!
//! Run with `RUST_LOG=craftcalc=debug` to see every resolution step.

use craftcalc::*;
use tracing_subscriber::EnvFilter;

const CATALOG: &str = r#"[
    {"name": "Iron Ore", "profession": "Mining", "duration": 3, "xp": 4,
     "activity": {"outputQuantity": 4}},
    {"name": "Coal", "profession": "Mining", "duration": 2, "xp": 2,
     "activity": {"outputQuantity": 10}},
    {"name": "Iron Ingot", "profession": "Smithing", "level": 5, "duration": 6, "xp": 12, "kp": 1,
     "recipe": {"outputQuantity": 2, "materials": [
        {"materialName": "Iron Ore", "quantity": 3},
        {"materialName": "Coal", "quantity": 1}
     ]}},
    {"name": "Leather Strip", "profession": "Merchant", "level": 10, "cost": 4, "value": 6}
]"#;

fn main() -> Result<(), CraftError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let catalog = MaterialCatalog::from_json(CATALOG)?;
    catalog.validate()?;

    let settings = ProfessionSettings::new()
        .with("Mining", ProfessionSetting::enabled(20))
        .with("Smithing", ProfessionSetting::enabled(8))
        .with(Profession::MERCHANT, ProfessionSetting::disabled(3));

    let sword = Product::new(
        "Iron Sword",
        "Smithing",
        Recipe::new(1)
            .with_input("Iron Ingot", 3)
            .with_input("Leather Strip", 2),
    )
    .with_effort(40.0, 80.0, 6.0);
    let dagger = Product::new(
        "Iron Dagger",
        "Smithing",
        Recipe::new(1)
            .with_input("Iron Ingot", 1)
            .with_input("Leather Strip", 1),
    )
    .with_effort(20.0, 35.0, 3.0);

    let resolver = CraftingResolver::new(&settings, &catalog);
    let mut ledger = ExcessLedger::new();

    for (product, quantity) in [(&sword, 2), (&dagger, 3)] {
        let metrics = resolver.resolve(product, quantity, &mut ledger)?;
        println!("=== {} x{} ===", product.name, quantity);
        print_metrics(&metrics);
    }

    println!("\n=== Leftover stock ===");
    for (material, quantity) in ledger.iter() {
        println!("  {}: {}", material, quantity);
    }

    Ok(())
}

fn print_metrics(metrics: &CraftingMetrics) {
    println!("Professions:");
    for (profession, totals) in &metrics.profession_totals {
        println!(
            "  {:<10} duration {:>6.1}  xp {:>6.1}  kp {:>4.1}",
            profession, totals.duration, totals.xp, totals.kp
        );
    }
    println!("Materials:");
    for (material, balance) in &metrics.material_balances {
        println!(
            "  {:<14} required {:>3}  produced {:>3}  excess {:>3}  batches {:>2}  cost {:>6.2}",
            material,
            balance.required,
            balance.produced,
            balance.excess,
            balance.batches,
            balance.total_cost
        );
    }
    println!(
        "Total: duration {:.1}, xp {:.1}, kp {:.1}, spent {:.2}\n",
        metrics.total_duration,
        metrics.total_xp,
        metrics.total_kp,
        metrics.total_cost()
    );
}
