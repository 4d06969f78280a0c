//! # Voice Intake Example
//!
//! This example runs dictated ingredient lists through the parser, shows the
//! validation result for each candidate, and prices a small recipe built from
//! the parsed ingredients.

use ingredient_pricing::cost_calculator::{Component, RecipeCostCalculator};
use ingredient_pricing::ingredient_parser::IngredientParser;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Voice Ingredient Intake Example");
    println!("===============================\n");

    let parser = IngredientParser::new();
    let utterances = [
        "Bio Tomaten 4.50 pro kg, normale Zwiebeln 1.20, Premium Olivenöl 12 Euro pro Liter",
        "avocados 2 euro tomatoes 1.20",
        "Käse 8,90 pro Kilo; Walnüsse für 6",
        "4.50 pro kg",
    ];

    for utterance in utterances {
        println!("Utterance: \"{}\"", utterance);
        let candidates = parser.parse(utterance);
        if candidates.is_empty() {
            println!("  (nothing recognized, needs manual entry)\n");
            continue;
        }
        for (i, candidate) in candidates.iter().enumerate() {
            let report = candidate.validate();
            println!("  {}. {}", i + 1, candidate);
            if !candidate.tags.is_empty() || !candidate.allergens.is_empty() {
                println!(
                    "     tags: {:?}, allergens: {:?}",
                    candidate.tags, candidate.allergens
                );
            }
            if !report.is_valid {
                println!("     needs review: {}", report.errors.join("; "));
            }
        }
        println!();
    }

    println!("Recipe costing");
    println!("--------------");

    let components = vec![
        Component::ingredient("tomatoes", 0.0045, 300.0, "g"),
        Component::ingredient("olive-oil", 0.012, 20.0, "ml"),
        Component::prep("basil-pesto", 6.0, 40.0, "g"),
    ];
    let calculator = RecipeCostCalculator::new();
    let calculation = calculator.calculate(&components, 15.0, 2);

    for line in &calculation.breakdown_by_component {
        println!(
            "  {:<12} {:>6.1} {:<3} {:>6.2} EUR ({:.0}%)",
            line.id, line.quantity, line.unit, line.cost, line.share_percent
        );
    }
    println!("  Food cost: {:.2} EUR", calculation.total_food_cost);
    println!(
        "  Suggested: {:.2} (25%) / {:.2} (30%) / {:.2} (35%)",
        calculation.suggested_prices.food_cost_25,
        calculation.suggested_prices.food_cost_30,
        calculation.suggested_prices.food_cost_35
    );
    println!("  Margin at 12.50 EUR: {:.1}%", calculation.profit_margin(12.5));

    println!("\n{}", serde_json::to_string_pretty(&calculation)?);
    Ok(())
}
