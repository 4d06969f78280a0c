//! # Recipe Cost Calculator Tests
//!
//! Food cost, labor cost, suggested prices, margins and the JSON contract
//! of recipe components.

use ingredient_pricing::config::CostingConfig;
use ingredient_pricing::cost_calculator::{
    calculate_profit_margin, Component, ComponentKind, RecipeCostCalculator,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn create_components() -> Vec<Component> {
        vec![
            Component::ingredient("tomatoes", 0.004, 250.0, "g"),
            Component::ingredient("olive-oil", 0.012, 20.0, "ml"),
            Component::prep("basil-pesto", 6.0, 50.0, "g"),
        ]
    }

    #[test]
    fn test_ingredient_cost_is_price_times_quantity() {
        let calculator = RecipeCostCalculator::new();
        let result = calculator.calculate(&[Component::ingredient("x", 0.5, 100.0, "g")], 0.0, 1);
        assert!(approx(result.total_food_cost, 50.0));
    }

    #[test]
    fn test_full_calculation() {
        let calculator = RecipeCostCalculator::new();
        let result = calculator.calculate(&create_components(), 20.0, 2);

        // 1.00 + 0.24 + 3.00
        assert!(approx(result.total_food_cost, 4.24));
        assert!(approx(result.labor_cost, 0.0));
        assert!(approx(result.total_cost, 4.24));
        assert!(approx(result.cost_per_serving, 2.12));
        assert!(approx(result.suggested_prices.food_cost_25, 16.96));
        assert!(approx(result.suggested_prices.food_cost_30, 4.24 / 0.30));
        assert!(approx(result.suggested_prices.food_cost_35, 4.24 / 0.35));
        assert_eq!(result.prep_time_minutes, 20.0);
        assert_eq!(result.servings, 2);

        assert_eq!(result.breakdown_by_component.len(), 3);
        assert_eq!(result.breakdown_by_component[2].kind, ComponentKind::Prep);
        let share_total: f64 = result
            .breakdown_by_component
            .iter()
            .map(|c| c.share_percent)
            .sum();
        assert!(approx(share_total, 100.0));
    }

    #[test]
    fn test_labor_cost_from_config() {
        let calculator = RecipeCostCalculator::with_config(CostingConfig {
            labor_cost_per_hour: 18.0,
            ..Default::default()
        });
        let result = calculator.calculate(&create_components(), 30.0, 1);
        assert!(approx(result.labor_cost, 9.0));
        assert!(approx(result.total_cost, 13.24));
        // Suggested prices are based on food cost only
        assert!(approx(result.suggested_prices.food_cost_25, 16.96));
    }

    #[test]
    fn test_empty_recipe() {
        let result = RecipeCostCalculator::new().calculate(&[], 0.0, 4);
        assert_eq!(result.total_food_cost, 0.0);
        assert_eq!(result.suggested_prices.food_cost_30, 0.0);
        assert!(result.breakdown_by_component.is_empty());
    }

    #[test]
    fn test_profit_margin() {
        assert!(approx(calculate_profit_margin(16.96, 4.24), 75.0));
        assert_eq!(calculate_profit_margin(0.0, 4.24), 0.0);

        let result = RecipeCostCalculator::new().calculate(&create_components(), 0.0, 1);
        assert!(approx(result.profit_margin(8.48), 50.0));
        assert_eq!(result.profit_margin(0.0), 0.0);
    }

    #[test]
    fn test_component_json_contract() {
        let component = Component::ingredient("tomatoes", 0.5, 100.0, "g");
        let json = serde_json::to_value(&component).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "ingredient",
                "ingredientId": "tomatoes",
                "costPerUnit": 0.5,
                "quantity": 100.0,
                "unit": "g"
            })
        );

        let prep: Component = serde_json::from_str(
            r#"{"kind":"prep","prepId":"pesto","costPerBatch":6.0,"quantity":50,"unit":"g"}"#,
        )
        .unwrap();
        assert_eq!(prep, Component::prep("pesto", 6.0, 50.0, "g"));
    }

    #[test]
    fn test_calculation_json_field_names() {
        let result = RecipeCostCalculator::new().calculate(&create_components(), 10.0, 1);
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("totalFoodCost").is_some());
        assert!(json["suggestedPrices"].get("foodCost25").is_some());
        assert_eq!(json["breakdownByComponent"][0]["kind"], "ingredient");
    }
}
