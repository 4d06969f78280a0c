//! # Recipe Cost Calculator
//!
//! Computes food cost, labor cost, suggested menu prices and profit margins
//! for a recipe made of ingredients and preps. The calculation is pure and
//! cheap, so it can run on every edit of the component list.
//!
//! ```rust
//! use ingredient_pricing::cost_calculator::{Component, RecipeCostCalculator};
//!
//! let calculator = RecipeCostCalculator::new();
//! let components = vec![Component::ingredient("tomatoes", 0.004, 250.0, "g")];
//! let result = calculator.calculate(&components, 15.0, 1);
//!
//! assert!((result.total_food_cost - 1.0).abs() < 1e-9);
//! assert!((result.suggested_prices.food_cost_25 - 4.0).abs() < 1e-9);
//! ```

use crate::config::CostingConfig;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Target food-cost percentages for the suggested price tiers
pub const FOOD_COST_TARGET_25: f64 = 0.25;
pub const FOOD_COST_TARGET_30: f64 = 0.30;
pub const FOOD_COST_TARGET_35: f64 = 0.35;

/// One recipe component, owned by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Component {
    #[serde(rename_all = "camelCase")]
    Ingredient {
        ingredient_id: String,
        cost_per_unit: f64,
        quantity: f64,
        unit: String,
    },
    #[serde(rename_all = "camelCase")]
    Prep {
        prep_id: String,
        /// Cost per reference batch of the prep's own unit
        cost_per_batch: f64,
        quantity: f64,
        unit: String,
    },
}

impl Component {
    pub fn ingredient(id: &str, cost_per_unit: f64, quantity: f64, unit: &str) -> Self {
        Component::Ingredient {
            ingredient_id: id.to_string(),
            cost_per_unit,
            quantity,
            unit: unit.to_string(),
        }
    }

    pub fn prep(id: &str, cost_per_batch: f64, quantity: f64, unit: &str) -> Self {
        Component::Prep {
            prep_id: id.to_string(),
            cost_per_batch,
            quantity,
            unit: unit.to_string(),
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Component::Ingredient { ingredient_id, .. } => ingredient_id,
            Component::Prep { prep_id, .. } => prep_id,
        }
    }

    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Ingredient { .. } => ComponentKind::Ingredient,
            Component::Prep { .. } => ComponentKind::Prep,
        }
    }

    pub fn quantity(&self) -> f64 {
        match self {
            Component::Ingredient { quantity, .. } | Component::Prep { quantity, .. } => *quantity,
        }
    }

    pub fn unit(&self) -> &str {
        match self {
            Component::Ingredient { unit, .. } | Component::Prep { unit, .. } => unit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Ingredient,
    Prep,
}

/// Cost contribution of one component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentCost {
    pub kind: ComponentKind,
    pub id: String,
    pub quantity: f64,
    pub unit: String,
    pub cost: f64,
    /// Share of the total food cost, 0 when the total is 0
    pub share_percent: f64,
}

/// Menu prices that hit a target food-cost percentage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedPrices {
    pub food_cost_25: f64,
    pub food_cost_30: f64,
    pub food_cost_35: f64,
}

/// Result of [`RecipeCostCalculator::calculate`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingCalculation {
    pub total_food_cost: f64,
    pub labor_cost: f64,
    pub total_cost: f64,
    pub cost_per_serving: f64,
    pub suggested_prices: SuggestedPrices,
    pub breakdown_by_component: Vec<ComponentCost>,
    pub prep_time_minutes: f64,
    pub servings: u32,
}

impl PricingCalculation {
    /// Profit margin in percent for a proposed price
    pub fn profit_margin(&self, price: f64) -> f64 {
        calculate_profit_margin(price, self.total_food_cost)
    }
}

/// `(price - cost) / price * 100`, 0 when the price is 0 or not finite
pub fn calculate_profit_margin(price: f64, total_food_cost: f64) -> f64 {
    if price == 0.0 || !price.is_finite() || !total_food_cost.is_finite() {
        return 0.0;
    }
    (price - total_food_cost) / price * 100.0
}

/// Price at which food cost is `target` of the price
fn price_for_target(total_food_cost: f64, target: f64) -> f64 {
    total_food_cost / target
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

/// Recipe cost calculator
#[derive(Debug, Clone, Default)]
pub struct RecipeCostCalculator {
    config: CostingConfig,
}

impl RecipeCostCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CostingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CostingConfig {
        &self.config
    }

    /// Cost contribution of a single component
    pub fn component_cost(&self, component: &Component) -> f64 {
        let (rate, quantity) = match component {
            Component::Ingredient {
                cost_per_unit,
                quantity,
                ..
            } => (*cost_per_unit, *quantity),
            Component::Prep {
                cost_per_batch,
                quantity,
                ..
            } => (
                *cost_per_batch,
                quantity / self.config.prep_reference_batch_size,
            ),
        };

        if !is_non_negative(rate) || !is_non_negative(quantity) {
            warn!(
                "Ignoring component '{}' with invalid cost {} or quantity {}",
                component.id(),
                rate,
                component.quantity()
            );
            return 0.0;
        }
        rate * quantity
    }

    /// Compute the full pricing for a component list
    pub fn calculate(
        &self,
        components: &[Component],
        prep_time_minutes: f64,
        servings: u32,
    ) -> PricingCalculation {
        let servings = if servings == 0 {
            warn!("Servings of 0 treated as 1");
            1
        } else {
            servings
        };
        let prep_time_minutes = if prep_time_minutes.is_finite() && prep_time_minutes > 0.0 {
            prep_time_minutes
        } else {
            0.0
        };

        let costs: Vec<f64> = components.iter().map(|c| self.component_cost(c)).collect();
        let total_food_cost: f64 = costs.iter().sum();

        let breakdown_by_component = components
            .iter()
            .zip(&costs)
            .map(|(component, &cost)| ComponentCost {
                kind: component.kind(),
                id: component.id().to_string(),
                quantity: component.quantity(),
                unit: component.unit().to_string(),
                cost,
                share_percent: if total_food_cost > 0.0 {
                    cost / total_food_cost * 100.0
                } else {
                    0.0
                },
            })
            .collect();

        let labor_cost = prep_time_minutes / 60.0 * self.config.labor_cost_per_hour;
        let total_cost = total_food_cost + labor_cost;

        debug!(
            "Calculated food cost {:.2} for {} components ({} servings)",
            total_food_cost,
            components.len(),
            servings
        );

        PricingCalculation {
            total_food_cost,
            labor_cost,
            total_cost,
            cost_per_serving: total_cost / f64::from(servings),
            suggested_prices: SuggestedPrices {
                food_cost_25: price_for_target(total_food_cost, FOOD_COST_TARGET_25),
                food_cost_30: price_for_target(total_food_cost, FOOD_COST_TARGET_30),
                food_cost_35: price_for_target(total_food_cost, FOOD_COST_TARGET_35),
            },
            breakdown_by_component,
            prep_time_minutes,
            servings,
        }
    }
}
