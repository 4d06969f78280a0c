use anyhow::{Context, Result};
use ingredient_pricing::cost_calculator::{Component, RecipeCostCalculator};
use ingredient_pricing::{IngredientParser, PipelineConfig};
use serde::Deserialize;
use std::env;
use std::io::{self, BufRead};
use tracing::{info, info_span};
use tracing_subscriber::EnvFilter;

/// Input accepted by `--cost <file>`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecipeInput {
    components: Vec<Component>,
    #[serde(default)]
    prep_time_minutes: f64,
    #[serde(default = "default_servings")]
    servings: u32,
    /// Optional menu price to report a margin for
    price: Option<f64>,
}

fn default_servings() -> u32 {
    1
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = env::var("INGREDIENT_PRICING_LOG_JSON").is_ok_and(|v| v == "1" || v == "true");
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();
    init_logging();

    info!("Starting ingredient-pricing");

    let config = PipelineConfig::from_env().context("Invalid pipeline configuration")?;
    let args: Vec<String> = env::args().skip(1).collect();

    if args.first().map(String::as_str) == Some("--cost") {
        let path = args.get(1).context("--cost requires a JSON file path")?;
        return run_cost(&config, path);
    }

    let parser = IngredientParser::with_config(&config);
    if args.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line.context("Failed to read utterance from stdin")?;
            if !line.trim().is_empty() {
                run_parse(&parser, &line)?;
            }
        }
    } else {
        run_parse(&parser, &args.join(" "))?;
    }

    Ok(())
}

fn run_parse(parser: &IngredientParser, utterance: &str) -> Result<()> {
    let _span = info_span!("parse", chars = utterance.chars().count()).entered();

    let candidates = parser.parse(utterance);
    for candidate in &candidates {
        let report = candidate.validate();
        if !report.is_valid {
            info!(
                ingredient = %candidate.name_raw,
                errors = ?report.errors,
                "Candidate needs manual review"
            );
        }
    }

    println!("{}", serde_json::to_string_pretty(&candidates)?);
    Ok(())
}

fn run_cost(config: &PipelineConfig, path: &str) -> Result<()> {
    let _span = info_span!("cost", file = path).entered();

    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    let recipe: RecipeInput =
        serde_json::from_str(&content).with_context(|| format!("Invalid recipe JSON in {path}"))?;

    let calculator = RecipeCostCalculator::with_config(config.costing.clone());
    let calculation =
        calculator.calculate(&recipe.components, recipe.prep_time_minutes, recipe.servings);

    if let Some(price) = recipe.price {
        info!(
            price,
            margin_percent = calculation.profit_margin(price),
            "Profit margin at proposed price"
        );
    }

    println!("{}", serde_json::to_string_pretty(&calculation)?);
    Ok(())
}
