use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grocery::engine_config::{EngineConfig, MergePolicy};
use grocery::logging::{init_logging, LogFormat};
use grocery::recipe_source::{load_recipes, read_recipes};
use grocery::shopping_list::{render_text, ShoppingListGenerator};
use log::info;
use std::io;
use std::path::PathBuf;

/// Consolidate recipe ingredients into one shopping list
#[derive(Debug, Parser)]
#[command(name = "grocery", version, about)]
struct Cli {
    /// Recipe JSON file; reads stdin when absent or `-`
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Scale every recipe to this many servings
    #[arg(short, long)]
    servings: Option<f64>,

    /// Merge milliliters and grams even without a known density
    #[arg(long)]
    force_merge: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging(LogFormat::from_env())?;

    let cli = Cli::parse();

    let mut config = EngineConfig::from_env().context("Invalid GROCERY_* configuration")?;
    if let Some(servings) = cli.servings {
        config = config
            .with_target_servings(servings)
            .context("Invalid --servings value")?;
    }
    if cli.force_merge {
        config = config.with_merge_policy(MergePolicy::ForceMerge);
    }

    let recipes = match cli.input.as_deref() {
        Some(path) if path.as_os_str() != "-" => load_recipes(path)
            .with_context(|| format!("Failed to load recipes from {}", path.display()))?,
        _ => read_recipes(io::stdin().lock()).context("Failed to read recipes from stdin")?,
    };

    info!("Consolidating {} recipes", recipes.len());

    let list = ShoppingListGenerator::with_config(config).build(&recipes);

    match cli.format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&list).context("Failed to serialize shopping list")?;
            println!("{}", json);
        }
        OutputFormat::Text => print!("{}", render_text(&list)),
    }

    Ok(())
}
