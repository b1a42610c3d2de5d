use guaco::grocery::GroceryDataset;
use guaco::parser::nutrient_unit;
use guaco::server::{self, AppState};
use guaco::{parse_recipe, AppConfig, ParsedRecipe, RecipeGenerator, RecipeStore};
use log::{debug, info};
use std::env;
use std::error::Error;
use std::io::Read;

const USAGE: &str = "Usage:
  guaco [serve]                    Start the HTTP server
  guaco parse <file|->             Parse a saved generator response and print JSON
  guaco generate <ingredient>...   Generate a recipe and print a summary";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        None | Some("serve") => serve().await,
        Some("parse") => {
            let source = args.get(1).ok_or(USAGE)?;
            parse(source)
        }
        Some("generate") => generate(&args[1..]).await,
        Some("-h") | Some("--help") | Some("help") => {
            println!("{USAGE}");
            Ok(())
        }
        Some(other) => Err(format!("Unknown command '{other}'\n\n{USAGE}").into()),
    }
}

async fn serve() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    debug!("{:#?}", config.server);

    let generator = RecipeGenerator::from_config(&config)?;
    info!("Using provider '{}'", generator.provider_name());

    let state = AppState::new(
        generator,
        RecipeStore::new(&config.storage.recipes_path),
        GroceryDataset::new(&config.storage.grocery_csv_path),
    );

    server::serve(&config.server.bind_address(), state).await?;
    Ok(())
}

fn parse(source: &str) -> Result<(), Box<dyn Error>> {
    let text = if source == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(source)?
    };

    let recipe = parse_recipe(&text);
    println!("{}", serde_json::to_string_pretty(&recipe)?);
    Ok(())
}

async fn generate(ingredients: &[String]) -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    let recipe = RecipeGenerator::from_config(&config)?
        .generate(ingredients)
        .await?;
    print_summary(&recipe);
    Ok(())
}

fn print_summary(recipe: &ParsedRecipe) {
    let metadata = &recipe.metadata;
    println!("{}", metadata.title);
    println!(
        "Prep {} min | Cook {} min | Serves {}",
        metadata.prep_time, metadata.cook_time, metadata.servings
    );

    for (heading, block) in [
        ("Ingredients", &recipe.sections.ingredients),
        ("Spices & Seasonings", &recipe.sections.spices),
        ("Instructions", &recipe.sections.instructions),
    ] {
        if !block.is_empty() {
            println!("\n{heading}:\n{block}");
        }
    }

    if !recipe.nutrition.is_empty() {
        println!("\nNutrition (per serving):");
        for (key, value) in &recipe.nutrition {
            println!("  {key}: {value} {}", nutrient_unit(*key));
        }
    }
}
