// ABOUTME: Command-line front end for the saveur recipe catalogue client
// ABOUTME: Browses, searches, and manages favorites and the shopping list from a terminal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Saveur Contributors

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use saveur::config::ClientConfig;
use saveur::controller::CatalogueController;
use saveur::filters::FilterSet;
use saveur::gateway::{HttpGateway, RecipeSource, SyntheticSource};
use saveur::logging::LoggingConfig;
use saveur::render::{RecipeRenderer, TextRenderer};
use saveur::session::StepOutcome;
use saveur::storage::LocalStore;

/// Recipes bundled with the offline demo catalogue
const DEMO_CATALOGUE_SIZE: usize = 30;

#[derive(Parser)]
#[command(name = "saveur", version, about = "Browse a recipe catalogue from the terminal")]
struct Cli {
    /// Browse a bundled demo catalogue instead of the API
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List a page of the catalogue
    Browse {
        /// 1-based page to fetch
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Search the catalogue with filters
    Search {
        /// Title substring, case-insensitive
        #[arg(long, default_value = "")]
        query: String,
        /// Exact cuisine name
        #[arg(long, default_value = "")]
        cuisine: String,
        /// Minimum rating, inclusive
        #[arg(long)]
        min_rating: Option<f64>,
        /// Maximum calories, inclusive
        #[arg(long)]
        max_calories: Option<f64>,
        /// 1-based page to fetch
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show one recipe from a page in full
    Show {
        /// 1-based position on the page
        index: usize,
        /// Page the recipe is on
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Rescale ingredient quantities to this serving count
        #[arg(long)]
        serves: Option<u32>,
    },
    /// Toggle a recipe in the favorites collection
    Favorite {
        /// 1-based position on the page
        index: usize,
        /// Page the recipe is on
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// List saved favorites
    Favorites,
    /// Add a recipe's ingredients to the shopping list
    AddToList {
        /// 1-based position on the page
        index: usize,
        /// Page the recipe is on
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Print the shopping list as plain text
    ShoppingList,
    /// Remove one shopping-list line by number
    RemoveFromList {
        /// 1-based line number as printed by `shopping-list`
        index: usize,
    },
    /// Empty the shopping list
    ClearList,
    /// List the distinct cuisines in the catalogue
    Cuisines,
    /// Walk through a recipe's instructions step by step
    Cook {
        /// 1-based position on the page
        index: usize,
        /// Page the recipe is on
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Flip the persisted light/dark theme preference
    ToggleTheme,
}

#[tokio::main]
async fn main() -> Result<()> {
    LoggingConfig::from_env().init()?;

    let cli = Cli::parse();
    let config = ClientConfig::from_env();
    let store = LocalStore::open(&config.storage_dir)
        .with_context(|| format!("opening store at {}", config.storage_dir.display()))?;

    if cli.offline {
        let source = SyntheticSource::demo_catalogue(DEMO_CATALOGUE_SIZE);
        let controller = CatalogueController::new(source, store, config.page_size);
        run(controller, cli.command).await
    } else {
        let source = HttpGateway::new(&config);
        let controller = CatalogueController::new(source, store, config.page_size);
        run(controller, cli.command).await
    }
}

async fn run<S: RecipeSource>(
    mut controller: CatalogueController<S>,
    command: Command,
) -> Result<()> {
    let renderer = TextRenderer;

    match command {
        Command::Browse { page } => {
            controller.go_to_page(page).await;
            print_page(&controller, &renderer)?;
        }
        Command::Search {
            query,
            cuisine,
            min_rating,
            max_calories,
            page,
        } => {
            let filters = FilterSet::snapshot(&query, &cuisine, min_rating, max_calories);
            controller.apply_filters(filters).await;
            if page > 1 {
                controller.go_to_page(page).await;
            }
            print_page(&controller, &renderer)?;
        }
        Command::Show {
            index,
            page,
            serves,
        } => {
            controller.go_to_page(page).await;
            let recipe = recipe_at(&controller, index)?.clone();
            print!("{}", renderer.render_detail(&recipe));
            if let Some(serves) = serves {
                println!("\nIngredients for {serves}:");
                for line in controller.scale_portions(&recipe, serves) {
                    println!("  - {line}");
                }
            }
        }
        Command::Favorite { index, page } => {
            controller.go_to_page(page).await;
            let recipe = recipe_at(&controller, index)?.clone();
            let saved = controller.toggle_favorite(&recipe)?;
            if saved {
                println!("Saved \"{}\" to favorites.", recipe.title);
            } else {
                println!("Removed \"{}\" from favorites.", recipe.title);
            }
        }
        Command::Favorites => {
            if controller.favorites().is_empty() {
                println!("No favorites saved.");
            }
            for entry in controller.favorites() {
                println!(
                    "* {} (saved {})",
                    entry.recipe.title,
                    entry.saved_at.format("%Y-%m-%d")
                );
            }
        }
        Command::AddToList { index, page } => {
            controller.go_to_page(page).await;
            let recipe = recipe_at(&controller, index)?.clone();
            let added = controller.add_ingredients_to_list(&recipe.ingredients)?;
            println!(
                "Added {added} ingredient(s); the list has {}.",
                controller.shopping_list().len()
            );
        }
        Command::ShoppingList => {
            if controller.shopping_list().is_empty() {
                println!("Shopping list is empty.");
            } else {
                for (number, line) in controller.shopping_list().iter().enumerate() {
                    println!("{:>3}. {line}", number + 1);
                }
            }
        }
        Command::RemoveFromList { index } => {
            controller.remove_from_list(index.saturating_sub(1))?;
            println!("The list has {} item(s).", controller.shopping_list().len());
        }
        Command::ClearList => {
            controller.clear_list()?;
            println!("Shopping list cleared.");
        }
        Command::Cuisines => {
            for name in controller.cuisines().await? {
                println!("{name}");
            }
        }
        Command::Cook { index, page } => {
            controller.go_to_page(page).await;
            let recipe = recipe_at(&controller, index)?.clone();
            controller.start_cooking(&recipe);
            println!("Cooking: {}\n", recipe.title);
            loop {
                if let (Some(cursor), Some(step)) = (
                    controller.session().cursor(),
                    controller.session().current_step(),
                ) {
                    println!(
                        "Step {} of {}: {step}",
                        cursor + 1,
                        controller.session().len()
                    );
                }
                if controller.next_step() == StepOutcome::Completed {
                    println!("\nDone. Enjoy!");
                    break;
                }
            }
        }
        Command::ToggleTheme => {
            let theme = controller.toggle_theme()?;
            println!("Theme set to {theme:?}.");
        }
    }

    Ok(())
}

fn print_page<S: RecipeSource>(
    controller: &CatalogueController<S>,
    renderer: &TextRenderer,
) -> Result<()> {
    if let Some(error) = controller.last_error() {
        bail!("fetch failed: {error}");
    }
    print!(
        "{}",
        renderer.render_list(controller.current(), &|recipe| controller
            .is_favorite(recipe))
    );
    Ok(())
}

fn recipe_at<S: RecipeSource>(
    controller: &CatalogueController<S>,
    index: usize,
) -> Result<&saveur::models::Recipe> {
    if let Some(error) = controller.last_error() {
        bail!("fetch failed: {error}");
    }
    controller
        .recipe_at(index.saturating_sub(1))
        .with_context(|| format!("no recipe at position {index} on this page"))
}
