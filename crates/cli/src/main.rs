//! Pocket Shop CLI - shop from the terminal.
//!
//! The CLI plays the part of one browser: all shopper state (accounts,
//! session, cart, pending action) lives in a single JSON file.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! shop-cli catalog --search watch --category electronics
//! shop-cli show p5
//!
//! # Accounts
//! shop-cli signup -e ada@example.com -p hunter2
//! shop-cli login -e ada@example.com -p hunter2
//! shop-cli whoami
//! shop-cli logout
//!
//! # Cart (positions are 1-based, as printed by `cart list`)
//! shop-cli cart add p1
//! shop-cli cart qty 1 3
//! shop-cli cart list
//! shop-cli cart checkout
//! ```
//!
//! # Environment Variables
//!
//! - `SHOP_STORE_PATH` - State file (default: `pocket-shop.json`), overridden by `--store`
//! - `RUST_LOG` - Log filter (default: `warn`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use pocket_shop_core::Category;
use pocket_shop_storefront::catalog::Catalog;
use pocket_shop_storefront::storage::FileStore;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "shop-cli")]
#[command(author, version, about = "Pocket Shop from the command line")]
struct Cli {
    /// JSON file holding the shopper's state
    #[arg(long, env = "SHOP_STORE_PATH", default_value = "pocket-shop.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products, optionally filtered
    Catalog {
        /// Case-insensitive text to find in name or description
        #[arg(short, long, default_value = "")]
        search: String,

        /// Only this category (clothes, electronics, handmade)
        #[arg(short, long)]
        category: Option<Category>,
    },
    /// Show one product with related products
    Show {
        /// Product ID, e.g. p1
        id: String,
    },
    /// Create an account and sign in
    Signup {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Sign in
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Print the signed-in email
    Whoami,
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print cart lines and total
    List,
    /// Add one unit of a product
    Add {
        /// Product ID, e.g. p1
        id: String,
    },
    /// Remove the line at a position
    Remove {
        /// 1-based position from `cart list`
        position: usize,
    },
    /// Set the quantity of the line at a position
    Qty {
        /// 1-based position from `cart list`
        position: usize,

        /// New quantity; anything below 1 or not a number becomes 1
        #[arg(allow_hyphen_values = true)]
        quantity: String,
    },
    /// Empty the cart
    Clear,
    /// Place the demo order
    Checkout,
}

fn main() {
    let _ = dotenvy::dotenv();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => print(&output),
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

#[allow(clippy::print_stdout)]
fn print(output: &str) {
    if !output.is_empty() {
        println!("{output}");
    }
}

fn run(cli: Cli) -> Result<String, CliError> {
    let catalog = Catalog::demo()?;
    let path = cli.store;

    match cli.command {
        Commands::Catalog { search, category } => Ok(commands::catalog::list(&catalog, &search, category)),
        Commands::Show { id } => commands::catalog::show(&catalog, &id),
        Commands::Signup { email, password } => mutate(&path, |store| {
            commands::account::signup(store, &catalog, &email, &password)
        }),
        Commands::Login { email, password } => mutate(&path, |store| {
            commands::account::login(store, &catalog, &email, &password)
        }),
        Commands::Logout => mutate(&path, |store| Ok(commands::account::logout(store))),
        Commands::Whoami => Ok(commands::account::whoami(&FileStore::open(&path)?)),
        Commands::Cart { action } => match action {
            CartAction::List => Ok(commands::cart::list(&mut FileStore::open(&path)?)),
            CartAction::Add { id } => mutate(&path, |store| commands::cart::add(store, &catalog, &id)),
            CartAction::Remove { position } => {
                mutate(&path, |store| commands::cart::remove(store, position))
            }
            CartAction::Qty { position, quantity } => mutate(&path, |store| {
                commands::cart::set_quantity(store, position, &quantity)
            }),
            CartAction::Clear => mutate(&path, |store| Ok(commands::cart::clear(store))),
            CartAction::Checkout => mutate(&path, commands::cart::checkout),
        },
    }
}

/// Run a command against the state file and save it if the command succeeds.
///
/// A failed command leaves the file as it was.
fn mutate<F>(path: &Path, command: F) -> Result<String, CliError>
where
    F: FnOnce(&mut FileStore) -> Result<String, CliError>,
{
    let mut store = FileStore::open(path)?;
    let output = command(&mut store)?;
    store.save()?;
    tracing::debug!(path = %store.path().display(), "State saved");
    Ok(output)
}
