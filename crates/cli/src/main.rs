//! Sports Jersey CLI - browse the catalog, manage the cart, place orders.
//!
//! # Usage
//!
//! ```bash
//! # List products (falls back to the built-in catalog when offline)
//! sj-cli products
//!
//! # Add two medium jerseys, then show the cart
//! sj-cli cart add prod7 --size M
//! sj-cli cart qty prod7 1 --size M
//! sj-cli cart show
//!
//! # Place the order
//! sj-cli checkout --name "Ada Obi" --email ada@example.com --payment pay_on_delivery
//!
//! # Look up an order
//! sj-cli order JS-1700000000000-123
//! ```
//!
//! # Commands
//!
//! - `products` - List the catalog
//! - `cart` - Show and edit the durable cart
//! - `checkout` - Place an order for the cart
//! - `order` - Show a placed order
//! - `contact` - Send a message to the store

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sports_jersey_core::PaymentMethod;
use sports_jersey_storefront::config::StorefrontConfig;
use sports_jersey_storefront::{AppError, AppState};

mod commands;

#[derive(Parser)]
#[command(name = "sj-cli")]
#[command(author, version, about = "Sports Jersey store CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the product catalog
    Products,
    /// Show and edit the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order for everything in the cart
    Checkout {
        /// Full name
        #[arg(short, long)]
        name: String,

        /// Email address for the confirmation
        #[arg(short, long)]
        email: String,

        /// Phone number
        #[arg(long)]
        phone: Option<String>,

        /// Delivery address
        #[arg(long)]
        address: Option<String>,

        #[arg(long)]
        city: Option<String>,

        #[arg(long)]
        zip_code: Option<String>,

        #[arg(long)]
        country: Option<String>,

        /// Payment method (`card`, `bank_transfer`, `pay_on_delivery`)
        #[arg(short, long)]
        payment: PaymentMethod,
    },
    /// Show a placed order
    Order {
        /// Order ID from the confirmation
        order_id: String,
    },
    /// Send a message to the store
    Contact {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        message: String,

        #[arg(long)]
        phone: Option<String>,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and totals
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID
        id: String,

        /// Size (ignored when size-aware carts are disabled)
        #[arg(short, long)]
        size: Option<String>,
    },
    /// Remove a product row
    Remove {
        id: String,

        #[arg(short, long)]
        size: Option<String>,
    },
    /// Change a row's quantity by a signed amount
    Qty {
        id: String,

        /// Amount to add; negative values decrease
        #[arg(allow_negative_numbers = true)]
        delta: i64,

        #[arg(short, long)]
        size: Option<String>,
    },
    /// Empty the cart
    Clear,
}

#[tokio::main]
#[allow(clippy::print_stderr)]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sports_jersey_storefront=info,sports_jersey_cli=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "Command failed");
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = StorefrontConfig::from_env()?;
    let state = AppState::new(config)?;

    match cli.command {
        Commands::Products => commands::products::list(&state).await?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state)?,
            CartAction::Add { id, size } => commands::cart::add(&state, &id, size.as_deref()).await?,
            CartAction::Remove { id, size } => commands::cart::remove(&state, &id, size.as_deref())?,
            CartAction::Qty { id, delta, size } => {
                commands::cart::change_quantity(&state, &id, size.as_deref(), delta)?;
            }
            CartAction::Clear => commands::cart::clear(&state)?,
        },
        Commands::Checkout {
            name,
            email,
            phone,
            address,
            city,
            zip_code,
            country,
            payment,
        } => {
            let customer = sports_jersey_storefront::api::CustomerDetails {
                name,
                email,
                phone,
                address,
                city,
                zip_code,
                country,
            };
            commands::checkout::place(&state, customer, payment).await?;
        }
        Commands::Order { order_id } => commands::order::show(&state, &order_id).await?,
        Commands::Contact {
            name,
            email,
            message,
            phone,
        } => {
            commands::contact::send(&state, name, email, message, phone).await?;
        }
    }
    Ok(())
}
