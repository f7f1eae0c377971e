//! Loomi CLI - Browse the shop and manage a cart from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! loomi shop --category Kurtas --sort price-low-high --page 2
//!
//! # Same listing from a shop URL query string
//! loomi shop --query "category=Kurtas&sort=price-low-high&page=2"
//!
//! # Manage the cart (needs LOOMI_AUTH_TOKEN or --token)
//! loomi cart add 64f0c2 --quantity 2 --size m --color Red
//! loomi cart update <line-id> 3
//!
//! # Finish an order after the backend has created it
//! loomi complete-checkout <order-id> --payment online
//! ```
//!
//! # Commands
//!
//! - `shop` - Filtered, sorted, paginated product listing
//! - `categories` - Categories with product counts
//! - `cart` - Show or edit the cart
//! - `wishlist` - Show or edit the wishlist
//! - `orders` - Order history with delivery progress
//! - `contact` - Send the contact form
//! - `complete-checkout` - Confirm payment and clear the cart

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use loomi_core::{CartItemId, OrderId, PaymentMethod, ProductId};
use loomi_storefront::config::ConfigError;
use loomi_storefront::{ApiClient, StorefrontConfig};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod render;

use commands::{CommandError, Context};

#[derive(Parser)]
#[command(name = "loomi")]
#[command(author, version, about = "Loomi storefront on the command line")]
struct Cli {
    /// Backend API base URL (overrides `LOOMI_API_BASE_URL`)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Bearer token (overrides `LOOMI_AUTH_TOKEN`)
    #[arg(long, global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Shop(commands::shop::ShopArgs),
    /// List categories with product counts
    Categories,
    /// Show or edit the cart
    Cart {
        #[command(subcommand)]
        action: Option<CartAction>,
    },
    /// Show or edit the wishlist
    Wishlist {
        #[command(subcommand)]
        action: Option<WishlistAction>,
    },
    /// Show order history
    Orders,
    /// Send a message to the shop
    Contact {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        phone: Option<String>,

        #[arg(short, long)]
        message: String,
    },
    /// Confirm payment for a placed order and clear the cart
    CompleteCheckout {
        order_id: OrderId,

        /// `online` or `cod`
        #[arg(long, default_value = "cod")]
        payment: PaymentMethod,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a product
    Add {
        product_id: ProductId,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        #[arg(short, long)]
        size: Option<String>,

        #[arg(short, long)]
        color: Option<String>,
    },
    /// Set a line's quantity (0 removes it)
    Update {
        item_id: CartItemId,

        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line
    Remove { item_id: CartItemId },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// Add a product
    Add { product_id: ProductId },
    /// Remove a product
    Remove { product_id: ProductId },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    // Logs go to stderr; stdout carries command output.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "loomi_cli=info,loomi_storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

fn load_config(cli: &Cli) -> Result<StorefrontConfig, ConfigError> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(url) = &cli.api_url {
        config = config.with_base_url(url)?;
    }
    if let Some(token) = &cli.token {
        config = config.with_token(token)?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = load_config(&cli);
    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);
    init_tracing();

    let result = match config {
        Ok(config) => run(cli.command, config).await,
        Err(e) => Err(CommandError::Config(e)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            e.report();
            tracing::error!("{}", e.notice());
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, config: StorefrontConfig) -> Result<(), CommandError> {
    let client = ApiClient::new(&config)?;
    let ctx = Context { config, client };
    let mut out = io::stdout().lock();

    match command {
        Commands::Shop(args) => commands::shop::listing(&ctx, &args, &mut out).await?,
        Commands::Categories => commands::shop::categories(&ctx, &mut out).await?,
        Commands::Cart { action } => match action {
            None => commands::cart::show(&ctx, &mut out).await?,
            Some(CartAction::Add {
                product_id,
                quantity,
                size,
                color,
            }) => {
                commands::cart::add(
                    &ctx,
                    &product_id,
                    quantity,
                    size.as_deref(),
                    color.as_deref(),
                    &mut out,
                )
                .await?;
            }
            Some(CartAction::Update { item_id, quantity }) => {
                commands::cart::update(&ctx, &item_id, quantity, &mut out).await?;
            }
            Some(CartAction::Remove { item_id }) => {
                commands::cart::remove(&ctx, &item_id, &mut out).await?;
            }
            Some(CartAction::Clear) => commands::cart::clear(&ctx, &mut out).await?,
        },
        Commands::Wishlist { action } => match action {
            None => commands::wishlist::show(&ctx, &mut out).await?,
            Some(WishlistAction::Add { product_id }) => {
                commands::wishlist::add(&ctx, &product_id, &mut out).await?;
            }
            Some(WishlistAction::Remove { product_id }) => {
                commands::wishlist::remove(&ctx, &product_id, &mut out).await?;
            }
        },
        Commands::Orders => commands::orders::list(&ctx, &mut out).await?,
        Commands::Contact {
            name,
            email,
            phone,
            message,
        } => {
            commands::contact::send(&ctx, &name, &email, phone.as_deref(), &message, &mut out)
                .await?;
        }
        Commands::CompleteCheckout { order_id, payment } => {
            commands::checkout::complete(&ctx, &order_id, payment, &mut out).await?;
        }
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "loomi",
            "cart",
            "update",
            "line-1",
            "-1",
            "--token",
            "abc",
        ])
        .unwrap();
        assert_eq!(cli.token.as_deref(), Some("abc"));
        assert!(matches!(
            cli.command,
            Commands::Cart {
                action: Some(CartAction::Update { quantity: -1, .. })
            }
        ));
    }

    #[test]
    fn test_payment_method_flag() {
        let cli = Cli::try_parse_from([
            "loomi",
            "complete-checkout",
            "order-1",
            "--payment",
            "online",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::CompleteCheckout {
                payment: PaymentMethod::Online,
                ..
            }
        ));

        assert!(Cli::try_parse_from(["loomi", "complete-checkout", "o", "--payment", "card"]).is_err());
    }

    #[test]
    fn test_blank_ids_are_rejected() {
        assert!(Cli::try_parse_from(["loomi", "wishlist", "add", " "]).is_err());
    }
}
