//! eCOM Leaderboard CLI - store registry, tracking and ranking views.
//!
//! # Usage
//!
//! ```bash
//! # Register a store
//! lb-cli store register --id 84113922 --name "Moda Tropical RD" \
//!     --email ventas@modatropical.com --url https://modatropical.com
//!
//! # Report a purchase the way the tracking snippet does
//! lb-cli track purchase --api-key 84113922 --order-id ORDER-1 --amount 2500
//!
//! # Show the leaderboard sorted by growth
//! lb-cli leaderboard --sort growth
//!
//! # Export every store to CSV
//! lb-cli export --output stores.csv
//! ```
//!
//! # Commands
//!
//! - `store` - Register, edit, delete, list and inspect stores
//! - `track` - Report purchases and check the tracking connection
//! - `leaderboard` - Podium and ranked table
//! - `summary` - Global counters and monthly revenue
//! - `settings rate` - Show or change the USD to DOP exchange rate
//! - `export` - CSV export of every store
//! - `reset` - Delete all data and reseed the demo stores
//!
//! # Environment Variables
//!
//! - `LEADERBOARD_DATA_DIR`, `LEADERBOARD_SEED_DEMO`, `LEADERBOARD_EXCHANGE_RATE` -
//!   see [`leaderboard_storage::StorageConfig`]
//! - `LEADERBOARD_LOG_JSON` - Emit JSON log lines instead of text
//! - `RUST_LOG` - Log filter (default: `leaderboard_cli=info,leaderboard_storage=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use leaderboard_core::{Email, ExchangeRate, NewStore, OrderId, SortKey, StoreId, VerificationStatus};
use leaderboard_storage::{DataStore, StorageConfig};
use rust_decimal::Decimal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;
mod format;

#[derive(Parser)]
#[command(name = "lb-cli")]
#[command(author, version, about = "eCOM Leaderboard CLI")]
struct Cli {
    /// Directory holding the JSON documents (overrides `LEADERBOARD_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage registered stores
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
    /// Tracking-snippet events
    Track {
        #[command(subcommand)]
        action: TrackAction,
    },
    /// Show the podium and ranked table
    Leaderboard {
        /// Ranking criterion (`performance`, `orders`, `growth`)
        #[arg(short, long, default_value_t = SortKey::Performance)]
        sort: SortKey,
    },
    /// Show total stores, total orders and monthly revenue
    Summary,
    /// Leaderboard settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Export every store to CSV
    Export {
        /// Output file (default: ecom-leaderboard-stores-YYYY-MM-DD.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Delete all data and reseed the demo stores
    Reset,
}

#[derive(Subcommand)]
enum StoreAction {
    /// Register a new store
    Register {
        /// Store ID, also used as the tracking API key
        #[arg(long)]
        id: StoreId,

        /// Store display name
        #[arg(short, long)]
        name: String,

        /// Owner email address
        #[arg(short, long)]
        email: Email,

        /// Store website
        #[arg(short, long)]
        url: String,

        /// Native currency (`DOP` or `USD`)
        #[arg(short, long, default_value = "DOP")]
        currency: String,
    },
    /// Edit a store
    Update {
        id: StoreId,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        email: Option<Email>,

        #[arg(short, long)]
        url: Option<String>,

        #[arg(short, long)]
        currency: Option<String>,

        /// `verified` or `unverified`
        #[arg(short, long)]
        status: Option<VerificationStatus>,
    },
    /// Delete a store and all of its transactions
    Delete { id: StoreId },
    /// List every store
    List,
    /// Show the dashboard of one store
    Show { id: StoreId },
}

#[derive(Subcommand)]
enum TrackAction {
    /// Report a purchase
    Purchase {
        /// API key configured in the snippet (the store ID)
        #[arg(short = 'k', long)]
        api_key: String,

        #[arg(short, long)]
        order_id: OrderId,

        /// Order total in the store's native currency
        #[arg(short, long)]
        amount: Decimal,

        /// Page the purchase was made on
        #[arg(short, long)]
        url: Option<String>,
    },
    /// Check whether tracking events have arrived for a store
    Status { id: StoreId },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Show the exchange rate, or set it when a value is given
    Rate {
        /// DOP per USD, must be positive
        value: Option<Decimal>,
    },
}

fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "leaderboard_cli=info,leaderboard_storage=info".into());

    let json = std::env::var_os("LEADERBOARD_LOG_JSON").is_some();
    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_target(false));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = StorageConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config = config.with_data_dir(dir);
    }
    let mut store = DataStore::open(&config)?;

    match cli.command {
        Commands::Store { action } => match action {
            StoreAction::Register {
                id,
                name,
                email,
                url,
                currency,
            } => commands::store::register(
                &mut store,
                NewStore {
                    id,
                    name,
                    email,
                    url,
                    currency: currency.as_str().into(),
                },
            )?,
            StoreAction::Update {
                id,
                name,
                email,
                url,
                currency,
                status,
            } => commands::store::update(
                &mut store,
                &id,
                commands::store::UpdateArgs {
                    name,
                    url,
                    email,
                    currency,
                    status,
                },
            )?,
            StoreAction::Delete { id } => commands::store::delete(&mut store, &id)?,
            StoreAction::List => commands::store::list(&store),
            StoreAction::Show { id } => commands::store::show(&store, &id)?,
        },
        Commands::Track { action } => match action {
            TrackAction::Purchase {
                api_key,
                order_id,
                amount,
                url,
            } => commands::track::purchase(&mut store, &api_key, order_id, amount, url)?,
            TrackAction::Status { id } => commands::track::status(&store, &id)?,
        },
        Commands::Leaderboard { sort } => commands::leaderboard::show(&store, sort),
        Commands::Summary => commands::leaderboard::summary(&store),
        Commands::Settings { action } => match action {
            SettingsAction::Rate { value } => {
                let rate = value.map(ExchangeRate::new).transpose()?;
                commands::settings::rate(&mut store, rate)?;
            }
        },
        Commands::Export { output } => commands::export::run(&store, output.as_deref())?,
        Commands::Reset => commands::reset::run(&mut store)?,
    }
    Ok(())
}
