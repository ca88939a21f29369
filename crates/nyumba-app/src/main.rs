//! Nyumba application binary - composition root.
//!
//! 1. Parse CLI args and load configuration from TOML
//! 2. Build the property assistant (local, or remote with local fallback)
//! 3. Run the requested command, by default the interactive chat loop

mod cli;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use nyumba_chat::{ChatSession, FilterExtractor, PropertyAssistant, SmartSearch, SubmitOutcome};
use nyumba_core::types::{FilterRecord, PropertyType};
use nyumba_core::NyumbaConfig;
use nyumba_storage::{
    seed_users, FavoritesStore, PropertyQuery, PropertyStore, SqliteKeyValueStore,
};

use cli::{CliArgs, Command, FavoritesAction};

/// Expand ~ to home directory in a path string.
fn resolve_data_dir(data_dir: &str) -> PathBuf {
    if data_dir.starts_with("~/") || data_dir.starts_with("~\\") {
        #[cfg(target_os = "windows")]
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string());
        #[cfg(not(target_os = "windows"))]
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(&data_dir[2..])
    } else {
        PathBuf::from(data_dir)
    }
}

fn open_favorites(
    config: &NyumbaConfig,
) -> Result<FavoritesStore<SqliteKeyValueStore>, Box<dyn std::error::Error>> {
    let data_dir = resolve_data_dir(&config.general.data_dir);
    let db_path = data_dir.join(&config.storage.favorites_db);
    let kv = SqliteKeyValueStore::open(&db_path)?;
    tracing::debug!(path = %db_path.display(), "Favorites database opened");
    Ok(FavoritesStore::load_with_key(kv, &config.storage.favorites_key)?)
}

fn print_matches(store: &PropertyStore, filters: &FilterRecord) {
    if let Some(summary) = render::filters_summary(filters) {
        println!("Filters: {}", summary);
    }
    let query = PropertyQuery::from_filters(filters.clone()).only_available();
    println!("{}", render::listing_block(&store.search(&query)));
}

async fn run_chat(
    config: &NyumbaConfig,
    store: &PropertyStore,
) -> Result<(), Box<dyn std::error::Error>> {
    let assistant = PropertyAssistant::from_config(&config.assistant);
    tracing::info!(remote = assistant.has_remote(), "Property assistant ready");

    let mut session = ChatSession::new(Arc::new(assistant));
    if config.chat.show_greeting {
        session = session.with_greeting(config.chat.greeting.clone());
    }
    if let Some(greeting) = session.greeting() {
        println!("{}", greeting);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            break;
        }
        match session.submit(input).await? {
            SubmitOutcome::Ignored => continue,
            SubmitOutcome::Busy => println!("Still working on your last message..."),
            SubmitOutcome::Replied { message, filters } => {
                println!("{}", message.content);
                if let Some(filters) = filters {
                    print_matches(store, &filters);
                }
            }
        }
    }

    tracing::info!(messages = session.history().len(), "Chat session ended");
    Ok(())
}

fn run_list(
    store: &PropertyStore,
    landlord: Option<&str>,
    kind: Option<&str>,
    available: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let kind = match kind {
        Some(name) => Some(
            PropertyType::parse(name).ok_or_else(|| format!("unknown property type: {}", name))?,
        ),
        None => None,
    };

    let mut properties: Vec<_> = match landlord {
        Some(id) => {
            println!("{}", render::owner_heading(&seed_users(), id));
            store.by_landlord(id)
        }
        None => store.all().iter().collect(),
    };
    if let Some(kind) = kind {
        properties.retain(|p| p.property_type == kind);
    }
    if available {
        properties.retain(|p| p.is_available);
    }
    println!("{}", render::listing_block(&properties));
    Ok(())
}

fn run_favorites(
    config: &NyumbaConfig,
    store: &PropertyStore,
    action: FavoritesAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut favorites = open_favorites(config)?;
    match action {
        FavoritesAction::Toggle { id } => {
            if store.get(&id).is_none() {
                tracing::warn!(id = %id, "Toggling favorite for unknown property");
            }
            let added = favorites.toggle(&id)?;
            println!("{} {}", if added { "Added" } else { "Removed" }, id);
        }
        FavoritesAction::List => {
            let properties: Vec<_> = favorites
                .ids()
                .iter()
                .filter_map(|id| store.get(id))
                .collect();
            println!("{}", render::listing_block(&properties));
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let mut config = NyumbaConfig::load_or_default(&config_file);
    if let Some(dir) = args.resolve_data_dir() {
        config.general.data_dir = dir;
    }
    if let Some(level) = args.resolve_log_level() {
        config.general.log_level = level;
    }

    // Tracing. RUST_LOG wins over the configured level.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
        )
        .init();

    tracing::info!("Starting Nyumba v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    let store = PropertyStore::seeded();
    tracing::debug!(count = store.len(), "Property store seeded");

    match args.command() {
        Command::Chat => run_chat(&config, &store).await?,
        Command::Search { text } => {
            let filters = FilterExtractor::new().extract(&text.join(" "));
            print_matches(&store, &filters);
        }
        Command::SmartSearch { text } => {
            let filters = SmartSearch::new().apply(&text.join(" "), &FilterRecord::default());
            print_matches(&store, &filters);
        }
        Command::List {
            landlord,
            kind,
            available,
        } => run_list(&store, landlord.as_deref(), kind.as_deref(), available)?,
        Command::Favorites { action } => run_favorites(&config, &store, action)?,
    }

    Ok(())
}
