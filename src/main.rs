//! countrydex - look up countries from the command line
//!
//! Each search prints the matching countries and refreshes that category's
//! cached result on disk. `countrydex cache` shows what is stored.

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use countrydex::cache::Snapshot;
use countrydex::cli::{Cli, Command, StartupConfig};
use countrydex::{
    Category, Country, FileStore, KeyValueStore, MemoryStore, PersistenceAdapter, QueryService,
};

/// Sends log output to stderr, filtered by `RUST_LOG` (default `warn`)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Picks the on-disk store, falling back to memory when no cache dir exists
fn open_storage(config: &StartupConfig) -> Box<dyn KeyValueStore> {
    if let Some(dir) = &config.cache_dir {
        return Box::new(FileStore::with_dir(dir.clone()));
    }
    match FileStore::new() {
        Some(store) => Box::new(store),
        None => {
            warn!("no cache directory available, results will not be persisted");
            Box::new(MemoryStore::new())
        }
    }
}

/// Formats one country as a single line
fn country_line(country: &Country) -> String {
    let mut line = String::new();
    if let Some(flag) = country.flag() {
        line.push_str(flag);
        line.push(' ');
    }
    line.push_str(country.common_name().unwrap_or("(unnamed)"));
    if let Some(code) = country.cca3() {
        line.push_str(&format!(" ({})", code));
    }
    if let Some(capital) = country.capital() {
        line.push_str(&format!("  capital: {}", capital));
    }
    if let Some(region) = country.region() {
        line.push_str(&format!("  region: {}", region));
    }
    if let Some(population) = country.population() {
        line.push_str(&format!("  population: {}", population));
    }
    line
}

fn print_countries(countries: &[Country]) {
    if countries.is_empty() {
        println!("No countries found.");
        return;
    }
    for country in countries {
        println!("{}", country_line(country));
    }
}

fn print_snapshot(snapshot: Option<Snapshot>) {
    let Some(snapshot) = snapshot else {
        println!("Cache is empty.");
        return;
    };
    println!("Saved at {}", snapshot.saved_at.to_rfc3339());
    for category in Category::all() {
        let slot = snapshot.store.get(*category);
        if slot.is_empty() {
            println!("\n[{}] (empty)", category.name());
            continue;
        }
        println!(
            "\n[{}] \"{}\" ({} results)",
            category.name(),
            slot.term,
            slot.countries.len()
        );
        for country in &slot.countries {
            println!("  {}", country_line(country));
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    let config = StartupConfig::from_cli(&cli);
    let storage = open_storage(&config);

    if cli.command == Command::Cache {
        let adapter = PersistenceAdapter::new(storage, config.service.storage_key.clone());
        print_snapshot(adapter.load_snapshot());
        return;
    }

    let service = QueryService::new(&config.service, storage);
    match cli.command {
        Command::Capital { term } => print_countries(&service.search_by_capital(&term).await),
        Command::Country { term } => {
            print_countries(&service.search_by_country_name(&term).await)
        }
        Command::Region { region } => print_countries(&service.search_by_region(region).await),
        Command::Alpha { code } => match service.lookup_by_alpha_code(&code).await {
            Some(country) => println!("{}", country_line(&country)),
            None => println!("No country with code '{}'.", code),
        },
        Command::Cache => {}
    }
}
