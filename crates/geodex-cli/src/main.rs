//! Geodex CLI — terminal country catalog browser

use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use crossbeam_channel::Receiver;

use geodex::catalog::Catalog;
use geodex::data::{AuthStore, CountriesCache, CountryFilter, FavoritesStore, FileStorage};
use geodex::notify::{
    ChannelSink, Notification, NotificationCenter, NotificationSink, NotificationVariant,
};
use geodex::providers::RestCountriesProvider;

#[derive(Parser)]
#[command(name = "geodex", about = "Terminal country catalog browser", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List countries, optionally filtered
    List {
        /// Only countries in this region (e.g., "Europe")
        #[arg(long)]
        region: Option<String>,
        /// Case-insensitive name search
        #[arg(long)]
        search: Option<String>,
    },
    /// Show details for a single country by two-letter code
    Show {
        /// Two-letter country code (e.g., "DE")
        code: String,
    },
    /// Toggle a country in the favorites set
    Favorite {
        /// Two-letter country code
        code: String,
    },
    /// List favorited countries
    Favorites,
    /// Log in with username and password
    Login { username: String, password: String },
    /// Log out of the current session
    Logout,
    /// Drop the cached country list
    ClearCache,
}

fn main() {
    let cli = Cli::parse();

    let storage = match FileStorage::new() {
        Ok(s) => Arc::new(s),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    // Stores dispatch into a channel; toasts are drained and printed after
    // the command finishes (and the debouncer has flushed).
    let (tx, rx) = crossbeam_channel::unbounded();
    let sink: Arc<dyn NotificationSink> =
        Arc::new(NotificationCenter::new(Arc::new(ChannelSink::new(tx))));

    let exit_code = run(cli.command, storage, Arc::clone(&sink));

    drop(sink);
    print_toasts(&rx);
    process::exit(exit_code);
}

fn run(command: Command, storage: Arc<FileStorage>, sink: Arc<dyn NotificationSink>) -> i32 {
    match command {
        Command::List { region, search } => {
            let mut catalog = match open_catalog(storage, sink) {
                Some(c) => c,
                None => return 1,
            };
            let filter = CountryFilter::new()
                .search(search.unwrap_or_default())
                .region(region.unwrap_or_default());
            let countries = catalog.search(&filter);
            if countries.is_empty() {
                println!("No countries found.");
                return 0;
            }
            for country in &countries {
                println!(
                    "{}  {:<30} {:<12} {:>12}",
                    country.cca2, country.name.common, country.region, country.population
                );
            }
            0
        }

        Command::Show { code } => {
            let mut catalog = match open_catalog(storage, sink) {
                Some(c) => c,
                None => return 1,
            };
            match catalog.country(&code) {
                Ok(Some(country)) => {
                    println!("{} ({})", country.name.common, country.cca2);
                    if let Some(official) = &country.name.official {
                        println!("  Official:   {official}");
                    }
                    println!("  Region:     {}", country.region);
                    if let Some(subregion) = &country.subregion {
                        println!("  Subregion:  {subregion}");
                    }
                    if !country.capital.is_empty() {
                        println!("  Capital:    {}", country.capital.join(", "));
                    }
                    println!("  Population: {}", country.population);
                    if let Some(tld) = &country.tld {
                        if !tld.is_empty() {
                            println!("  TLD:        {}", tld.join(", "));
                        }
                    }
                    if let Some(currencies) = &country.currencies {
                        let names: Vec<&str> =
                            currencies.values().map(|c| c.name.as_str()).collect();
                        if !names.is_empty() {
                            println!("  Currencies: {}", names.join(", "));
                        }
                    }
                    if let Some(languages) = &country.languages {
                        let names: Vec<&str> = languages.values().map(String::as_str).collect();
                        if !names.is_empty() {
                            println!("  Languages:  {}", names.join(", "));
                        }
                    }
                    if let Some(borders) = &country.borders {
                        if !borders.is_empty() {
                            println!("  Borders:    {}", borders.join(", "));
                        }
                    }
                    0
                }
                Ok(None) => {
                    eprintln!("No country with code {code:?}");
                    1
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    1
                }
            }
        }

        Command::Favorite { code } => {
            let mut catalog = match open_catalog(Arc::clone(&storage), Arc::clone(&sink)) {
                Some(c) => c,
                None => return 1,
            };
            // Resolve the display name for the toast; any code toggles fine.
            let display_name = match catalog.country(&code) {
                Ok(Some(country)) => Some(country.name.common),
                _ => None,
            };
            let mut favorites = FavoritesStore::load(storage, sink);
            favorites.toggle(&code, display_name.as_deref());
            0
        }

        Command::Favorites => {
            let storage_dyn: Arc<dyn geodex::data::StorageBackend> = storage.clone();
            let favorites = FavoritesStore::load(storage_dyn, Arc::clone(&sink));
            if favorites.is_empty() {
                println!("No favorites yet.");
                return 0;
            }
            // Names come from the cache when available
            let cache = CountriesCache::load(storage);
            for code in favorites.codes() {
                match cache.get(code) {
                    Some(country) => println!("{}  {}", code, country.name.common),
                    None => println!("{code}"),
                }
            }
            0
        }

        Command::Login { username, password } => {
            let mut auth = AuthStore::load(storage, sink);
            match auth.login(&username, &password) {
                Ok(()) => 0,
                Err(e) => {
                    eprintln!("Error: {e}");
                    1
                }
            }
        }

        Command::Logout => {
            let mut auth = AuthStore::load(storage, sink);
            auth.logout();
            0
        }

        Command::ClearCache => {
            let mut cache = CountriesCache::load(storage);
            cache.clear();
            println!("Country cache cleared.");
            0
        }
    }
}

fn open_catalog(storage: Arc<FileStorage>, sink: Arc<dyn NotificationSink>) -> Option<Catalog> {
    let provider = match RestCountriesProvider::new() {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {e}");
            return None;
        }
    };
    let cache = CountriesCache::load(storage);
    Some(Catalog::new(Box::new(provider), cache, sink))
}

/// Print queued notifications as one-line toasts
fn print_toasts(rx: &Receiver<Notification>) {
    while let Ok(notification) = rx.try_recv() {
        let symbol = match notification.variant {
            NotificationVariant::Success => "✓",
            NotificationVariant::Error => "✗",
            NotificationVariant::Info => "•",
            NotificationVariant::Warning => "!",
        };
        println!("{symbol} {}", notification.message);
    }
}
