//! Cache command - load, change and dump the expiring cache

use crate::cache::{CacheEntry, ExpiringCache};
use crate::cli::args::{CacheAction, CacheArgs, OutputFormat};
use crate::config::Config;
use crate::db::FlatDb;
use crate::error::{FlatDbError, FlatDbResult};
use crate::ui::{self, UiContext};
use chrono::Duration;
use console::style;
use std::sync::Mutex;
use tracing::debug;

/// Execute the cache command
pub fn execute(args: CacheArgs, config: &Config) -> FlatDbResult<()> {
    let store = config.store_config()?;
    let db: FlatDb<ExpiringCache> =
        FlatDb::new(&store, ExpiringCache::FILENAME, ExpiringCache::TYPE_TAG);
    let mut cache = load(&db)?;

    match args.action {
        CacheAction::Put { key, value, ttl } => {
            let entry = Duration::try_seconds(ttl)
                .and_then(|ttl| CacheEntry::new(value, ttl))
                .ok_or(FlatDbError::InvalidTtl(ttl))?;
            cache.insert(key.clone(), entry);
            store.ensure_data_dir()?;
            dump(&db, cache)?;
            ui::step_ok(&UiContext::detect(), &format!("Stored {}", key));
        }
        CacheAction::Get { key } => {
            let entry = cache
                .get(&key)
                .ok_or_else(|| FlatDbError::KeyNotFound(key.clone()))?;
            println!("{}", entry.value);
        }
        CacheAction::Remove { key } => {
            cache
                .remove(&key)
                .ok_or_else(|| FlatDbError::KeyNotFound(key.clone()))?;
            dump(&db, cache)?;
            ui::step_ok(&UiContext::detect(), &format!("Removed {}", key));
        }
        CacheAction::List { format } => match format {
            OutputFormat::Table => print_table(&cache),
            OutputFormat::Json => print_json(&cache)?,
            OutputFormat::Plain => print_plain(&cache),
        },
        CacheAction::Prune => {
            let remaining = cache.len();
            store.ensure_data_dir()?;
            dump(&db, cache)?;
            ui::step_ok_detail(
                &UiContext::detect(),
                "Cache pruned",
                &format!("{} entries remain", remaining),
            );
        }
    }

    Ok(())
}

/// Load the cache; expired entries are already gone afterwards
fn load(db: &FlatDb<ExpiringCache>) -> FlatDbResult<ExpiringCache> {
    let mut cache = ExpiringCache::default();
    if db.load(&mut cache).should_abort() {
        return Err(FlatDbError::Unrecoverable {
            path: db.path().to_path_buf(),
        });
    }
    debug!("Loaded {} cache entries", cache.len());
    Ok(cache)
}

fn dump(db: &FlatDb<ExpiringCache>, cache: ExpiringCache) -> FlatDbResult<()> {
    let shared = Mutex::new(cache);
    if db.save(&shared)?.should_abort() {
        return Err(FlatDbError::Unrecoverable {
            path: db.path().to_path_buf(),
        });
    }
    Ok(())
}

fn print_table(cache: &ExpiringCache) {
    let ctx = UiContext::detect();

    if cache.is_empty() {
        ui::step_info(&ctx, "Cache is empty");
        return;
    }

    println!(
        "{:<24} {:<32} {:<20}",
        style("KEY").bold(),
        style("VALUE").bold(),
        style("EXPIRES").bold()
    );
    println!("{}", "-".repeat(76));

    for (key, entry) in cache.iter() {
        println!(
            "{:<24} {:<32} {:<20}",
            key,
            entry.value,
            entry.expires_at.format("%Y-%m-%d %H:%M:%S")
        );
    }

    println!();
    println!("Total: {} entries", cache.len());
}

fn print_json(cache: &ExpiringCache) -> FlatDbResult<()> {
    #[derive(serde::Serialize)]
    struct EntryJson<'a> {
        key: &'a str,
        value: &'a str,
        expires_at: String,
    }

    let entries: Vec<EntryJson<'_>> = cache
        .iter()
        .map(|(key, entry)| EntryJson {
            key,
            value: &entry.value,
            expires_at: entry.expires_at.to_rfc3339(),
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}

fn print_plain(cache: &ExpiringCache) {
    for (key, entry) in cache.iter() {
        println!("{}={}", key, entry.value);
    }
}
