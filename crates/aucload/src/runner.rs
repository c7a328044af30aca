//! The per-run driver: the file loop, error policies and the registry
//! lifecycle.
//!
//! Records are deserialized one at a time out of the file's `Items` array so
//! that a bad record can be attributed to its position and skipped without
//! throwing away its neighbors.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result as AnyResult};
use log::{debug, error, info, warn};
use serde::Deserialize;
use serde_json::value::RawValue;

use aucload_types::ItemRecord;

use crate::config::{Config, ErrorPolicy};
use crate::error::{FileError, RecordError};
use crate::normalize::{normalize_item, NormalizedItem};
use crate::registry::{MergePolicy, UserRegistry};
use crate::sink::OutputSet;

/// Counters accumulated over one run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RunStats {
    pub files_converted: u64,
    pub files_failed: u64,
    /// Arguments that were not `.json` files and were never opened.
    pub files_ignored: u64,
    pub items_converted: u64,
    pub records_skipped: u64,
    pub item_rows: u64,
    pub user_rows: u64,
    pub category_rows: u64,
    pub bid_rows: u64,
}

/// A listing archive: a top-level mapping with the records under `Items`.
///
/// Records are kept raw so each one can be deserialized, and reported on,
/// individually.
#[derive(Deserialize)]
struct ListingFile<'a> {
    #[serde(rename = "Items", borrow)]
    items: Vec<&'a RawValue>,
}

/// Runs the whole conversion described by `config`.
///
/// The Users relation is written only after every input file has been
/// handled; an aborted run leaves `Users.dat` untouched.
pub fn run(config: &Config) -> AnyResult<RunStats> {
    let mut stats = RunStats::default();
    let mut sinks = OutputSet::open(&config.output_dir)?;
    let mut registry = UserRegistry::new(MergePolicy::LastWriteWins);

    for path in &config.paths {
        if !is_listing_path(path) {
            debug!("ignoring '{}': not a .json listing archive", path.display());
            stats.files_ignored += 1;
            continue;
        }
        match process_file(path, &mut sinks, &mut registry, config.record_errors, &mut stats) {
            Ok(converted) => {
                info!("converted {converted} items from '{}'", path.display());
                stats.files_converted += 1;
            }
            Err(error) => match config.file_errors {
                ErrorPolicy::Abort => {
                    return Err(anyhow::Error::new(error)
                        .context(format!("failed to convert '{}'", path.display())));
                }
                ErrorPolicy::Skip => {
                    error!("skipping '{}': {error}", path.display());
                    stats.files_failed += 1;
                }
            },
        }
        sinks.flush().context("failed to flush output files")?;
    }

    sinks
        .write_users(registry.into_rows())
        .context("failed to write the Users relation")?;
    sinks.flush().context("failed to flush output files")?;

    stats.item_rows = sinks.items.rows();
    stats.user_rows = sinks.users.rows();
    stats.category_rows = sinks.categories.rows();
    stats.bid_rows = sinks.bids.rows();

    info!(
        "run complete: {} items from {} files; wrote {} item rows, {} category rows, \
         {} bid rows, {} user rows",
        stats.items_converted,
        stats.files_converted,
        stats.item_rows,
        stats.category_rows,
        stats.bid_rows,
        stats.user_rows,
    );
    if stats.records_skipped > 0 || stats.files_failed > 0 {
        warn!(
            "skipped {} records and {} whole files",
            stats.records_skipped, stats.files_failed
        );
    }

    Ok(stats)
}

/// Converts one archive, returning the number of items committed from it.
fn process_file(
    path: &Path,
    sinks: &mut OutputSet,
    registry: &mut UserRegistry,
    record_policy: ErrorPolicy,
    stats: &mut RunStats,
) -> Result<u64, FileError> {
    let text = fs::read_to_string(path).map_err(FileError::read)?;
    let listing: ListingFile = serde_json::from_str(&text).map_err(FileError::parse)?;

    let mut converted = 0;
    for (index, &raw) in listing.items.iter().enumerate() {
        let event_number = index as u64 + 1;
        match convert_record(raw, event_number) {
            Ok(item) => {
                sinks.commit(&item).map_err(FileError::write)?;
                for (user_id, profile) in item.users {
                    registry.upsert(user_id, profile);
                }
                converted += 1;
                stats.items_converted += 1;
            }
            Err(error) => match record_policy {
                ErrorPolicy::Abort => return Err(error),
                ErrorPolicy::Skip => {
                    warn!("skipping record in '{}': {error}", path.display());
                    stats.records_skipped += 1;
                }
            },
        }
    }
    Ok(converted)
}

/// Deserializes and normalizes one raw record.  Nothing is written here;
/// the caller commits the result, so a failure anywhere in the record
/// leaves no partial rows.
fn convert_record(raw: &RawValue, event_number: u64) -> Result<NormalizedItem, FileError> {
    let record: ItemRecord = serde_json::from_str(raw.get()).map_err(|error| {
        FileError::record(
            event_number,
            None,
            raw.get(),
            RecordError::deserialize(&error),
        )
    })?;
    let item_id = record.item_id.clone();
    normalize_item(record).map_err(|error| FileError::record(event_number, item_id, raw.get(), error))
}

/// Only `.json` arguments are listing archives; everything else is ignored
/// rather than rejected, so globs over mixed directories stay usable.
fn is_listing_path(path: &Path) -> bool {
    path.extension().is_some_and(|extension| extension == "json")
}

#[cfg(test)]
mod test {
    use super::is_listing_path;
    use std::path::Path;

    #[test]
    fn only_json_files_are_listings() {
        assert!(is_listing_path(Path::new("ebay/items-0.json")));
        assert!(!is_listing_path(Path::new("ebay/items-0.json.bak")));
        assert!(!is_listing_path(Path::new("notes.txt")));
        assert!(!is_listing_path(Path::new("json")));
    }
}
