use log::{debug, info, warn};
use std::fs;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::favorites::FavoritesLedger;
use super::record::{Record, RecordParser};

/// Result of loading the catalog file.
///
/// The two flags are non-fatal warnings: a missing catalog file and a
/// file that yielded no usable records both leave the application
/// running with an empty collection.
pub struct CatalogReport {
    pub records: Vec<Record>,
    pub file_missing: bool,
    pub no_records: bool,
}

impl CatalogReport {
    /// User-facing warning text, if the load produced one
    pub fn warning(&self, catalog_file: &Path) -> Option<String> {
        if self.file_missing {
            Some(format!("Catalog file '{}' was not found.", catalog_file.display()))
        } else if self.no_records {
            Some(format!(
                "Catalog file '{}' is empty or contains no valid records.",
                catalog_file.display()
            ))
        } else {
            None
        }
    }
}

/// Load the catalog: parse every line, mark favorites through the
/// ledger, and keep only records whose file exists under `base_dir`.
///
/// Order follows the catalog file. Malformed lines are skipped
/// silently; records pointing at missing files are dropped from the
/// view but stay in the backing file. Calling this twice without
/// intervening file changes yields an identical sequence.
pub fn load_catalog(
    catalog_file: &Path,
    base_dir: &Path,
    ledger: &FavoritesLedger,
) -> CatalogReport {
    let contents = match fs::read_to_string(catalog_file) {
        Ok(contents) => contents,
        Err(e) => {
            warn!("Catalog file {} not readable: {}", catalog_file.display(), e);
            return CatalogReport {
                records: Vec::new(),
                file_missing: true,
                no_records: true,
            };
        }
    };

    let parser = RecordParser::new();
    let folded_favorites = ledger.folded_set();

    let mut parsed = 0usize;
    let mut records = Vec::new();
    for line in contents.lines() {
        let Some(mut record) = parser.parse_line(line) else {
            continue;
        };
        parsed += 1;

        if !base_dir.join(&record.filename).is_file() {
            debug!("Dropping '{}': file {} does not exist", record.name, record.filename);
            continue;
        }

        record.favorite =
            folded_favorites.contains(&super::filter::fold_diacritics(&record.name));
        records.push(record);
    }

    info!(
        "Loaded {} records ({} visible) from {}",
        parsed,
        records.len(),
        catalog_file.display()
    );

    CatalogReport {
        no_records: parsed == 0,
        file_missing: false,
        records,
    }
}

/// New-entry form input, as submitted by the user
pub struct NewEntry {
    pub name: String,
    /// Comma-separated, as typed
    pub categories: String,
    pub source: String,
    /// The file to catalog; copied into the base directory
    pub file_path: PathBuf,
}

/// Failure modes of the new-entry path
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("the {0} field is required")]
    EmptyField(&'static str),
    #[error("the {0} field contains characters the catalog format cannot store")]
    UnstorableField(&'static str),
    #[error("the selected file has no usable name")]
    BadFilePath,
    #[error("failed to append to the catalog file")]
    Append(#[source] std::io::Error),
    #[error("the entry was added to the catalog, but copying the file failed")]
    CopyFailed(#[source] std::io::Error),
}

/// The one unescapable ambiguity of the line format: a field holding a
/// bracket, a newline, or a later field label would not parse back.
/// Such fields are rejected at write time; reads stay lenient.
fn check_field(label: &'static str, value: &str) -> Result<(), EntryError> {
    if value.trim().is_empty() {
        return Err(EntryError::EmptyField(label));
    }
    let forbidden = ["\n", "\r", "[", "]", ", categories: ", ", source: ", ", filename: "];
    if forbidden.iter().any(|f| value.contains(f)) {
        return Err(EntryError::UnstorableField(label));
    }
    Ok(())
}

/// Append one record line to the catalog file, then copy the selected
/// file into the base directory under its original base filename.
///
/// All four fields are validated before any file I/O. A copy failure
/// is reported but the already-appended catalog line is not rolled
/// back; the entry stays invisible until the file appears.
pub fn append_entry(
    catalog_file: &Path,
    base_dir: &Path,
    entry: &NewEntry,
) -> Result<Record, EntryError> {
    if entry.file_path.as_os_str().is_empty() {
        return Err(EntryError::EmptyField("file"));
    }
    check_field("name", &entry.name)?;
    check_field("categories", &entry.categories)?;
    check_field("source", &entry.source)?;

    let filename = entry
        .file_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or(EntryError::BadFilePath)?
        .to_string();
    check_field("file", &filename)?;

    let record = Record {
        name: entry.name.trim().to_string(),
        categories: entry
            .categories
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect(),
        source: entry.source.trim().to_string(),
        filename,
        favorite: false,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(catalog_file)
        .map_err(EntryError::Append)?;
    writeln!(file, "{}", record.to_line()).map_err(EntryError::Append)?;

    info!("Appended '{}' to {}", record.name, catalog_file.display());

    let destination = base_dir.join(&record.filename);
    if destination != entry.file_path {
        fs::copy(&entry.file_path, &destination).map_err(EntryError::CopyFailed)?;
        info!("Copied {} to {}", entry.file_path.display(), destination.display());
    }

    Ok(record)
}
