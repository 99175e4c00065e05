//! Catalog loading
//!
//! Three sources, in order of preference:
//!
//! 1. Bundled JSON assets compiled into the binary (the normal path).
//! 2. A user-supplied directory with the same two JSON files.
//! 3. A published-sheet CSV export fetched over HTTP, used only when the
//!    bundled instrument list is empty (`remote` feature).
//!
//! The remote path never produces a silently empty catalog: parse
//! failures and empty payloads yield one synthetic fallback instrument
//! plus a logged diagnostic. Transport failures are surfaced as errors so
//! the caller can offer a retry.

use std::path::Path;

use tracing::{info, warn};

use crate::catalog::{CatalogStore, Instrument, InstrumentSet};
use crate::error::{CatalogError, LoadError};

/// Environment variable naming the published sheet to fall back to.
pub const ENV_SHEET_ID: &str = "INSTRUDEX_SHEET_ID";

const BUNDLED_SETS: &str = include_str!("../data/sets_overview.json");
const BUNDLED_INSTRUMENTS: &str = include_str!("../data/instruments.json");

/// Parse the catalog bundled with the crate.
pub fn load_bundled() -> Result<CatalogStore, CatalogError> {
    let sets: Vec<InstrumentSet> = serde_json::from_str(BUNDLED_SETS)?;
    let instruments: Vec<Instrument> = serde_json::from_str(BUNDLED_INSTRUMENTS)?;
    info!(
        sets = sets.len(),
        instruments = instruments.len(),
        "loaded bundled catalog"
    );
    Ok(CatalogStore::new(sets, instruments))
}

/// Load a catalog from a directory holding `sets_overview.json` and
/// `instruments.json`. An explicitly supplied source with no instruments
/// is an error, not a fallback.
pub fn load_from_dir(dir: &Path) -> Result<CatalogStore, CatalogError> {
    let sets_path = dir.join("sets_overview.json");
    let instruments_path = dir.join("instruments.json");

    let sets: Vec<InstrumentSet> =
        serde_json::from_str(&std::fs::read_to_string(&sets_path)?)?;
    let instruments: Vec<Instrument> =
        serde_json::from_str(&std::fs::read_to_string(&instruments_path)?)?;

    if instruments.is_empty() {
        return Err(LoadError::EmptySource {
            source_name: instruments_path.display().to_string(),
        }
        .into());
    }

    info!(dir = %dir.display(), instruments = instruments.len(), "loaded catalog directory");
    Ok(CatalogStore::new(sets, instruments))
}

/// The synthetic instrument substituted when the remote source yields
/// nothing usable. The session never ends up with zero instruments
/// silently.
pub fn fallback_instrument() -> Instrument {
    Instrument {
        id: "fallback-1".into(),
        name: "Scalpel".into(),
        category: "Cutting".into(),
        description: "A small and extremely sharp bladed instrument used for surgery, \
                      anatomical dissection, and various arts and crafts."
            .into(),
        brief: None,
        usage: "Making precise incisions in tissue".into(),
        features: vec![
            "Sharp blade".into(),
            "Precise cutting".into(),
            "Sterile".into(),
        ],
        material: "Stainless steel".into(),
        size: "Various sizes".into(),
        sterilization: "Autoclave".into(),
        manufacturer: "Sample Manufacturer".into(),
        sets: vec![],
    }
}

#[cfg(feature = "remote")]
pub use remote::{fetch_instruments_from_sheet, load_catalog, parse_instrument_rows, LoadConfig};

#[cfg(feature = "remote")]
mod remote {
    use serde::Deserialize;

    use super::*;

    /// Remote-source configuration, read from the environment the same
    /// way the rest of the process is configured.
    #[derive(Debug, Clone, Default)]
    pub struct LoadConfig {
        pub sheet_id: Option<String>,
    }

    impl LoadConfig {
        pub fn from_env() -> Self {
            // Pick up a .env file when present; real environment wins.
            dotenvy::dotenv().ok();
            LoadConfig {
                sheet_id: std::env::var(ENV_SHEET_ID).ok().filter(|s| !s.is_empty()),
            }
        }
    }

    /// One-shot load: bundled data first, the published sheet only when
    /// the bundle carries no instruments. Failure is terminal until the
    /// caller explicitly retries the same call.
    pub async fn load_catalog(config: &LoadConfig) -> Result<CatalogStore, CatalogError> {
        let bundled = load_bundled()?;
        if !bundled.is_empty() {
            return Ok(bundled);
        }

        warn!("bundled catalog has no instruments, falling back to remote sheet");
        let sheet_id = config
            .sheet_id
            .as_deref()
            .ok_or(LoadError::MissingSheetId {
                env_var: ENV_SHEET_ID,
            })?;
        let instruments = fetch_instruments_from_sheet(sheet_id).await?;
        Ok(CatalogStore::new(bundled.sets().to_vec(), instruments))
    }

    /// Fetch the published CSV export for a sheet and map its rows to
    /// instruments. Transport failures are errors; content failures
    /// degrade to the synthetic fallback instrument.
    pub async fn fetch_instruments_from_sheet(
        sheet_id: &str,
    ) -> Result<Vec<Instrument>, CatalogError> {
        let url = sheet_csv_url(sheet_id);
        info!(%url, "fetching catalog from published sheet");

        let response = reqwest::get(&url).await.map_err(|e| LoadError::Fetch {
            sheet_id: sheet_id.to_string(),
            message: e.to_string(),
        })?;

        if !response.status().is_success() {
            return Err(LoadError::Fetch {
                sheet_id: sheet_id.to_string(),
                message: format!("HTTP {}", response.status()),
            }
            .into());
        }

        let body = response.text().await.map_err(|e| LoadError::Fetch {
            sheet_id: sheet_id.to_string(),
            message: e.to_string(),
        })?;

        Ok(parse_instrument_rows(&body))
    }

    fn sheet_csv_url(sheet_id: &str) -> String {
        format!("https://docs.google.com/spreadsheets/d/{sheet_id}/export?format=csv&gid=0")
    }

    /// Raw sheet row. Every column is optional; defaults are applied in
    /// the conversion so a sparse sheet still yields usable records.
    #[derive(Debug, Default, Deserialize)]
    struct SheetRow {
        #[serde(default)]
        id: String,
        #[serde(default)]
        name: String,
        #[serde(default)]
        category: String,
        #[serde(default)]
        description: String,
        #[serde(default)]
        brief: String,
        #[serde(default)]
        usage: String,
        #[serde(default)]
        features: String,
        #[serde(default)]
        material: String,
        #[serde(default)]
        size: String,
        #[serde(default)]
        sterilization: String,
        #[serde(default)]
        manufacturer: String,
        #[serde(default)]
        sets: String,
    }

    /// Parse delimited text with a header row into instruments. Malformed
    /// rows are skipped with a diagnostic; an entirely unusable payload
    /// yields the single fallback instrument.
    pub fn parse_instrument_rows(csv_text: &str) -> Vec<Instrument> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(csv_text.as_bytes());

        let mut instruments = Vec::new();
        for (index, record) in reader.deserialize::<SheetRow>().enumerate() {
            match record {
                Ok(row) => instruments.push(row_to_instrument(row, index)),
                Err(e) => {
                    warn!(row = index + 1, error = %e, "skipping malformed sheet row");
                }
            }
        }

        if instruments.is_empty() {
            warn!("sheet yielded no usable rows, substituting fallback instrument");
            instruments.push(fallback_instrument());
        }
        instruments
    }

    fn row_to_instrument(row: SheetRow, index: usize) -> Instrument {
        Instrument {
            // Ids must be deterministic for a given payload: search and
            // navigation promise identical output for identical input.
            id: non_empty(row.id).unwrap_or_else(|| format!("row-{index}")),
            name: non_empty(row.name).unwrap_or_else(|| "Unknown Instrument".into()),
            category: non_empty(row.category).unwrap_or_else(|| "General".into()),
            description: non_empty(row.description)
                .unwrap_or_else(|| "No description available".into()),
            brief: non_empty(row.brief),
            usage: non_empty(row.usage).unwrap_or_else(|| "General surgical use".into()),
            features: split_multi(&row.features),
            material: row.material,
            size: row.size,
            sterilization: row.sterilization,
            manufacturer: row.manufacturer,
            sets: split_multi(&row.sets),
        }
    }

    fn non_empty(value: String) -> Option<String> {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    }

    /// Multi-value cells are a single string joined by `;`.
    fn split_multi(value: &str) -> Vec<String> {
        value
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}
