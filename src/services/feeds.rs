//! Feed provider interface and a JSON snapshot implementation.
//!
//! Live fetchers (EDGAR, PatentsView, arXiv, GDELT, quote vendors) are
//! expected to drop their normalized output into snapshot files; the radar
//! pass only reads them.

use crate::error::RadarError;
use crate::models::price::{PriceBar, PriceSeries};
use crate::models::records::{FeedBatch, Filing, NewsArticle, Patent, PriceQuote, Preprint};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub trait FeedProvider {
    fn filings(&self) -> Result<Vec<Filing>, RadarError>;

    fn patents(&self) -> Result<Vec<Patent>, RadarError>;

    fn preprints(&self) -> Result<Vec<Preprint>, RadarError>;

    fn news(&self) -> Result<Vec<NewsArticle>, RadarError>;

    fn quotes(&self) -> Result<Vec<PriceQuote>, RadarError>;

    /// Daily history for each requested ticker, oldest bar first.
    fn price_history(&self, tickers: &[String]) -> Result<Vec<PriceSeries>, RadarError>;
}

fn or_empty<T>(category: &'static str, result: Result<Vec<T>, RadarError>) -> Vec<T> {
    result.unwrap_or_else(|e| {
        warn!(category, error = %e, "feed unavailable, continuing without it");
        Vec::new()
    })
}

/// Collect every category. A failing category is logged and left empty.
pub fn load_batch(provider: &dyn FeedProvider) -> FeedBatch {
    FeedBatch {
        filings: or_empty("filings", provider.filings()),
        patents: or_empty("patents", provider.patents()),
        preprints: or_empty("preprints", provider.preprints()),
        news: or_empty("news", provider.news()),
        quotes: or_empty("quotes", provider.quotes()),
    }
}

/// Reads `<dir>/{filings,patents,preprints,news,quotes,history}.json`.
///
/// A missing file is an empty category. `history.json` maps ticker to bars.
#[derive(Debug, Clone)]
pub struct JsonSnapshotProvider {
    dir: PathBuf,
}

impl JsonSnapshotProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read<T: DeserializeOwned + Default>(&self, name: &str) -> Result<T, RadarError> {
        let path = self.dir.join(name);
        let shown = path.display().to_string();
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %shown, "snapshot missing, using empty category");
                return Ok(T::default());
            }
            Err(e) => return Err(RadarError::io(shown, e)),
        };
        serde_json::from_str(&raw).map_err(|e| RadarError::json(shown, e))
    }

    /// A category file: a JSON array whose entries are decoded one by one.
    ///
    /// Entries that are not records at all are skipped; field-level damage
    /// inside a record is absorbed by the record's lenient decoders.
    fn read_records<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>, RadarError> {
        let entries: Vec<Value> = self.read(name)?;
        let total = entries.len();
        let records: Vec<T> = entries
            .into_iter()
            .enumerate()
            .filter_map(|(i, entry)| match serde_json::from_value(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    debug!(file = name, index = i, error = %e, "skipping undecodable record");
                    None
                }
            })
            .collect();
        if records.len() < total {
            warn!(
                file = name,
                kept = records.len(),
                total,
                "some snapshot records could not be decoded"
            );
        }
        Ok(records)
    }
}

impl FeedProvider for JsonSnapshotProvider {
    fn filings(&self) -> Result<Vec<Filing>, RadarError> {
        self.read_records("filings.json")
    }

    fn patents(&self) -> Result<Vec<Patent>, RadarError> {
        self.read_records("patents.json")
    }

    fn preprints(&self) -> Result<Vec<Preprint>, RadarError> {
        self.read_records("preprints.json")
    }

    fn news(&self) -> Result<Vec<NewsArticle>, RadarError> {
        self.read_records("news.json")
    }

    fn quotes(&self) -> Result<Vec<PriceQuote>, RadarError> {
        self.read_records("quotes.json")
    }

    fn price_history(&self, tickers: &[String]) -> Result<Vec<PriceSeries>, RadarError> {
        let mut history: BTreeMap<String, Vec<PriceBar>> = self.read("history.json")?;
        Ok(tickers
            .iter()
            .map(|ticker| {
                let mut bars = history.remove(ticker).unwrap_or_default();
                bars.sort_by_key(|b| b.date);
                PriceSeries::new(ticker.clone(), bars)
            })
            .collect())
    }
}
