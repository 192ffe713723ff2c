//! Normalized feed records as handed over by the fetchers.
//!
//! Every field defaults on deserialization: a missing, `null` or wrong-typed
//! field falls back to its default, so one sloppy record is still scored.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::debug;

/// Text field: strings pass through, numbers and booleans are rendered,
/// anything else becomes empty.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => {
            debug!(value = %other, "non-text field, using empty string");
            String::new()
        }
    })
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let text = lenient_string(deserializer)?;
    Ok(Some(text).filter(|t| !t.is_empty()))
}

/// Numeric field: numbers and numeric strings are accepted, anything else
/// is unknown.
fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => match s.trim().trim_end_matches('%').parse::<f64>() {
            Ok(v) => Some(v),
            Err(_) => {
                debug!(value = %s, "unparsable number, treating as unknown");
                None
            }
        },
        Value::Null => None,
        other => {
            debug!(value = %other, "non-numeric field, treating as unknown");
            None
        }
    })
}

/// Regulatory filing (SEC EDGAR submissions feed).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filing {
    #[serde(deserialize_with = "lenient_string")]
    pub ticker: String,
    #[serde(deserialize_with = "lenient_string")]
    pub accession: String,
    #[serde(deserialize_with = "lenient_string")]
    pub form: String,
    /// Filing date, usually `YYYY-MM-DD`.
    #[serde(deserialize_with = "lenient_string")]
    pub filed: String,
}

/// Granted patent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Patent {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient_string")]
    pub number: String,
}

/// Research preprint (arXiv).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preprint {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub published: String,
    #[serde(deserialize_with = "lenient_string")]
    pub link: String,
}

/// News article (GDELT). `seen_date` is often the compact `YYYYMMDDTHHMMSSZ`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsArticle {
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub url: String,
    #[serde(alias = "seendate", deserialize_with = "lenient_string")]
    pub seen_date: String,
}

/// Latest quote for a tracked ticker. Fields are optional because quote
/// sources regularly omit the previous close.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceQuote {
    #[serde(deserialize_with = "lenient_string")]
    pub ticker: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub change_pct: Option<f64>,
    #[serde(deserialize_with = "lenient_opt_string")]
    pub timestamp: Option<String>,
}

impl PriceQuote {
    pub fn new(ticker: impl Into<String>, change_pct: f64) -> Self {
        Self {
            ticker: ticker.into(),
            change_pct: Some(change_pct),
            ..Self::default()
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}

/// All categories of one scoring pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedBatch {
    pub filings: Vec<Filing>,
    pub patents: Vec<Patent>,
    pub preprints: Vec<Preprint>,
    pub news: Vec<NewsArticle>,
    pub quotes: Vec<PriceQuote>,
}
