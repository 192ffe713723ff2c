use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Signal type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalKind {
    SecFiling,
    Patent,
    Arxiv,
    News,
    PriceSpike,
    PriceDip,
}

impl SignalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::SecFiling => "SEC_FILING",
            SignalKind::Patent => "PATENT",
            SignalKind::Arxiv => "ARXIV",
            SignalKind::News => "NEWS",
            SignalKind::PriceSpike => "PRICE_SPIKE",
            SignalKind::PriceDip => "PRICE_DIP",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-specific fields. Serialized internally tagged so a signal flattens
/// into one JSON object (`{"type": "PATENT", "title": .., "score": ..}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SignalPayload {
    SecFiling {
        ticker: String,
        form: String,
        filed: String,
        accession: String,
    },
    Patent {
        title: String,
        date: String,
    },
    Arxiv {
        title: String,
        published: String,
        link: String,
    },
    News {
        title: String,
        url: String,
        seen: String,
    },
    PriceSpike {
        ticker: String,
        change_pct: f64,
    },
    PriceDip {
        ticker: String,
        change_pct: f64,
    },
}

/// A scored, timestamped event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    #[serde(flatten)]
    pub payload: SignalPayload,
    pub score: i32,
    /// `None` when the source date could not be parsed; sorts last.
    pub ts: Option<DateTime<Utc>>,
}

impl Signal {
    pub fn new(payload: SignalPayload, score: i32, ts: Option<DateTime<Utc>>) -> Self {
        Self { payload, score, ts }
    }

    pub fn kind(&self) -> SignalKind {
        match &self.payload {
            SignalPayload::SecFiling { .. } => SignalKind::SecFiling,
            SignalPayload::Patent { .. } => SignalKind::Patent,
            SignalPayload::Arxiv { .. } => SignalKind::Arxiv,
            SignalPayload::News { .. } => SignalKind::News,
            SignalPayload::PriceSpike { .. } => SignalKind::PriceSpike,
            SignalPayload::PriceDip { .. } => SignalKind::PriceDip,
        }
    }

    /// Security the signal refers to, if it is tied to one.
    pub fn ticker(&self) -> Option<&str> {
        match &self.payload {
            SignalPayload::SecFiling { ticker, .. }
            | SignalPayload::PriceSpike { ticker, .. }
            | SignalPayload::PriceDip { ticker, .. } => Some(ticker.as_str()),
            _ => None,
        }
    }

    /// Stable key for notification deduplication across runs.
    ///
    /// Built from the type and the identifying payload field, not the score,
    /// so a correlation boost does not re-trigger a notification. Price
    /// events are stamped with the pass time, so they key on the move and
    /// its UTC day instead of the instant.
    pub fn idempotency_key(&self) -> String {
        let ident = match &self.payload {
            SignalPayload::PriceSpike { ticker, change_pct }
            | SignalPayload::PriceDip { ticker, change_pct } => {
                let day = self
                    .ts
                    .map(|t| t.date_naive().to_string())
                    .unwrap_or_default();
                return format!("{}|{}|{:.2}|{}", self.kind(), ticker, change_pct, day);
            }
            SignalPayload::SecFiling {
                ticker, accession, ..
            } => format!("{}:{}", ticker, accession),
            SignalPayload::Patent { title, .. } => title.clone(),
            SignalPayload::Arxiv { link, title, .. } => {
                if link.is_empty() {
                    title.clone()
                } else {
                    link.clone()
                }
            }
            SignalPayload::News { url, title, .. } => {
                if url.is_empty() {
                    title.clone()
                } else {
                    url.clone()
                }
            }
        };
        let ts = self
            .ts
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_default();
        format!("{}|{}|{}", self.kind(), ident, ts)
    }
}
