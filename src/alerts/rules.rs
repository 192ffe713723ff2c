//! Alert rules evaluated after each pass.
//!
//! Rules are pure: they read the previous `AlertState` and return the alerts
//! to deliver together with the next state. Delivery is up to the caller.

use crate::alerts::state::AlertState;
use crate::config::AlertConfig;
use crate::models::records::PriceQuote;
use crate::models::signal::{Signal, SignalKind};
use crate::models::trend::{TrendPoint, TrendStatus};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "alert", rename_all = "snake_case")]
pub enum Alert {
    TopSignal {
        key: String,
        kind: SignalKind,
        score: i32,
        signal: Signal,
    },
    TrendReversal {
        ticker: String,
        from: TrendStatus,
        to: TrendStatus,
        score: i32,
    },
    BuyZone {
        ticker: String,
        level: f64,
        price: f64,
        change_pct: f64,
        status: Option<TrendStatus>,
        rsi: Option<f64>,
    },
    MomentumUp {
        ticker: String,
        change_pct: f64,
        price: Option<f64>,
    },
    MomentumDown {
        ticker: String,
        change_pct: f64,
        price: Option<f64>,
    },
    TrendConfirmed {
        ticker: String,
        rsi: f64,
        change_pct: f64,
    },
}

fn price_text(price: Option<f64>) -> String {
    price.map_or_else(|| "n/a".to_string(), |p| format!("{:.2}", p))
}

impl Alert {
    /// Human-readable message for chat delivery.
    pub fn message(&self) -> String {
        match self {
            Alert::TopSignal { kind, score, signal, .. } => {
                let body = serde_json::to_string(signal).unwrap_or_default();
                format!("**{}** • score {}\n{}", kind, score, body)
            }
            Alert::TrendReversal { ticker, from, to, score } => {
                format!("Trend change for {}: {} → {} (score {})", ticker, from, to, score)
            }
            Alert::BuyZone {
                ticker,
                level,
                price,
                change_pct,
                status,
                rsi,
            } => format!(
                "{} near buy zone {:.2} • price {:.2} ({:+.2}%) • trend {} • RSI {}",
                ticker,
                level,
                price,
                change_pct,
                status.map_or("?", |s| s.as_str()),
                rsi.map_or_else(|| "?".to_string(), |r| format!("{:.0}", r)),
            ),
            Alert::MomentumUp {
                ticker,
                change_pct,
                price,
            } => format!(
                "{} momentum up: {:+.2}% • price {}",
                ticker,
                change_pct,
                price_text(*price)
            ),
            Alert::MomentumDown {
                ticker,
                change_pct,
                price,
            } => format!(
                "{} momentum down: {:+.2}% • price {}. Check support levels.",
                ticker,
                change_pct,
                price_text(*price)
            ),
            Alert::TrendConfirmed {
                ticker,
                rsi,
                change_pct,
            } => format!(
                "{} trend confirmed: UP, RSI {:.0}, day {:+.2}%",
                ticker, rsi, change_pct
            ),
        }
    }
}

/// Alerts to deliver and the state to persist afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertOutcome {
    pub alerts: Vec<Alert>,
    pub state: AlertState,
}

/// Is `price` within `band_pct` (relative) of `level`?
pub fn near_level(price: f64, level: f64, band_pct: f64) -> bool {
    if !price.is_finite() || level <= 0.0 {
        return false;
    }
    (price - level).abs() / level <= band_pct
}

/// A downgrade worth flagging: UP → WATCH/DOWN or WATCH → DOWN.
pub fn is_reversal(previous: TrendStatus, current: TrendStatus) -> bool {
    matches!(
        (previous, current),
        (TrendStatus::Up, TrendStatus::Watch)
            | (TrendStatus::Up, TrendStatus::Down)
            | (TrendStatus::Watch, TrendStatus::Down)
    )
}

/// Top-ranked signals not notified before.
pub fn top_signal_alerts(signals: &[Signal], state: &AlertState, limit: usize) -> Vec<Alert> {
    signals
        .iter()
        .take(limit)
        .filter_map(|signal| {
            let key = signal.idempotency_key();
            if state.was_notified(&key) {
                return None;
            }
            Some(Alert::TopSignal {
                key,
                kind: signal.kind(),
                score: signal.score,
                signal: signal.clone(),
            })
        })
        .collect()
}

/// Status downgrades against the previous run. Tickers seen for the first
/// time never alert.
pub fn trend_reversal_alerts(trend: &[TrendPoint], state: &AlertState) -> Vec<Alert> {
    trend
        .iter()
        .filter_map(|point| {
            let previous = *state.trend_status.get(&point.ticker)?;
            if !is_reversal(previous, point.status) {
                return None;
            }
            Some(Alert::TrendReversal {
                ticker: point.ticker.clone(),
                from: previous,
                to: point.status,
                score: point.score,
            })
        })
        .collect()
}

/// Quote-driven one-shot rules: buy zones, momentum, trend confirmation.
///
/// Returns the alerts and their dedup keys.
pub fn price_rule_alerts(
    quotes: &[PriceQuote],
    trend: &[TrendPoint],
    state: &AlertState,
    config: &AlertConfig,
) -> Vec<(String, Alert)> {
    let trend_map: HashMap<&str, &TrendPoint> =
        trend.iter().map(|t| (t.ticker.as_str(), t)).collect();
    // Last quote per ticker wins, iteration in ticker order.
    let quote_map: BTreeMap<&str, &PriceQuote> =
        quotes.iter().map(|q| (q.ticker.as_str(), q)).collect();

    let mut fired: Vec<(String, Alert)> = Vec::new();
    let push = |key: String, alert: Alert, fired: &mut Vec<(String, Alert)>| {
        if !state.was_sent(&key) && !fired.iter().any(|(k, _)| *k == key) {
            fired.push((key, alert));
        }
    };

    for (&ticker, quote) in &quote_map {
        let change_pct = quote.change_pct.filter(|c| c.is_finite()).unwrap_or(0.0);
        let point = trend_map.get(ticker).copied();

        if let Some(price) = quote.price {
            let levels = config.buy_zones.get(ticker).map(Vec::as_slice).unwrap_or(&[]);
            for &level in levels {
                if near_level(price, level, config.near_band_pct) {
                    push(
                        format!("{}_zone_{:.2}", ticker, level),
                        Alert::BuyZone {
                            ticker: ticker.to_string(),
                            level,
                            price,
                            change_pct,
                            status: point.map(|p| p.status),
                            rsi: point.map(|p| p.rsi),
                        },
                        &mut fired,
                    );
                }
            }
        }

        if change_pct >= config.momentum_up_pct {
            push(
                format!("{}_mom_up", ticker),
                Alert::MomentumUp {
                    ticker: ticker.to_string(),
                    change_pct,
                    price: quote.price,
                },
                &mut fired,
            );
        }
        if change_pct <= config.momentum_down_pct {
            push(
                format!("{}_mom_dn", ticker),
                Alert::MomentumDown {
                    ticker: ticker.to_string(),
                    change_pct,
                    price: quote.price,
                },
                &mut fired,
            );
        }

        if let Some(point) = point {
            if point.status == TrendStatus::Up && point.rsi >= config.confirm_rsi_min && change_pct > 0.0 {
                push(
                    format!("{}_trend_up_conf", ticker),
                    Alert::TrendConfirmed {
                        ticker: ticker.to_string(),
                        rsi: point.rsi,
                        change_pct,
                    },
                    &mut fired,
                );
            }
        }
    }

    fired
}

/// Run every rule and fold the results into the next state.
pub fn evaluate_alerts(
    state: &AlertState,
    signals: &[Signal],
    quotes: &[PriceQuote],
    trend: &[TrendPoint],
    config: &AlertConfig,
) -> AlertOutcome {
    let mut next = state.clone();
    let mut alerts = Vec::new();

    for alert in top_signal_alerts(signals, state, config.top_signals) {
        if let Alert::TopSignal { key, .. } = &alert {
            next.notified_ids.insert(key.clone());
        }
        alerts.push(alert);
    }

    for alert in trend_reversal_alerts(trend, state) {
        if let Alert::TrendReversal { ticker, to, .. } = &alert {
            next.notified_ids.insert(format!("trend_{}_{}", ticker, to));
        }
        alerts.push(alert);
    }

    for (key, alert) in price_rule_alerts(quotes, trend, state, config) {
        next.sent_alerts.insert(key);
        alerts.push(alert);
    }

    next.trend_status = trend
        .iter()
        .map(|t| (t.ticker.clone(), t.status))
        .collect();

    debug!(alerts = alerts.len(), "evaluated alert rules");
    AlertOutcome {
        alerts,
        state: next,
    }
}
