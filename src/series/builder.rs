//! Transaction and fee series assembly

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;

use crate::price::{PriceQuote, fee_in_usd};
use crate::records::TxHistoryRecord;

/// Calendar unit of one bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Granularity {
    Day,
    Month,
    /// Any other tag from the data layer; labels fall back to date and time
    Other(String),
}

impl Granularity {
    /// chrono format for x-axis labels
    pub fn label_format(&self) -> &'static str {
        match self {
            Granularity::Day => "%b %d",
            Granularity::Month => "%b",
            Granularity::Other(_) => "%m/%d, %I:%M",
        }
    }

    /// chrono format for the tooltip header
    pub fn tooltip_format(&self) -> &'static str {
        match self {
            Granularity::Day => "%b %d",
            _ => "%b-%Y",
        }
    }
}

impl FromStr for Granularity {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_uppercase().as_str() {
            "DAY" => Granularity::Day,
            "MONTH" => Granularity::Month,
            _ => Granularity::Other(s.to_string()),
        })
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Day => f.write_str("DAY"),
            Granularity::Month => f.write_str("MONTH"),
            Granularity::Other(tag) => f.write_str(tag),
        }
    }
}

/// One value of a series, keyed by the bucket's ISO-8601 timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub value: Decimal,
    pub name: String,
}

/// Parallel transaction/fee series with their x-axis labels
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TxSeries {
    pub transactions: Vec<SeriesPoint>,
    pub fees: Vec<SeriesPoint>,
    pub x_labels: Vec<String>,
}

impl TxSeries {
    pub fn len(&self) -> usize {
        self.x_labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x_labels.is_empty()
    }

    pub fn total_transactions(&self) -> Decimal {
        self.transactions.iter().map(|p| p.value).sum()
    }

    pub fn total_fees(&self) -> Decimal {
        self.fees.iter().map(|p| p.value).sum()
    }
}

/// Build both series from normalized buckets.
///
/// Fees use the server's USD figure when present, otherwise the token fee
/// converted with `quote` (zero without a quote).
pub fn build_series(
    buckets: &[TxHistoryRecord],
    granularity: &Granularity,
    quote: Option<&PriceQuote>,
) -> TxSeries {
    let label_format = granularity.label_format();
    let mut series = TxSeries {
        transactions: Vec::with_capacity(buckets.len()),
        fees: Vec::with_capacity(buckets.len()),
        x_labels: Vec::with_capacity(buckets.len()),
    };

    for bucket in buckets {
        let timestamp: DateTime<Utc> = bucket.timestamp().unwrap_or_default();
        let name = timestamp.to_rfc3339_opts(SecondsFormat::Millis, true);

        series.transactions.push(SeriesPoint {
            value: Decimal::from(bucket.tx_count),
            name: name.clone(),
        });
        series.fees.push(SeriesPoint {
            value: fee_in_usd(bucket, quote),
            name,
        });
        series
            .x_labels
            .push(timestamp.format(label_format).to_string());
    }

    series
}
