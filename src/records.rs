//! Transaction history records as served by the chain-indexing API

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::TxChartError;

/// One day (or month) of on-chain activity.
///
/// `date` is the bucket start as epoch milliseconds and is unique within a span.
/// Decimal fields accept JSON numbers or strings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxHistoryRecord {
    pub date: i64,
    #[serde(default)]
    pub feepayer: Option<Value>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub tx_count: u64,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub fee_amount_in_base_token: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub gas_wanted: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub gas_used: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub fee_amount_in_token: Decimal,
    /// Present only when the server precomputed it. Unparseable values count as absent.
    #[serde(default, deserialize_with = "optional_decimal")]
    pub fees_paid_in_usd: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub max_token_price_usd: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub min_token_price_usd: Decimal,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub avg_token_price_usd: Decimal,
}

impl TxHistoryRecord {
    /// Zero-valued placeholder for a date with no source record
    pub fn placeholder(date: i64) -> Self {
        Self {
            date,
            ..Default::default()
        }
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.date)
    }
}

/// Records file body: a bare array, or the paged API envelope
#[derive(Deserialize)]
#[serde(untagged)]
enum RecordsDocument {
    List(Vec<TxHistoryRecord>),
    Paged { data: Vec<TxHistoryRecord> },
}

/// Load transaction history records from a JSON file
pub fn load_records(path: &str) -> Result<Vec<TxHistoryRecord>, TxChartError> {
    let body = std::fs::read_to_string(path).map_err(|source| TxChartError::Io {
        path: path.to_string(),
        source,
    })?;
    parse_records(&body).map_err(|source| TxChartError::Json {
        path: path.to_string(),
        source,
    })
}

pub fn parse_records(body: &str) -> Result<Vec<TxHistoryRecord>, serde_json::Error> {
    let document: RecordsDocument = serde_json::from_str(body)?;
    let records = match document {
        RecordsDocument::List(records) => records,
        RecordsDocument::Paged { data } => data,
    };
    tracing::debug!(count = records.len(), "loaded transaction history");
    Ok(records)
}

pub(crate) fn parse_decimal(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => decimal_from_str(&n.to_string()),
        Value::String(s) => decimal_from_str(s.trim()),
        _ => None,
    }
}

fn decimal_from_str(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_decimal(&value).unwrap_or_default())
}

fn optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_decimal(&value))
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let count = match &value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(count.unwrap_or_default())
}
