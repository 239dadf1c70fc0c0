//! Common test utilities

use std::path::Path;

use chrono::NaiveDate;
use serde_json::{Value, json};

/// UTC midnight of `date` in epoch milliseconds
pub fn day_millis(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp_millis()
}

pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// One history record with token-denominated fees
pub fn record(date: NaiveDate, tx_count: u64, fee_in_token: &str) -> Value {
    json!({
        "date": day_millis(date),
        "feepayer": null,
        "txCount": tx_count,
        "feeAmountInBaseToken": fee_in_token,
        "gasWanted": 0,
        "gasUsed": 0,
        "feeAmountInToken": fee_in_token,
        "feesPaidInUsd": null,
        "maxTokenPriceUsd": 0,
        "minTokenPriceUsd": 0,
        "avgTokenPriceUsd": 0
    })
}

/// Write records as a bare JSON array
pub fn write_records(path: &Path, records: &[Value]) -> std::io::Result<()> {
    std::fs::write(path, Value::Array(records.to_vec()).to_string())
}

/// Write records wrapped in a `{"data": [...]}` page
pub fn write_paged_records(path: &Path, records: &[Value]) -> std::io::Result<()> {
    std::fs::write(path, json!({ "data": records }).to_string())
}

/// Write a pricing response with a USD quote
pub fn write_quote(path: &Path, price: &str) -> std::io::Result<()> {
    std::fs::write(path, json!({ "quote": { "USD": { "price": price } } }).to_string())
}
