use std::fs;
use std::path::Path;

use chrono::{Days, NaiveDate, NaiveTime};
use serde_json::{Value, json};

const TOKEN_PRICE_USD: &str = "0.52";

fn day_millis(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

fn record(date: NaiveDate, tx_count: u64, fee: &str) -> Value {
    json!({
        "date": day_millis(date),
        "feepayer": null,
        "txCount": tx_count,
        "feeAmountInBaseToken": fee,
        "gasWanted": tx_count * 200_000,
        "gasUsed": tx_count * 150_000,
        "feeAmountInToken": fee,
        "feesPaidInUsd": null,
        "maxTokenPriceUsd": TOKEN_PRICE_USD,
        "minTokenPriceUsd": TOKEN_PRICE_USD,
        "avgTokenPriceUsd": TOKEN_PRICE_USD
    })
}

fn write_json(path: &Path, value: &Value) -> std::io::Result<()> {
    let body = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    fs::write(path, body)
}

fn main() -> std::io::Result<()> {
    let dir = Path::new("test_data");
    fs::create_dir_all(dir)?;

    let start = NaiveDate::from_ymd_opt(2023, 1, 1).ok_or_else(|| std::io::Error::other("bad date"))?;
    let day = |n: u64| start.checked_add_days(Days::new(n)).unwrap_or(start);

    // Dense week: one record per day, 2023-01-01..=2023-01-07
    let dense: Vec<Value> = (0..7)
        .map(|n| record(day(n), 10 + n * 3, &format!("{}.25", 4 + n)))
        .collect();
    write_json(&dir.join("dense_week.json"), &Value::Array(dense))?;

    // Sparse week: only three active days, run with --span 6 --today 2023-01-07
    let sparse = vec![
        record(day(1), 5, "10"),
        record(day(3), 12, "3.5"),
        record(day(6), 1, "0.01"),
    ];
    write_json(&dir.join("sparse_week.json"), &Value::Array(sparse.clone()))?;

    // Same records wrapped in a paged response
    write_json(&dir.join("paged_week.json"), &json!({ "data": sparse }))?;

    // Server-side USD figures take precedence over the quote
    let mut priced = record(day(2), 8, "100");
    priced["feesPaidInUsd"] = json!("42.50");
    write_json(&dir.join("usd_priced.json"), &Value::Array(vec![priced]))?;

    write_json(&dir.join("empty.json"), &json!([]))?;

    write_json(
        &dir.join("quote.json"),
        &json!({ "quote": { "USD": { "price": TOKEN_PRICE_USD } } }),
    )?;

    println!(
        "Generated: dense_week.json, sparse_week.json, paged_week.json, usd_priced.json, empty.json, quote.json"
    );
    Ok(())
}
