//! Unit tests for series module

use std::borrow::Cow;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{Granularity, build_series, day_start_millis, normalize};
use crate::price::PriceQuote;
use crate::records::TxHistoryRecord;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn day(y: i32, m: u32, dd: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, dd).unwrap()
}

fn record(date: NaiveDate, tx_count: u64, fee: &str) -> TxHistoryRecord {
    TxHistoryRecord {
        tx_count,
        fee_amount_in_token: d(fee),
        ..TxHistoryRecord::placeholder(day_start_millis(date))
    }
}

fn values(points: &[super::SeriesPoint]) -> Vec<Decimal> {
    points.iter().map(|p| p.value).collect()
}

#[test]
fn test_day_start_is_utc_midnight() {
    // 2023-01-02T00:00:00Z
    assert_eq!(day_start_millis(day(2023, 1, 2)), 1_672_617_600_000);
}

#[test]
fn test_full_span_passes_through() {
    let today = day(2023, 1, 3);
    let source = vec![
        record(day(2023, 1, 1), 1, "1"),
        record(day(2023, 1, 2), 2, "2"),
        record(day(2023, 1, 3), 3, "3"),
    ];
    let out = normalize(&source, Some(2), today);
    assert!(matches!(out, Cow::Borrowed(_)));
    assert_eq!(out.as_ref(), source.as_slice());
}

#[test]
fn test_same_length_with_wrong_dates_passes_through() {
    // Length alone decides the short-circuit; dates are not verified
    let today = day(2023, 1, 3);
    let source = vec![
        record(day(2022, 6, 1), 1, "0"),
        record(day(2022, 6, 9), 2, "0"),
    ];
    let out = normalize(&source, Some(1), today);
    assert_eq!(out.as_ref(), source.as_slice());
}

#[test]
fn test_empty_source_fills_whole_span() {
    let today = day(2023, 3, 1);
    let out = normalize(&[], Some(4), today);
    assert_eq!(out.len(), 5);

    let expected: Vec<i64> = [
        day(2023, 2, 25),
        day(2023, 2, 26),
        day(2023, 2, 27),
        day(2023, 2, 28),
        day(2023, 3, 1),
    ]
    .into_iter()
    .map(day_start_millis)
    .collect();
    let dates: Vec<i64> = out.iter().map(|b| b.date).collect();
    assert_eq!(dates, expected);

    for bucket in out.iter() {
        assert_eq!(bucket.tx_count, 0);
        assert!(bucket.fee_amount_in_token.is_zero());
        assert!(bucket.fees_paid_in_usd.is_none());
        assert!(bucket.feepayer.is_none());
    }
}

#[test]
fn test_gaps_are_filled_in_date_order() {
    let today = day(2023, 1, 5);
    // Source out of order and missing days
    let source = vec![
        record(day(2023, 1, 4), 40, "4"),
        record(day(2023, 1, 2), 20, "2"),
    ];
    let out = normalize(&source, Some(4), today);
    let counts: Vec<u64> = out.iter().map(|b| b.tx_count).collect();
    assert_eq!(counts, vec![0, 20, 0, 40, 0]);
}

#[test]
fn test_records_outside_span_are_ignored() {
    let today = day(2023, 1, 3);
    let source = vec![record(day(2022, 12, 1), 99, "1")];
    let out = normalize(&source, Some(2), today);
    assert_eq!(out.len(), 3);
    assert!(out.iter().all(|b| b.tx_count == 0));
}

#[test]
fn test_non_midnight_dates_do_not_match() {
    let today = day(2023, 1, 2);
    let mut off = record(day(2023, 1, 2), 7, "1");
    off.date += 3_600_000;
    let source = [off];
    let out = normalize(&source, Some(2), today);
    assert!(out.iter().all(|b| b.tx_count == 0));
}

#[test]
fn test_no_span_passes_through() {
    let source = vec![record(day(2023, 1, 2), 5, "1")];
    let out = normalize(&source, None, day(2023, 1, 3));
    assert_eq!(out.len(), 1);
}

#[test]
fn test_zero_span_is_single_bucket() {
    let out = normalize(&[], Some(0), day(2023, 1, 3));
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].date, day_start_millis(day(2023, 1, 3)));
}

#[test]
fn test_sparse_scenario() {
    let today = day(2023, 1, 3);
    let source = vec![record(day(2023, 1, 2), 5, "10")];
    let quote = PriceQuote { price: d("2") };

    let buckets = normalize(&source, Some(2), today);
    let series = build_series(&buckets, &Granularity::Day, Some(&quote));

    assert_eq!(values(&series.transactions), vec![d("0"), d("5"), d("0")]);
    assert_eq!(values(&series.fees), vec![d("0"), d("20"), d("0")]);
    assert_eq!(series.x_labels, vec!["Jan 01", "Jan 02", "Jan 03"]);
}

#[test]
fn test_series_lengths_match_buckets() {
    let buckets = normalize(&[], Some(9), day(2024, 2, 29));
    for granularity in [
        Granularity::Day,
        Granularity::Month,
        Granularity::Other("HOUR".to_string()),
    ] {
        let series = build_series(&buckets, &granularity, None);
        assert_eq!(series.transactions.len(), buckets.len());
        assert_eq!(series.fees.len(), buckets.len());
        assert_eq!(series.x_labels.len(), buckets.len());
        assert_eq!(series.len(), 10);
    }
}

#[test]
fn test_identity_quote_keeps_token_fee() {
    let buckets = vec![
        record(day(2023, 1, 1), 1, "0.000123"),
        record(day(2023, 1, 2), 1, "17.5"),
    ];
    let quote = PriceQuote { price: Decimal::ONE };
    let series = build_series(&buckets, &Granularity::Day, Some(&quote));
    assert_eq!(values(&series.fees), vec![d("0.000123"), d("17.5")]);
}

#[test]
fn test_precomputed_usd_fee_is_kept() {
    let mut bucket = record(day(2023, 1, 1), 1, "10");
    bucket.fees_paid_in_usd = Some(d("1.23"));
    let quote = PriceQuote { price: d("1000") };
    let series = build_series(&[bucket], &Granularity::Day, Some(&quote));
    assert_eq!(series.fees[0].value, d("1.23"));
}

#[test]
fn test_missing_quote_still_builds_counts() {
    let buckets = vec![record(day(2023, 1, 1), 12, "3")];
    let series = build_series(&buckets, &Granularity::Day, None);
    assert_eq!(series.transactions[0].value, d("12"));
    assert_eq!(series.fees[0].value, Decimal::ZERO);
}

#[test]
fn test_point_names_are_iso_timestamps() {
    let series = build_series(
        &[record(day(2023, 1, 2), 1, "0")],
        &Granularity::Day,
        None,
    );
    assert_eq!(series.transactions[0].name, "2023-01-02T00:00:00.000Z");
    assert_eq!(series.fees[0].name, "2023-01-02T00:00:00.000Z");
}

#[test]
fn test_label_formats_per_granularity() {
    let buckets = vec![record(day(2023, 7, 4), 1, "0")];
    let month = build_series(&buckets, &Granularity::Month, None);
    assert_eq!(month.x_labels, vec!["Jul"]);

    let other = build_series(&buckets, &Granularity::Other("HOUR".to_string()), None);
    assert_eq!(other.x_labels, vec!["07/04, 12:00"]);
}

#[test]
fn test_granularity_parsing() {
    assert_eq!("DAY".parse::<Granularity>().unwrap(), Granularity::Day);
    assert_eq!("month".parse::<Granularity>().unwrap(), Granularity::Month);
    assert_eq!(
        "WEEK".parse::<Granularity>().unwrap(),
        Granularity::Other("WEEK".to_string())
    );
    assert_eq!(Granularity::Other("WEEK".to_string()).to_string(), "WEEK");
}

#[test]
fn test_totals() {
    let buckets = vec![
        record(day(2023, 1, 1), 3, "1.5"),
        record(day(2023, 1, 2), 4, "0.5"),
    ];
    let quote = PriceQuote { price: d("2") };
    let series = build_series(&buckets, &Granularity::Day, Some(&quote));
    assert_eq!(series.total_transactions(), d("7"));
    assert_eq!(series.total_fees(), d("4"));
}
