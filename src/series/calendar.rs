//! Calendar gap filling

use std::borrow::Cow;

use chrono::{Days, NaiveDate, NaiveTime};

use crate::records::TxHistoryRecord;

/// Longest calendar window accepted from the command line (about 100 years)
pub const MAX_SPAN_DAYS: u32 = 36_600;

/// Epoch milliseconds of UTC midnight for a calendar day
pub fn day_start_millis(day: NaiveDate) -> i64 {
    day.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

/// Fill `span` days back from `today` (inclusive) with one bucket per day, oldest first.
///
/// Days without a source record (matched by exact UTC-midnight timestamp) get a
/// zero placeholder. A source whose length is already `span + 1` is returned as-is
/// without checking its dates. Without a span there is nothing to fill.
pub fn normalize(
    records: &[TxHistoryRecord],
    span: Option<u32>,
    today: NaiveDate,
) -> Cow<'_, [TxHistoryRecord]> {
    let Some(span) = span else {
        return Cow::Borrowed(records);
    };
    if records.len() == span as usize + 1 {
        return Cow::Borrowed(records);
    }

    let mut filled = 0usize;
    let buckets: Vec<TxHistoryRecord> = (0..=u64::from(span))
        .rev()
        .filter_map(|days_back| today.checked_sub_days(Days::new(days_back)))
        .map(|day| {
            let date = day_start_millis(day);
            records
                .iter()
                .find(|record| record.date == date)
                .cloned()
                .unwrap_or_else(|| {
                    filled += 1;
                    TxHistoryRecord::placeholder(date)
                })
        })
        .collect();

    tracing::debug!(days = span, source = records.len(), filled, "filled calendar gaps");
    Cow::Owned(buckets)
}
