//! Transaction history series reconciliation

mod builder;
mod calendar;

pub use builder::{Granularity, SeriesPoint, TxSeries, build_series};
pub use calendar::{MAX_SPAN_DAYS, day_start_millis, normalize};

#[cfg(test)]
mod tests;
