//! Transaction history reconciliation and dual-axis chart assembly.
//!
//! Sparse per-day records are normalized onto a contiguous calendar window,
//! converted to USD and rendered as a transactions/fees line chart.

pub mod chart;
pub mod error;
pub mod mode;
pub mod output;
pub mod price;
pub mod records;
pub mod series;
pub mod surface;
