//! Terminal table of the reconciled series

use crate::output::{
    print_file_info, print_header, print_legend, print_placeholder, print_row, print_separator,
    print_total_row,
};
use crate::price::PriceQuote;
use crate::records::TxHistoryRecord;
use crate::series::{build_series, normalize};

use super::ChartRequest;

/// Print one row per bucket; fees are zero until a quote is available
pub fn run_summary(
    request: &ChartRequest,
    records: &[TxHistoryRecord],
    quote: Option<&PriceQuote>,
    display_name: &str,
    quiet: bool,
) {
    if !quiet {
        print_file_info(display_name, request, records.len(), quote);
    }

    if records.is_empty() {
        print_placeholder();
        return;
    }

    let buckets = normalize(records, request.span, request.today);
    let series = build_series(&buckets, &request.granularity, quote);

    print_header();
    print_separator();
    for ((label, tx), fee) in series
        .x_labels
        .iter()
        .zip(&series.transactions)
        .zip(&series.fees)
    {
        print_row(label, tx.value, fee.value);
    }
    print_separator();
    print_total_row(series.total_transactions(), series.total_fees());

    if !quiet {
        println!();
        print_legend(quote.is_some());
    }
}
