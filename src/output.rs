use colored::*;
use rust_decimal::Decimal;

use crate::chart::{format_count, format_usd};
use crate::mode::ChartRequest;
use crate::price::{PriceQuote, QUOTE_CURRENCY};

const LABEL_WIDTH: usize = 14;
const TXS_WIDTH: usize = 12;
const FEES_WIDTH: usize = 18;

pub fn print_error(msg: &str) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

pub fn print_warning(msg: &str) {
    eprintln!("{}: {}", "warning".yellow().bold(), msg);
}

pub fn get_display_name(filename: &str) -> &str {
    std::path::Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename)
}

pub fn print_file_info(
    display_name: &str,
    request: &ChartRequest,
    record_count: usize,
    quote: Option<&PriceQuote>,
) {
    println!("File: {}", display_name);
    println!("Records: {}", record_count);
    match request.span {
        Some(span) => println!("Span: {} days ending {}", span, request.today),
        None => println!("Span: as provided"),
    }
    println!("Granularity: {}", request.granularity);
    match quote {
        Some(q) => println!("Quote: {} {}", q.price, QUOTE_CURRENCY),
        None => println!("Quote: unavailable"),
    }
    println!();
}

pub fn print_placeholder() {
    println!("No transactions available");
}

pub fn print_header() {
    println!(
        "{:<label$}{:>txs$}{:>fees$}",
        "DATE".bold(),
        "TXS".bold(),
        "FEES (USD)".bold(),
        label = LABEL_WIDTH,
        txs = TXS_WIDTH,
        fees = FEES_WIDTH
    );
}

pub fn print_separator() {
    println!("{}", "-".repeat(LABEL_WIDTH + TXS_WIDTH + FEES_WIDTH));
}

pub fn print_row(label: &str, txs: Decimal, fees: Decimal) {
    let line = format!(
        "{:<label$}{:>txs_w$}{:>fees_w$}",
        label,
        format_count(txs),
        format!("${}", format_usd(fees)),
        label = LABEL_WIDTH,
        txs_w = TXS_WIDTH,
        fees_w = FEES_WIDTH
    );
    // Empty days are usually calendar fill
    if txs.is_zero() && fees.is_zero() {
        println!("{}", line.dimmed());
    } else {
        println!("{}", line);
    }
}

pub fn print_total_row(txs: Decimal, fees: Decimal) {
    println!(
        "{:<label$}{:>txs_w$}{:>fees_w$}",
        "TOTAL".bold(),
        format_count(txs),
        format!("${}", format_usd(fees)),
        label = LABEL_WIDTH,
        txs_w = TXS_WIDTH,
        fees_w = FEES_WIDTH
    );
}

pub fn print_legend(has_quote: bool) {
    println!("TXS: Transactions per bucket");
    println!("FEES: Server USD figure, or token fees at the current quote");
    if !has_quote {
        println!("No price quote loaded: token fees are shown as $0.00");
    }
}
