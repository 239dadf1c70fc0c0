use std::path::Path;

use chrono::{NaiveDate, Utc};
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use txchart::chart::{DARK_THEME, LIGHT_THEME, MAX_WIDTH, Theme};
use txchart::error::TxChartError;
use txchart::mode::{ChartRequest, run_export, run_summary};
use txchart::output::{get_display_name, print_error, print_warning};
use txchart::price::{FixedQuote, PriceFeed, QuoteFile, QuoteSource};
use txchart::records::load_records;
use txchart::series::{Granularity, MAX_SPAN_DAYS};
use txchart::surface::{ExportFormat, RenderOutcome};

#[derive(Parser)]
#[command(
    name = "txchart",
    version,
    about = "Transaction history reconciliation with a dual-axis transactions/fees chart",
    after_help = "Examples:
  txchart history.json                                   Table of the records as given
  txchart history.json --span 30                         Last 31 days, gaps filled with zeros
  txchart history.json --span 30 --usd-price 0.52        Token fees converted at a fixed price
  txchart history.json --quote-file quote.json -o c.png  Export the chart as PNG
  txchart history.json --usd-price 1 -o chart.html      Interactive HTML chart
  txchart history.json -g MONTH --theme light            Monthly labels, light theme"
)]
struct Args {
    /// Transaction history JSON (array, or object with a "data" array)
    file: String,

    /// Fill the calendar window of SPAN+1 days ending today
    #[arg(short, long, value_name = "DAYS")]
    span: Option<u32>,

    /// Reference date for --span (defaults to the current UTC date)
    #[arg(long, value_name = "YYYY-MM-DD")]
    today: Option<NaiveDate>,

    /// Bucket granularity (DAY, MONTH, or any other label)
    #[arg(short, long, default_value = "DAY")]
    granularity: Granularity,

    /// Token price in USD
    #[arg(long, value_name = "PRICE", conflicts_with = "quote_file")]
    usd_price: Option<Decimal>,

    /// Pricing response file: {"quote": {"USD": {"price": ...}}}
    #[arg(long, value_name = "PATH")]
    quote_file: Option<String>,

    /// Chart color theme
    #[arg(long, value_enum, default_value_t = ThemeKind::Dark)]
    theme: ThemeKind,

    /// Viewport width in pixels (drives the responsive layout)
    #[arg(short, long, default_value = "1400", value_name = "PX")]
    width: u32,

    /// Write the chart to PATH (.png or .html)
    #[arg(short, long, value_name = "PATH")]
    output: Option<String>,

    /// Suppress explanations (show data only)
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ThemeKind {
    Dark,
    Light,
}

impl ThemeKind {
    fn theme(self) -> &'static Theme {
        match self {
            ThemeKind::Dark => &DARK_THEME,
            ThemeKind::Light => &LIGHT_THEME,
        }
    }
}

fn init_tracing(no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .init();
}

fn validate(args: &Args) -> Result<(), TxChartError> {
    if args.width == 0 {
        return Err(TxChartError::InvalidArgument(
            "Width must be positive".to_string(),
        ));
    }

    if args.width > MAX_WIDTH {
        return Err(TxChartError::InvalidArgument(format!(
            "Width must be at most {}",
            MAX_WIDTH
        )));
    }

    if let Some(span) = args.span
        && span > MAX_SPAN_DAYS
    {
        return Err(TxChartError::InvalidArgument(format!(
            "Span must be at most {} days",
            MAX_SPAN_DAYS
        )));
    }

    if let Some(ref path) = args.output {
        if ExportFormat::from_path(path).is_none() {
            return Err(TxChartError::InvalidArgument(format!(
                "Output must end in .png or .html: {}",
                path
            )));
        }
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            return Err(TxChartError::InvalidArgument(format!(
                "Directory does not exist: {}",
                parent.display()
            )));
        }
    }

    Ok(())
}

fn run(args: Args) -> Result<(), TxChartError> {
    let records = load_records(&args.file)?;

    let request = ChartRequest {
        span: args.span,
        today: args.today.unwrap_or_else(|| Utc::now().date_naive()),
        granularity: args.granularity.clone(),
        theme: args.theme.theme(),
        width: args.width,
    };

    let source: Option<Box<dyn QuoteSource>> = match (args.usd_price, args.quote_file.as_ref()) {
        (Some(price), _) => Some(Box::new(FixedQuote(price))),
        (None, Some(path)) => Some(Box::new(QuoteFile::new(path.clone()))),
        (None, None) => None,
    };

    let mut feed = PriceFeed::new();
    let quote = match source.as_deref() {
        Some(source) => {
            let quote = feed.activate(source).copied();
            if quote.is_none() {
                print_warning("Price quote unavailable; token fees are shown as $0.00");
            }
            quote
        }
        None => None,
    };

    run_summary(
        &request,
        &records,
        quote.as_ref(),
        get_display_name(&args.file),
        args.quiet,
    );

    if let Some(ref path) = args.output {
        match run_export(&request, &records, quote.as_ref(), path)? {
            RenderOutcome::Rendered { .. } => eprintln!("Chart saved to: {}", path),
            RenderOutcome::Placeholder => {
                print_warning("No transactions available; chart not written")
            }
            RenderOutcome::AwaitingQuote => {
                print_warning("No price quote available; chart not written")
            }
        }
    }

    feed.deactivate();
    Ok(())
}

fn main() {
    let args = Args::parse();

    // Handle --no-color
    if args.no_color {
        colored::control::set_override(false);
    }
    init_tracing(args.no_color);

    if let Err(e) = validate(&args) {
        print_error(&e.to_string());
        std::process::exit(1);
    }

    if let Err(e) = run(args) {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}
