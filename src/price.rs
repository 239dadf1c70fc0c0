//! Native token price quotes and fee conversion

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;

use crate::error::TxChartError;
use crate::records::{TxHistoryRecord, parse_decimal};

/// Reference fiat currency of every quote
pub const QUOTE_CURRENCY: &str = "USD";

/// Latest USD price of the native token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceQuote {
    pub price: Decimal,
}

/// USD value of a bucket's fees.
///
/// A server-supplied USD figure always wins. Otherwise the token fee is multiplied
/// by the quote price, which counts as zero when no quote has loaded yet.
pub fn fee_in_usd(record: &TxHistoryRecord, quote: Option<&PriceQuote>) -> Decimal {
    if let Some(usd) = record.fees_paid_in_usd {
        return usd;
    }
    let price = quote.map(|q| q.price).unwrap_or(Decimal::ZERO);
    record
        .fee_amount_in_token
        .checked_mul(price)
        .unwrap_or_else(|| {
            tracing::warn!(
                date = record.date,
                fee = %record.fee_amount_in_token,
                %price,
                "fee conversion overflowed, using zero"
            );
            Decimal::ZERO
        })
}

/// Somewhere a quote can be fetched from
pub trait QuoteSource {
    fn fetch(&self) -> Result<PriceQuote, TxChartError>;
}

/// A price given up front
pub struct FixedQuote(pub Decimal);

impl QuoteSource for FixedQuote {
    fn fetch(&self) -> Result<PriceQuote, TxChartError> {
        if self.0.is_sign_negative() {
            return Err(TxChartError::Quote(format!("negative price {}", self.0)));
        }
        Ok(PriceQuote { price: self.0 })
    }
}

/// Pricing response saved to disk: `{"quote": {"USD": {"price": ...}}}`
pub struct QuoteFile {
    path: String,
}

#[derive(Deserialize)]
struct PricingDocument {
    quote: HashMap<String, QuoteEntry>,
}

#[derive(Deserialize)]
struct QuoteEntry {
    price: Value,
}

impl QuoteFile {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl QuoteSource for QuoteFile {
    fn fetch(&self) -> Result<PriceQuote, TxChartError> {
        let body = std::fs::read_to_string(&self.path).map_err(|source| TxChartError::Io {
            path: self.path.clone(),
            source,
        })?;
        parse_quote(&body).map_err(|e| match e {
            QuoteParseError::Json(source) => TxChartError::Json {
                path: self.path.clone(),
                source,
            },
            QuoteParseError::Missing(msg) => TxChartError::Quote(msg),
        })
    }
}

enum QuoteParseError {
    Json(serde_json::Error),
    Missing(String),
}

fn parse_quote(body: &str) -> Result<PriceQuote, QuoteParseError> {
    let document: PricingDocument = serde_json::from_str(body).map_err(QuoteParseError::Json)?;
    let entry = document
        .quote
        .get(QUOTE_CURRENCY)
        .ok_or_else(|| QuoteParseError::Missing(format!("no {} quote", QUOTE_CURRENCY)))?;
    let price = parse_decimal(&entry.price)
        .ok_or_else(|| QuoteParseError::Missing(format!("{} price is not a number", QUOTE_CURRENCY)))?;
    Ok(PriceQuote { price })
}

/// Generation of a quote request; only the newest one may land
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

/// Holds the latest quote for a mounted view.
///
/// The quote is fetched once per activation. Failures leave the quote absent
/// (or at its previous value) and are only logged.
#[derive(Debug, Default)]
pub struct PriceFeed {
    current: Option<PriceQuote>,
    issued: u64,
    active: bool,
}

impl PriceFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&PriceQuote> {
        self.current.as_ref()
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket(self.issued)
    }

    /// Apply a fetch result. Returns true when a new quote was stored.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<PriceQuote, TxChartError>,
    ) -> bool {
        if ticket.0 != self.issued {
            tracing::debug!(ticket = ticket.0, latest = self.issued, "dropping stale quote response");
            return false;
        }
        match result {
            Ok(quote) => {
                tracing::info!(price = %quote.price, currency = QUOTE_CURRENCY, "price quote loaded");
                self.current = Some(quote);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "price quote fetch failed");
                false
            }
        }
    }

    /// Fetch from `source` unless this feed is already active
    pub fn activate(&mut self, source: &dyn QuoteSource) -> Option<&PriceQuote> {
        if !self.active {
            self.active = true;
            let ticket = self.begin_fetch();
            let result = source.fetch();
            self.complete(ticket, result);
        }
        self.current.as_ref()
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }
}
