//! Axis tooltip formatting

use chrono::DateTime;
use rust_decimal::{Decimal, RoundingStrategy};

use super::FEES_SERIES;
use crate::series::{Granularity, SeriesPoint};

/// One series' point under the axis pointer
pub struct TooltipParam<'a> {
    pub series_name: &'a str,
    pub point: &'a SeriesPoint,
}

/// How the axis tooltip renders the points at one date
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipSpec {
    pub granularity: Granularity,
    /// Dot color per series, in series order
    pub palette: Vec<String>,
}

impl TooltipSpec {
    /// HTML for the points at one axis position; empty without points.
    ///
    /// Attributes are single-quoted so the markup embeds in a JS template literal.
    pub fn format(&self, params: &[TooltipParam<'_>]) -> String {
        let Some(first) = params.first() else {
            return String::new();
        };

        let rows: String = params
            .iter()
            .enumerate()
            .map(|(idx, p)| {
                let color = self.palette.get(idx).map(String::as_str).unwrap_or("");
                let value = if p.series_name == FEES_SERIES {
                    format!("${}", format_usd(p.point.value))
                } else {
                    format_count(p.point.value)
                };
                format!(
                    "<div style='display:flex;padding:2px;'>\
                     <div style='height:10px;width:10px;border-radius:50%;align-self:center;margin-right:10px;background-color:{};'></div>\
                     <div style='text-align:center;'>{}: {}</div>\
                     </div>",
                    color, p.series_name, value
                )
            })
            .collect();

        format!("<div>{}</div> {}", self.header(&first.point.name), rows)
    }

    fn header(&self, name: &str) -> String {
        match DateTime::parse_from_rfc3339(name) {
            Ok(date) => date.format(self.granularity.tooltip_format()).to_string(),
            Err(_) => name.to_string(),
        }
    }
}

/// Two fixed decimals with thousands separators (e.g. "1,234.50")
pub fn format_usd(value: Decimal) -> String {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    group_thousands(&rounded.to_string())
}

/// Whole number with thousands separators
pub fn format_count(value: Decimal) -> String {
    group_thousands(&value.round().normalize().to_string())
}

fn group_thousands(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}
