//! Dual-axis transaction history chart

mod colors;
mod dual_axis;
mod tooltip;

pub use colors::{DARK_THEME, LIGHT_THEME, Theme};
pub use dual_axis::to_chart;
pub use tooltip::{TooltipParam, TooltipSpec, format_count, format_usd};

use crate::series::{Granularity, SeriesPoint, TxSeries};

pub const TRANSACTIONS_SERIES: &str = "Transactions";
pub const FEES_SERIES: &str = "Fees";

/// Container height in CSS pixels; width follows the viewport
pub const CHART_HEIGHT: u32 = 300;

/// Widest viewport accepted from the command line
pub const MAX_WIDTH: u32 = 16_384;

/// Viewport widths below which the small/large layouts apply
const SMALL_BREAKPOINT: u32 = 600;
const LARGE_BREAKPOINT: u32 = 1280;

/// Responsive layout flags resolved from the viewport
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Breakpoints {
    pub below_small: bool,
    pub below_large: bool,
}

impl Breakpoints {
    pub fn for_width(width: u32) -> Self {
        Self {
            below_small: width < SMALL_BREAKPOINT,
            below_large: width < LARGE_BREAKPOINT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendSpec {
    pub data: Vec<String>,
    pub text_color: String,
    pub item_gap: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAxis {
    pub labels: Vec<String>,
    pub label_rotate: f64,
    pub label_color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueAxis {
    pub name: String,
    pub offset: f64,
    pub label_rotate: f64,
    pub label_color: String,
    /// Split line color; `None` hides split lines
    pub split_line: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub name: String,
    pub color: String,
    pub points: Vec<SeriesPoint>,
    pub show_symbol: bool,
    pub area: Option<Gradient>,
    pub y_axis_index: u8,
}

/// Everything the rendering surface needs to draw the chart.
///
/// Built fresh on every render; nothing keeps a reference to it afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub background: String,
    pub palette: Vec<String>,
    pub legend: LegendSpec,
    pub tooltip: TooltipSpec,
    pub x_axis: CategoryAxis,
    /// Transactions on the left, fees (USD) on the right
    pub y_axes: [ValueAxis; 2],
    pub series: [LineSeries; 2],
}

impl ChartConfig {
    /// Set the y-axis offset and label rotation for a responsive layout
    pub fn apply_breakpoints(&mut self, breakpoints: Breakpoints) {
        let offset = if breakpoints.below_small { -14.0 } else { 0.0 };
        let (left_rotate, right_rotate) = if breakpoints.below_large {
            (45.0, -45.0)
        } else {
            (0.0, 0.0)
        };
        let [left, right] = &mut self.y_axes;
        left.offset = offset;
        left.label_rotate = left_rotate;
        right.offset = offset;
        right.label_rotate = right_rotate;
    }

    /// Tooltip HTML for every bucket, in axis order
    pub fn tooltips(&self) -> Vec<String> {
        (0..self.x_axis.labels.len())
            .filter_map(|index| self.tooltip_at(index))
            .collect()
    }

    /// Tooltip HTML for the bucket at `index`
    pub fn tooltip_at(&self, index: usize) -> Option<String> {
        let params: Vec<TooltipParam<'_>> = self
            .series
            .iter()
            .filter_map(|s| {
                s.points.get(index).map(|point| TooltipParam {
                    series_name: &s.name,
                    point,
                })
            })
            .collect();
        if params.is_empty() {
            return None;
        }
        Some(self.tooltip.format(&params))
    }
}

/// Assemble the chart for one render pass
pub fn build_chart_config(
    series: TxSeries,
    granularity: &Granularity,
    theme: &Theme,
    breakpoints: Breakpoints,
) -> ChartConfig {
    let palette = vec![
        theme.chart_line_main.to_string(),
        theme.chart_pie_yes.to_string(),
    ];
    let TxSeries {
        transactions,
        fees,
        x_labels,
    } = series;

    let mut config = ChartConfig {
        background: theme.background.to_string(),
        legend: LegendSpec {
            data: vec![TRANSACTIONS_SERIES.to_string(), FEES_SERIES.to_string()],
            text_color: theme.font_primary.to_string(),
            item_gap: 20.0,
        },
        tooltip: TooltipSpec {
            granularity: granularity.clone(),
            palette: palette.clone(),
        },
        x_axis: CategoryAxis {
            labels: x_labels,
            label_rotate: 45.0,
            label_color: theme.font_primary.to_string(),
        },
        y_axes: [
            ValueAxis {
                name: TRANSACTIONS_SERIES.to_string(),
                offset: 0.0,
                label_rotate: 0.0,
                label_color: theme.font_primary.to_string(),
                split_line: Some(theme.font_primary.to_string()),
            },
            ValueAxis {
                name: "Fees (USD)".to_string(),
                offset: 0.0,
                label_rotate: 0.0,
                label_color: palette[1].clone(),
                split_line: None,
            },
        ],
        series: [
            LineSeries {
                name: TRANSACTIONS_SERIES.to_string(),
                color: palette[0].clone(),
                points: transactions,
                show_symbol: true,
                area: Some(Gradient {
                    start: theme.chart_line_gradient_start.to_string(),
                    end: theme.chart_line_gradient_end.to_string(),
                }),
                y_axis_index: 0,
            },
            LineSeries {
                name: FEES_SERIES.to_string(),
                color: palette[1].clone(),
                points: fees,
                show_symbol: false,
                area: None,
                y_axis_index: 1,
            },
        ],
        palette,
    };
    config.apply_breakpoints(breakpoints);
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn sample_series() -> TxSeries {
        let point = |value: i64, name: &str| SeriesPoint {
            value: Decimal::from(value),
            name: name.to_string(),
        };
        TxSeries {
            transactions: vec![
                point(0, "2023-01-01T00:00:00.000Z"),
                point(5, "2023-01-02T00:00:00.000Z"),
            ],
            fees: vec![
                point(0, "2023-01-01T00:00:00.000Z"),
                point(20, "2023-01-02T00:00:00.000Z"),
            ],
            x_labels: vec!["Jan 01".to_string(), "Jan 02".to_string()],
        }
    }

    #[test]
    fn test_breakpoints_for_width() {
        assert_eq!(
            Breakpoints::for_width(480),
            Breakpoints {
                below_small: true,
                below_large: true
            }
        );
        assert_eq!(
            Breakpoints::for_width(1024),
            Breakpoints {
                below_small: false,
                below_large: true
            }
        );
        assert_eq!(Breakpoints::for_width(1920), Breakpoints::default());
    }

    #[test]
    fn test_config_carries_series() {
        let config = build_chart_config(
            sample_series(),
            &Granularity::Day,
            &DARK_THEME,
            Breakpoints::default(),
        );
        assert_eq!(config.x_axis.labels, vec!["Jan 01", "Jan 02"]);
        assert_eq!(config.series[0].name, TRANSACTIONS_SERIES);
        assert_eq!(config.series[1].name, FEES_SERIES);
        assert_eq!(config.series[1].y_axis_index, 1);
        assert_eq!(config.series[1].points[1].value, Decimal::from(20));
        assert_eq!(config.legend.data, vec![TRANSACTIONS_SERIES, FEES_SERIES]);
    }

    #[test]
    fn test_config_uses_theme_tokens() {
        let config = build_chart_config(
            sample_series(),
            &Granularity::Day,
            &LIGHT_THEME,
            Breakpoints::default(),
        );
        assert_eq!(
            config.palette,
            vec![LIGHT_THEME.chart_line_main, LIGHT_THEME.chart_pie_yes]
        );
        assert_eq!(config.background, LIGHT_THEME.background);
        assert_eq!(config.y_axes[1].label_color, LIGHT_THEME.chart_pie_yes);
        assert_eq!(config.legend.text_color, LIGHT_THEME.font_primary);
        assert_eq!(
            config.series[0].area,
            Some(Gradient {
                start: LIGHT_THEME.chart_line_gradient_start.to_string(),
                end: LIGHT_THEME.chart_line_gradient_end.to_string(),
            })
        );
    }

    #[test]
    fn test_small_layout() {
        let config = build_chart_config(
            sample_series(),
            &Granularity::Day,
            &DARK_THEME,
            Breakpoints::for_width(400),
        );
        assert_eq!(config.y_axes[0].offset, -14.0);
        assert_eq!(config.y_axes[1].offset, -14.0);
        assert_eq!(config.y_axes[0].label_rotate, 45.0);
        assert_eq!(config.y_axes[1].label_rotate, -45.0);
    }

    #[test]
    fn test_wide_layout() {
        let config = build_chart_config(
            sample_series(),
            &Granularity::Day,
            &DARK_THEME,
            Breakpoints::for_width(1600),
        );
        assert_eq!(config.y_axes[0].offset, 0.0);
        assert_eq!(config.y_axes[0].label_rotate, 0.0);
        assert_eq!(config.y_axes[1].label_rotate, 0.0);
    }

    #[test]
    fn test_builds_are_independent() {
        let a = build_chart_config(
            sample_series(),
            &Granularity::Day,
            &DARK_THEME,
            Breakpoints::default(),
        );
        let b = build_chart_config(
            TxSeries::default(),
            &Granularity::Month,
            &LIGHT_THEME,
            Breakpoints::for_width(300),
        );
        assert_eq!(a.x_axis.labels.len(), 2);
        assert!(b.x_axis.labels.is_empty());
        assert_ne!(a, b);
    }

    #[test]
    fn test_tooltip_at() {
        let config = build_chart_config(
            sample_series(),
            &Granularity::Day,
            &DARK_THEME,
            Breakpoints::default(),
        );
        let html = config.tooltip_at(1).unwrap();
        assert!(html.contains("Jan 02"));
        assert!(html.contains("Transactions: 5"));
        assert!(html.contains("Fees: $20.00"));
        assert!(config.tooltip_at(2).is_none());
    }

    #[test]
    fn test_apply_breakpoints_relayouts_only_axes() {
        let wide = build_chart_config(
            sample_series(),
            &Granularity::Day,
            &DARK_THEME,
            Breakpoints::for_width(1600),
        );
        let mut relaid = wide.clone();
        relaid.apply_breakpoints(Breakpoints::for_width(400));

        assert_eq!(relaid.y_axes[0].offset, -14.0);
        assert_eq!(relaid.y_axes[1].label_rotate, -45.0);
        assert_eq!(relaid.series, wide.series);
        assert_eq!(
            relaid,
            build_chart_config(
                sample_series(),
                &Granularity::Day,
                &DARK_THEME,
                Breakpoints::for_width(400),
            )
        );
    }

    #[test]
    fn test_tooltips_cover_every_bucket() {
        let config = build_chart_config(
            sample_series(),
            &Granularity::Day,
            &DARK_THEME,
            Breakpoints::default(),
        );
        let tips = config.tooltips();
        assert_eq!(tips.len(), 2);
        assert!(tips[0].contains("Jan 01"));
        assert!(tips[1].contains("Fees: $20.00"));
    }
}
