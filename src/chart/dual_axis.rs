//! ECharts model for the dual-axis chart (transactions line over fee line)

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AreaStyle, AxisLabel, AxisType, Color, ColorStop, Formatter, ItemStyle, JsFunction,
        LineStyle, SplitLine, TextStyle, Tooltip, Trigger,
    },
    series::Line,
};
use rust_decimal::prelude::ToPrimitive;

use super::{CategoryAxis, ChartConfig, LineSeries, ValueAxis};

const CHART_TITLE: &str = "Transaction History";

/// Translate a chart config into the charming model
pub fn to_chart(config: &ChartConfig) -> Chart {
    let mut chart = Chart::new()
        .background_color(Color::Value(config.background.clone()))
        .title(
            Title::new()
                .text(CHART_TITLE)
                .left("center")
                .text_style(
                    TextStyle::new()
                        .color(config.legend.text_color.as_str())
                        .font_size(16),
                ),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .formatter(Formatter::Function(tooltip_formatter(config))),
        )
        .legend(
            Legend::new()
                .data(config.legend.data.clone())
                .top("8%")
                .item_gap(config.legend.item_gap)
                .text_style(TextStyle::new().color(config.legend.text_color.as_str())),
        )
        .grid(
            Grid::new()
                .left("15%")
                .right("15%")
                .top("20%")
                .contain_label(true),
        )
        .x_axis(category_axis(&config.x_axis));

    for axis in &config.y_axes {
        chart = chart.y_axis(value_axis(axis));
    }
    for series in &config.series {
        chart = chart.series(line(series));
    }

    chart
}

/// Axis tooltip that picks the prebuilt HTML for the hovered bucket.
///
/// Tooltip markup never contains backticks, double quotes or backslashes, so each
/// entry is a plain template literal.
fn tooltip_formatter(config: &ChartConfig) -> JsFunction {
    let tips: Vec<String> = config
        .tooltips()
        .into_iter()
        .map(|tip| format!("`{}`", tip))
        .collect();
    JsFunction::new_with_args(
        "params",
        &format!(
            "var tips = [{}]; var p = Array.isArray(params) ? params[0] : params; \
             return (p && tips[p.dataIndex]) || '';",
            tips.join(",")
        ),
    )
}

fn category_axis(axis: &CategoryAxis) -> Axis {
    Axis::new()
        .type_(AxisType::Category)
        .boundary_gap(false)
        .data(axis.labels.clone())
        .axis_label(
            AxisLabel::new()
                .rotate(axis.label_rotate)
                .color(axis.label_color.as_str()),
        )
}

fn value_axis(axis: &ValueAxis) -> Axis {
    let split_line = match &axis.split_line {
        Some(color) => {
            SplitLine::new().line_style(LineStyle::new().width(0.5).color(color.as_str()))
        }
        None => SplitLine::new().show(false),
    };

    Axis::new()
        .type_(AxisType::Value)
        .name(axis.name.as_str())
        .offset(axis.offset)
        .name_text_style(TextStyle::new().color(axis.label_color.as_str()))
        .axis_label(
            AxisLabel::new()
                .rotate(axis.label_rotate)
                .color(axis.label_color.as_str()),
        )
        .split_line(split_line)
}

fn line(series: &LineSeries) -> Line {
    // Decimal values only become f64 here, at the drawing boundary
    let data: Vec<f64> = series
        .points
        .iter()
        .map(|p| p.value.to_f64().unwrap_or_default())
        .collect();

    let mut line = Line::new()
        .name(series.name.as_str())
        .data(data)
        .smooth(true)
        .show_symbol(series.show_symbol)
        .y_axis_index(series.y_axis_index)
        .line_style(LineStyle::new().width(2).color(series.color.as_str()))
        .item_style(ItemStyle::new().color(series.color.as_str()));

    if let Some(gradient) = &series.area {
        line = line.area_style(AreaStyle::new().color(Color::LinearGradient {
            x: 0.0,
            y: 0.0,
            x2: 0.0,
            y2: 1.0,
            color_stops: vec![
                ColorStop::new(0.0, gradient.start.as_str()),
                ColorStop::new(1.0, gradient.end.as_str()),
            ],
        }));
    }

    line
}
