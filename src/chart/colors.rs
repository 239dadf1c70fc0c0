//! Theme color tokens for charts

/// Named color tokens the chart reads from the dashboard theme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub background: &'static str,
    pub font_primary: &'static str,
    /// Transactions line, tooltip pointer
    pub chart_line_main: &'static str,
    /// Fees line and right axis
    pub chart_pie_yes: &'static str,
    pub chart_line_gradient_start: &'static str,
    pub chart_line_gradient_end: &'static str,
}

pub const DARK_THEME: Theme = Theme {
    background: "#0A0A0C",                        // Near black
    font_primary: "#FFFFFF",                      // White
    chart_line_main: "#68B4FF",                   // Blue
    chart_pie_yes: "#48F89C",                     // Green
    chart_line_gradient_start: "rgba(104,180,255,0.5)",
    chart_line_gradient_end: "rgba(104,180,255,0)",
};

pub const LIGHT_THEME: Theme = Theme {
    background: "#FFFFFF",
    font_primary: "#1B1E23",
    chart_line_main: "#1888F8",                   // Vivid blue
    chart_pie_yes: "#10A860",                     // Green
    chart_line_gradient_start: "rgba(24,136,248,0.4)",
    chart_line_gradient_end: "rgba(24,136,248,0)",
};
