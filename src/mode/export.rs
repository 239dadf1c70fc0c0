//! Chart export mode (PNG or HTML)

use std::cell::RefCell;
use std::rc::Rc;

use crate::chart::CHART_HEIGHT;
use crate::error::TxChartError;
use crate::price::PriceQuote;
use crate::records::TxHistoryRecord;
use crate::surface::{ChartView, ExportSurfaces, RenderOutcome, Size, Viewport};

use super::ChartRequest;

/// Mount a chart view on `output_path`, render once and dispose
pub fn run_export(
    request: &ChartRequest,
    records: &[TxHistoryRecord],
    quote: Option<&PriceQuote>,
    output_path: &str,
) -> Result<RenderOutcome, TxChartError> {
    let viewport = Rc::new(RefCell::new(Viewport::new(Size {
        width: request.width,
        height: CHART_HEIGHT,
    })));
    let surfaces = Rc::new(RefCell::new(ExportSurfaces::new(Size {
        width: request.width,
        height: CHART_HEIGHT,
    })));

    let mut view = ChartView::new(output_path, Rc::clone(&surfaces), Rc::clone(&viewport));
    let outcome = view.render(&request.inputs(records), quote);
    view.dispose();

    outcome
}
